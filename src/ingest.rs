// Ingestion of measurement exports: CSV files and JSON document dumps.
//
// Export headers vary by device locale and firmware, so rows are read as
// untyped header/value pairs and handed to the normalizer instead of a
// fixed serde struct. Unreadable rows are skipped with a warning; a file
// of garbage rows loads as an empty vec, not an error.

use crate::record::{normalize, PitchRecord, RawRecord, RawValue};
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error: {source}")]
    Json { source: serde_json::Error },
}

// ---------------------------------------------------------------------------
// Reader-based loader (private, enables testing without temp files)
// ---------------------------------------------------------------------------

fn load_records_from_reader<R: Read>(
    rdr: R,
    player_id: &str,
) -> Result<Vec<PitchRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!("skipping unreadable row {}: {}", i + 1, e);
                continue;
            }
        };

        let mut raw = RawRecord::new(player_id);
        for (header, cell) in headers.iter().zip(row.iter()) {
            raw.fields
                .insert(header.trim().to_string(), RawValue::Str(cell.to_string()));
        }
        records.push(normalize(&raw));
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load and normalize one player's measurement export from a CSV file.
pub fn load_records(path: &Path, player_id: &str) -> Result<Vec<PitchRecord>, IngestError> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_records_from_reader(file, player_id).map_err(|e| IngestError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// JSON document loader
// ---------------------------------------------------------------------------

/// Load and normalize records from a JSON export: an array of flat objects,
/// one per pitch, as produced by the hosted datastore. Non-scalar fields are
/// ignored with a warning.
pub fn load_records_from_json(
    text: &str,
    player_id: &str,
) -> Result<Vec<PitchRecord>, IngestError> {
    let docs: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(text).map_err(|e| IngestError::Json { source: e })?;

    let mut records = Vec::new();
    for (i, doc) in docs.into_iter().enumerate() {
        let mut raw = RawRecord::new(player_id);
        for (key, value) in doc {
            let value = match value {
                serde_json::Value::Null => RawValue::Null,
                serde_json::Value::String(s) => RawValue::Str(s),
                serde_json::Value::Number(n) => match n.as_f64() {
                    Some(v) => RawValue::Num(v),
                    None => {
                        warn!("document {}: field '{}' out of f64 range, ignoring", i, key);
                        continue;
                    }
                },
                other => {
                    warn!(
                        "document {}: ignoring non-scalar field '{}' of type {}",
                        i,
                        key,
                        json_type_name(&other)
                    );
                    continue;
                }
            };
            raw.fields.insert(key, value);
        }
        records.push(normalize(&raw));
    }
    Ok(records)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
