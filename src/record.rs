// Raw pitch records and normalization to the canonical shape.
//
// Uploaded datasets arrive with inconsistent headers: Japanese or English,
// several synonyms per field, numbers stored as strings, percent suffixes.
// Each canonical field is resolved through an ordered candidate-key table
// (first non-empty match wins), then coerced with a lossy-but-total policy:
// a missing or unparseable numeric value becomes 0, never NaN.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

// ---------------------------------------------------------------------------
// Raw (pre-normalization) representation
// ---------------------------------------------------------------------------

/// A single cell of an uploaded dataset. Untyped on purpose: the upload
/// pipeline delivers strings, numbers, and explicit nulls interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Num(f64),
    Str(String),
    Null,
}

impl RawValue {
    /// True when the value carries no usable content (null or blank string).
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Str(s) => s.trim().is_empty(),
            RawValue::Num(_) => false,
        }
    }

    /// String rendering used by text fields and as the coercion fallback.
    fn to_text(&self) -> String {
        match self {
            RawValue::Str(s) => s.trim().to_string(),
            RawValue::Num(n) => format!("{n}"),
            RawValue::Null => String::new(),
        }
    }
}

/// One uploaded row, keyed by whatever headers the source file used.
/// This type must never leak past the normalizer boundary.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub player_id: String,
    pub fields: HashMap<String, RawValue>,
}

impl RawRecord {
    pub fn new(player_id: impl Into<String>) -> Self {
        RawRecord {
            player_id: player_id.into(),
            fields: HashMap::new(),
        }
    }

    /// Convenience constructor for building records from (key, value) pairs.
    pub fn from_pairs<I, K>(player_id: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, RawValue)>,
        K: Into<String>,
    {
        RawRecord {
            player_id: player_id.into(),
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical record
// ---------------------------------------------------------------------------

/// Canonical per-pitch measurement. Numeric fields default to 0 when the
/// source value was missing or unparseable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchRecord {
    pub player_id: String,
    /// Calendar date as recorded, `YYYY/MM/DD`-like. Display and sort key
    /// only; no timezone semantics.
    pub date: String,
    /// Release speed in kph.
    pub speed: f64,
    /// Spin rate in rpm.
    pub spin: f64,
    /// Movement-inducing spin component in rpm.
    pub true_spin: f64,
    /// Percent of total spin that is movement-inducing, 0-100.
    pub spin_efficiency: f64,
    /// Clock-position label (e.g. "12:00"), passed through verbatim.
    pub spin_direction: String,
    /// Vertical break in cm.
    pub vertical_movement: f64,
    /// Horizontal break in cm.
    pub horizontal_movement: f64,
    /// Release height in meters.
    pub release_point: f64,
    pub strike: bool,
}

/// Per-pitch metric selector, used by the ranking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchMetric {
    Speed,
    Spin,
    TrueSpin,
    SpinEfficiency,
    VerticalMovement,
    HorizontalMovement,
}

impl PitchMetric {
    pub fn value_of(&self, record: &PitchRecord) -> f64 {
        match self {
            PitchMetric::Speed => record.speed,
            PitchMetric::Spin => record.spin,
            PitchMetric::TrueSpin => record.true_spin,
            PitchMetric::SpinEfficiency => record.spin_efficiency,
            PitchMetric::VerticalMovement => record.vertical_movement,
            PitchMetric::HorizontalMovement => record.horizontal_movement,
        }
    }
}

// ---------------------------------------------------------------------------
// Candidate-key tables
// ---------------------------------------------------------------------------

// Header synonyms observed across upload sources, highest priority first.

const DATE_KEYS: &[&str] = &["日付", "date", "Date", "DATE", "測定日"];

const SPEED_KEYS: &[&str] = &[
    "速度(kph)",
    "速度",
    "releaseSpeed",
    "Release Speed",
    "speed",
    "Speed",
    "リリース速度",
    "球速",
    "RELEASE_SPEED",
    "release_speed",
];

const SPIN_KEYS: &[&str] = &[
    "SPIN",
    "Spin",
    "spinRate",
    "Spin Rate",
    "spin",
    "回転数",
    "スピンレート",
    "SPIN_RATE",
    "spin_rate",
];

const TRUE_SPIN_KEYS: &[&str] = &["TRUE SPIN", "True Spin", "trueSpin", "true_spin"];

const SPIN_EFF_KEYS: &[&str] = &[
    "SPIN EFF.",
    "Spin Efficiency",
    "spinEff",
    "spin_efficiency",
];

const SPIN_DIRECTION_KEYS: &[&str] = &[
    "回転軸",
    "SPIN DIRECTION",
    "Spin Direction",
    "spinDirection",
];

// 線の変化量 appears in real uploads alongside the expected 縦の変化量;
// both are treated as the vertical break column.
const VERTICAL_KEYS: &[&str] = &[
    "縦の変化量(cm)",
    "線の変化量(cm)",
    "verticalMovement",
    "Vertical Movement",
    "vertical_movement",
];

const HORIZONTAL_KEYS: &[&str] = &[
    "軸の変化量(cm)",
    "horizontalMovement",
    "Horizontal Movement",
    "horizontal_movement",
];

const RELEASE_POINT_KEYS: &[&str] = &[
    "リリースポイントの高さ(m)",
    "releasePoint",
    "release_point",
];

const STRIKE_KEYS: &[&str] = &["ストライク", "strike", "Strike"];

/// The fixed affirmative token for the strike flag. Anything else is a ball.
pub const STRIKE_AFFIRMATIVE: &str = "はい";

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Map a raw row to the canonical record shape. Total: never fails, never
/// yields NaN. Emits a `warn!` diagnostic when a required field (speed,
/// spin) cannot be parsed, since those silently becoming 0 usually means a
/// malformed upload.
pub fn normalize(raw: &RawRecord) -> PitchRecord {
    PitchRecord {
        player_id: raw.player_id.clone(),
        date: text_field(raw, DATE_KEYS),
        speed: required_numeric_field(raw, SPEED_KEYS, "speed"),
        spin: required_numeric_field(raw, SPIN_KEYS, "spin"),
        true_spin: numeric_field(raw, TRUE_SPIN_KEYS),
        spin_efficiency: numeric_field(raw, SPIN_EFF_KEYS),
        spin_direction: text_field(raw, SPIN_DIRECTION_KEYS),
        vertical_movement: numeric_field(raw, VERTICAL_KEYS),
        horizontal_movement: numeric_field(raw, HORIZONTAL_KEYS),
        release_point: numeric_field(raw, RELEASE_POINT_KEYS),
        strike: strike_field(raw),
    }
}

/// Resolve the first non-empty candidate key.
fn find_field<'a>(raw: &'a RawRecord, candidates: &[&str]) -> Option<&'a RawValue> {
    candidates
        .iter()
        .find_map(|key| raw.fields.get(*key).filter(|v| !v.is_empty()))
}

fn text_field(raw: &RawRecord, candidates: &[&str]) -> String {
    find_field(raw, candidates)
        .map(RawValue::to_text)
        .unwrap_or_default()
}

fn numeric_field(raw: &RawRecord, candidates: &[&str]) -> f64 {
    find_field(raw, candidates)
        .and_then(coerce_numeric)
        .unwrap_or(0.0)
}

fn required_numeric_field(raw: &RawRecord, candidates: &[&str], name: &str) -> f64 {
    match find_field(raw, candidates).and_then(coerce_numeric) {
        Some(v) => v,
        None => {
            warn!(
                "record for player '{}' has no parseable {} value, defaulting to 0",
                raw.player_id, name
            );
            0.0
        }
    }
}

fn strike_field(raw: &RawRecord) -> bool {
    find_field(raw, STRIKE_KEYS)
        .map(|v| v.to_text() == STRIKE_AFFIRMATIVE)
        .unwrap_or(false)
}

/// Coerce a raw value to a finite f64. Strings are stripped of every
/// character except digits, `.`, and `-` first, which also absorbs percent
/// suffixes, thousands separators, and unit annotations.
fn coerce_numeric(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Num(n) => n.is_finite().then_some(*n),
        RawValue::Str(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        RawValue::Null => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
