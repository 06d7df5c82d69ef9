// Chart configuration loading and parsing (charts.toml).
//
// The metric list and ceilings driving the bar comparison are data, not
// code: deployments with different measurement hardware override them in
// charts.toml. Absent a file, `ChartConfig::default()` carries the
// standard six-metric layout.

use crate::metrics::aggregate::AggregateMetric;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// charts.toml structs
// ---------------------------------------------------------------------------

/// One bar-chart metric: which summary statistic to plot, the axis label,
/// and the fixed ceiling it is normalized against.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricSpec {
    pub metric: AggregateMetric,
    pub label: String,
    pub ceiling: f64,
}

/// Raw deserialization target for the entire charts.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ChartsFile {
    top_n: usize,
    #[serde(rename = "metrics")]
    specs: Vec<MetricSpec>,
}

/// The public chart config assembled from charts.toml.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Bar-chart metrics, in display order.
    pub specs: Vec<MetricSpec>,
    /// Leaderboard length.
    pub top_n: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let spec = |metric, label: &str, ceiling| MetricSpec {
            metric,
            label: label.to_string(),
            ceiling,
        };
        ChartConfig {
            specs: vec![
                spec(AggregateMetric::AvgSpeed, "Average Speed", 200.0),
                spec(AggregateMetric::MaxSpeed, "Max Speed", 200.0),
                spec(AggregateMetric::AvgSpin, "Average Spin", 3000.0),
                spec(AggregateMetric::AvgTrueSpin, "Average True Spin", 3000.0),
                spec(
                    AggregateMetric::AvgSpinEfficiency,
                    "Spin Efficiency",
                    100.0,
                ),
                spec(AggregateMetric::StrikeRate, "Strike Rate", 100.0),
            ],
            top_n: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate a charts.toml document.
pub(crate) fn parse_chart_config(text: &str, path: &Path) -> Result<ChartConfig, ConfigError> {
    let file: ChartsFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = ChartConfig {
        specs: file.specs,
        top_n: file.top_n,
    };

    validate(&config)?;

    Ok(config)
}

/// Load and validate chart configuration from the given TOML file.
pub fn load_chart_config(path: &Path) -> Result<ChartConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    parse_chart_config(&text, path)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &ChartConfig) -> Result<(), ConfigError> {
    if config.specs.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "metrics".into(),
            message: "at least one metric is required".into(),
        });
    }

    for (i, spec) in config.specs.iter().enumerate() {
        if !(spec.ceiling > 0.0 && spec.ceiling.is_finite()) {
            return Err(ConfigError::ValidationError {
                field: format!("metrics[{i}].ceiling"),
                message: format!("must be a positive finite number, got {}", spec.ceiling),
            });
        }
        if spec.label.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("metrics[{i}].label"),
                message: "must not be empty".into(),
            });
        }
    }

    if config.top_n == 0 {
        return Err(ConfigError::ValidationError {
            field: "top_n".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
