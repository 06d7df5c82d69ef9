// Chart-ready comparison series for up to five selected players.
//
// Two normalization schemes: the bar chart scales each metric against a
// fixed ceiling (so heterogeneous units stay visually comparable), the
// radar chart scales non-percentage metrics against the observed maximum
// across the selected cohort. Entities with no records are omitted from a
// point's value map entirely; consumers must treat a missing key as "no
// data", never as zero.

use crate::config::MetricSpec;
use crate::metrics::aggregate::{aggregate, AggregateMetric};
use crate::record::PitchRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Hard cap on how many entities a comparison can hold.
pub const MAX_COMPARE_ENTITIES: usize = 5;

/// One point per metric, with one normalized value per selected entity.
/// Consumed by both bar and radar renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeriesPoint {
    pub label: String,
    pub values: HashMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Bar comparison (fixed ceilings)
// ---------------------------------------------------------------------------

/// Build the bar-chart comparison series: for each metric spec, every
/// selected player's aggregate value scaled to `raw / ceiling * 100` and
/// rounded to one decimal place. Metric order follows `specs`; the
/// selection is capped at [`MAX_COMPARE_ENTITIES`].
pub fn comparison_series(
    selection: &[String],
    records_by_player: &HashMap<String, Vec<PitchRecord>>,
    specs: &[MetricSpec],
) -> Vec<ChartSeriesPoint> {
    let selection = &selection[..selection.len().min(MAX_COMPARE_ENTITIES)];

    specs
        .iter()
        .map(|spec| {
            let mut values = HashMap::new();
            for player_id in selection {
                let Some(records) = records_by_player.get(player_id) else {
                    continue;
                };
                if records.is_empty() {
                    continue;
                }
                let stats = aggregate(records);
                let raw = spec.metric.value_of(&stats);
                values.insert(player_id.clone(), round1(raw / spec.ceiling * 100.0));
            }
            ChartSeriesPoint {
                label: spec.label.clone(),
                values,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Radar comparison (observed cohort maxima)
// ---------------------------------------------------------------------------

/// Metrics shown on the radar, in display order.
const RADAR_METRICS: &[(AggregateMetric, &str)] = &[
    (AggregateMetric::AvgSpeed, "Average Speed"),
    (AggregateMetric::AvgSpin, "Average Spin"),
    (AggregateMetric::AvgTrueSpin, "Average True Spin"),
    (AggregateMetric::AvgSpinEfficiency, "Spin Efficiency"),
    (AggregateMetric::StrikeRate, "Strike Rate"),
];

/// Build the radar series. Speed, spin, and true spin are scaled against
/// the maximum single-pitch value observed across the whole selected
/// cohort; percentage metrics are used directly. Values are rounded to
/// whole numbers for the 0-100 radial axis.
pub fn radar_series(
    selection: &[String],
    records_by_player: &HashMap<String, Vec<PitchRecord>>,
) -> Vec<ChartSeriesPoint> {
    let selection = &selection[..selection.len().min(MAX_COMPARE_ENTITIES)];

    // Observed per-pitch maxima across the cohort; floored at 1 so a
    // cohort with no measurements cannot divide by zero.
    let cohort: Vec<&PitchRecord> = selection
        .iter()
        .filter_map(|id| records_by_player.get(id))
        .flat_map(|records| records.iter())
        .collect();
    let max_speed = observed_max(&cohort, |r| r.speed);
    let max_spin = observed_max(&cohort, |r| r.spin);
    let max_true_spin = observed_max(&cohort, |r| r.true_spin);

    RADAR_METRICS
        .iter()
        .map(|(metric, label)| {
            let mut values = HashMap::new();
            for player_id in selection {
                let Some(records) = records_by_player.get(player_id) else {
                    continue;
                };
                if records.is_empty() {
                    continue;
                }
                let stats = aggregate(records);
                let raw = metric.value_of(&stats);
                let scaled = match metric {
                    AggregateMetric::AvgSpeed => raw / max_speed * 100.0,
                    AggregateMetric::AvgSpin => raw / max_spin * 100.0,
                    AggregateMetric::AvgTrueSpin => raw / max_true_spin * 100.0,
                    _ => raw,
                };
                values.insert(player_id.clone(), scaled.round());
            }
            ChartSeriesPoint {
                label: (*label).to_string(),
                values,
            }
        })
        .collect()
}

fn observed_max(records: &[&PitchRecord], f: impl Fn(&PitchRecord) -> f64) -> f64 {
    records.iter().map(|r| f(r)).fold(1.0_f64, f64::max)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
