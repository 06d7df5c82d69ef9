// Per-player summary statistics over a filtered record set.
//
// The caller owns all filtering (player selection, date range); this module
// only reduces the slice it is given. Every function here is total: empty
// input yields zeroed stats, never NaN or a panic.

use crate::record::PitchRecord;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Summary statistics for one player's record subset. Recomputed on demand,
/// never persisted; identical input always yields identical output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateStats {
    pub count: usize,
    pub avg_speed: f64,
    pub max_speed: f64,
    pub avg_spin: f64,
    pub max_spin: f64,
    pub avg_true_spin: f64,
    pub avg_spin_efficiency: f64,
    /// Percentage of recorded pitches flagged as a strike, 0-100.
    pub strike_rate: f64,
}

impl AggregateStats {
    /// The defined "no data" value: all zeros.
    pub fn empty() -> Self {
        AggregateStats {
            count: 0,
            avg_speed: 0.0,
            max_speed: 0.0,
            avg_spin: 0.0,
            max_spin: 0.0,
            avg_true_spin: 0.0,
            avg_spin_efficiency: 0.0,
            strike_rate: 0.0,
        }
    }
}

/// A player's summary stats paired with their id, for cohort-wide
/// computations (percentile ranks, comparisons).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAggregate {
    pub player_id: String,
    pub stats: AggregateStats,
}

/// Summary-level metric selector, used by percentile ranks and chart specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateMetric {
    AvgSpeed,
    MaxSpeed,
    AvgSpin,
    MaxSpin,
    AvgTrueSpin,
    AvgSpinEfficiency,
    StrikeRate,
}

impl AggregateMetric {
    pub fn value_of(&self, stats: &AggregateStats) -> f64 {
        match self {
            AggregateMetric::AvgSpeed => stats.avg_speed,
            AggregateMetric::MaxSpeed => stats.max_speed,
            AggregateMetric::AvgSpin => stats.avg_spin,
            AggregateMetric::MaxSpin => stats.max_spin,
            AggregateMetric::AvgTrueSpin => stats.avg_true_spin,
            AggregateMetric::AvgSpinEfficiency => stats.avg_spin_efficiency,
            AggregateMetric::StrikeRate => stats.strike_rate,
        }
    }

    /// True for metrics that are already on a 0-100 percentage scale.
    pub fn is_percentage(&self) -> bool {
        matches!(
            self,
            AggregateMetric::AvgSpinEfficiency | AggregateMetric::StrikeRate
        )
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute summary statistics over an already-filtered record slice.
pub fn aggregate(records: &[PitchRecord]) -> AggregateStats {
    if records.is_empty() {
        return AggregateStats::empty();
    }

    let strikes = records.iter().filter(|r| r.strike).count();

    AggregateStats {
        count: records.len(),
        avg_speed: mean_of(records, |r| r.speed),
        max_speed: max_of(records, |r| r.speed),
        avg_spin: mean_of(records, |r| r.spin),
        max_spin: max_of(records, |r| r.spin),
        avg_true_spin: mean_of(records, |r| r.true_spin),
        avg_spin_efficiency: mean_of(records, |r| r.spin_efficiency),
        strike_rate: strikes as f64 / records.len() as f64 * 100.0,
    }
}

fn mean_of(records: &[PitchRecord], f: impl Fn(&PitchRecord) -> f64) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(&f).sum::<f64>() / records.len() as f64
}

fn max_of(records: &[PitchRecord], f: impl Fn(&PitchRecord) -> f64) -> f64 {
    records.iter().map(&f).fold(0.0_f64, f64::max)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
