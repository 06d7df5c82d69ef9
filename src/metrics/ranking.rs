// Leaderboards and cohort ranks.
//
// A zero-valued metric is treated as a missing measurement, not a competing
// score: a pitch with no recorded spin must not occupy a leaderboard slot.
// Sorts are stable, so equal values keep their input order.

use crate::metrics::aggregate::{AggregateMetric, PlayerAggregate};
use crate::record::{PitchMetric, PitchRecord};
use serde::Serialize;
use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub player_id: String,
    pub value: f64,
    /// Date of the measurement, carried through for display.
    pub date: String,
}

/// A player's 1-based position within a cohort, descending by metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CohortRank {
    pub rank: usize,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// Top `n` records by the given per-pitch metric, descending. Records whose
/// metric value is exactly zero are excluded as "no data" (the normalizer's
/// default for a missing field); negative values are real measurements for
/// the movement metrics and stay rankable. Returns fewer than `n` entries
/// when fewer qualify; callers render their own placeholder for empty slots.
pub fn top_n(records: &[PitchRecord], metric: PitchMetric, n: usize) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = records
        .iter()
        .filter(|r| metric.value_of(r) != 0.0)
        .map(|r| RankingEntry {
            player_id: r.player_id.clone(),
            value: metric.value_of(r),
            date: r.date.clone(),
        })
        .collect();

    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    entries.truncate(n);
    entries
}

// ---------------------------------------------------------------------------
// Cohort rank
// ---------------------------------------------------------------------------

/// 1-based positional rank of `player_id` within the cohort after a stable
/// descending sort by the given summary metric. Ties receive distinct
/// positional ranks. Returns `None` when the player is not in the cohort.
pub fn cohort_rank(
    cohort: &[PlayerAggregate],
    player_id: &str,
    metric: AggregateMetric,
) -> Option<CohortRank> {
    let mut order: Vec<(&str, f64)> = cohort
        .iter()
        .map(|p| (p.player_id.as_str(), metric.value_of(&p.stats)))
        .collect();

    order.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    order
        .iter()
        .position(|(id, _)| *id == player_id)
        .map(|index| CohortRank {
            rank: index + 1,
            total: cohort.len(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::aggregate::{aggregate, AggregateStats};

    fn make_record(player_id: &str, date: &str, speed: f64, spin: f64) -> PitchRecord {
        PitchRecord {
            player_id: player_id.into(),
            date: date.into(),
            speed,
            spin,
            true_spin: 0.0,
            spin_efficiency: 0.0,
            spin_direction: String::new(),
            vertical_movement: 0.0,
            horizontal_movement: 0.0,
            release_point: 0.0,
            strike: false,
        }
    }

    fn make_aggregate(player_id: &str, max_speed: f64) -> PlayerAggregate {
        PlayerAggregate {
            player_id: player_id.into(),
            stats: AggregateStats {
                max_speed,
                ..AggregateStats::empty()
            },
        }
    }

    #[test]
    fn top_n_sorted_descending_and_truncated() {
        let records = vec![
            make_record("a", "2024/04/01", 138.0, 2100.0),
            make_record("b", "2024/04/02", 150.0, 2000.0),
            make_record("c", "2024/04/03", 144.0, 2200.0),
            make_record("d", "2024/04/04", 141.0, 1900.0),
        ];

        let top = top_n(&records, PitchMetric::Speed, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].player_id, "b");
        assert_eq!(top[1].player_id, "c");
        assert_eq!(top[2].player_id, "d");
        for w in top.windows(2) {
            assert!(w[0].value >= w[1].value);
        }
    }

    #[test]
    fn top_n_excludes_zero_as_missing() {
        let records = vec![
            make_record("a", "2024/04/01", 140.0, 0.0),
            make_record("b", "2024/04/02", 150.0, 0.0),
            make_record("c", "2024/04/03", 0.0, 0.0), // missing speed
        ];

        let top = top_n(&records, PitchMetric::Speed, 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player_id, "b");
        assert_eq!(top[1].player_id, "a");
    }

    #[test]
    fn top_n_keeps_negative_movement_values() {
        let mut glove_side = make_record("glove", "2024/04/01", 140.0, 2100.0);
        glove_side.horizontal_movement = -14.2;
        let mut arm_side = make_record("arm", "2024/04/02", 140.0, 2100.0);
        arm_side.horizontal_movement = 16.8;
        let missing = make_record("none", "2024/04/03", 140.0, 2100.0);

        let top = top_n(
            &[glove_side, arm_side, missing],
            PitchMetric::HorizontalMovement,
            5,
        );
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player_id, "arm");
        assert_eq!(top[1].player_id, "glove");
        assert!((top[1].value - -14.2).abs() < 1e-10);
    }

    #[test]
    fn top_n_shorter_when_insufficient_data() {
        let records = vec![make_record("a", "2024/04/01", 140.0, 2100.0)];
        let top = top_n(&records, PitchMetric::Speed, 5);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn top_n_on_empty_input() {
        assert!(top_n(&[], PitchMetric::Spin, 5).is_empty());
    }

    #[test]
    fn top_n_ties_keep_input_order() {
        let records = vec![
            make_record("first", "2024/04/01", 140.0, 2100.0),
            make_record("second", "2024/04/02", 140.0, 2100.0),
            make_record("third", "2024/04/03", 140.0, 2100.0),
        ];

        let top = top_n(&records, PitchMetric::Speed, 3);
        assert_eq!(top[0].player_id, "first");
        assert_eq!(top[1].player_id, "second");
        assert_eq!(top[2].player_id, "third");
    }

    #[test]
    fn top_n_carries_date_through() {
        let records = vec![make_record("a", "2024/06/15", 147.0, 2100.0)];
        let top = top_n(&records, PitchMetric::Speed, 1);
        assert_eq!(top[0].date, "2024/06/15");
    }

    #[test]
    fn top_n_over_aggregated_input_respects_qualifying_count() {
        // length <= number of records with a nonzero metric value
        let records = vec![
            make_record("a", "2024/04/01", 140.0, 2100.0),
            make_record("b", "2024/04/02", 0.0, 2200.0),
        ];
        let top = top_n(&records, PitchMetric::Speed, 5);
        let qualifying = records.iter().filter(|r| r.speed > 0.0).count();
        assert!(top.len() <= qualifying);
    }

    #[test]
    fn cohort_rank_positional() {
        let cohort = vec![
            make_aggregate("slow", 130.0),
            make_aggregate("fast", 150.0),
            make_aggregate("mid", 140.0),
        ];

        let rank = cohort_rank(&cohort, "fast", AggregateMetric::MaxSpeed).unwrap();
        assert_eq!(rank.rank, 1);
        assert_eq!(rank.total, 3);

        let rank = cohort_rank(&cohort, "slow", AggregateMetric::MaxSpeed).unwrap();
        assert_eq!(rank.rank, 3);
        assert_eq!(rank.total, 3);
    }

    #[test]
    fn cohort_rank_ties_get_distinct_ranks() {
        let cohort = vec![
            make_aggregate("a", 140.0),
            make_aggregate("b", 140.0),
        ];

        let rank_a = cohort_rank(&cohort, "a", AggregateMetric::MaxSpeed).unwrap();
        let rank_b = cohort_rank(&cohort, "b", AggregateMetric::MaxSpeed).unwrap();
        // Stable sort: a keeps its position ahead of b.
        assert_eq!(rank_a.rank, 1);
        assert_eq!(rank_b.rank, 2);
    }

    #[test]
    fn cohort_rank_absent_player_is_none() {
        let cohort = vec![make_aggregate("a", 140.0)];
        assert!(cohort_rank(&cohort, "ghost", AggregateMetric::MaxSpeed).is_none());
        assert!(cohort_rank(&[], "a", AggregateMetric::MaxSpeed).is_none());
    }

    #[test]
    fn cohort_rank_from_aggregated_records() {
        let a_records = vec![
            make_record("a", "2024/04/01", 142.0, 2100.0),
            make_record("a", "2024/04/02", 151.0, 2150.0),
        ];
        let b_records = vec![make_record("b", "2024/04/01", 148.0, 2400.0)];

        let cohort = vec![
            PlayerAggregate {
                player_id: "a".into(),
                stats: aggregate(&a_records),
            },
            PlayerAggregate {
                player_id: "b".into(),
                stats: aggregate(&b_records),
            },
        ];

        let speed = cohort_rank(&cohort, "a", AggregateMetric::MaxSpeed).unwrap();
        assert_eq!(speed.rank, 1);
        let spin = cohort_rank(&cohort, "a", AggregateMetric::MaxSpin).unwrap();
        assert_eq!(spin.rank, 2);
    }
}
