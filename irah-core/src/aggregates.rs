//! Unit-level aggregate reporting
//!
//! Global invariants enforced:
//! - Aggregates are strictly derived from the current roster, never stored
//! - An empty roster yields an explicit empty state, not zeroed artifacts

use crate::risk::{classify, round_to_tenth, BandThresholds, RiskBand};
use crate::roster::{Roster, UNIT_CAPACITY};
use serde::Serialize;

/// Derived statistics for the whole unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitAggregates {
    /// Occupied beds, displayed as "occupancy/capacity"
    pub occupancy: usize,
    pub capacity: usize,
    /// Mean score, one decimal
    pub mean: f64,
    /// Median score, one decimal
    pub median: f64,
    /// Accumulated risk load (sum of scores), one decimal
    pub total: f64,
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
    /// Unit complexity from the mean score, same thresholds as per-patient
    /// banding, independent of individual trigger flags
    pub complexity: RiskBand,
}

/// Compute aggregates with default thresholds; `None` for an empty roster
pub fn compute_unit_aggregates(roster: &Roster) -> Option<UnitAggregates> {
    compute_unit_aggregates_with_thresholds(roster, &BandThresholds::default())
}

/// Compute aggregates, classifying unit complexity with custom thresholds
pub fn compute_unit_aggregates_with_thresholds(
    roster: &Roster,
    thresholds: &BandThresholds,
) -> Option<UnitAggregates> {
    if roster.is_empty() {
        return None;
    }

    let mut scores: Vec<f64> = roster.list().map(|record| record.score).collect();
    scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let sum: f64 = scores.iter().sum();
    let mean = round_to_tenth(sum / scores.len() as f64);

    let mut low = 0;
    let mut moderate = 0;
    let mut high = 0;
    for record in roster.list() {
        match record.band {
            RiskBand::Low => low += 1,
            RiskBand::Moderate => moderate += 1,
            RiskBand::High => high += 1,
        }
    }

    Some(UnitAggregates {
        occupancy: roster.len(),
        capacity: UNIT_CAPACITY,
        mean,
        median: round_to_tenth(median_of_sorted(&scores)),
        total: round_to_tenth(sum),
        low,
        moderate,
        high,
        complexity: classify(mean, false, thresholds),
    })
}

/// Median of an ascending-sorted slice
fn median_of_sorted(scores: &[f64]) -> f64 {
    let mid = scores.len() / 2;
    if scores.len() % 2 == 1 {
        scores[mid]
    } else {
        (scores[mid - 1] + scores[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::score_patient;
    use crate::roster::PatientRecord;
    use crate::scales::{AsgCategory, SubScaleInputs};

    fn admit(roster: &mut Roster, bed: u8, inputs: SubScaleInputs) {
        let record = PatientRecord::new(bed, "AB", inputs, score_patient(&inputs));
        roster.upsert(record).unwrap();
    }

    fn low_inputs() -> SubScaleInputs {
        SubScaleInputs {
            charlson: 0,
            fugulin: 0,
            mrc: 60,
            asg: AsgCategory::Unset,
            fois: 7,
            polypharmacy: 0,
        }
    }

    #[test]
    fn test_empty_roster_has_no_aggregates() {
        assert!(compute_unit_aggregates(&Roster::new()).is_none());
    }

    #[test]
    fn test_single_record_mean_equals_median() {
        let mut roster = Roster::new();
        admit(
            &mut roster,
            5,
            SubScaleInputs {
                charlson: 5,
                fugulin: 18,
                mrc: 40,
                asg: AsgCategory::ModeratelyMalnourished,
                fois: 5,
                polypharmacy: 6,
            },
        );

        let aggregates = compute_unit_aggregates(&roster).unwrap();
        assert_eq!(aggregates.occupancy, 1);
        assert_eq!(aggregates.capacity, 20);
        assert_eq!(aggregates.mean, 34.9);
        assert_eq!(aggregates.median, 34.9);
        assert_eq!(aggregates.total, 34.9);
        assert_eq!(aggregates.moderate, 1);
        assert_eq!(aggregates.complexity, RiskBand::Moderate);
    }

    #[test]
    fn test_band_distribution_and_even_median() {
        let mut roster = Roster::new();
        admit(&mut roster, 1, low_inputs());
        // full saturation in every scale
        admit(
            &mut roster,
            2,
            SubScaleInputs {
                charlson: 13,
                fugulin: 60,
                mrc: 0,
                asg: AsgCategory::SeverelyMalnourished,
                fois: 1,
                polypharmacy: 13,
            },
        );

        let aggregates = compute_unit_aggregates(&roster).unwrap();
        assert_eq!(aggregates.occupancy, 2);
        assert_eq!(aggregates.mean, 50.0);
        assert_eq!(aggregates.median, 50.0);
        assert_eq!(aggregates.total, 100.0);
        assert_eq!(aggregates.low, 1);
        assert_eq!(aggregates.moderate, 0);
        assert_eq!(aggregates.high, 1);
        assert_eq!(aggregates.complexity, RiskBand::Moderate);
    }

    #[test]
    fn test_complexity_ignores_individual_triggers() {
        let mut roster = Roster::new();
        // trigger forces the record High, but the unit label follows the mean
        admit(
            &mut roster,
            3,
            SubScaleInputs {
                charlson: 0,
                fugulin: 0,
                mrc: 30,
                asg: AsgCategory::Unset,
                fois: 7,
                polypharmacy: 0,
            },
        );

        let aggregates = compute_unit_aggregates(&roster).unwrap();
        assert_eq!(aggregates.high, 1);
        assert_eq!(aggregates.mean, 7.5);
        assert_eq!(aggregates.complexity, RiskBand::Low);
    }

    #[test]
    fn test_low_complexity_unit() {
        let mut roster = Roster::new();
        admit(&mut roster, 1, low_inputs());
        admit(&mut roster, 2, low_inputs());
        admit(&mut roster, 3, low_inputs());

        let aggregates = compute_unit_aggregates(&roster).unwrap();
        assert_eq!(aggregates.mean, 0.0);
        assert_eq!(aggregates.low, 3);
        assert_eq!(aggregates.complexity, RiskBand::Low);
    }
}
