//! IRAH-Premier weighted scoring and risk banding
//!
//! Global invariants enforced:
//! - Deterministic score calculation
//! - The trigger evaluator reads raw inputs, never normalized values
//! - A single rounding mode (half away from zero, one decimal) everywhere

use crate::scales::{normalize_inputs, NormalizedContributions, SubScaleInputs};
use serde::{Deserialize, Serialize};

/// Risk band classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,      // < 34
    Moderate, // 34-66.9
    High,     // >= 67 or trigger
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Moderate => "moderate",
            RiskBand::High => "high",
        }
    }
}

/// Weights for the six sub-scale contributions.
///
/// The table must sum to 1.0 so the aggregate stays on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub charlson: f64,
    pub fugulin: f64,
    pub mrc: f64,
    pub asg: f64,
    pub fois: f64,
    pub polypharmacy: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            charlson: 0.20,
            fugulin: 0.20,
            mrc: 0.15,
            asg: 0.15,
            fois: 0.15,
            polypharmacy: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Sum of the six weights (1.0 for a valid table)
    pub fn sum(&self) -> f64 {
        self.charlson + self.fugulin + self.mrc + self.asg + self.fois + self.polypharmacy
    }
}

/// Band thresholds, inclusive on the lower edge of the higher band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandThresholds {
    pub moderate: f64,
    pub high: f64,
}

impl Default for BandThresholds {
    fn default() -> Self {
        BandThresholds {
            moderate: 34.0,
            high: 67.0,
        }
    }
}

/// Round to one decimal place, half away from zero
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// High-risk trigger over raw inputs: FOIS <= 3, polypharmacy >= 13, or
/// MRC <= 35. Independent of the weighted aggregate.
pub fn high_risk_trigger(inputs: &SubScaleInputs) -> bool {
    inputs.fois <= 3 || inputs.polypharmacy >= 13 || inputs.mrc <= 35
}

/// Weighted aggregate score, rounded to one decimal
pub fn weighted_score(contributions: &NormalizedContributions, weights: &ScoreWeights) -> f64 {
    round_to_tenth(
        contributions.charlson * weights.charlson
            + contributions.fugulin * weights.fugulin
            + contributions.mrc * weights.mrc
            + contributions.asg * weights.asg
            + contributions.fois * weights.fois
            + contributions.polypharmacy * weights.polypharmacy,
    )
}

/// Assign the risk band; the trigger forces High regardless of score
pub fn classify(score: f64, trigger: bool, thresholds: &BandThresholds) -> RiskBand {
    if trigger {
        return RiskBand::High;
    }
    if score >= thresholds.high {
        RiskBand::High
    } else if score >= thresholds.moderate {
        RiskBand::Moderate
    } else {
        RiskBand::Low
    }
}

/// Scoring outcome for one patient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Aggregate score on the 0-100 scale, one decimal
    pub score: f64,
    /// High-risk trigger state
    pub trigger: bool,
    pub band: RiskBand,
}

/// Score a patient with the default weight table and thresholds
pub fn score_patient(inputs: &SubScaleInputs) -> ScoreResult {
    score_patient_with_config(inputs, &ScoreWeights::default(), &BandThresholds::default())
}

/// Score a patient with custom weights and thresholds
pub fn score_patient_with_config(
    inputs: &SubScaleInputs,
    weights: &ScoreWeights,
    thresholds: &BandThresholds,
) -> ScoreResult {
    let contributions = normalize_inputs(inputs);
    let score = weighted_score(&contributions, weights);
    let trigger = high_risk_trigger(inputs);
    ScoreResult {
        score,
        trigger,
        band: classify(score, trigger, thresholds),
    }
}
