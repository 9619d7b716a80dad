//! IRAH-Premier core library - assistential risk scoring for a bedded care unit
//!
//! Computes the composite 0-100 IRAH-Premier score from six clinical
//! sub-scales, classifies it into three risk bands with rule-based
//! overrides, and maintains the in-memory roster of a 20-bed unit.

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Scoring is strictly per-patient; aggregates are derived, never stored
// - No global mutable state: the roster is an explicit session-owned store
// - No randomness, clocks, threads, or async
// - Identical input yields byte-for-byte identical output

pub mod aggregates;
pub mod charlson;
pub mod config;
pub mod fugulin;
pub mod report;
pub mod risk;
pub mod roster;
pub mod scales;

pub use aggregates::{compute_unit_aggregates, compute_unit_aggregates_with_thresholds, UnitAggregates};
pub use config::ResolvedConfig;
pub use report::{
    render_assessment_json, render_assessment_text, render_csv, render_roster_text,
    render_unit_json, PatientAssessment,
};
pub use risk::{score_patient, RiskBand, ScoreResult};
pub use roster::{PatientRecord, Roster, UNIT_CAPACITY};
pub use scales::{AsgCategory, SubScaleInputs};

use anyhow::{Context, Result};
use charlson::CharlsonInput;
use fugulin::FugulinInput;
use serde::Deserialize;

fn default_fois() -> u8 {
    // full oral intake, the form's resting position
    7
}

/// One admission collected by the input surface.
///
/// Charlson and Fugulin accept either a precomputed total or their full
/// assessment forms; omitted scales fall back to their absent defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdmissionRequest {
    pub bed: u8,
    pub initials: String,
    #[serde(default)]
    pub charlson: CharlsonInput,
    #[serde(default)]
    pub fugulin: FugulinInput,
    #[serde(default)]
    pub mrc: u8,
    #[serde(default)]
    pub asg: AsgCategory,
    #[serde(default = "default_fois")]
    pub fois: u8,
    #[serde(default)]
    pub polypharmacy: u8,
}

impl AdmissionRequest {
    /// Resolve builder forms and clamp every value to its documented range.
    ///
    /// Charlson stays accepted up to 50 even though only 0-13 contributes;
    /// the asymmetric clamp is intentional.
    pub fn inputs(&self) -> SubScaleInputs {
        SubScaleInputs {
            charlson: self.charlson.total().min(50),
            fugulin: self.fugulin.total().min(60),
            mrc: self.mrc.min(60),
            asg: self.asg,
            fois: self.fois.clamp(1, 7),
            polypharmacy: self.polypharmacy.min(50),
        }
    }
}

/// Score one patient and build the calculation detail with defaults
pub fn assess(inputs: &SubScaleInputs) -> PatientAssessment {
    assess_with_config(inputs, None)
}

/// Score one patient with an optional resolved configuration
pub fn assess_with_config(
    inputs: &SubScaleInputs,
    resolved_config: Option<&ResolvedConfig>,
) -> PatientAssessment {
    let weights = resolved_config.map(|c| c.weights).unwrap_or_default();
    let thresholds = resolved_config.map(|c| c.thresholds).unwrap_or_default();
    let result = risk::score_patient_with_config(inputs, &weights, &thresholds);
    PatientAssessment {
        result,
        breakdown: report::breakdown(inputs, &weights),
    }
}

/// Assess an admission and upsert it into the session roster.
///
/// Fails on blank initials or a bed outside the unit; the roster is left
/// unchanged on failure.
pub fn admit(
    roster: &mut Roster,
    request: &AdmissionRequest,
    resolved_config: Option<&ResolvedConfig>,
) -> Result<PatientRecord> {
    if request.bed == 0 || usize::from(request.bed) > UNIT_CAPACITY {
        anyhow::bail!(
            "bed {} is outside the unit (1-{})",
            request.bed,
            UNIT_CAPACITY
        );
    }
    let inputs = request.inputs();
    let assessment = assess_with_config(&inputs, resolved_config);
    let record = PatientRecord::new(request.bed, &request.initials, inputs, assessment.result);
    roster.upsert(record.clone())?;
    Ok(record)
}

/// Load a JSON array of admission requests from a file
pub fn load_admissions(path: &std::path::Path) -> Result<Vec<AdmissionRequest>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read admissions file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse admissions file: {}", path.display()))
}
