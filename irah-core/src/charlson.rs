//! Charlson comorbidity index checklist
//!
//! Computes the Charlson total from the classical 19-item point table with
//! an optional age adjustment. Admission forms may carry either the full
//! checklist or a precomputed total.

use serde::{Deserialize, Serialize};

/// Comorbidity items carrying classical Charlson points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comorbidity {
    MyocardialInfarction,
    CongestiveHeartFailure,
    PeripheralVascularDisease,
    CerebrovascularDisease,
    Dementia,
    ChronicPulmonaryDisease,
    ConnectiveTissueDisease,
    PepticUlcerDisease,
    MildLiverDisease,
    DiabetesUncomplicated,
    DiabetesWithEndOrganDamage,
    Hemiplegia,
    ModerateSevereRenalDisease,
    SolidTumorNonMetastatic,
    Leukemia,
    Lymphoma,
    ModerateSevereLiverDisease,
    MetastaticSolidTumor,
    Aids,
}

impl Comorbidity {
    /// Classical Charlson point value (1, 2, 3, or 6)
    pub fn points(&self) -> u8 {
        match self {
            Comorbidity::MyocardialInfarction
            | Comorbidity::CongestiveHeartFailure
            | Comorbidity::PeripheralVascularDisease
            | Comorbidity::CerebrovascularDisease
            | Comorbidity::Dementia
            | Comorbidity::ChronicPulmonaryDisease
            | Comorbidity::ConnectiveTissueDisease
            | Comorbidity::PepticUlcerDisease
            | Comorbidity::MildLiverDisease
            | Comorbidity::DiabetesUncomplicated => 1,
            Comorbidity::DiabetesWithEndOrganDamage
            | Comorbidity::Hemiplegia
            | Comorbidity::ModerateSevereRenalDisease
            | Comorbidity::SolidTumorNonMetastatic
            | Comorbidity::Leukemia
            | Comorbidity::Lymphoma => 2,
            Comorbidity::ModerateSevereLiverDisease => 3,
            Comorbidity::MetastaticSolidTumor | Comorbidity::Aids => 6,
        }
    }
}

/// Age adjustment: 50-59 +1, 60-69 +2, 70-79 +3, >=80 +4
pub fn age_points(age: u8) -> u8 {
    match age {
        0..=49 => 0,
        50..=59 => 1,
        60..=69 => 2,
        70..=79 => 3,
        _ => 4,
    }
}

/// Checklist form of the Charlson index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharlsonAssessment {
    #[serde(default)]
    pub comorbidities: Vec<Comorbidity>,
    #[serde(default)]
    pub age: Option<u8>,
    /// Apply the age adjustment on top of the comorbidity points
    #[serde(default)]
    pub age_adjusted: bool,
}

impl CharlsonAssessment {
    /// Comorbidity points plus the optional age adjustment.
    ///
    /// Duplicate checklist entries count once.
    pub fn total(&self) -> u8 {
        let mut seen: Vec<Comorbidity> = Vec::new();
        let mut total = 0u8;
        for &item in &self.comorbidities {
            if !seen.contains(&item) {
                seen.push(item);
                total += item.points();
            }
        }
        if self.age_adjusted {
            total += self.age.map(age_points).unwrap_or(0);
        }
        total
    }
}

/// Admission forms accept a precomputed total or the full checklist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharlsonInput {
    Total(u8),
    Checklist(CharlsonAssessment),
}

impl Default for CharlsonInput {
    fn default() -> Self {
        CharlsonInput::Total(0)
    }
}

impl CharlsonInput {
    pub fn total(&self) -> u8 {
        match self {
            CharlsonInput::Total(total) => *total,
            CharlsonInput::Checklist(assessment) => assessment.total(),
        }
    }
}
