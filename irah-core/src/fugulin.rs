//! Fugulin nursing-care-demand scale
//!
//! Twelve care domains graded 1-4 sum to the Fugulin total, and the total
//! maps to a descriptive nursing-care category. The category is independent
//! of the 0-100 risk step table in `scales`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Care domains graded on the assessment form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FugulinDomain {
    MentalState,
    Oxygenation,
    VitalSigns,
    Motility,
    Ambulation,
    Feeding,
    BodyCare,
    Elimination,
    Therapeutics,
    SkinMucosaIntegrity,
    Dressing,
    DressingTime,
}

impl FugulinDomain {
    pub const ALL: [FugulinDomain; 12] = [
        FugulinDomain::MentalState,
        FugulinDomain::Oxygenation,
        FugulinDomain::VitalSigns,
        FugulinDomain::Motility,
        FugulinDomain::Ambulation,
        FugulinDomain::Feeding,
        FugulinDomain::BodyCare,
        FugulinDomain::Elimination,
        FugulinDomain::Therapeutics,
        FugulinDomain::SkinMucosaIntegrity,
        FugulinDomain::Dressing,
        FugulinDomain::DressingTime,
    ];
}

/// Nursing-care category for a Fugulin total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareCategory {
    Minimal,        // 12-17
    Intermediate,   // 18-22
    HighDependency, // 23-27
    SemiIntensive,  // 28-34
    Intensive,      // > 34
    OutOfRange,     // < 12, incomplete form
}

impl CareCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareCategory::Minimal => "minimal",
            CareCategory::Intermediate => "intermediate",
            CareCategory::HighDependency => "high dependency",
            CareCategory::SemiIntensive => "semi-intensive",
            CareCategory::Intensive => "intensive",
            CareCategory::OutOfRange => "out of range",
        }
    }
}

/// Classify a Fugulin total into its care category.
///
/// 28 belongs to semi-intensive, resolving the 23-28/28-34 overlap in the
/// descriptive scale.
pub fn care_category(total: u8) -> CareCategory {
    match total {
        0..=11 => CareCategory::OutOfRange,
        12..=17 => CareCategory::Minimal,
        18..=22 => CareCategory::Intermediate,
        23..=27 => CareCategory::HighDependency,
        28..=34 => CareCategory::SemiIntensive,
        _ => CareCategory::Intensive,
    }
}

/// Domain-graded form of the Fugulin scale
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FugulinAssessment {
    /// Grade 1-4 per domain; grades outside the range clamp into it
    #[serde(default)]
    pub grades: BTreeMap<FugulinDomain, u8>,
}

impl FugulinAssessment {
    /// Sum of all graded domains, each clamped to 1-4
    pub fn total(&self) -> u8 {
        self.grades.values().map(|&grade| grade.clamp(1, 4)).sum()
    }
}

/// Admission forms accept a precomputed total or the graded domains
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FugulinInput {
    Total(u8),
    Graded(FugulinAssessment),
}

impl Default for FugulinInput {
    fn default() -> Self {
        FugulinInput::Total(0)
    }
}

impl FugulinInput {
    pub fn total(&self) -> u8 {
        match self {
            FugulinInput::Total(total) => *total,
            FugulinInput::Graded(assessment) => assessment.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_care_category_boundaries() {
        assert_eq!(care_category(11), CareCategory::OutOfRange);
        assert_eq!(care_category(12), CareCategory::Minimal);
        assert_eq!(care_category(17), CareCategory::Minimal);
        assert_eq!(care_category(18), CareCategory::Intermediate);
        assert_eq!(care_category(22), CareCategory::Intermediate);
        assert_eq!(care_category(23), CareCategory::HighDependency);
        assert_eq!(care_category(27), CareCategory::HighDependency);
        assert_eq!(care_category(28), CareCategory::SemiIntensive);
        assert_eq!(care_category(34), CareCategory::SemiIntensive);
        assert_eq!(care_category(35), CareCategory::Intensive);
        assert_eq!(care_category(48), CareCategory::Intensive);
    }

    #[test]
    fn test_total_sums_graded_domains() {
        let mut grades = BTreeMap::new();
        for domain in FugulinDomain::ALL {
            grades.insert(domain, 1);
        }
        let assessment = FugulinAssessment { grades };
        assert_eq!(assessment.total(), 12);
        assert_eq!(care_category(assessment.total()), CareCategory::Minimal);
    }

    #[test]
    fn test_grades_clamp_into_range() {
        let mut grades = BTreeMap::new();
        grades.insert(FugulinDomain::MentalState, 0); // clamps to 1
        grades.insert(FugulinDomain::Oxygenation, 9); // clamps to 4
        let assessment = FugulinAssessment { grades };
        assert_eq!(assessment.total(), 5);
    }

    #[test]
    fn test_input_accepts_total_or_grades() {
        let total: FugulinInput = serde_json::from_str("33").unwrap();
        assert_eq!(total.total(), 33);

        let graded: FugulinInput = serde_json::from_str(
            r#"{"grades": {"mental_state": 4, "oxygenation": 3, "vital_signs": 2}}"#,
        )
        .unwrap();
        assert_eq!(graded.total(), 9);
    }
}
