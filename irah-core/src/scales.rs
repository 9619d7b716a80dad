//! Sub-scale inputs and 0-100 risk normalization
//!
//! Global invariants enforced:
//! - Normalizers are pure, total functions over their clamped domains
//! - Out-of-domain input clamps, it never panics
//! - Normalized values always land in [0, 100]
//! - No cross-dependency between the six contributions

use serde::{Deserialize, Serialize};

/// Subjective global nutritional assessment category.
///
/// Unrecognized labels deliberately fall back to `Unset` (risk contribution
/// zero) instead of failing the calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum AsgCategory {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "A")]
    WellNourished,
    #[serde(rename = "B")]
    ModeratelyMalnourished,
    #[serde(rename = "C")]
    SeverelyMalnourished,
}

impl AsgCategory {
    /// Category letter as collected by the assessment form
    pub fn label(&self) -> &'static str {
        match self {
            AsgCategory::Unset => "",
            AsgCategory::WellNourished => "A",
            AsgCategory::ModeratelyMalnourished => "B",
            AsgCategory::SeverelyMalnourished => "C",
        }
    }

    /// Parse a form label; unrecognized labels map to `Unset`
    pub fn parse_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "a" | "well nourished" => AsgCategory::WellNourished,
            "b" | "moderately malnourished" => AsgCategory::ModeratelyMalnourished,
            "c" | "severely malnourished" => AsgCategory::SeverelyMalnourished,
            _ => AsgCategory::Unset,
        }
    }
}

impl From<String> for AsgCategory {
    fn from(label: String) -> Self {
        AsgCategory::parse_label(&label)
    }
}

/// Raw sub-scale values for one calculation, immutable once collected.
///
/// The input surface clamps each value to its documented range before the
/// core sees it; the normalizers clamp again as a last line of defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScaleInputs {
    /// Charlson comorbidity total (accepted 0-50, only 0-13 contributes)
    pub charlson: u8,
    /// Fugulin nursing-care-demand total (0-60)
    pub fugulin: u8,
    /// MRC motor-strength total (0-60)
    pub mrc: u8,
    /// Nutritional assessment category
    pub asg: AsgCategory,
    /// Functional oral intake scale level (1-7)
    pub fois: u8,
    /// Count of continuous medications (0-50)
    pub polypharmacy: u8,
}

/// Per-scale risk contributions in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedContributions {
    pub charlson: f64,
    pub fugulin: f64,
    pub mrc: f64,
    pub asg: f64,
    pub fois: f64,
    pub polypharmacy: f64,
}

/// Normalize all six sub-scales independently
pub fn normalize_inputs(inputs: &SubScaleInputs) -> NormalizedContributions {
    NormalizedContributions {
        charlson: normalize_charlson(inputs.charlson),
        fugulin: normalize_fugulin(inputs.fugulin),
        mrc: normalize_mrc(inputs.mrc),
        asg: normalize_asg(inputs.asg),
        fois: normalize_fois(inputs.fois),
        polypharmacy: normalize_polypharmacy(inputs.polypharmacy),
    }
}

/// Charlson: clamp to [0, 13], then value / 13 x 100
pub fn normalize_charlson(total: u8) -> f64 {
    f64::from(total.min(13)) / 13.0 * 100.0
}

/// Fugulin step table: <=14 -> 0, 15-20 -> 25, 21-26 -> 50, 27-31 -> 75, >=32 -> 100
pub fn normalize_fugulin(total: u8) -> f64 {
    match total {
        0..=14 => 0.0,
        15..=20 => 25.0,
        21..=26 => 50.0,
        27..=31 => 75.0,
        _ => 100.0,
    }
}

/// MRC: clamp to [0, 60], then (60 - value) / 60 x 100.
///
/// Inverted: lower motor strength means higher risk.
pub fn normalize_mrc(total: u8) -> f64 {
    (60.0 - f64::from(total.min(60))) / 60.0 * 100.0
}

/// ASG categorical lookup
pub fn normalize_asg(category: AsgCategory) -> f64 {
    match category {
        AsgCategory::Unset | AsgCategory::WellNourished => 0.0,
        AsgCategory::ModeratelyMalnourished => 50.0,
        AsgCategory::SeverelyMalnourished => 100.0,
    }
}

/// FOIS lookup keyed 1-7.
///
/// The level is bounded 1-7 by the input surface; anything outside the
/// domain contributes nothing.
pub fn normalize_fois(level: u8) -> f64 {
    match level {
        1 => 100.0,
        2 => 90.0,
        3 => 80.0,
        4 => 60.0,
        5 => 40.0,
        6 => 20.0,
        _ => 0.0,
    }
}

/// Polypharmacy step table: <=4 -> 0, 5-6 -> 25, 7-9 -> 50, 10-12 -> 75, >=13 -> 100
pub fn normalize_polypharmacy(count: u8) -> f64 {
    match count {
        0..=4 => 0.0,
        5..=6 => 25.0,
        7..=9 => 50.0,
        10..=12 => 75.0,
        _ => 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charlson_continuous_with_cap() {
        assert_eq!(normalize_charlson(0), 0.0);
        assert_eq!(normalize_charlson(13), 100.0);
        // values above the cap clamp instead of overshooting
        assert_eq!(normalize_charlson(20), 100.0);
        assert!((normalize_charlson(5) - 38.46153846153847).abs() < 1e-9);
    }

    #[test]
    fn test_fugulin_step_boundaries() {
        assert_eq!(normalize_fugulin(0), 0.0);
        assert_eq!(normalize_fugulin(14), 0.0);
        assert_eq!(normalize_fugulin(15), 25.0);
        assert_eq!(normalize_fugulin(20), 25.0);
        assert_eq!(normalize_fugulin(21), 50.0);
        assert_eq!(normalize_fugulin(26), 50.0);
        assert_eq!(normalize_fugulin(27), 75.0);
        assert_eq!(normalize_fugulin(31), 75.0);
        assert_eq!(normalize_fugulin(32), 100.0);
        assert_eq!(normalize_fugulin(60), 100.0);
    }

    #[test]
    fn test_mrc_inverted() {
        assert_eq!(normalize_mrc(60), 0.0);
        assert_eq!(normalize_mrc(0), 100.0);
        assert!((normalize_mrc(35) - 25.0 / 60.0 * 100.0).abs() < 1e-9);
        // defensive clamp above the scale maximum
        assert_eq!(normalize_mrc(80), 0.0);
    }

    #[test]
    fn test_asg_lookup() {
        assert_eq!(normalize_asg(AsgCategory::Unset), 0.0);
        assert_eq!(normalize_asg(AsgCategory::WellNourished), 0.0);
        assert_eq!(normalize_asg(AsgCategory::ModeratelyMalnourished), 50.0);
        assert_eq!(normalize_asg(AsgCategory::SeverelyMalnourished), 100.0);
    }

    #[test]
    fn test_asg_label_parse_fallback() {
        assert_eq!(AsgCategory::parse_label("A"), AsgCategory::WellNourished);
        assert_eq!(AsgCategory::parse_label("b"), AsgCategory::ModeratelyMalnourished);
        assert_eq!(AsgCategory::parse_label(" C "), AsgCategory::SeverelyMalnourished);
        assert_eq!(AsgCategory::parse_label(""), AsgCategory::Unset);
        assert_eq!(AsgCategory::parse_label("well nourished"), AsgCategory::WellNourished);
        // unrecognized labels are a deliberate fallback, not an error
        assert_eq!(AsgCategory::parse_label("D"), AsgCategory::Unset);
        assert_eq!(AsgCategory::parse_label("unknown"), AsgCategory::Unset);
    }

    #[test]
    fn test_fois_lookup() {
        assert_eq!(normalize_fois(1), 100.0);
        assert_eq!(normalize_fois(2), 90.0);
        assert_eq!(normalize_fois(3), 80.0);
        assert_eq!(normalize_fois(4), 60.0);
        assert_eq!(normalize_fois(5), 40.0);
        assert_eq!(normalize_fois(6), 20.0);
        assert_eq!(normalize_fois(7), 0.0);
        // out of domain contributes nothing
        assert_eq!(normalize_fois(0), 0.0);
        assert_eq!(normalize_fois(9), 0.0);
    }

    #[test]
    fn test_polypharmacy_step_boundaries() {
        assert_eq!(normalize_polypharmacy(0), 0.0);
        assert_eq!(normalize_polypharmacy(4), 0.0);
        assert_eq!(normalize_polypharmacy(5), 25.0);
        assert_eq!(normalize_polypharmacy(6), 25.0);
        assert_eq!(normalize_polypharmacy(7), 50.0);
        assert_eq!(normalize_polypharmacy(9), 50.0);
        assert_eq!(normalize_polypharmacy(10), 75.0);
        assert_eq!(normalize_polypharmacy(12), 75.0);
        assert_eq!(normalize_polypharmacy(13), 100.0);
        assert_eq!(normalize_polypharmacy(50), 100.0);
    }

    #[test]
    fn test_asg_serde_roundtrip() {
        let parsed: AsgCategory = serde_json::from_str(r#""B""#).unwrap();
        assert_eq!(parsed, AsgCategory::ModeratelyMalnourished);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""B""#);

        let unset: AsgCategory = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(unset, AsgCategory::Unset);
    }
}
