//! Report rendering - calculation detail, roster listings, and exports
//!
//! Global invariants enforced:
//! - Deterministic output ordering (ascending bed)
//! - Identical roster yields byte-for-byte identical output

use crate::aggregates::UnitAggregates;
use crate::fugulin;
use crate::risk::{round_to_tenth, ScoreResult, ScoreWeights};
use crate::roster::{PatientRecord, Roster};
use crate::scales::{normalize_inputs, SubScaleInputs};
use serde::Serialize;

/// One row of the per-scale calculation detail
#[derive(Debug, Clone, Serialize)]
pub struct ScaleContribution {
    pub scale: &'static str,
    /// Raw value in display form (the ASG row carries the category letter)
    pub raw: String,
    /// Normalized contribution, one decimal
    pub normalized: f64,
    pub weight: f64,
    /// Weighted contribution, one decimal
    pub weighted: f64,
}

/// Scoring outcome plus calculation detail for one patient
#[derive(Debug, Clone, Serialize)]
pub struct PatientAssessment {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub breakdown: Vec<ScaleContribution>,
}

/// Per-scale breakdown for one patient's inputs
pub fn breakdown(inputs: &SubScaleInputs, weights: &ScoreWeights) -> Vec<ScaleContribution> {
    let contributions = normalize_inputs(inputs);
    let row = |scale: &'static str, raw: String, normalized: f64, weight: f64| ScaleContribution {
        scale,
        raw,
        normalized: round_to_tenth(normalized),
        weight,
        weighted: round_to_tenth(normalized * weight),
    };
    vec![
        row("charlson", inputs.charlson.to_string(), contributions.charlson, weights.charlson),
        row("fugulin", inputs.fugulin.to_string(), contributions.fugulin, weights.fugulin),
        row("mrc", inputs.mrc.to_string(), contributions.mrc, weights.mrc),
        row("asg", inputs.asg.label().to_string(), contributions.asg, weights.asg),
        row("fois", inputs.fois.to_string(), contributions.fois, weights.fois),
        row(
            "polypharmacy",
            inputs.polypharmacy.to_string(),
            contributions.polypharmacy,
            weights.polypharmacy,
        ),
    ]
}

/// Render a single assessment as text
pub fn render_assessment_text(assessment: &PatientAssessment) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "IRAH-Premier: {:.1}  band: {}\n",
        assessment.result.score,
        assessment.result.band.as_str()
    ));
    if assessment.result.trigger {
        output.push_str("High-risk trigger active (FOIS <= 3, polypharmacy >= 13, or MRC <= 35).\n");
    }
    output.push('\n');

    output.push_str(&format!(
        "{:<14} {:>6} {:>12} {:>8} {:>10}\n",
        "SCALE", "RAW", "NORMALIZED", "WEIGHT", "WEIGHTED"
    ));
    for row in &assessment.breakdown {
        output.push_str(&format!(
            "{:<14} {:>6} {:>12.1} {:>8.2} {:>10.1}\n",
            row.scale, row.raw, row.normalized, row.weight, row.weighted
        ));
    }

    output
}

/// Render a single assessment as JSON
pub fn render_assessment_json(assessment: &PatientAssessment) -> String {
    serde_json::to_string_pretty(assessment).unwrap_or_else(|_| "{}".to_string())
}

/// Roster listing plus aggregates in one JSON document
#[derive(Debug, Clone, Serialize)]
struct UnitReport<'a> {
    patients: Vec<&'a PatientRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregates: Option<&'a UnitAggregates>,
}

/// Render the roster listing and unit aggregates as text
pub fn render_roster_text(roster: &Roster, aggregates: Option<&UnitAggregates>) -> String {
    let mut output = String::new();

    if roster.is_empty() {
        output.push_str("No patients on the roster.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<4} {:<9} {:>6} {:<9} {:<8} {:>8} {:<16} {:>9} {:>4} {:<4} {:>5} {:>5}\n",
        "BED",
        "INITIALS",
        "SCORE",
        "BAND",
        "TRIGGER",
        "FUGULIN",
        "CARE",
        "CHARLSON",
        "MRC",
        "ASG",
        "FOIS",
        "POLY"
    ));
    for record in roster.list() {
        let care = fugulin::care_category(record.inputs.fugulin);
        output.push_str(&format!(
            "{:<4} {:<9} {:>6.1} {:<9} {:<8} {:>8} {:<16} {:>9} {:>4} {:<4} {:>5} {:>5}\n",
            record.bed,
            record.initials,
            record.score,
            record.band.as_str(),
            if record.trigger { "yes" } else { "" },
            record.inputs.fugulin,
            care.as_str(),
            record.inputs.charlson,
            record.inputs.mrc,
            record.inputs.asg.label(),
            record.inputs.fois,
            record.inputs.polypharmacy,
        ));
    }

    if let Some(aggregates) = aggregates {
        output.push('\n');
        output.push_str(&format!(
            "Occupancy: {}/{}\n",
            aggregates.occupancy, aggregates.capacity
        ));
        output.push_str(&format!(
            "Mean: {:.1}  Median: {:.1}  Total load: {:.1}\n",
            aggregates.mean, aggregates.median, aggregates.total
        ));
        output.push_str(&format!(
            "Bands: low {} | moderate {} | high {}\n",
            aggregates.low, aggregates.moderate, aggregates.high
        ));
        output.push_str(&format!("Unit complexity: {}\n", aggregates.complexity.as_str()));
    }

    output
}

/// Render the roster listing and unit aggregates as JSON
pub fn render_unit_json(roster: &Roster, aggregates: Option<&UnitAggregates>) -> String {
    let report = UnitReport {
        patients: roster.list().collect(),
        aggregates,
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}

const CSV_HEADER: &str = "bed,initials,score,band,trigger,charlson,fugulin,mrc,asg,fois,polypharmacy";

/// Render the roster as delimited text for external download.
///
/// One row per record in ascending bed order.
pub fn render_csv(roster: &Roster) -> String {
    let mut output = String::new();
    output.push_str(CSV_HEADER);
    output.push('\n');
    for record in roster.list() {
        output.push_str(&format!(
            "{},{},{:.1},{},{},{},{},{},{},{},{}\n",
            record.bed,
            record.initials,
            record.score,
            record.band.as_str(),
            if record.trigger { "yes" } else { "no" },
            record.inputs.charlson,
            record.inputs.fugulin,
            record.inputs.mrc,
            record.inputs.asg.label(),
            record.inputs.fois,
            record.inputs.polypharmacy,
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::score_patient;
    use crate::scales::AsgCategory;

    fn reference_inputs() -> SubScaleInputs {
        SubScaleInputs {
            charlson: 5,
            fugulin: 18,
            mrc: 40,
            asg: AsgCategory::ModeratelyMalnourished,
            fois: 5,
            polypharmacy: 6,
        }
    }

    #[test]
    fn test_breakdown_rows_and_contributions() {
        let rows = breakdown(&reference_inputs(), &ScoreWeights::default());
        assert_eq!(rows.len(), 6);

        let scales: Vec<&str> = rows.iter().map(|row| row.scale).collect();
        assert_eq!(
            scales,
            vec!["charlson", "fugulin", "mrc", "asg", "fois", "polypharmacy"]
        );

        // charlson: 5/13 x 100 = 38.5 at weight 0.20 -> 7.7
        assert_eq!(rows[0].raw, "5");
        assert_eq!(rows[0].normalized, 38.5);
        assert_eq!(rows[0].weighted, 7.7);
        // asg row shows the category letter
        assert_eq!(rows[3].raw, "B");
        assert_eq!(rows[3].normalized, 50.0);
        assert_eq!(rows[3].weighted, 7.5);
    }

    #[test]
    fn test_assessment_text_contains_score_and_rows() {
        let inputs = reference_inputs();
        let assessment = PatientAssessment {
            result: score_patient(&inputs),
            breakdown: breakdown(&inputs, &ScoreWeights::default()),
        };
        let text = render_assessment_text(&assessment);
        assert!(text.contains("IRAH-Premier: 34.9  band: moderate"));
        assert!(text.contains("polypharmacy"));
        assert!(!text.contains("trigger active"));
    }

    #[test]
    fn test_empty_roster_renderings() {
        let roster = Roster::new();
        assert_eq!(render_roster_text(&roster, None), "No patients on the roster.\n");

        let json = render_unit_json(&roster, None);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["patients"].as_array().unwrap().len(), 0);
        assert!(parsed.get("aggregates").is_none());

        assert_eq!(render_csv(&roster), format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn test_csv_rows_in_bed_order() {
        let mut roster = Roster::new();
        let inputs = reference_inputs();
        roster
            .upsert(PatientRecord::new(12, "jas", inputs, score_patient(&inputs)))
            .unwrap();
        let low = SubScaleInputs {
            charlson: 0,
            fugulin: 10,
            mrc: 60,
            asg: AsgCategory::WellNourished,
            fois: 7,
            polypharmacy: 0,
        };
        roster
            .upsert(PatientRecord::new(1, "rt", low, score_patient(&low)))
            .unwrap();

        let csv = render_csv(&roster);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "1,RT,0.0,low,no,0,10,60,A,7,0");
        assert_eq!(lines[2], "12,JAS,34.9,moderate,no,5,18,40,B,5,6");
    }
}
