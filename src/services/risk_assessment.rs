use tracing::{debug, info};

use crate::domain::keywords::KeywordCategory;
use crate::domain::process::ProcessStep;
use crate::services::analysis_types::{
    CriticalStep, HighRiskStep, RiskAssessmentResult, RiskFactor, RiskLevel,
};
use crate::services::statistics::round_to;

pub const CRITICAL_STEP_MULTIPLIER: f64 = 1.5;
/// Steps scoring above this are listed with their named risk factors.
pub const HIGH_RISK_STEP_THRESHOLD: f64 = 5.0;
const LISTED_CRITICAL_STEPS: usize = 3;

/// Scores every step of a process and aggregates the result.
///
/// Steps are scored independently of each other. An empty slice yields a
/// zero score at the acceptable level.
pub fn assess_process_risk(steps: &[ProcessStep]) -> RiskAssessmentResult {
    let mut total_score = 0.0;
    let mut critical_steps = Vec::new();
    let mut high_risk_factors = Vec::new();

    for (index, step) in steps.iter().enumerate() {
        let step_number = index + 1;
        let mut step_score = base_step_score(step);

        if KeywordCategory::CriticalOperation.matches(&step.name) {
            step_score *= CRITICAL_STEP_MULTIPLIER;
            critical_steps.push(CriticalStep {
                step: step.name.clone(),
                step_number,
                risk_score: step_score,
            });
        }

        debug!(step = %step.name, step_number, score = step_score, "scored process step");
        total_score += step_score;

        if step_score > HIGH_RISK_STEP_THRESHOLD {
            high_risk_factors.push(HighRiskStep {
                step: step.name.clone(),
                step_number,
                risk_score: step_score,
                factors: identify_risk_factors(step),
            });
        }
    }

    let average_score = total_score / steps.len().max(1) as f64;
    let risk_level = RiskLevel::from_average_score(average_score);
    let recommendations = risk_recommendations(risk_level, &critical_steps);

    info!(
        steps = steps.len(),
        total = total_score,
        level = risk_level.label(),
        "assessed process risk"
    );

    RiskAssessmentResult {
        total_risk_score: round_to(total_score, 2),
        average_risk_score: round_to(average_score, 2),
        risk_level,
        critical_steps,
        high_risk_factors,
        recommendations,
    }
}

/// Score from parameters and equipment alone, before any critical-step weighting.
pub fn base_step_score(step: &ProcessStep) -> f64 {
    let mut score = 0.0;

    for parameter in &step.parameters {
        if KeywordCategory::ControlParameter.matches(parameter) {
            score += 1.0;
        }
        if KeywordCategory::SterilityParameter.matches(parameter) {
            score += 3.0;
        }
        if KeywordCategory::QualityParameter.matches(parameter) {
            score += 2.0;
        }
    }

    for equipment in &step.equipment {
        score += if KeywordCategory::HighRiskEquipment.matches(equipment) {
            2.0
        } else if KeywordCategory::MediumRiskEquipment.matches(equipment) {
            1.5
        } else {
            1.0
        };
    }

    score
}

/// Named risk factors of a step, deduplicated in first-seen order.
pub fn identify_risk_factors(step: &ProcessStep) -> Vec<RiskFactor> {
    let mut factors = Vec::new();
    let mut add = |factor: RiskFactor| {
        if !factors.contains(&factor) {
            factors.push(factor);
        }
    };

    if KeywordCategory::AsepticOperation.matches(&step.name) {
        add(RiskFactor::AsepticOperation);
    }
    if KeywordCategory::Biosafety.matches(&step.name) {
        add(RiskFactor::Biosafety);
    }
    for parameter in &step.parameters {
        if KeywordCategory::Temperature.matches(parameter) {
            add(RiskFactor::TemperatureControl);
        }
        if KeywordCategory::Pressure.matches(parameter) {
            add(RiskFactor::PressureControl);
        }
        if KeywordCategory::Acidity.matches(parameter) {
            add(RiskFactor::AcidityControl);
        }
    }

    factors
}

fn risk_recommendations(level: RiskLevel, critical_steps: &[CriticalStep]) -> Vec<String> {
    let mut recommendations = Vec::new();

    if level >= RiskLevel::High {
        recommendations.push("Perform detailed process validation and risk assessment".to_string());
        recommendations.push("Establish additional in-process controls and monitoring points".to_string());
        recommendations.push("Apply stricter change control procedures".to_string());
    }

    if !critical_steps.is_empty() {
        recommendations.push(format!(
            "Closely monitor {} critical step(s)",
            critical_steps.len()
        ));
        for step in critical_steps.iter().take(LISTED_CRITICAL_STEPS) {
            recommendations.push(format!("  - Step {}: {}", step.step_number, step.step));
        }
    }

    recommendations.push("Conduct periodic quality reviews and trend analysis".to_string());
    recommendations.push("Ensure operators are adequately trained".to_string());
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_step;

    #[test]
    fn empty_process_has_zero_acceptable_risk() {
        let result = assess_process_risk(&[]);
        assert_eq!(result.total_risk_score, 0.0);
        assert_eq!(result.average_risk_score, 0.0);
        assert_eq!(result.risk_level, RiskLevel::Acceptable);
        assert!(result.critical_steps.is_empty());
        assert!(result.high_risk_factors.is_empty());
        assert_eq!(
            result.recommendations,
            vec![
                "Conduct periodic quality reviews and trend analysis".to_string(),
                "Ensure operators are adequately trained".to_string(),
            ]
        );
    }

    #[test]
    fn base_score_counts_parameters_and_equipment_weights() {
        let step = build_step(
            "Purification",
            &["Column pressure", "Viral clearance", "Purity >99%", "Load volume"],
            &["Chromatography skid", "Depth filter", "Buffer tank"],
        );
        // parameters: 1 + 3 + 2 + 0, equipment: 2 + 1.5 + 1
        assert_eq!(base_step_score(&step), 10.5);
    }

    #[test]
    fn critical_steps_are_amplified_and_listed() {
        let steps = vec![
            build_step("Granulation", &["Mixing speed"], &["High shear mixer"]),
            build_step("Aseptic Filling", &["Fill volume"], &["Filling machine"]),
        ];

        let result = assess_process_risk(&steps);
        assert_eq!(result.critical_steps.len(), 1);
        assert_eq!(result.critical_steps[0].step_number, 2);
        assert_eq!(result.critical_steps[0].risk_score, 1.5 * 1.5);
        assert_eq!(result.total_risk_score, 1.0 + 2.25);
        assert!(result
            .recommendations
            .contains(&"  - Step 2: Aseptic Filling".to_string()));
    }

    #[test]
    fn adding_a_sterility_parameter_increases_critical_step_score() {
        let without = build_step("Terminal Sterilization", &["Temperature"], &["Autoclave"]);
        let with = build_step(
            "Terminal Sterilization",
            &["Temperature", "Sterility assurance level"],
            &["Autoclave"],
        );

        let before = assess_process_risk(&[without]).total_risk_score;
        let after = assess_process_risk(&[with]).total_risk_score;
        assert!(after > before);
        assert_eq!(after - before, 3.0 * CRITICAL_STEP_MULTIPLIER);
    }

    #[test]
    fn sterilization_scenario_is_critical() {
        let step = build_step(
            "Sterilization",
            &["Temperature Control", "Sterility Assurance"],
            &["Sterilizer"],
        );

        let result = assess_process_risk(&[step]);
        assert_eq!(result.critical_steps.len(), 1);
        assert_eq!(result.critical_steps[0].step_number, 1);
        assert_eq!(result.total_risk_score, 9.0);
        assert!(result.total_risk_score > HIGH_RISK_STEP_THRESHOLD);
        assert!(result.risk_level >= RiskLevel::Medium);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(
            result.high_risk_factors[0].factors,
            vec![RiskFactor::AsepticOperation, RiskFactor::TemperatureControl]
        );
        assert_eq!(
            result.recommendations[0],
            "Perform detailed process validation and risk assessment"
        );
    }

    #[test]
    fn step_scoring_exactly_the_threshold_is_not_high_risk() {
        let step = build_step("Cell Culture", &["Sterility test"], &["Bioreactor"]);
        assert_eq!(base_step_score(&step), HIGH_RISK_STEP_THRESHOLD);

        let result = assess_process_risk(&[step]);
        assert!(result.critical_steps.is_empty());
        assert!(result.high_risk_factors.is_empty());
    }

    #[test]
    fn step_scoring_above_the_threshold_is_high_risk() {
        let step = build_step(
            "Cell Culture",
            &["Sterility test"],
            &["Depth filter", "Holding tank"],
        );

        let result = assess_process_risk(&[step]);
        assert_eq!(result.high_risk_factors.len(), 1);
        assert_eq!(result.high_risk_factors[0].step_number, 1);
        assert_eq!(result.high_risk_factors[0].risk_score, 5.5);
    }

    #[test]
    fn risk_factors_are_deduplicated() {
        let step = build_step(
            "Viral Inactivation",
            &["Temperature", "Hold temperature", "pH (3.5-3.8)", "Inlet pressure"],
            &[],
        );
        assert_eq!(
            identify_risk_factors(&step),
            vec![
                RiskFactor::Biosafety,
                RiskFactor::TemperatureControl,
                RiskFactor::AcidityControl,
                RiskFactor::PressureControl,
            ]
        );
    }

    #[test]
    fn only_first_three_critical_steps_are_named() {
        let steps: Vec<ProcessStep> = (0..5)
            .map(|idx| build_step(&format!("Filling line {idx}"), &[], &[]))
            .collect();

        let result = assess_process_risk(&steps);
        assert_eq!(result.critical_steps.len(), 5);
        let listed = result
            .recommendations
            .iter()
            .filter(|line| line.starts_with("  - Step"))
            .count();
        assert_eq!(listed, 3);
        assert!(result
            .recommendations
            .contains(&"Closely monitor 5 critical step(s)".to_string()));
    }
}
