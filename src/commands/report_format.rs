use std::collections::BTreeMap;

use crate::services::analysis_types::{
    ComplianceResult, ComplianceStatus, OeeResult, ParameterStatistics, QualityReport, RiskAssessmentResult,
    Severity, StabilityTier,
};
use crate::services::process_metrics::ProcessMetrics;

pub fn format_risk_report(report: &RiskAssessmentResult) -> String {
    let mut lines = Vec::new();
    lines.push("Risk Assessment".to_string());
    lines.push(format!("Total risk score: {:.2}", report.total_risk_score));
    lines.push(format!("Average risk score: {:.2}", report.average_risk_score));
    lines.push(format!("Risk level: {}", report.risk_level));

    if !report.critical_steps.is_empty() {
        lines.push(String::new());
        lines.push("Critical steps:".to_string());
        lines.push("Step | Name | Score".to_string());
        lines.push("-----|------|------".to_string());
        for step in &report.critical_steps {
            lines.push(format!(
                "{} | {} | {:.2}",
                step.step_number, step.step, step.risk_score
            ));
        }
    }

    if !report.high_risk_factors.is_empty() {
        lines.push(String::new());
        lines.push("High-risk steps:".to_string());
        for step in &report.high_risk_factors {
            let factors: Vec<String> = step.factors.iter().map(ToString::to_string).collect();
            let factors = if factors.is_empty() {
                "none named".to_string()
            } else {
                factors.join(", ")
            };
            lines.push(format!(
                "Step {} {} ({:.2}): {}",
                step.step_number, step.step, step.risk_score, factors
            ));
        }
    }

    push_recommendations(&mut lines, &report.recommendations);
    lines.join("\n")
}

pub fn format_compliance_report(report: &ComplianceResult) -> String {
    let status = match report.overall_status {
        ComplianceStatus::Compliant => "compliant",
        ComplianceStatus::NeedsImprovement => "needs improvement",
    };

    let mut lines = Vec::new();
    lines.push("GMP Compliance".to_string());
    lines.push(format!("Classification: {}", report.gmp_classification));
    lines.push(format!("Status: {status}"));
    lines.push(format!(
        "Findings: {} severe, {} moderate, {} minor",
        report.severity_counts.severe, report.severity_counts.moderate, report.severity_counts.minor
    ));

    for finding in &report.findings {
        let severity = match finding.severity {
            Severity::Severe => "SEVERE",
            Severity::Moderate => "MODERATE",
            Severity::Minor => "MINOR",
        };
        lines.push(format!("[{severity}] {}: {}", finding.scope, finding.issue));
    }

    push_recommendations(&mut lines, &report.recommendations);
    lines.join("\n")
}

pub fn format_trend_report(report: &BTreeMap<String, ParameterStatistics>) -> String {
    let mut lines = Vec::new();
    lines.push("Parameter Trends".to_string());
    if report.is_empty() {
        lines.push("No matching parameters".to_string());
        return lines.join("\n");
    }

    lines.push("Parameter | Mean | Std | Min | Max | CV % | Trend | Cpk | Outliers".to_string());
    lines.push("----------|------|-----|-----|-----|------|-------|-----|---------".to_string());
    for stats in report.values() {
        let outliers = if stats.outliers.is_empty() {
            "-".to_string()
        } else {
            stats
                .outliers
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        };
        lines.push(format!(
            "{} | {:.3} | {:.3} | {:.3} | {:.3} | {:.2} | {} | {:.3} | {}",
            stats.label,
            stats.mean,
            stats.std_dev,
            stats.min,
            stats.max,
            stats.cv_percent,
            stats.trend.label(),
            stats.capability_index,
            outliers
        ));
    }
    lines.join("\n")
}

pub fn format_quality_report(report: &QualityReport) -> String {
    let summary = &report.summary;
    let distribution = &report.quality_distribution;

    let mut lines = Vec::new();
    lines.push("Quality Report".to_string());
    lines.push(format!(
        "Batches: {} total, {} passed, {} failed",
        summary.total_batches, summary.passed_batches, summary.failed_batches
    ));
    lines.push(format!(
        "Yield: {:.2}% average ({:.2}-{:.2}%)",
        summary.yield_average, summary.yield_min, summary.yield_max
    ));
    lines.push(format!(
        "Quality status: {} passed, {} pending, {} rejected",
        distribution.passed, distribution.pending, distribution.rejected
    ));

    if !report.parameter_stability.is_empty() {
        lines.push(String::new());
        lines.push("Parameter | CV % | Stability".to_string());
        lines.push("----------|------|----------".to_string());
        for entry in &report.parameter_stability {
            let stability = match entry.stability {
                StabilityTier::High => "high",
                StabilityTier::Medium => "medium",
                StabilityTier::Low => "low",
            };
            lines.push(format!("{} | {:.2} | {}", entry.label, entry.cv_percent, stability));
        }
    }

    push_recommendations(&mut lines, &report.recommendations);
    lines.join("\n")
}

pub fn format_oee_report(report: &OeeResult) -> String {
    let mut lines = Vec::new();
    lines.push("Overall Equipment Efficiency".to_string());
    lines.push(format!("Availability: {:.2}%", report.availability_percent));
    lines.push(format!("Performance: {:.2}%", report.performance_percent));
    lines.push(format!("Quality: {:.2}%", report.quality_percent));
    lines.push(format!("OEE: {:.2}% ({})", report.oee_percent, report.tier.label()));
    lines.push(format!(
        "Losses: availability {:.2}%, performance {:.2}%, quality {:.2}%",
        report.losses.availability_loss, report.losses.performance_loss, report.losses.quality_loss
    ));
    lines.join("\n")
}

pub fn format_process_metrics(report: &ProcessMetrics) -> String {
    let mut lines = Vec::new();
    lines.push("Process Metrics".to_string());
    lines.push(format!("Steps: {}", report.total_steps));
    lines.push(format!("Parameters: {}", report.total_parameters));
    lines.push(format!(
        "Average parameters per step: {:.2}",
        report.average_parameters_per_step
    ));
    lines.push(format!("Declared time: {:.2} h", report.total_time_hours));
    lines.push(format!("Unique equipment: {}", report.unique_equipment_count));
    lines.push(format!("Complexity score: {:.2}", report.complexity_score));
    lines.join("\n")
}

fn push_recommendations(lines: &mut Vec<String>, recommendations: &[String]) {
    if recommendations.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("Recommendations:".to_string());
    for recommendation in recommendations {
        if recommendation.starts_with(' ') {
            lines.push(recommendation.clone());
        } else {
            lines.push(format!("- {recommendation}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analysis_types::{LossAnalysis, OeeTier, RiskLevel};
    use crate::services::compliance::check_gmp_compliance;
    use crate::services::risk_assessment::assess_process_risk;
    use crate::services::statistics::Trend;
    use crate::test_support::{build_process, build_step};

    #[test]
    fn risk_report_lists_critical_steps_and_recommendations() {
        let steps = vec![build_step(
            "Sterilization",
            &["Temperature Control", "Sterility Assurance"],
            &["Sterilizer"],
        )];
        let report = assess_process_risk(&steps);
        assert_eq!(report.risk_level, RiskLevel::Critical);

        let text = format_risk_report(&report);
        assert!(text.starts_with("Risk Assessment\nTotal risk score: 9.00"));
        assert!(text.contains("Risk level: critical (red)"));
        assert!(text.contains("1 | Sterilization | 9.00"));
        assert!(text.contains("aseptic operation risk, temperature control risk"));
        assert!(text.contains("\n  - Step 1: Sterilization"));
        assert!(text.contains("- Ensure operators are adequately trained"));
    }

    #[test]
    fn compliance_report_tags_findings_by_severity() {
        let process = build_process(
            "Injectable",
            "",
            vec![build_step("Terminal Sterilization", &["F0 value"], &[])],
        );
        let text = format_compliance_report(&check_gmp_compliance(&process));
        assert!(text.contains("Status: needs improvement"));
        assert!(text.contains("Findings: 1 severe, 1 moderate, 0 minor"));
        assert!(text.contains(
            "[SEVERE] step 1: Terminal Sterilization: Sterile step lacks a sterility assurance parameter"
        ));
        assert!(text.contains("[MODERATE] overall process: Process description is missing"));
    }

    #[test]
    fn compliance_status_line_follows_overall_status() {
        let process = build_process(
            "Injectable",
            "",
            vec![build_step("Terminal Sterilization", &["F0 value"], &[])],
        );
        let mut report = check_gmp_compliance(&process);
        report.overall_status = ComplianceStatus::Compliant;

        let text = format_compliance_report(&report);
        assert!(text.contains("Status: compliant"));
        assert!(!text.contains("needs improvement"));
    }

    #[test]
    fn trend_report_has_one_row_per_column() {
        let mut report = BTreeMap::new();
        report.insert(
            "step_1_temperature".to_string(),
            ParameterStatistics {
                label: "Step 1 Temperature".to_string(),
                mean: 25.1,
                std_dev: 1.2,
                min: 23.0,
                max: 27.5,
                cv_percent: 4.78,
                trend: Trend::Stable,
                capability_index: 1.0,
                outliers: vec![3, 7],
            },
        );

        let text = format_trend_report(&report);
        assert!(text.contains(
            "Step 1 Temperature | 25.100 | 1.200 | 23.000 | 27.500 | 4.78 | stable | 1.000 | 3,7"
        ));
        assert_eq!(
            format_trend_report(&BTreeMap::new()),
            "Parameter Trends\nNo matching parameters"
        );
    }

    #[test]
    fn oee_report_shows_tier_and_losses() {
        let report = OeeResult {
            availability_percent: 90.0,
            performance_percent: 95.0,
            quality_percent: 92.0,
            oee_percent: 78.66,
            tier: OeeTier::Excellent,
            losses: LossAnalysis {
                availability_loss: 10.0,
                performance_loss: 5.0,
                quality_loss: 8.0,
            },
        };
        let text = format_oee_report(&report);
        assert!(text.contains("OEE: 78.66% (excellent)"));
        assert!(text.contains("Losses: availability 10.00%, performance 5.00%, quality 8.00%"));
    }

    #[test]
    fn empty_quality_report_renders_zero_counts() {
        let text = format_quality_report(&QualityReport::default());
        assert!(text.contains("Batches: 0 total, 0 passed, 0 failed"));
        assert!(!text.contains("Recommendations"));
    }
}
