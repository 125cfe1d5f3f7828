use tracing::info;

use crate::domain::keywords::KeywordCategory;
use crate::domain::process::ProcessDefinition;
use crate::services::analysis_types::{
    ComplianceFinding, ComplianceResult, ComplianceStatus, FindingScope, Severity, SeverityCounts,
};

/// Only this many recommendations are surfaced, in finding order.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Evaluates a process against the fixed GMP rule set.
///
/// The process is compliant iff no finding is severe.
pub fn check_gmp_compliance(process: &ProcessDefinition) -> ComplianceResult {
    let mut findings = Vec::new();

    for (index, step) in process.steps.iter().enumerate() {
        let scope = FindingScope::Step {
            number: index + 1,
            name: step.name.clone(),
        };

        if KeywordCategory::SterileStep.matches(&step.name)
            && !KeywordCategory::SterilityAssurance.matches_any(&step.parameters)
        {
            findings.push(ComplianceFinding {
                scope: scope.clone(),
                issue: "Sterile step lacks a sterility assurance parameter".to_string(),
                severity: Severity::Severe,
                recommendation: "Add sterility-related monitoring parameters".to_string(),
            });
        }

        if KeywordCategory::SeparationStep.matches(&step.name)
            && !KeywordCategory::PressureOrFlow.matches_any(&step.parameters)
        {
            findings.push(ComplianceFinding {
                scope,
                issue: "Separation step lacks in-process control parameters".to_string(),
                severity: Severity::Moderate,
                recommendation: "Add pressure or flow-rate monitoring".to_string(),
            });
        }
    }

    if !process.has_description() {
        findings.push(ComplianceFinding {
            scope: FindingScope::Process,
            issue: "Process description is missing".to_string(),
            severity: Severity::Moderate,
            recommendation: "Provide a process description".to_string(),
        });
    }

    let severity_counts = count_severities(&findings);
    let overall_status = if severity_counts.severe == 0 {
        ComplianceStatus::Compliant
    } else {
        ComplianceStatus::NeedsImprovement
    };
    let recommendations = findings
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|finding| finding.recommendation.clone())
        .collect();

    info!(
        process = %process.name,
        findings = findings.len(),
        status = ?overall_status,
        "checked GMP compliance"
    );

    ComplianceResult {
        gmp_classification: process.gmp_classification,
        overall_status,
        findings,
        severity_counts,
        recommendations,
    }
}

fn count_severities(findings: &[ComplianceFinding]) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for finding in findings {
        match finding.severity {
            Severity::Severe => counts.severe += 1,
            Severity::Moderate => counts.moderate += 1,
            Severity::Minor => counts.minor += 1,
        }
    }
    counts
}
