use std::fmt;

use serde::Serialize;

use crate::domain::process::GmpClassification;
use crate::services::statistics::Trend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Acceptable,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Lower bounds are inclusive.
    pub fn from_average_score(score: f64) -> Self {
        if score >= 8.0 {
            RiskLevel::Critical
        } else if score >= 6.0 {
            RiskLevel::High
        } else if score >= 4.0 {
            RiskLevel::Medium
        } else if score >= 2.0 {
            RiskLevel::Low
        } else {
            RiskLevel::Acceptable
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::Critical => "red",
            RiskLevel::High => "orange",
            RiskLevel::Medium => "yellow",
            RiskLevel::Low => "blue",
            RiskLevel::Acceptable => "green",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Critical => "critical",
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
            RiskLevel::Acceptable => "acceptable",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.color())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    AsepticOperation,
    Biosafety,
    TemperatureControl,
    PressureControl,
    AcidityControl,
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskFactor::AsepticOperation => "aseptic operation risk",
            RiskFactor::Biosafety => "biosafety risk",
            RiskFactor::TemperatureControl => "temperature control risk",
            RiskFactor::PressureControl => "pressure control risk",
            RiskFactor::AcidityControl => "pH control risk",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalStep {
    pub step: String,
    pub step_number: usize,
    pub risk_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighRiskStep {
    pub step: String,
    pub step_number: usize,
    pub risk_score: f64,
    pub factors: Vec<RiskFactor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessmentResult {
    pub total_risk_score: f64,
    pub average_risk_score: f64,
    pub risk_level: RiskLevel,
    pub critical_steps: Vec<CriticalStep>,
    pub high_risk_factors: Vec<HighRiskStep>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Severe,
    Moderate,
    Minor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingScope {
    Step { number: usize, name: String },
    Process,
}

impl fmt::Display for FindingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingScope::Step { number, name } => write!(f, "step {number}: {name}"),
            FindingScope::Process => f.write_str("overall process"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceFinding {
    pub scope: FindingScope,
    pub issue: String,
    pub severity: Severity,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub severe: usize,
    pub moderate: usize,
    pub minor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NeedsImprovement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceResult {
    pub gmp_classification: GmpClassification,
    pub overall_status: ComplianceStatus,
    pub findings: Vec<ComplianceFinding>,
    pub severity_counts: SeverityCounts,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterStatistics {
    pub label: String,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub cv_percent: f64,
    pub trend: Trend,
    pub capability_index: f64,
    pub outliers: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityTier {
    High,
    Medium,
    Low,
}

impl StabilityTier {
    pub fn from_cv(cv_percent: f64) -> Self {
        if cv_percent < 5.0 {
            StabilityTier::High
        } else if cv_percent < 10.0 {
            StabilityTier::Medium
        } else {
            StabilityTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterStability {
    pub column: String,
    pub label: String,
    pub cv_percent: f64,
    pub stability: StabilityTier,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QualitySummary {
    pub total_batches: usize,
    pub passed_batches: usize,
    pub failed_batches: usize,
    pub yield_average: f64,
    pub yield_min: f64,
    pub yield_max: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QualityDistribution {
    pub passed: usize,
    pub pending: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityReport {
    pub summary: QualitySummary,
    pub quality_distribution: QualityDistribution,
    pub parameter_stability: Vec<ParameterStability>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OeeTier {
    WorldClass,
    Excellent,
    Fair,
    NeedsImprovement,
}

impl OeeTier {
    pub fn from_oee(oee_percent: f64) -> Self {
        if oee_percent >= 85.0 {
            OeeTier::WorldClass
        } else if oee_percent >= 75.0 {
            OeeTier::Excellent
        } else if oee_percent >= 65.0 {
            OeeTier::Fair
        } else {
            OeeTier::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OeeTier::WorldClass => "world class",
            OeeTier::Excellent => "excellent",
            OeeTier::Fair => "fair",
            OeeTier::NeedsImprovement => "needs improvement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossAnalysis {
    pub availability_loss: f64,
    pub performance_loss: f64,
    pub quality_loss: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OeeResult {
    pub availability_percent: f64,
    pub performance_percent: f64,
    pub quality_percent: f64,
    pub oee_percent: f64,
    pub tier: OeeTier,
    pub losses: LossAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_boundaries_are_closed_below() {
        let test_cases = vec![
            (8.0, RiskLevel::Critical),
            (7.999, RiskLevel::High),
            (6.0, RiskLevel::High),
            (5.999, RiskLevel::Medium),
            (4.0, RiskLevel::Medium),
            (3.999, RiskLevel::Low),
            (2.0, RiskLevel::Low),
            (1.999, RiskLevel::Acceptable),
            (0.0, RiskLevel::Acceptable),
        ];

        for (score, expected) in test_cases {
            assert_eq!(
                RiskLevel::from_average_score(score),
                expected,
                "score {score}"
            );
        }
    }

    #[test]
    fn risk_levels_are_ordered_by_severity() {
        assert!(RiskLevel::Critical > RiskLevel::High);
        assert!(RiskLevel::Medium > RiskLevel::Low);
        assert!(RiskLevel::Low > RiskLevel::Acceptable);
        assert_eq!(RiskLevel::High.to_string(), "high (orange)");
    }

    #[test]
    fn stability_and_oee_tiers_follow_breakpoints() {
        assert_eq!(StabilityTier::from_cv(4.99), StabilityTier::High);
        assert_eq!(StabilityTier::from_cv(5.0), StabilityTier::Medium);
        assert_eq!(StabilityTier::from_cv(10.0), StabilityTier::Low);

        assert_eq!(OeeTier::from_oee(85.0), OeeTier::WorldClass);
        assert_eq!(OeeTier::from_oee(84.99), OeeTier::Excellent);
        assert_eq!(OeeTier::from_oee(65.0), OeeTier::Fair);
        assert_eq!(OeeTier::from_oee(64.99), OeeTier::NeedsImprovement);
    }
}
