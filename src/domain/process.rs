use std::fmt;

use serde::Serialize;

use crate::domain::duration::StepDuration;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessStep {
    pub name: String,
    pub stage: Option<String>,
    pub parameters: Vec<String>,
    pub pat_applications: Vec<String>,
    pub equipment: Vec<String>,
    pub duration: StepDuration,
}

impl ProcessStep {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum GmpClassification {
    #[default]
    Unclassified,
    Low,
    Medium,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    High,
    Critical,
    /// Advanced therapy medicinal product.
    #[serde(rename = "ATMP")]
    Atmp,
}

impl GmpClassification {
    /// Unknown labels resolve to [`GmpClassification::Unclassified`].
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "low" => GmpClassification::Low,
            "medium" => GmpClassification::Medium,
            "mediumhigh" => GmpClassification::MediumHigh,
            "high" => GmpClassification::High,
            "critical" => GmpClassification::Critical,
            "atmp" => GmpClassification::Atmp,
            _ => GmpClassification::Unclassified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GmpClassification::Unclassified => "Unclassified",
            GmpClassification::Low => "Low",
            GmpClassification::Medium => "Medium",
            GmpClassification::MediumHigh => "Medium-High",
            GmpClassification::High => "High",
            GmpClassification::Critical => "Critical",
            GmpClassification::Atmp => "ATMP",
        }
    }

    pub fn risk_score(self) -> u8 {
        match self {
            GmpClassification::Unclassified => 0,
            GmpClassification::Low => 1,
            GmpClassification::Medium => 2,
            GmpClassification::MediumHigh => 3,
            GmpClassification::High => 4,
            GmpClassification::Critical | GmpClassification::Atmp => 5,
        }
    }
}

impl fmt::Display for GmpClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualityAttribute {
    pub name: String,
    pub target: Option<String>,
    pub method: Option<String>,
    pub limit: Option<String>,
}

/// One product's manufacturing process. Step order is significant: steps are
/// identified by their 1-based position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessDefinition {
    pub name: String,
    pub description: String,
    pub gmp_classification: GmpClassification,
    pub guidelines: Vec<String>,
    pub key_features: Vec<String>,
    pub critical_quality_attributes: Vec<QualityAttribute>,
    pub validation_requirements: Vec<String>,
    pub data_integrity_requirements: Vec<String>,
    pub steps: Vec<ProcessStep>,
}

impl ProcessDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Name printed on batch records: the product name, else the first word of
    /// the description.
    pub fn product_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.trim().to_string();
        }
        self.description
            .split_whitespace()
            .next()
            .unwrap_or("Product")
            .to_string()
    }
}
