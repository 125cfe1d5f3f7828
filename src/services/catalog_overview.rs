use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::catalog::ProcessCatalog;
use crate::domain::process::GmpClassification;
use crate::services::statistics::round_to;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSummaryRow {
    pub category: String,
    pub product: String,
    pub gmp_classification: GmpClassification,
    pub step_count: usize,
    pub total_time_minutes: f64,
    pub pat_application_count: usize,
    pub parameter_count: usize,
    pub unique_equipment_count: usize,
    pub key_feature_count: usize,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskMatrixRow {
    pub category: String,
    pub product: String,
    pub gmp_classification: GmpClassification,
    pub risk_score: u8,
    pub validation_requirements: String,
    pub data_integrity_requirements: String,
    pub guidelines: String,
    pub cqa_count: usize,
}

pub fn process_summary(catalog: &ProcessCatalog) -> Vec<ProcessSummaryRow> {
    catalog
        .iter()
        .map(|(category, process)| {
            let equipment: BTreeSet<&str> = process
                .steps
                .iter()
                .flat_map(|step| step.equipment.iter().map(String::as_str))
                .collect();
            ProcessSummaryRow {
                category: category.to_string(),
                product: process.name.clone(),
                gmp_classification: process.gmp_classification,
                step_count: process.steps.len(),
                total_time_minutes: round_to(
                    process.steps.iter().map(|s| s.duration.as_minutes()).sum(),
                    1,
                ),
                pat_application_count: process
                    .steps
                    .iter()
                    .map(|s| s.pat_applications.len())
                    .sum(),
                parameter_count: process.steps.iter().map(|s| s.parameters.len()).sum(),
                unique_equipment_count: equipment.len(),
                key_feature_count: process.key_features.len(),
                description: preview(&process.description),
            }
        })
        .collect()
}

fn preview(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return description.to_string();
    }
    let truncated: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{truncated}...")
}

/// Products ordered by classification score, highest first; ties keep catalog order.
pub fn gmp_risk_matrix(catalog: &ProcessCatalog) -> Vec<RiskMatrixRow> {
    let mut rows: Vec<RiskMatrixRow> = catalog
        .iter()
        .map(|(category, process)| RiskMatrixRow {
            category: category.to_string(),
            product: process.name.clone(),
            gmp_classification: process.gmp_classification,
            risk_score: process.gmp_classification.risk_score(),
            validation_requirements: join_or(
                &process.validation_requirements,
                "Standard validation",
            ),
            data_integrity_requirements: join_or(
                &process.data_integrity_requirements,
                "Baseline requirements",
            ),
            guidelines: join_or(&process.guidelines, "General requirements"),
            cqa_count: process.critical_quality_attributes.len(),
        })
        .collect();
    rows.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    rows
}

fn join_or(items: &[String], default: &str) -> String {
    if items.is_empty() {
        default.to_string()
    } else {
        items.join(", ")
    }
}

/// Equipment label mapped to the `"Category - Product"` entries that use it.
pub fn equipment_master_list(catalog: &ProcessCatalog) -> BTreeMap<String, Vec<String>> {
    let mut users: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (category, process) in catalog.iter() {
        for equipment in process.steps.iter().flat_map(|step| step.equipment.iter()) {
            users
                .entry(equipment.clone())
                .or_default()
                .insert(format!("{category} - {}", process.name));
        }
    }
    users
        .into_iter()
        .map(|(equipment, products)| (equipment, products.into_iter().collect()))
        .collect()
}
