use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::keywords::KeywordCategory;
use crate::domain::process::ProcessStep;
use crate::services::statistics::round_to;

const STEP_WEIGHT: f64 = 0.5;
const PARAMETER_WEIGHT: f64 = 0.3;
const EQUIPMENT_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub total_steps: usize,
    pub total_parameters: usize,
    pub unique_equipment_count: usize,
    pub equipment: Vec<String>,
    pub total_time_hours: f64,
    pub average_parameters_per_step: f64,
    pub complexity_score: f64,
}

pub fn calculate_process_metrics(steps: &[ProcessStep]) -> ProcessMetrics {
    let total_parameters: usize = steps.iter().map(|step| step.parameters.len()).sum();
    let equipment: BTreeSet<&str> = steps
        .iter()
        .flat_map(|step| step.equipment.iter().map(String::as_str))
        .collect();
    let total_time_hours: f64 = steps.iter().map(|step| step.duration.as_hours()).sum();

    let average_parameters_per_step = if steps.is_empty() {
        0.0
    } else {
        round_to(total_parameters as f64 / steps.len() as f64, 2)
    };

    ProcessMetrics {
        total_steps: steps.len(),
        total_parameters,
        unique_equipment_count: equipment.len(),
        equipment: equipment.into_iter().map(str::to_string).collect(),
        total_time_hours: round_to(total_time_hours, 2),
        average_parameters_per_step,
        complexity_score: complexity_score(steps),
    }
}

/// Weighted blend of step count, parameter criticality and equipment sophistication.
pub fn complexity_score(steps: &[ProcessStep]) -> f64 {
    let parameter_points: u32 = steps
        .iter()
        .flat_map(|step| step.parameters.iter())
        .map(|parameter| parameter_complexity(parameter))
        .sum();
    let equipment_points: u32 = steps
        .iter()
        .flat_map(|step| step.equipment.iter())
        .map(|equipment| equipment_complexity(equipment))
        .sum();

    round_to(
        STEP_WEIGHT * steps.len() as f64
            + PARAMETER_WEIGHT * f64::from(parameter_points)
            + EQUIPMENT_WEIGHT * f64::from(equipment_points),
        2,
    )
}

fn parameter_complexity(parameter: &str) -> u32 {
    if KeywordCategory::ComplexityCriticalParameter.matches(parameter) {
        3
    } else if KeywordCategory::ComplexityKeyParameter.matches(parameter) {
        2
    } else {
        1
    }
}

fn equipment_complexity(equipment: &str) -> u32 {
    if KeywordCategory::ComplexityHighEquipment.matches(equipment) {
        3
    } else if KeywordCategory::ComplexityMediumEquipment.matches(equipment) {
        2
    } else {
        1
    }
}
