use serde::Serialize;

use crate::domain::process::ProcessDefinition;

/// Header of a blank batch record. Every field is filled in on the shop floor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateHeader {
    pub product: String,
    pub batch_number: Option<String>,
    pub manufacturing_date: Option<String>,
    pub expiry_date: Option<String>,
    pub batch_size: Option<String>,
    pub line: Option<String>,
    pub shift: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateParameter {
    pub name: String,
    pub target: Option<String>,
    pub actual: Option<String>,
    pub lower_limit: Option<String>,
    pub upper_limit: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateStep {
    pub step_number: usize,
    pub name: String,
    pub equipment: Vec<String>,
    pub declared_time: String,
    pub parameters: Vec<TemplateParameter>,
    pub operator_signature: Option<String>,
    pub supervisor_signature: Option<String>,
    pub qc_check: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchRecordTemplate {
    pub header: TemplateHeader,
    pub steps: Vec<TemplateStep>,
}

pub fn batch_record_template(process: &ProcessDefinition) -> BatchRecordTemplate {
    let steps = process
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| TemplateStep {
            step_number: index + 1,
            name: step.name.clone(),
            equipment: step.equipment.clone(),
            declared_time: step.duration.to_string(),
            parameters: step
                .parameters
                .iter()
                .map(|parameter| TemplateParameter {
                    name: parameter.clone(),
                    ..TemplateParameter::default()
                })
                .collect(),
            ..TemplateStep::default()
        })
        .collect();

    BatchRecordTemplate {
        header: TemplateHeader {
            product: process.product_name(),
            ..TemplateHeader::default()
        },
        steps,
    }
}
