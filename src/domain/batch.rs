use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::keywords::KeywordCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Temperature,
    Pressure,
    Acidity,
    Duration,
    Other,
}

impl ParameterKind {
    /// Checked in declaration order; the first matching kind wins.
    pub fn classify(parameter: &str) -> Self {
        if KeywordCategory::Temperature.matches(parameter) {
            ParameterKind::Temperature
        } else if KeywordCategory::Pressure.matches(parameter) {
            ParameterKind::Pressure
        } else if KeywordCategory::Acidity.matches(parameter) {
            ParameterKind::Acidity
        } else if KeywordCategory::Duration.matches(parameter) {
            ParameterKind::Duration
        } else {
            ParameterKind::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    Normal,
    Deviated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityStatus {
    Passed,
    Pending,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Pass,
    Investigate,
}

/// Target/actual/status triple for one step parameter of one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterReading {
    pub key: String,
    pub step_number: usize,
    pub step_name: String,
    pub parameter: String,
    pub kind: ParameterKind,
    pub target: f64,
    pub actual: f64,
    pub status: ReadingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRecord {
    pub batch_number: String,
    pub product_name: String,
    pub manufacturing_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub batch_size: u32,
    pub line: String,
    pub shift: String,
    pub operator: String,
    pub supervisor: String,
    pub yield_percent: f64,
    pub quality_status: QualityStatus,
    pub overall_status: OverallStatus,
    pub readings: Vec<ParameterReading>,
}

impl BatchRecord {
    pub fn passed(&self) -> bool {
        self.overall_status == OverallStatus::Pass
    }

    /// Actual value recorded under `key`; the last reading wins when a step
    /// produced the same key twice.
    pub fn actual(&self, key: &str) -> Option<f64> {
        self.readings
            .iter()
            .rev()
            .find(|reading| reading.key == key)
            .map(|reading| reading.actual)
    }
}

/// Lowercases `text` and collapses every run of non-alphanumeric characters
/// into a single `_`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    slug
}

pub fn column_key(step_number: usize, parameter: &str) -> String {
    format!("step_{step_number}_{}", slugify(parameter))
}

/// `step_1_temperature_control` becomes `Step 1 Temperature Control`.
pub fn column_label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct reading keys in first-seen order across the table.
pub fn reading_columns(batches: &[BatchRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for batch in batches {
        for reading in &batch.readings {
            if !columns.contains(&reading.key) {
                columns.push(reading.key.clone());
            }
        }
    }
    columns
}

/// Actual values of one column in batch order, skipping batches without it.
pub fn column_values(batches: &[BatchRecord], key: &str) -> Vec<f64> {
    batches.iter().filter_map(|batch| batch.actual(key)).collect()
}
