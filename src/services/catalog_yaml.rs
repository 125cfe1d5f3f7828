use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::catalog::ProcessCatalog;
use crate::domain::duration::{DurationUnit, StepDuration};
use crate::domain::process::{GmpClassification, ProcessDefinition, ProcessStep, QualityAttribute};

/// Curated catalog shipped with the binary.
pub const BUILTIN_CATALOG_YAML: &str = include_str!("../../catalog/builtin.yaml");

#[derive(Error, Debug)]
pub enum CatalogYamlError {
    #[error("failed to read catalog yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse catalog yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("catalog contains a category without a name")]
    EmptyCategoryName,
    #[error("category {category} contains a product without a name")]
    EmptyProductName { category: String },
    #[error("product {product} is defined twice in category {category}")]
    DuplicateProduct { category: String, product: String },
}

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(default)]
    categories: Vec<CategoryRecord>,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    name: String,
    #[serde(default)]
    products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    name: String,
    description: Option<String>,
    gmp_classification: Option<String>,
    #[serde(default)]
    guidelines: Vec<String>,
    #[serde(default)]
    key_features: Vec<String>,
    #[serde(default)]
    critical_quality_attributes: Vec<QualityAttributeRecord>,
    #[serde(default)]
    validation_requirements: Vec<String>,
    #[serde(default)]
    data_integrity_requirements: Vec<String>,
    #[serde(default)]
    steps: Vec<StepRecord>,
}

#[derive(Debug, Deserialize)]
struct QualityAttributeRecord {
    name: String,
    target: Option<Value>,
    method: Option<Value>,
    limit: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct StepRecord {
    name: String,
    stage: Option<String>,
    #[serde(default)]
    parameters: Vec<String>,
    #[serde(default)]
    pat_applications: Vec<String>,
    #[serde(default)]
    equipment: Vec<String>,
    duration_min: Option<Value>,
    duration_h: Option<Value>,
    duration_days: Option<Value>,
}

pub fn load_catalog_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<ProcessCatalog, CatalogYamlError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    debug!(path = %path.as_ref().display(), "loading catalog");
    deserialize_catalog_from_yaml_str(&contents)
}

pub fn builtin_catalog() -> Result<ProcessCatalog, CatalogYamlError> {
    deserialize_catalog_from_yaml_str(BUILTIN_CATALOG_YAML)
}

pub fn deserialize_catalog_from_yaml_str(input: &str) -> Result<ProcessCatalog, CatalogYamlError> {
    let record: CatalogRecord = serde_yaml::from_str(input)?;
    let mut catalog = ProcessCatalog::new();

    for category in record.categories {
        let category_name = category.name.trim().to_string();
        if category_name.is_empty() {
            return Err(CatalogYamlError::EmptyCategoryName);
        }
        for product in category.products {
            let definition = product_from_record(product);
            if definition.name.is_empty() {
                return Err(CatalogYamlError::EmptyProductName {
                    category: category_name,
                });
            }
            let product_name = definition.name.clone();
            if catalog.insert(&category_name, definition).is_some() {
                return Err(CatalogYamlError::DuplicateProduct {
                    category: category_name,
                    product: product_name,
                });
            }
        }
    }

    debug!(
        categories = catalog.categories().len(),
        products = catalog.product_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn product_from_record(record: ProductRecord) -> ProcessDefinition {
    let name = record.name.trim().to_string();
    let steps = record
        .steps
        .into_iter()
        .map(|step| step_from_record(&name, step))
        .collect();

    ProcessDefinition {
        description: record.description.unwrap_or_default(),
        gmp_classification: record
            .gmp_classification
            .as_deref()
            .map(GmpClassification::from_label)
            .unwrap_or_default(),
        guidelines: record.guidelines,
        key_features: record.key_features,
        critical_quality_attributes: record
            .critical_quality_attributes
            .into_iter()
            .map(|cqa| QualityAttribute {
                name: cqa.name,
                target: cqa.target.as_ref().and_then(scalar_text),
                method: cqa.method.as_ref().and_then(scalar_text),
                limit: cqa.limit.as_ref().and_then(scalar_text),
            })
            .collect(),
        validation_requirements: record.validation_requirements,
        data_integrity_requirements: record.data_integrity_requirements,
        steps,
        name,
    }
}

fn step_from_record(product: &str, record: StepRecord) -> ProcessStep {
    let duration = parse_step_duration(product, &record);
    ProcessStep {
        name: record.name,
        stage: record.stage,
        parameters: record.parameters,
        pat_applications: record.pat_applications,
        equipment: record.equipment,
        duration,
    }
}

/// The first present field wins, in the order minutes, hours, days.
fn parse_step_duration(product: &str, record: &StepRecord) -> StepDuration {
    let fields = [
        (record.duration_min.as_ref(), DurationUnit::Minutes),
        (record.duration_h.as_ref(), DurationUnit::Hours),
        (record.duration_days.as_ref(), DurationUnit::Days),
    ];
    let mut present = fields
        .iter()
        .filter_map(|(value, unit)| value.map(|value| (value, *unit)));

    let Some((value, unit)) = present.next() else {
        return StepDuration::zero();
    };
    if present.next().is_some() {
        warn!(
            product,
            step = %record.name,
            "step declares more than one duration field, using the first"
        );
    }

    match duration_magnitude(value) {
        Some(magnitude) => StepDuration::new(magnitude, unit),
        None => {
            warn!(
                product,
                step = %record.name,
                value = ?value,
                "unparseable step duration, treating it as zero"
            );
            StepDuration::zero()
        }
    }
}

fn duration_magnitude(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite() && *v >= 0.0),
        Value::String(text) => StepDuration::parse_magnitude(text),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
