use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::commands::base_commands::ProductSelection;
use crate::domain::catalog::ProcessCatalog;
use crate::domain::process::ProcessDefinition;
use crate::services::catalog_yaml::{CatalogYamlError, builtin_catalog, load_catalog_from_yaml_file};
use crate::services::dashboard_config::{DashboardConfig, DashboardConfigError};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogYamlError),
    #[error(transparent)]
    Config(#[from] DashboardConfigError),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown product {product} in category {category}")]
    UnknownProduct { category: String, product: String },
    #[error("failed to serialize report as yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize report as json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Configuration and catalog shared by every command of one invocation.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: DashboardConfig,
    pub catalog: ProcessCatalog,
}

impl AppContext {
    /// A `--catalog` path on the command line wins over `catalog_path` in the config.
    pub fn load(config_path: Option<&Path>, catalog_path: Option<&Path>) -> Result<Self, CommandError> {
        let config = DashboardConfig::load(config_path)?;
        let catalog = match catalog_path.or(config.catalog_path.as_deref()) {
            Some(path) => {
                info!(path = %path.display(), "using catalog file");
                load_catalog_from_yaml_file(path)?
            }
            None => builtin_catalog()?,
        };
        Ok(Self { config, catalog })
    }

    pub fn process(&self, selection: &ProductSelection) -> Result<&ProcessDefinition, CommandError> {
        if !self.catalog.categories().contains(&selection.category.as_str()) {
            return Err(CommandError::UnknownCategory(selection.category.clone()));
        }
        self.catalog
            .definition(&selection.category, &selection.product)
            .ok_or_else(|| CommandError::UnknownProduct {
                category: selection.category.clone(),
                product: selection.product.clone(),
            })
    }

    pub fn batch_count(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.config.batch_count)
    }
}
