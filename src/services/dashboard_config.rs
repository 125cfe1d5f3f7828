use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("batch_count must be greater than zero")]
    InvalidBatchCount,
}

/// Settings read from `--config`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub catalog_path: Option<PathBuf>,
    pub batch_count: usize,
    pub trend_parameters: Vec<String>,
    pub oee_seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            batch_count: 10,
            trend_parameters: vec![
                "temperature".to_string(),
                "pressure".to_string(),
                "ph".to_string(),
                "time".to_string(),
            ],
            oee_seed: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, DashboardConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DashboardConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, DashboardConfigError> {
        // An empty document deserializes as null rather than an empty map.
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: DashboardConfig = serde_yaml::from_str(input)?;
        if config.batch_count == 0 {
            return Err(DashboardConfigError::InvalidBatchCount);
        }
        Ok(config)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, DashboardConfigError> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = DashboardConfig::from_yaml_str("batch_count: 25\n").unwrap();
        assert_eq!(config.batch_count, 25);
        assert_eq!(config.trend_parameters, DashboardConfig::default().trend_parameters);
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.oee_seed, None);
    }

    #[test]
    fn empty_document_is_the_default_config() {
        assert_eq!(
            DashboardConfig::from_yaml_str("").unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn reads_every_field() {
        let input = "catalog_path: plant/catalog.yaml\nbatch_count: 4\ntrend_parameters: [pressure]\noee_seed: 11\n";
        let config = DashboardConfig::from_yaml_str(input).unwrap();
        assert_eq!(config.catalog_path, Some(PathBuf::from("plant/catalog.yaml")));
        assert_eq!(config.trend_parameters, vec!["pressure".to_string()]);
        assert_eq!(config.oee_seed, Some(11));
    }

    #[test]
    fn zero_batch_count_is_rejected() {
        let error = DashboardConfig::from_yaml_str("batch_count: 0\n").unwrap_err();
        assert!(matches!(error, DashboardConfigError::InvalidBatchCount));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = DashboardConfig::load(Some(Path::new("no/such/config.yaml"))).unwrap_err();
        assert!(error.to_string().contains("no/such/config.yaml"));
    }
}
