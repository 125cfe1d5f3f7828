pub mod analysis_types;
pub mod batch_analysis;
pub mod batch_generator;
pub mod batch_template;
pub mod catalog_overview;
pub mod catalog_yaml;
pub mod compliance;
pub mod dashboard_config;
pub mod oee;
pub mod process_metrics;
pub mod risk_assessment;
pub mod statistics;
