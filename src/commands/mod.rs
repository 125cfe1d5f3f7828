pub mod assess_cmd;
pub mod base_commands;
pub mod batches_cmd;
pub mod catalog_cmd;
pub mod context;
pub mod output;
pub mod report_format;
