use std::fs;
use std::io::{self, Write};

use serde::Serialize;

use crate::commands::base_commands::{OutputArgs, OutputFormat};
use crate::commands::context::CommandError;

/// Renders `report` in the requested format and writes it to the output file or stdout.
///
/// `text` renders the human-readable form; reports that return `None` fall
/// back to YAML.
pub fn write_report<T, F>(report: &T, output: &OutputArgs, text: F) -> Result<(), CommandError>
where
    T: Serialize,
    F: FnOnce(&T) -> Option<String>,
{
    let rendered = render_report(report, output.format, text)?;
    match &output.output {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!("Report written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

pub fn render_report<T, F>(report: &T, format: OutputFormat, text: F) -> Result<String, CommandError>
where
    T: Serialize,
    F: FnOnce(&T) -> Option<String>,
{
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => match text(report) {
            Some(rendered) => Ok(rendered),
            None => Ok(serde_yaml::to_string(report)?),
        },
    }
}
