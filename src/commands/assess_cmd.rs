use crate::commands::base_commands::{OutputArgs, ProductSelection};
use crate::commands::context::{AppContext, CommandError};
use crate::commands::output::write_report;
use crate::commands::report_format::{
    format_compliance_report, format_process_metrics, format_risk_report,
};
use crate::services::batch_template::batch_record_template;
use crate::services::compliance::check_gmp_compliance;
use crate::services::process_metrics::calculate_process_metrics;
use crate::services::risk_assessment::assess_process_risk;

pub fn risk_command(
    context: &AppContext,
    selection: &ProductSelection,
    output: &OutputArgs,
) -> Result<(), CommandError> {
    let process = context.process(selection)?;
    let report = assess_process_risk(&process.steps);
    write_report(&report, output, |report| Some(format_risk_report(report)))
}

pub fn compliance_command(
    context: &AppContext,
    selection: &ProductSelection,
    output: &OutputArgs,
) -> Result<(), CommandError> {
    let process = context.process(selection)?;
    let report = check_gmp_compliance(process);
    write_report(&report, output, |report| {
        Some(format_compliance_report(report))
    })
}

pub fn metrics_command(
    context: &AppContext,
    selection: &ProductSelection,
    output: &OutputArgs,
) -> Result<(), CommandError> {
    let process = context.process(selection)?;
    let report = calculate_process_metrics(&process.steps);
    write_report(&report, output, |report| Some(format_process_metrics(report)))
}

pub fn template_command(
    context: &AppContext,
    selection: &ProductSelection,
    output: &OutputArgs,
) -> Result<(), CommandError> {
    let process = context.process(selection)?;
    write_report(&batch_record_template(process), output, |_| None)
}
