use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::commands::base_commands::{OutputArgs, ProductSelection};
use crate::commands::context::{AppContext, CommandError};
use crate::commands::output::write_report;
use crate::commands::report_format::{format_oee_report, format_quality_report, format_trend_report};
use crate::domain::batch::BatchRecord;
use crate::services::batch_analysis::{summarize_quality, summarize_trends};
use crate::services::batch_generator::generate_batch_records;
use crate::services::oee::{compute_oee, compute_oee_with_rng};

fn generate(
    context: &AppContext,
    selection: &ProductSelection,
    batches: Option<usize>,
) -> Result<Vec<BatchRecord>, CommandError> {
    let process = context.process(selection)?;
    Ok(generate_batch_records(process, context.batch_count(batches)))
}

pub fn batches_command(
    context: &AppContext,
    selection: &ProductSelection,
    batches: Option<usize>,
    output: &OutputArgs,
) -> Result<(), CommandError> {
    let records = generate(context, selection, batches)?;
    write_report(&records, output, |_| None)
}

pub fn trends_command(
    context: &AppContext,
    selection: &ProductSelection,
    batches: Option<usize>,
    parameters: &[String],
    output: &OutputArgs,
) -> Result<(), CommandError> {
    let records = generate(context, selection, batches)?;
    let parameters = if parameters.is_empty() {
        context.config.trend_parameters.as_slice()
    } else {
        parameters
    };
    let report = summarize_trends(&records, parameters);
    write_report(&report, output, |report| Some(format_trend_report(report)))
}

pub fn quality_command(
    context: &AppContext,
    selection: &ProductSelection,
    batches: Option<usize>,
    output: &OutputArgs,
) -> Result<(), CommandError> {
    let records = generate(context, selection, batches)?;
    let report = summarize_quality(&records);
    write_report(&report, output, |report| Some(format_quality_report(report)))
}

/// `seed` on the command line wins over `oee_seed` in the config; without
/// either the draws are unseeded.
pub fn oee_command(
    context: &AppContext,
    selection: &ProductSelection,
    batches: Option<usize>,
    seed: Option<u64>,
    output: &OutputArgs,
) -> Result<(), CommandError> {
    let records = generate(context, selection, batches)?;
    let report = match seed.or(context.config.oee_seed) {
        Some(seed) => compute_oee_with_rng(&records, &mut StdRng::seed_from_u64(seed)),
        None => compute_oee(&records),
    };
    write_report(&report, output, |report| {
        Some(match report {
            Some(result) => format_oee_report(result),
            None => "Overall Equipment Efficiency\nNo batches".to_string(),
        })
    })
}
