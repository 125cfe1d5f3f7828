use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use gmp_insight::commands::assess_cmd::{
    compliance_command, metrics_command, risk_command, template_command,
};
use gmp_insight::commands::base_commands::{CliArgs, Commands};
use gmp_insight::commands::batches_cmd::{
    batches_command, oee_command, quality_command, trends_command,
};
use gmp_insight::commands::catalog_cmd::{
    categories_command, equipment_command, products_command, risk_matrix_command,
    summary_command,
};
use gmp_insight::commands::context::{AppContext, CommandError};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), CommandError> {
    if let Commands::Completions { shell } = args.command {
        let mut command = CliArgs::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }

    let context = AppContext::load(args.config.as_deref(), args.catalog.as_deref())?;
    match args.command {
        Commands::Categories { output } => categories_command(&context, &output),
        Commands::Products { category, output } => products_command(&context, &category, &output),
        Commands::Summary { output } => summary_command(&context, &output),
        Commands::RiskMatrix { output } => risk_matrix_command(&context, &output),
        Commands::Equipment { output } => equipment_command(&context, &output),
        Commands::Risk { selection, output } => risk_command(&context, &selection, &output),
        Commands::Compliance { selection, output } => {
            compliance_command(&context, &selection, &output)
        }
        Commands::Metrics { selection, output } => metrics_command(&context, &selection, &output),
        Commands::Template { selection, output } => template_command(&context, &selection, &output),
        Commands::Batches {
            selection,
            batches,
            output,
        } => batches_command(&context, &selection, batches, &output),
        Commands::Trends {
            selection,
            batches,
            parameters,
            output,
        } => trends_command(&context, &selection, batches, &parameters, &output),
        Commands::Quality {
            selection,
            batches,
            output,
        } => quality_command(&context, &selection, batches, &output),
        Commands::Oee {
            selection,
            batches,
            seed,
            output,
        } => oee_command(&context, &selection, batches, seed, &output),
        Commands::Completions { .. } => Ok(()),
    }
}
