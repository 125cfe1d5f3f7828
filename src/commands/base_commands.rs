use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Dashboard config YAML
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Catalog YAML used instead of the built-in catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ProductSelection {
    /// Catalog category
    #[arg(short, long)]
    pub category: String,
    /// Product within the category
    #[arg(short, long)]
    pub product: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct OutputArgs {
    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
    /// Output file, stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
    Text,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog categories
    Categories {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the products of a category
    Products {
        /// Catalog category
        #[arg(short, long)]
        category: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// One summary row per catalog product
    Summary {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Catalog products ranked by GMP classification
    RiskMatrix {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Equipment used across the catalog
    Equipment {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Score the process risk of a product
    Risk {
        #[command(flatten)]
        selection: ProductSelection,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check a product process against the GMP rule set
    Compliance {
        #[command(flatten)]
        selection: ProductSelection,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Process size and complexity metrics
    Metrics {
        #[command(flatten)]
        selection: ProductSelection,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Blank batch record template for a product
    Template {
        #[command(flatten)]
        selection: ProductSelection,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate synthetic batch records
    Batches {
        #[command(flatten)]
        selection: ProductSelection,
        /// Number of batches, defaults to the configured batch count
        #[arg(short = 'n', long)]
        batches: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Per-parameter trend statistics over synthetic batches
    Trends {
        #[command(flatten)]
        selection: ProductSelection,
        /// Number of batches, defaults to the configured batch count
        #[arg(short = 'n', long)]
        batches: Option<usize>,
        /// Parameter name filter, repeatable; defaults to the configured list
        #[arg(long = "parameter")]
        parameters: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Quality and yield report over synthetic batches
    Quality {
        #[command(flatten)]
        selection: ProductSelection,
        /// Number of batches, defaults to the configured batch count
        #[arg(short = 'n', long)]
        batches: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Overall equipment efficiency over synthetic batches
    Oee {
        #[command(flatten)]
        selection: ProductSelection,
        /// Number of batches, defaults to the configured batch count
        #[arg(short = 'n', long)]
        batches: Option<usize>,
        /// Seed for the availability and performance draws
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
