//! Output config

use clap::Args;

use crate::render::OutputFormat;

/// How the report is printed.
#[derive(Debug, Args)]
pub struct OutputConfig {
    /// Output format (table, json, yaml)
    #[arg(short, long, env = "PRICEWISE_FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Currency used to display prices (EUR, GBP, USD)
    #[arg(long, env = "PRICEWISE_CURRENCY", default_value = "EUR")]
    pub currency: String,
}
