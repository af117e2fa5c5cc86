//! Pricewise command-line comparison

use std::{io, process};

use jiff::Timestamp;
use thiserror::Error;
use tracing::{error, info};

use pricewise::{
    cache::{CatalogCache, FileSource},
    catalog::CatalogError,
    comparison::{ComparisonError, compare},
    config::{Config, QueryError},
    observability,
    prices::{PriceError, parse_currency},
    render::{RenderError, render},
};

/// Errors that end a comparison run.
#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Currency(#[from] PriceError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Comparison(#[from] ComparisonError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

fn main() {
    // Load configuration from .env and CLI arguments
    let config = Config::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        process::exit(1);
    }

    if let Err(error) = run(&config) {
        error!(%error, "comparison failed");

        #[expect(
            clippy::print_stderr,
            reason = "the default log level may hide the error event"
        )]
        {
            eprintln!("Error: {error}");
        }

        process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), RunError> {
    let currency = parse_currency(&config.output.currency)?;
    let query = config.query.query()?;

    let mut cache =
        CatalogCache::new(FileSource::new(&config.catalog.path)).with_ttl(config.catalog.ttl());
    let catalog = cache.get(Timestamp::now())?;

    info!(
        stores = catalog.len(),
        entries = catalog.entry_count(),
        product = %query.name,
        "comparing product"
    );

    let report = compare(&query, catalog)?;

    render(
        &mut io::stdout().lock(),
        config.output.format,
        &query,
        &report,
        currency,
    )?;

    Ok(())
}
