//! Command-line configuration

use clap::Parser;

pub mod catalog;
pub mod logging;
pub mod output;
pub mod query;

pub use catalog::CatalogConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use output::OutputConfig;
pub use query::{QueryConfig, QueryError};

/// Pricewise configuration
#[derive(Debug, Parser)]
#[command(
    name = "pricewise",
    about = "Compare a grocery product's price across supermarkets",
    long_about = None
)]
pub struct Config {
    /// Catalog source settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// The product to compare.
    #[command(flatten)]
    pub query: QueryConfig,

    /// Report output settings.
    #[command(flatten)]
    pub output: OutputConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, str::FromStr};

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::{render::OutputFormat, selection::SelectionError};

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(["pricewise", "--catalog", "catalog.json"].iter().chain(args))
    }

    #[test]
    fn query_fields_build_product() -> TestResult {
        let config = parse(&[
            "--name",
            "AH Biologisch Volle Melk",
            "--brand",
            "AH",
            "--price",
            "1,49",
            "--bonus-price",
            "1.19",
            "--weight",
            "1 l",
        ])?;

        let query = config.query.query()?;

        assert_eq!(query.name, "AH Biologisch Volle Melk");
        assert_eq!(query.price, Decimal::from_str("1.49")?);
        assert_eq!(query.effective_price(), Decimal::from_str("1.19")?);
        assert_eq!(query.weight.as_deref(), Some("1 l"));

        Ok(())
    }

    #[test]
    fn defaults_apply() -> TestResult {
        let config = parse(&["--name", "Melk", "--price", "1"])?;

        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.output.currency, "EUR");
        assert_eq!(config.catalog.ttl(), jiff::SignedDuration::from_hours(24));
        assert_eq!(config.logging.log_format, LogFormat::Compact);

        Ok(())
    }

    #[test]
    fn deselected_tokens_and_brand_are_applied() -> TestResult {
        let config = parse(&[
            "--name",
            "AH Biologisch Volle Melk",
            "--brand",
            "AH",
            "--price",
            "1.49",
            "--deselect",
            "Biologisch",
            "--no-brand",
        ])?;

        assert_eq!(config.query.query()?.name, "Volle Melk");

        Ok(())
    }

    #[test]
    fn unknown_deselected_token_is_an_error() -> TestResult {
        let config = parse(&["--name", "Volle Melk", "--price", "1.49", "-d", "Kaas"])?;

        assert!(matches!(
            config.query.query(),
            Err(QueryError::Selection(SelectionError::UnknownToken(token))) if token == "Kaas"
        ));

        Ok(())
    }

    #[test]
    fn missing_price_is_an_error() -> TestResult {
        let config = parse(&["--name", "Volle Melk"])?;

        assert!(matches!(config.query.product(), Err(QueryError::MissingPrice)));

        Ok(())
    }

    #[test]
    fn malformed_price_is_rejected_by_the_parser() {
        assert!(parse(&["--name", "Melk", "--price", "gratis"]).is_err());
    }

    #[test]
    fn product_card_file_is_read() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("card.json");
        fs::write(
            &path,
            r#"{"productCard": {"title": "AH Halfvolle Melk", "brand": "AH", "currentPrice": 1.09}}"#,
        )?;

        let path = path.to_string_lossy();
        let config = parse(&["--product-card", &path])?;
        let query = config.query.query()?;

        assert_eq!(query.name, "AH Halfvolle Melk");
        assert_eq!(query.price, Decimal::from_str("1.09")?);

        Ok(())
    }

    #[test]
    fn product_card_conflicts_with_fields() {
        assert!(parse(&["--product-card", "card.json", "--name", "Melk"]).is_err());
    }
}
