//! Report rendering
//!
//! Turns a [`ComparisonReport`] into terminal tables, JSON or YAML. None of
//! this feeds back into matching.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    prices::format_money,
    products::QueryProduct,
    report::{ComparisonReport, MatchResult},
};

/// Shown when no store carries a match.
pub const NO_DATA_MESSAGE: &str = "No comparison data available";

/// Errors raised while writing a report.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// JSON serialisation error
    #[error("failed to serialise report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialisation error
    #[error("failed to serialise report as YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Table,

    /// Pretty-printed JSON.
    Json,

    /// YAML.
    Yaml,
}

/// Write `report` in the chosen format.
///
/// # Errors
///
/// Returns a [`RenderError`] if serialisation or writing fails.
pub fn render(
    out: &mut impl io::Write,
    format: OutputFormat,
    query: &QueryProduct,
    report: &ComparisonReport,
    currency: &'static Currency,
) -> Result<(), RenderError> {
    match format {
        OutputFormat::Table => write_tables(out, query, report, currency),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;

            Ok(())
        }
        OutputFormat::Yaml => Ok(serde_norway::to_writer(out, report)?),
    }
}

/// Write the report as one table per price bucket, followed by the stores
/// without a match.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if writing fails.
pub fn write_tables(
    out: &mut impl io::Write,
    query: &QueryProduct,
    report: &ComparisonReport,
    currency: &'static Currency,
) -> Result<(), RenderError> {
    writeln!(out, "{}", query_line(query, currency))?;

    if !report.has_matches {
        writeln!(out, "\n{NO_DATA_MESSAGE}")?;
        write_not_found(out, report)?;

        return Ok(());
    }

    write_section(
        out,
        "Cheaper",
        "Savings",
        &report.cheaper,
        Some(Color::FG_GREEN),
        currency,
    )?;
    write_section(out, "Same price", "Savings", &report.same_price, None, currency)?;
    write_section(
        out,
        "More expensive",
        "Difference",
        &report.expensive,
        Some(Color::FG_RED),
        currency,
    )?;

    if let Some(best) = report.best_savings() {
        writeln!(out, "\nBest saving: {}", format_money(best, currency))?;
    }

    write_not_found(out, report)
}

fn query_line(query: &QueryProduct, currency: &'static Currency) -> String {
    let price = if query.is_on_bonus() {
        format!(
            "{} (was {})",
            format_money(query.effective_price(), currency),
            format_money(query.price, currency)
        )
    } else {
        format_money(query.price, currency)
    };

    let size = query
        .weight
        .as_deref()
        .filter(|_| query.has_size())
        .map(|weight| format!(", {weight}"))
        .unwrap_or_default();

    format!("{}{size}: {price}", query.name)
}

fn write_section(
    out: &mut impl io::Write,
    title: &str,
    amount_header: &str,
    results: &[MatchResult],
    amount_color: Option<Color>,
    currency: &'static Currency,
) -> Result<(), RenderError> {
    if results.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Store", "Product", "Size", "Price", amount_header, "Link"]);

    for result in results {
        let amount = result
            .delta
            .savings()
            .or_else(|| result.delta.difference())
            .map(|amount| format_money(amount, currency))
            .unwrap_or_default();

        builder.push_record([
            result.store.clone(),
            result.name.clone(),
            result.weight.clone(),
            format_money(result.price, currency),
            amount,
            result.link.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..5), Alignment::right());

    if let Some(color) = amount_color {
        table.modify(Columns::new(4..5), color);
    }

    writeln!(out, "\n{title} ({})\n{table}", results.len())?;

    Ok(())
}

fn write_not_found(out: &mut impl io::Write, report: &ComparisonReport) -> Result<(), RenderError> {
    if report.not_found.is_empty() {
        return Ok(());
    }

    writeln!(out, "\nNot found at: {}", report.not_found.join(", "))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use super::*;
    use crate::report::PriceDelta;

    fn report() -> TestResult<ComparisonReport> {
        let mut report = ComparisonReport::default();

        report.push(MatchResult {
            delta: PriceDelta::classify(Decimal::from_str("1.29")?, Decimal::from_str("1.49")?),
            store: "Jumbo".to_string(),
            name: "Jumbo Biologische Volle Melk 1L".to_string(),
            link: "https://www.jumbo.com/melk".to_string(),
            price: Decimal::from_str("1.29")?,
            weight: "1 l".to_string(),
            logo: String::new(),
            score: 0.9,
        });
        report.push_not_found("Lidl");

        Ok(report)
    }

    fn query() -> TestResult<QueryProduct> {
        Ok(QueryProduct::new(
            "AH Biologisch Volle Melk",
            "AH",
            Decimal::from_str("1.49")?,
        ))
    }

    fn rendered(format: OutputFormat, report: &ComparisonReport) -> TestResult<String> {
        let mut out = Vec::new();
        render(&mut out, format, &query()?, report, EUR)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn table_lists_matches_and_missing_stores() -> TestResult {
        let text = rendered(OutputFormat::Table, &report()?)?;

        assert!(text.contains("AH Biologisch Volle Melk"));
        assert!(text.contains("Cheaper (1)"));
        assert!(text.contains("Jumbo Biologische Volle Melk 1L"));
        assert!(text.contains(&format_money(Decimal::from_str("0.20")?, EUR)));
        assert!(text.contains("Not found at: Lidl"));
        assert!(!text.contains("More expensive"));

        Ok(())
    }

    #[test]
    fn table_reports_missing_data() -> TestResult {
        let mut report = ComparisonReport::default();
        report.push_not_found("Jumbo");

        let text = rendered(OutputFormat::Table, &report)?;

        assert!(text.contains(NO_DATA_MESSAGE));
        assert!(text.contains("Not found at: Jumbo"));

        Ok(())
    }

    #[test]
    fn bonus_price_is_shown_with_regular_price() -> TestResult {
        let query = query()?.with_bonus_price(Decimal::from_str("1.19")?);

        let line = query_line(&query, EUR);

        assert!(line.contains(&format!(
            "{} (was {})",
            format_money(Decimal::from_str("1.19")?, EUR),
            format_money(Decimal::from_str("1.49")?, EUR)
        )));

        Ok(())
    }

    #[test]
    fn json_output_is_the_serialised_report() -> TestResult {
        let report = report()?;
        let text = rendered(OutputFormat::Json, &report)?;

        let value: serde_json::Value = serde_json::from_str(&text)?;

        assert_eq!(value, serde_json::to_value(&report)?);

        Ok(())
    }

    #[test]
    fn yaml_output_carries_buckets() -> TestResult {
        let text = rendered(OutputFormat::Yaml, &report()?)?;

        assert!(text.contains("cheaper:"));
        assert!(text.contains("notFound:"));
        assert!(text.contains("type: cheaper"));

        Ok(())
    }
}
