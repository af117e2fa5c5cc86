//! Prices

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading prices.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The text is not a number.
    #[error("malformed price: {0:?}")]
    Malformed(String),

    /// The amount is below zero.
    #[error("negative price: {0}")]
    Negative(Decimal),

    /// Unknown currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// A price as it arrives from outside: either text or a JSON/YAML number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    /// Price given as text, e.g. `"1.29"`.
    Text(String),

    /// Price given as a number, e.g. `1.29`.
    Number(f64),
}

impl PriceValue {
    /// Parse into a decimal amount.
    ///
    /// # Errors
    ///
    /// See [`parse_price`].
    pub fn parse(&self) -> Result<Decimal, PriceError> {
        match self {
            Self::Text(text) => parse_price(text),
            Self::Number(number) => parse_price(&number.to_string()),
        }
    }
}

/// Parse a shelf price such as `"1.29"`, `"€ 1,29"` or `"2"`.
///
/// A single comma is read as the decimal separator when no dot is present.
///
/// # Errors
///
/// - [`PriceError::Malformed`]: the text is not a decimal amount.
/// - [`PriceError::Negative`]: the amount is below zero.
pub fn parse_price(s: &str) -> Result<Decimal, PriceError> {
    let trimmed = s.trim();
    let amount = trimmed.strip_prefix('€').unwrap_or(trimmed).trim();

    let amount = if !amount.contains('.') && amount.matches(',').count() == 1 {
        amount.replacen(',', ".", 1)
    } else {
        amount.to_string()
    };

    let value = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::Malformed(s.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(PriceError::Negative(value));
    }

    Ok(value)
}

/// Round to cents, half away from zero, always keeping two decimal places.
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    rounded
}

/// Look up a supported currency by its ISO code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for codes other than EUR, GBP and USD.
pub fn parse_currency(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim().to_uppercase().as_str() {
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        other => Err(PriceError::UnknownCurrency(other.to_string())),
    }
}

/// Format an amount for display in the given currency.
pub fn format_money(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}
