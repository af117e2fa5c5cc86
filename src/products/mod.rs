//! Products
//!
//! The product being priced, as scraped from the originating retailer.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::normalize;

pub mod card;

/// The product a shopper is looking at, used as the comparison query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryProduct {
    /// Product name, including the brand as the retailer shows it.
    pub name: String,

    /// Brand token, empty when the product has none.
    #[serde(default)]
    pub brand: String,

    /// Regular shelf price.
    pub price: Decimal,

    /// Promotional price, if any.
    #[serde(default)]
    pub bonus_price: Option<Decimal>,

    /// Package size label such as `"1 l"`.
    #[serde(default)]
    pub weight: Option<String>,
}

impl QueryProduct {
    /// Creates a new query product without a bonus price.
    pub fn new(name: impl Into<String>, brand: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            price,
            bonus_price: None,
            weight: None,
        }
    }

    /// Sets the promotional price.
    #[must_use]
    pub fn with_bonus_price(mut self, bonus_price: Decimal) -> Self {
        self.bonus_price = Some(bonus_price);
        self
    }

    /// Sets the package size label.
    #[must_use]
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// The price other stores are compared against: the bonus price when it
    /// differs from the regular price, otherwise the regular price.
    pub fn effective_price(&self) -> Decimal {
        match self.bonus_price {
            Some(bonus_price) if bonus_price != self.price => bonus_price,
            _ => self.price,
        }
    }

    /// Whether a distinct bonus price is in effect.
    pub fn is_on_bonus(&self) -> bool {
        self.effective_price() != self.price
    }

    /// Whether the size label carries a quantity (e.g. `"500 g"`).
    pub fn has_size(&self) -> bool {
        self.weight.as_deref().is_some_and(normalize::has_size)
    }
}
