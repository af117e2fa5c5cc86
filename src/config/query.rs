//! Query config
//!
//! The product to compare, given either field by field or as a saved
//! product-card response, plus the name tokens to leave out.

use std::{fs, path::PathBuf};

use clap::Args;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    prices::parse_price,
    products::{
        QueryProduct,
        card::{ProductCardError, ProductDetail},
    },
    selection::{NameSelection, SelectionError},
};

/// Errors raised while building the query product.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The product card file could not be read.
    #[error("failed to read product card: {0}")]
    Io(#[from] std::io::Error),

    /// The product card could not be converted.
    #[error(transparent)]
    Card(#[from] ProductCardError),

    /// Neither a product card nor a name was given.
    #[error("a product name is required when no product card is given")]
    MissingName,

    /// Neither a product card nor a price was given.
    #[error("a price is required when no product card is given")]
    MissingPrice,

    /// A deselected token is not part of the name.
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// The product being compared.
#[derive(Debug, Args)]
pub struct QueryConfig {
    /// Product name, brand included
    #[arg(short, long, conflicts_with = "product_card")]
    pub name: Option<String>,

    /// Brand token
    #[arg(short, long, default_value = "", conflicts_with = "product_card")]
    pub brand: String,

    /// Regular price
    #[arg(short, long, value_parser = parse_price, conflicts_with = "product_card")]
    pub price: Option<Decimal>,

    /// Promotional price
    #[arg(long, value_parser = parse_price, conflicts_with = "product_card")]
    pub bonus_price: Option<Decimal>,

    /// Package size label, e.g. "1 l"
    #[arg(short, long, conflicts_with = "product_card")]
    pub weight: Option<String>,

    /// Product detail JSON saved from the retailer
    #[arg(long)]
    pub product_card: Option<PathBuf>,

    /// Name token to leave out of the search (repeatable)
    #[arg(short, long = "deselect", value_name = "TOKEN")]
    pub deselect: Vec<String>,

    /// Leave the brand out of the search
    #[arg(long)]
    pub no_brand: bool,
}

impl QueryConfig {
    /// Build the query product, before token selection.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if the product card cannot be read, or if a
    /// required field is missing.
    pub fn product(&self) -> Result<QueryProduct, QueryError> {
        if let Some(path) = &self.product_card {
            return Ok(ProductDetail::from_json(&fs::read_to_string(path)?)?.into_query()?);
        }

        let name = self.name.as_deref().ok_or(QueryError::MissingName)?;
        let price = self.price.ok_or(QueryError::MissingPrice)?;

        let mut query = QueryProduct::new(name, self.brand.as_str(), price);

        if let Some(bonus_price) = self.bonus_price {
            query = query.with_bonus_price(bonus_price);
        }

        if let Some(weight) = &self.weight {
            query = query.with_weight(weight.as_str());
        }

        Ok(query)
    }

    /// The token selection requested on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Selection`] if a deselected token is not part of
    /// the name.
    pub fn selection(&self, query: &QueryProduct) -> Result<NameSelection, QueryError> {
        let mut selection = NameSelection::for_query(query);

        for token in &self.deselect {
            selection.deselect(token)?;
        }

        if self.no_brand {
            selection.toggle_brand();
        }

        Ok(selection)
    }

    /// Build the query product with the requested tokens applied.
    ///
    /// # Errors
    ///
    /// See [`product`](Self::product) and [`selection`](Self::selection).
    pub fn query(&self) -> Result<QueryProduct, QueryError> {
        let mut query = self.product()?;

        self.selection(&query)?.apply(&mut query);

        Ok(query)
    }
}
