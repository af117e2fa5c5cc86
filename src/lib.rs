//! Pricewise
//!
//! Pricewise finds the same grocery product at competing supermarkets and
//! sorts the offers into cheaper, same-price and more expensive buckets.
//!
//! Catalog names are normalised once, at load time. Each comparison then
//! fuzzy-searches every store with the query name minus its brand, and falls
//! back to the branded name when that turns up fewer than two offers.

pub mod cache;
pub mod catalog;
pub mod comparison;
pub mod config;
pub mod fixtures;
pub mod fuzzy;
pub mod normalize;
pub mod observability;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod render;
pub mod report;
pub mod selection;
