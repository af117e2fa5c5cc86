//! Pricewise prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cache::{CatalogCache, CatalogSnapshot, CatalogSource, FileSource},
    catalog::{Catalog, CatalogEntry, CatalogError, Store},
    comparison::{ComparisonError, FALLBACK_MIN_MATCHES, MATCH_THRESHOLD, SearchTerms, compare},
    normalize::normalize,
    prices::{PriceError, parse_price},
    products::{
        QueryProduct,
        card::{ProductCardError, ProductDetail},
    },
    render::{OutputFormat, RenderError, render},
    report::{ComparisonReport, MatchResult, PriceDelta},
    selection::{NameSelection, SelectionError},
};
