//! Cross-store comparison
//!
//! Each store is searched twice at most. The first search drops the brand
//! from the query name, since a competitor will not carry the originating
//! retailer's house brand. Only when that finds fewer than
//! [`FALLBACK_MIN_MATCHES`] offers is the full name, brand included, searched
//! as well, and the two result sets merged.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogEntry, Store},
    fuzzy::{self, Scored},
    normalize::strip_brand,
    prices::round_cents,
    products::QueryProduct,
    report::{ComparisonReport, MatchResult, PriceDelta},
};

/// Offers must score strictly above this to count as a match.
pub const MATCH_THRESHOLD: f64 = 0.4;

/// Below this many brandless matches the branded name is searched too.
pub const FALLBACK_MIN_MATCHES: usize = 2;

/// Matches found in a single store.
pub type StoreMatches = SmallVec<[MatchResult; 8]>;

/// Errors raised by [`compare`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ComparisonError {
    /// The query name is empty, so there is nothing to search for.
    #[error("search term is empty; select at least one name token")]
    EmptySearchTerm,
}

/// The two search terms derived from a query product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms {
    /// Lowercased name with every occurrence of the brand removed.
    pub without_brand: String,

    /// Lowercased name, brand included.
    pub with_brand: String,
}

impl SearchTerms {
    /// Derive the search terms for a query.
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError::EmptySearchTerm`] if the name is blank.
    pub fn for_query(query: &QueryProduct) -> Result<Self, ComparisonError> {
        let with_brand = query.name.to_lowercase();

        if with_brand.trim().is_empty() {
            return Err(ComparisonError::EmptySearchTerm);
        }

        Ok(Self {
            without_brand: strip_brand(&query.name, &query.brand),
            with_brand,
        })
    }
}

/// Compare a product against every store in the catalog.
///
/// Stores without a surviving match are listed in
/// [`ComparisonReport::not_found`]. Offers with unreadable prices are
/// skipped; they never fail the comparison.
///
/// # Errors
///
/// Returns [`ComparisonError::EmptySearchTerm`] if the query name is blank.
#[tracing::instrument(skip_all, fields(product = %query.name, stores = catalog.len()))]
pub fn compare(
    query: &QueryProduct,
    catalog: &Catalog,
) -> Result<ComparisonReport, ComparisonError> {
    let terms = SearchTerms::for_query(query)?;
    let effective = query.effective_price();
    let mut report = ComparisonReport::default();

    for store in catalog.stores() {
        let matches = match_store(store, &terms, effective);

        if matches.is_empty() {
            report.push_not_found(store.display_name());
            continue;
        }

        for result in matches {
            report.push(result);
        }
    }

    report.rank();

    debug!(
        matches = report.len(),
        not_found = report.not_found.len(),
        "compared product"
    );

    Ok(report)
}

/// Find and classify the matches for one store, falling back to the branded
/// name when the brandless search is thin.
pub fn match_store(store: &Store, terms: &SearchTerms, effective: Decimal) -> StoreMatches {
    let mut matches = search_store(store, &terms.without_brand, effective);

    if matches.len() >= FALLBACK_MIN_MATCHES {
        debug!(store = store.id(), matches = matches.len(), "matched without brand");

        return matches;
    }

    for candidate in search_store(store, &terms.with_brand, effective) {
        if !matches.iter().any(|existing| existing.name == candidate.name) {
            matches.push(candidate);
        }
    }

    debug!(store = store.id(), matches = matches.len(), "matched with brand fallback");

    matches
}

fn search_store(store: &Store, term: &str, effective: Decimal) -> StoreMatches {
    if term.trim().is_empty() {
        return StoreMatches::new();
    }

    fuzzy::search(term, store.entries(), CatalogEntry::normalized_name)
        .into_iter()
        .filter(|scored| clears_threshold(scored.score))
        .filter_map(|scored| classify(store, scored, effective))
        .collect()
}

fn clears_threshold(score: f64) -> bool {
    score > MATCH_THRESHOLD
}

fn classify(
    store: &Store,
    scored: Scored<'_, CatalogEntry>,
    effective: Decimal,
) -> Option<MatchResult> {
    let entry = scored.item;

    let price = match entry.price() {
        Ok(price) => price,
        Err(error) => {
            debug!(store = store.id(), product = entry.name(), %error, "skipping offer");

            return None;
        }
    };

    Some(MatchResult {
        delta: PriceDelta::classify(price, effective),
        store: store.display_name().to_string(),
        name: entry.name().to_string(),
        link: store.link_for(entry),
        price: round_cents(price),
        weight: entry.weight().to_string(),
        logo: store.logo_url().to_string(),
        score: scored.score,
    })
}
