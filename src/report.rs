//! Comparison report

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::prices::round_cents;

/// How a competing offer's price relates to the query's effective price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PriceDelta {
    /// The offer is cheaper by `savings`.
    Cheaper {
        /// Amount saved, rounded to cents.
        savings: Decimal,
    },

    /// The offer costs exactly the same; `savings` is always zero.
    Same {
        /// Always zero, written as the number `0`.
        #[serde(serialize_with = "zero_as_number")]
        savings: Decimal,
    },

    /// The offer is more expensive by `difference`.
    Expensive {
        /// Extra cost, rounded to cents.
        difference: Decimal,
    },
}

impl PriceDelta {
    /// Classify an offer price against the effective query price.
    pub fn classify(offer: Decimal, effective: Decimal) -> Self {
        match offer.cmp(&effective) {
            Ordering::Less => Self::Cheaper {
                savings: round_cents(effective - offer),
            },
            Ordering::Equal => Self::Same {
                savings: Decimal::ZERO,
            },
            Ordering::Greater => Self::Expensive {
                difference: round_cents(offer - effective),
            },
        }
    }

    /// Savings for cheaper and same-price offers.
    pub fn savings(&self) -> Option<Decimal> {
        match self {
            Self::Cheaper { savings } | Self::Same { savings } => Some(*savings),
            Self::Expensive { .. } => None,
        }
    }

    /// Extra cost for more expensive offers.
    pub fn difference(&self) -> Option<Decimal> {
        match self {
            Self::Expensive { difference } => Some(*difference),
            Self::Cheaper { .. } | Self::Same { .. } => None,
        }
    }
}

fn zero_as_number<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_zero() {
        serializer.serialize_u8(0)
    } else {
        Serialize::serialize(value, serializer)
    }
}

/// A matched offer at a competing store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Price classification.
    #[serde(flatten)]
    pub delta: PriceDelta,

    /// Store display name.
    pub store: String,

    /// Product name as the store lists it.
    pub name: String,

    /// Absolute link to the product.
    pub link: String,

    /// Offer price, to two decimal places.
    pub price: Decimal,

    /// Size label.
    pub weight: String,

    /// Store logo URL.
    pub logo: String,

    /// Fuzzy score of the store's name against the search term.
    pub score: f64,
}

/// Result of comparing one product against a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    /// Cheaper offers, largest savings first.
    pub cheaper: Vec<MatchResult>,

    /// Same-price offers, by store name.
    pub same_price: Vec<MatchResult>,

    /// More expensive offers, smallest difference first.
    pub expensive: Vec<MatchResult>,

    /// Stores without any match.
    pub not_found: Vec<String>,

    /// Whether any store matched.
    pub has_matches: bool,
}

impl ComparisonReport {
    /// File a match under its price bucket.
    pub fn push(&mut self, result: MatchResult) {
        self.has_matches = true;

        match result.delta {
            PriceDelta::Cheaper { .. } => self.cheaper.push(result),
            PriceDelta::Same { .. } => self.same_price.push(result),
            PriceDelta::Expensive { .. } => self.expensive.push(result),
        }
    }

    /// Record a store that produced no match.
    pub fn push_not_found(&mut self, store: impl Into<String>) {
        self.not_found.push(store.into());
    }

    /// Sort every bucket into presentation order.
    pub fn rank(&mut self) {
        self.cheaper.sort_by(|a, b| {
            b.delta
                .savings()
                .cmp(&a.delta.savings())
                .then_with(|| a.price.cmp(&b.price))
        });

        self.same_price.sort_by(|a, b| a.store.cmp(&b.store));

        self.expensive
            .sort_by(|a, b| a.delta.difference().cmp(&b.delta.difference()));
    }

    /// All matches, bucket by bucket.
    pub fn matches(&self) -> impl Iterator<Item = &MatchResult> {
        self.cheaper
            .iter()
            .chain(&self.same_price)
            .chain(&self.expensive)
    }

    /// Number of matches across buckets.
    pub fn len(&self) -> usize {
        self.cheaper.len() + self.same_price.len() + self.expensive.len()
    }

    /// Whether no store matched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Best saving on offer, if any store is cheaper.
    pub fn best_savings(&self) -> Option<Decimal> {
        self.cheaper.first().and_then(|result| result.delta.savings())
    }
}
