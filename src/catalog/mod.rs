//! Catalog
//!
//! A read-only, multi-store snapshot of competing offers. Entry names are
//! normalised once, when the entry is built, so every search reuses them.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    normalize::normalize,
    prices::{PriceError, parse_price},
};

pub mod raw;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("failed to parse YAML catalog: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// File extension is neither JSON nor YAML.
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    /// Two stores share an id.
    #[error("duplicate store id: {0}")]
    DuplicateStore(String),
}

/// One product offered by one store.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    name: String,
    normalized_name: String,
    price: Result<Decimal, PriceError>,
    weight: String,
    link: String,
}

impl CatalogEntry {
    /// Creates an entry, normalising its name for matching.
    pub fn new(name: impl Into<String>, price: Result<Decimal, PriceError>) -> Self {
        let name = name.into();
        let normalized_name = normalize(&name);

        Self {
            name,
            normalized_name,
            price,
            weight: String::new(),
            link: String::new(),
        }
    }

    /// Creates an entry from a textual price. Unreadable prices are kept as
    /// errors so the entry can still be reported on.
    pub fn with_price_text(name: impl Into<String>, price: &str) -> Self {
        Self::new(name, parse_price(price))
    }

    /// Sets the size label.
    #[must_use]
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = weight.into();
        self
    }

    /// Sets the link, relative to the store's base URL.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Product name as the store lists it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name used as the match key.
    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    /// Parsed price, or why it could not be read.
    pub fn price(&self) -> Result<Decimal, &PriceError> {
        self.price.as_ref().copied()
    }

    /// Size label.
    pub fn weight(&self) -> &str {
        &self.weight
    }

    /// Link relative to the store's base URL.
    pub fn link(&self) -> &str {
        &self.link
    }
}

/// A competing store and its offers.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    id: String,
    display_name: String,
    base_url: String,
    logo_url: String,
    entries: Vec<CatalogEntry>,
}

impl Store {
    /// Creates a store without entries.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            base_url: String::new(),
            logo_url: String::new(),
            entries: Vec::new(),
        }
    }

    /// Sets the base URL that entry links are relative to.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the logo URL.
    #[must_use]
    pub fn with_logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = logo_url.into();
        self
    }

    /// Sets the entries.
    #[must_use]
    pub fn with_entries(mut self, entries: impl Into<Vec<CatalogEntry>>) -> Self {
        self.entries = entries.into();
        self
    }

    /// Store identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name shown to shoppers.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Base URL for entry links.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Logo URL.
    pub fn logo_url(&self) -> &str {
        &self.logo_url
    }

    /// Offers, in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Absolute link to an entry of this store.
    pub fn link_for(&self, entry: &CatalogEntry) -> String {
        format!("{}{}", self.base_url, entry.link())
    }
}

/// All stores taking part in a comparison, in a stable order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    stores: Vec<Store>,
}

impl Catalog {
    /// Creates a catalog from stores.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateStore`] if two stores share an id.
    pub fn new(stores: impl Into<Vec<Store>>) -> Result<Self, CatalogError> {
        let stores = stores.into();
        let mut seen = rustc_hash::FxHashSet::default();

        for store in &stores {
            if !seen.insert(store.id()) {
                return Err(CatalogError::DuplicateStore(store.id().to_string()));
            }
        }

        Ok(Self { stores })
    }

    /// Load a catalog from a `.json`, `.yml` or `.yaml` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its
    /// extension is not recognised.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yml" | "yaml") => Self::from_yaml_str(&contents),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse a catalog dump in JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the dump format.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let stores: Vec<raw::RawStore> = serde_json::from_str(json)?;

        raw::into_catalog(stores)
    }

    /// Parse a catalog dump in YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not match the dump format.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let stores: Vec<raw::RawStore> = serde_norway::from_str(yaml)?;

        raw::into_catalog(stores)
    }

    /// Stores, in catalog order.
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    /// Look up a store by id.
    pub fn store(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|store| store.id() == id)
    }

    /// Number of stores.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether the catalog has no stores.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Number of entries across all stores.
    pub fn entry_count(&self) -> usize {
        self.stores.iter().map(|store| store.entries().len()).sum()
    }
}
