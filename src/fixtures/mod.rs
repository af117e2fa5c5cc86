//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    products::QueryProduct,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Catalog loading error
    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// No catalog loaded yet
    #[error("No catalog loaded")]
    NoCatalog,

    /// Query not found
    #[error("Query not found: {0}")]
    QueryNotFound(String),
}

/// Query products keyed by fixture name.
#[derive(Debug, Deserialize)]
pub struct QueriesFixture {
    /// Queries by key.
    pub queries: FxHashMap<String, QueryProduct>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: Option<Catalog>,

    queries: FxHashMap<String, QueryProduct>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            queries: FxHashMap::default(),
        }
    }

    /// Load a catalog dump from `catalogs/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalogs").join(format!("{name}.yml"));

        self.catalog = Some(Catalog::from_path(file_path)?);

        Ok(self)
    }

    /// Load query products from `queries/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_queries(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("queries").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: QueriesFixture = serde_norway::from_str(&contents)?;

        self.queries.extend(fixture.queries);

        Ok(self)
    }

    /// Load a complete fixture set (catalog and queries with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_catalog(name)?.load_queries(name)?;

        Ok(fixture)
    }

    /// The loaded catalog
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCatalog`] if no catalog has been loaded.
    pub fn catalog(&self) -> Result<&Catalog, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCatalog)
    }

    /// Get a query product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the query is not found.
    pub fn query(&self, key: &str) -> Result<&QueryProduct, FixtureError> {
        self.queries
            .get(key)
            .ok_or_else(|| FixtureError::QueryNotFound(key.to_string()))
    }
}
