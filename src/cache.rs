//! Catalog cache
//!
//! Catalogs are fetched in bulk and reused until they go stale. The cache is
//! owned by the caller and is only consulted between comparisons, never
//! during one.

use std::path::{Path, PathBuf};

use jiff::{SignedDuration, Timestamp};
use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogError};

/// How long a snapshot stays fresh unless configured otherwise.
pub const DEFAULT_TTL: SignedDuration = SignedDuration::from_hours(24);

/// A catalog together with the time it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    catalog: Catalog,
    fetched_at: Timestamp,
}

impl CatalogSnapshot {
    /// Creates a snapshot fetched at `fetched_at`.
    pub fn new(catalog: Catalog, fetched_at: Timestamp) -> Self {
        Self {
            catalog,
            fetched_at,
        }
    }

    /// The cached catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// When the catalog was fetched.
    pub fn fetched_at(&self) -> Timestamp {
        self.fetched_at
    }

    /// Whether the snapshot is younger than `ttl` at `now`.
    pub fn is_fresh(&self, now: Timestamp, ttl: SignedDuration) -> bool {
        now.duration_since(self.fetched_at) < ttl
    }
}

/// Somewhere a catalog can be loaded from.
pub trait CatalogSource {
    /// Load a complete catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the catalog cannot be read or parsed.
    fn load(&self) -> Result<Catalog, CatalogError>;
}

/// A catalog dump on disk, in JSON or YAML.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the dump.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileSource {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Catalog::from_path(&self.path)
    }
}

/// Holds the latest catalog snapshot and refreshes it from a source once it
/// goes stale.
#[derive(Debug)]
pub struct CatalogCache<S> {
    source: S,
    ttl: SignedDuration,
    snapshot: Option<CatalogSnapshot>,
}

impl<S: CatalogSource> CatalogCache<S> {
    /// Creates an empty cache using [`DEFAULT_TTL`].
    pub fn new(source: S) -> Self {
        Self {
            source,
            ttl: DEFAULT_TTL,
            snapshot: None,
        }
    }

    /// Sets how long snapshots stay fresh.
    #[must_use]
    pub fn with_ttl(mut self, ttl: SignedDuration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Freshness window.
    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Current snapshot, fresh or not.
    pub fn snapshot(&self) -> Option<&CatalogSnapshot> {
        self.snapshot.as_ref()
    }

    /// Return the cached catalog, loading it first when there is no snapshot
    /// or the snapshot is stale at `now`.
    ///
    /// A failed refresh keeps the stale snapshot in service.
    ///
    /// # Errors
    ///
    /// Returns the source's error if loading fails and there is no snapshot
    /// to fall back on.
    pub fn get(&mut self, now: Timestamp) -> Result<&Catalog, CatalogError> {
        let snapshot = match self.snapshot.take() {
            Some(snapshot) if snapshot.is_fresh(now, self.ttl) => snapshot,
            previous => match self.source.load() {
                Ok(catalog) => {
                    debug!(
                        stores = catalog.len(),
                        entries = catalog.entry_count(),
                        "loaded catalog"
                    );

                    CatalogSnapshot::new(catalog, now)
                }
                Err(error) => {
                    let Some(stale) = previous else {
                        return Err(error);
                    };

                    warn!(
                        %error,
                        fetched_at = %stale.fetched_at,
                        "catalog refresh failed, serving stale snapshot"
                    );

                    stale
                }
            },
        };

        Ok(self.snapshot.insert(snapshot).catalog())
    }

    /// Drop the snapshot so the next [`get`](Self::get) reloads.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }
}
