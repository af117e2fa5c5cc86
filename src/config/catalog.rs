//! Catalog config

use std::path::PathBuf;

use clap::Args;
use jiff::SignedDuration;

/// Where competing offers are read from and how long they are reused.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Catalog dump (`.json`, `.yml` or `.yaml`)
    #[arg(short = 'c', long = "catalog", env = "PRICEWISE_CATALOG")]
    pub path: PathBuf,

    /// Hours before a loaded catalog is considered stale
    #[arg(long, env = "PRICEWISE_CACHE_TTL_HOURS", default_value_t = 24)]
    pub cache_ttl_hours: u32,
}

impl CatalogConfig {
    /// Cache freshness window.
    pub fn ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.cache_ttl_hours))
    }
}
