//! Catalog dump format
//!
//! The community supermarket dump uses one-letter keys. Records are parsed
//! once here into typed [`Store`]s and [`CatalogEntry`]s.

use serde::Deserialize;
use tracing::warn;

use crate::{
    catalog::{Catalog, CatalogEntry, CatalogError, Store},
    prices::{PriceError, PriceValue},
};

/// A store record in the dump.
#[derive(Debug, Deserialize)]
pub struct RawStore {
    /// Store id; the display name is used when absent.
    #[serde(rename = "c", default)]
    pub id: Option<String>,

    /// Display name.
    #[serde(rename = "n")]
    pub name: String,

    /// Base URL for product links.
    #[serde(rename = "u", default)]
    pub base_url: Option<String>,

    /// Logo URL.
    #[serde(rename = "i", default)]
    pub logo_url: Option<String>,

    /// Products.
    #[serde(rename = "d", default)]
    pub entries: Vec<RawEntry>,
}

/// A product record in the dump.
#[derive(Debug, Deserialize)]
pub struct RawEntry {
    /// Product name.
    #[serde(rename = "n")]
    pub name: String,

    /// Price, as text or number.
    #[serde(rename = "p", default)]
    pub price: Option<PriceValue>,

    /// Size label.
    #[serde(rename = "s", default)]
    pub weight: Option<String>,

    /// Link relative to the store's base URL.
    #[serde(rename = "l", default)]
    pub link: Option<String>,
}

impl RawEntry {
    fn into_entry(self, store: &str) -> CatalogEntry {
        let price = self
            .price
            .as_ref()
            .map_or_else(|| Err(PriceError::Malformed(String::new())), PriceValue::parse);

        if let Err(error) = &price {
            warn!(store, product = %self.name, %error, "catalog entry has an unreadable price");
        }

        CatalogEntry::new(self.name, price)
            .with_weight(self.weight.unwrap_or_default())
            .with_link(self.link.unwrap_or_default())
    }
}

impl From<RawStore> for Store {
    fn from(raw: RawStore) -> Self {
        let id = raw.id.unwrap_or_else(|| raw.name.clone());
        let entries: Vec<CatalogEntry> = raw
            .entries
            .into_iter()
            .map(|entry| entry.into_entry(&id))
            .collect();

        Store::new(id, raw.name)
            .with_base_url(raw.base_url.unwrap_or_default())
            .with_logo_url(raw.logo_url.unwrap_or_default())
            .with_entries(entries)
    }
}

/// Convert dump records into a catalog.
///
/// # Errors
///
/// Returns [`CatalogError::DuplicateStore`] if two records share an id.
pub fn into_catalog(stores: Vec<RawStore>) -> Result<Catalog, CatalogError> {
    Catalog::new(stores.into_iter().map(Store::from).collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    const DUMP: &str = r#"[
        {
            "n": "Jumbo",
            "u": "https://www.jumbo.com",
            "i": "https://logo.example/jumbo.png",
            "d": [
                {"n": "Jumbo Biologische Volle Melk 1L", "p": "1.29", "s": "1 l", "l": "/melk"},
                {"n": "Jumbo Karnemelk", "p": 0.89}
            ]
        },
        {"c": "ah", "n": "Albert Heijn", "d": [{"n": "AH Kaas", "p": "n/a"}, {"n": "AH Brood"}]},
        {"n": "Lidl"}
    ]"#;

    #[test]
    fn dump_is_parsed_into_typed_stores() -> TestResult {
        let catalog = Catalog::from_json_str(DUMP)?;

        assert_eq!(catalog.len(), 3);

        let jumbo = catalog.store("Jumbo").ok_or("missing Jumbo")?;
        let entries = jumbo.entries();

        assert_eq!(jumbo.logo_url(), "https://logo.example/jumbo.png");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.first().map(CatalogEntry::weight), Some("1 l"));
        assert_eq!(
            entries.get(1).map(CatalogEntry::price),
            Some(Ok(Decimal::from_str("0.89")?))
        );
        assert_eq!(
            entries.first().map(|entry| jumbo.link_for(entry)),
            Some("https://www.jumbo.com/melk".to_string())
        );

        Ok(())
    }

    #[test]
    fn explicit_id_wins_over_name() -> TestResult {
        let catalog = Catalog::from_json_str(DUMP)?;

        let ah = catalog.store("ah").ok_or("missing ah")?;

        assert_eq!(ah.display_name(), "Albert Heijn");

        Ok(())
    }

    #[test]
    fn unreadable_and_missing_prices_are_kept_as_errors() -> TestResult {
        let catalog = Catalog::from_json_str(DUMP)?;
        let ah = catalog.store("ah").ok_or("missing ah")?;

        assert!(ah.entries().iter().all(|entry| entry.price().is_err()));

        Ok(())
    }

    #[test]
    fn yaml_dump_is_supported() -> TestResult {
        let catalog = Catalog::from_yaml_str(
            "- n: Dirk\n  d:\n    - n: Dirk Volle Melk\n      p: 1.09\n      s: 1 l\n",
        )?;

        let dirk = catalog.store("Dirk").ok_or("missing Dirk")?;

        assert_eq!(
            dirk.entries().first().map(CatalogEntry::price),
            Some(Ok(Decimal::from_str("1.09")?))
        );

        Ok(())
    }
}
