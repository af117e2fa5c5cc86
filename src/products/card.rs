//! Retailer product cards
//!
//! The originating retailer's product-detail payload, reduced to the fields
//! needed to build a [`QueryProduct`].

use serde::Deserialize;
use thiserror::Error;

use crate::{
    prices::{PriceError, PriceValue},
    products::QueryProduct,
};

/// Name used when the card has no title.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Errors raised while reading a product card.
#[derive(Debug, Error)]
pub enum ProductCardError {
    /// The payload is not valid JSON for a product detail response.
    #[error("failed to parse product card: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload has no product card.
    #[error("product detail has no product card")]
    MissingCard,

    /// The card carries no price at all.
    #[error("product card has no price")]
    MissingPrice,

    /// The card carries a price that cannot be read.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Product detail response wrapper.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    /// The product card, when the product exists.
    pub product_card: Option<ProductCard>,
}

impl ProductDetail {
    /// Parse a product detail response body.
    ///
    /// # Errors
    ///
    /// Returns [`ProductCardError::Json`] if the body is not valid JSON.
    pub fn from_json(body: &str) -> Result<Self, ProductCardError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Build the comparison query from the card.
    ///
    /// # Errors
    ///
    /// Returns [`ProductCardError::MissingCard`] when there is no card, or any
    /// error from converting the card itself.
    pub fn into_query(self) -> Result<QueryProduct, ProductCardError> {
        self.product_card
            .ok_or(ProductCardError::MissingCard)?
            .try_into()
    }
}

/// Product card fields used for comparisons. Anything else in the payload,
/// such as the promotion text or the images, is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    /// Product title, brand included.
    pub title: Option<String>,

    /// Brand name.
    pub brand: Option<String>,

    /// Regular price.
    pub price_before_bonus: Option<PriceValue>,

    /// Price charged today, which is the bonus price during a promotion.
    pub current_price: Option<PriceValue>,

    /// Package size label.
    pub sales_unit_size: Option<String>,
}

impl TryFrom<ProductCard> for QueryProduct {
    type Error = ProductCardError;

    fn try_from(card: ProductCard) -> Result<Self, Self::Error> {
        let regular = card
            .price_before_bonus
            .as_ref()
            .or(card.current_price.as_ref())
            .ok_or(ProductCardError::MissingPrice)?
            .parse()?;

        let bonus_price = card.current_price.as_ref().map(PriceValue::parse).transpose()?;

        let brand = card
            .brand
            .filter(|brand| !brand.eq_ignore_ascii_case("none"))
            .unwrap_or_default();

        Ok(QueryProduct {
            name: card.title.unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            brand,
            price: regular,
            bonus_price,
            weight: card.sales_unit_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    const DETAIL: &str = r#"{
        "productCard": {
            "title": "AH Biologisch Volle Melk",
            "brand": "AH",
            "priceBeforeBonus": 1.49,
            "currentPrice": 1.19,
            "isBonus": true,
            "bonusMechanism": "20% korting",
            "salesUnitSize": "1 l",
            "images": [{"url": "https://img.example/melk.jpg"}]
        }
    }"#;

    #[test]
    fn detail_converts_to_query() -> TestResult {
        let query = ProductDetail::from_json(DETAIL)?.into_query()?;

        assert_eq!(query.name, "AH Biologisch Volle Melk");
        assert_eq!(query.brand, "AH");
        assert_eq!(query.price, Decimal::from_str("1.49")?);
        assert_eq!(query.effective_price(), Decimal::from_str("1.19")?);
        assert_eq!(query.weight.as_deref(), Some("1 l"));

        Ok(())
    }

    #[test]
    fn missing_fields_fall_back() -> TestResult {
        let query =
            ProductDetail::from_json(r#"{"productCard": {"brand": "None", "priceBeforeBonus": "2.10"}}"#)?
                .into_query()?;

        assert_eq!(query.name, UNKNOWN_PRODUCT);
        assert_eq!(query.brand, "");
        assert_eq!(query.bonus_price, None);
        assert_eq!(query.effective_price(), Decimal::from_str("2.10")?);

        Ok(())
    }

    #[test]
    fn card_without_any_price_is_rejected() -> TestResult {
        let result = ProductDetail::from_json(r#"{"productCard": {"title": "Melk"}}"#)?.into_query();

        assert!(matches!(result, Err(ProductCardError::MissingPrice)));

        Ok(())
    }

    #[test]
    fn detail_without_card_is_rejected() -> TestResult {
        let result = ProductDetail::from_json("{}")?.into_query();

        assert!(matches!(result, Err(ProductCardError::MissingCard)));

        Ok(())
    }
}
