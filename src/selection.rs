//! Name token selection
//!
//! Shoppers narrow a comparison by switching individual words of the product
//! name off and on. The brand has its own toggle. Every change produces a new
//! query name; the comparison itself keeps no memory of earlier selections.

use thiserror::Error;

use crate::products::QueryProduct;

/// Errors raised while changing a selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The token is not in the list it was supposed to be moved from.
    #[error("token {0:?} is not available to move")]
    UnknownToken(String),
}

/// A partition of a product name into selected and deselected tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSelection {
    brand: String,
    brand_selected: bool,
    selected: Vec<String>,
    deselected: Vec<String>,
}

impl NameSelection {
    /// Split `name` into tokens after removing the first occurrence of
    /// `brand`. Every token and the brand start out selected.
    pub fn new(name: &str, brand: &str) -> Self {
        let brand = brand.trim();
        let without_brand = if brand.is_empty() {
            name.to_string()
        } else {
            name.replacen(brand, "", 1)
        };

        Self {
            brand: brand.to_string(),
            brand_selected: true,
            selected: without_brand.split_whitespace().map(str::to_string).collect(),
            deselected: Vec::new(),
        }
    }

    /// Build a selection from a query product's name and brand.
    pub fn for_query(query: &QueryProduct) -> Self {
        Self::new(&query.name, &query.brand)
    }

    /// Move the first selected `token` to the end of the deselected tokens.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownToken`] if no selected token equals
    /// `token`.
    pub fn deselect(&mut self, token: &str) -> Result<(), SelectionError> {
        move_token(&mut self.selected, &mut self.deselected, token)
    }

    /// Move the first deselected `token` back to the end of the selected
    /// tokens.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownToken`] if no deselected token equals
    /// `token`.
    pub fn reselect(&mut self, token: &str) -> Result<(), SelectionError> {
        move_token(&mut self.deselected, &mut self.selected, token)
    }

    /// Flip the brand on or off. Returns the new state.
    pub fn toggle_brand(&mut self) -> bool {
        self.brand_selected = !self.brand_selected;
        self.brand_selected
    }

    /// Brand token.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Whether the brand is part of the query name.
    pub fn brand_selected(&self) -> bool {
        self.brand_selected
    }

    /// Tokens currently in the query name, in order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Tokens switched off, in the order they were switched off.
    pub fn deselected(&self) -> &[String] {
        &self.deselected
    }

    /// The query name for the current selection: the brand, when selected,
    /// followed by the selected tokens.
    pub fn query_name(&self) -> String {
        let brand = (self.brand_selected && !self.brand.is_empty()).then_some(self.brand.as_str());

        brand
            .into_iter()
            .chain(self.selected.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether nothing is selected, which would leave nothing to search for.
    pub fn is_empty(&self) -> bool {
        self.query_name().is_empty()
    }

    /// Write the current query name into `query`.
    pub fn apply(&self, query: &mut QueryProduct) {
        query.name = self.query_name();
    }
}

fn move_token(from: &mut Vec<String>, to: &mut Vec<String>, token: &str) -> Result<(), SelectionError> {
    let index = from
        .iter()
        .position(|candidate| candidate == token)
        .ok_or_else(|| SelectionError::UnknownToken(token.to_string()))?;

    to.push(from.remove(index));

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_splits_name_without_brand() {
        let selection = NameSelection::new("AH Biologisch Volle Melk", "AH");

        assert_eq!(selection.selected(), ["Biologisch", "Volle", "Melk"]);
        assert!(selection.brand_selected());
        assert_eq!(selection.query_name(), "AH Biologisch Volle Melk");
    }

    #[test]
    fn only_first_brand_occurrence_is_removed() {
        let selection = NameSelection::new("Dubbel Drank Dubbel", "Dubbel");

        assert_eq!(selection.selected(), ["Drank", "Dubbel"]);
    }

    #[test]
    fn deselect_and_reselect_move_tokens_to_the_end() -> TestResult {
        let mut selection = NameSelection::new("AH Biologisch Volle Melk", "AH");

        selection.deselect("Biologisch")?;
        assert_eq!(selection.query_name(), "AH Volle Melk");
        assert_eq!(selection.deselected(), ["Biologisch"]);

        selection.reselect("Biologisch")?;
        assert_eq!(selection.query_name(), "AH Volle Melk Biologisch");
        assert!(selection.deselected().is_empty());

        Ok(())
    }

    #[test]
    fn unknown_tokens_are_rejected_without_change() {
        let mut selection = NameSelection::new("AH Volle Melk", "AH");
        let before = selection.clone();

        assert_eq!(
            selection.deselect("Kaas"),
            Err(SelectionError::UnknownToken("Kaas".to_string()))
        );
        assert_eq!(
            selection.reselect("Melk"),
            Err(SelectionError::UnknownToken("Melk".to_string()))
        );
        assert_eq!(selection, before);
    }

    #[test]
    fn toggling_brand_drops_it_from_the_name() {
        let mut selection = NameSelection::new("AH Volle Melk", "AH");

        assert!(!selection.toggle_brand());
        assert_eq!(selection.query_name(), "Volle Melk");
        assert!(selection.toggle_brand());
    }

    #[test]
    fn empty_selection_is_detected() -> TestResult {
        let mut selection = NameSelection::new("AH Melk", "AH");

        selection.deselect("Melk")?;
        assert!(!selection.is_empty());

        selection.toggle_brand();
        assert!(selection.is_empty());

        Ok(())
    }

    #[test]
    fn apply_rewrites_query_name() -> TestResult {
        let mut query = QueryProduct::new("AH Biologisch Volle Melk", "AH", Decimal::ONE);
        let mut selection = NameSelection::for_query(&query);

        selection.deselect("Biologisch")?;
        selection.apply(&mut query);

        assert_eq!(query.name, "AH Volle Melk");
        assert_eq!(query.brand, "AH");

        Ok(())
    }
}
