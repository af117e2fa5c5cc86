//! Name normalisation
//!
//! Catalog names are reduced to a comparable token string before they are
//! searched: lowercase, no unit words, no digits, single spaces.

use std::sync::LazyLock;

use regex::Regex;

/// Unit words removed from catalog names.
pub const UNIT_TOKENS: [&str; 7] = ["kg", "g", "l", "ml", "m", "cm", "mm"];

static SIZE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\d+\s?(g|gram|kg|ml|l|liter|litre)").ok());

/// Normalise a catalog product name.
///
/// Unit words only match as whole words. Any non-alphabetic character,
/// digits included, delimits a word, so `500g` loses its unit while `gouda`
/// keeps its `g`. Running the result through `normalize` again is a no-op.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let without_units = strip_unit_words(&lowered);
    let without_digits: String = without_units
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect();

    collapse_whitespace(&without_digits)
}

/// Lowercase `name` and remove every occurrence of `brand` from it.
///
/// The brand is matched as a plain substring, the same way the retailer's
/// own titles embed it.
pub fn strip_brand(name: &str, brand: &str) -> String {
    let name = name.to_lowercase();
    let brand = brand.trim().to_lowercase();

    if brand.is_empty() {
        return collapse_whitespace(&name);
    }

    collapse_whitespace(&name.replace(&brand, ""))
}

/// Collapse runs of whitespace into single spaces and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a size label such as `"1,5 l"` or `"500 gram"` carries a quantity.
pub fn has_size(weight: &str) -> bool {
    SIZE_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(weight))
}

fn strip_unit_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word = String::new();

    for c in s.chars() {
        if c.is_alphabetic() {
            word.push(c);
            continue;
        }

        flush_word(&mut out, &mut word);
        out.push(c);
    }

    flush_word(&mut out, &mut word);

    out
}

fn flush_word(out: &mut String, word: &mut String) {
    if !UNIT_TOKENS.contains(&word.as_str()) {
        out.push_str(word);
    }

    word.clear();
}
