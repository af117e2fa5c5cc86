//! Fuzzy scoring
//!
//! A substring-aware matcher tuned for short grocery names, built on
//! [`strsim`]. Scores fall in `[0, 1]`; higher is better.
//!
//! | Case                                  | Score                                  |
//! |---------------------------------------|----------------------------------------|
//! | target equals term                    | `1.0`                                  |
//! | target contains term contiguously     | `0.9 + 0.1 * term_len / target_len`    |
//! | otherwise                             | `0.9 * best window similarity`         |
//! | nothing in common                     | no match                               |
//!
//! A window is a run of the target as long as the term. Its similarity is the
//! normalised Levenshtein similarity to the term, so swapped or scattered words
//! cost edits while a typo inside an otherwise intact phrase costs little.

use strsim::normalized_levenshtein;

/// Highest score a target can reach without containing the whole term.
pub const PARTIAL_CEILING: f64 = 0.9;

/// A candidate paired with its score.
#[derive(Debug, Clone, Copy)]
pub struct Scored<'a, T> {
    /// The scored candidate.
    pub item: &'a T,

    /// Score in `[0, 1]`.
    pub score: f64,
}

/// Score `target` against the search `term`.
///
/// Returns `None` when either side is blank or when no window of the target
/// shares anything with the term.
#[expect(
    clippy::cast_precision_loss,
    reason = "product names are a few dozen characters long"
)]
pub fn score(term: &str, target: &str) -> Option<f64> {
    let term = term.trim();

    if term.is_empty() || target.trim().is_empty() {
        return None;
    }

    if target == term {
        return Some(1.0);
    }

    if target.contains(term) {
        let coverage = term.chars().count() as f64 / target.chars().count() as f64;

        return Some(PARTIAL_CEILING + (1.0 - PARTIAL_CEILING) * coverage);
    }

    let similarity = best_window(term, target);

    (similarity > 0.0).then_some(PARTIAL_CEILING * similarity)
}

/// Score every candidate's key against `term`, best first.
///
/// Candidates that do not match at all are dropped. Equal scores keep the
/// order of `candidates`.
pub fn search<'a, T, F>(term: &str, candidates: &'a [T], key: F) -> Vec<Scored<'a, T>>
where
    F: Fn(&T) -> &str,
{
    let mut scored: Vec<Scored<'a, T>> = candidates
        .iter()
        .filter_map(|item| score(term, key(item)).map(|score| Scored { item, score }))
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    scored
}

/// Best similarity between `term` and any term-sized window of `target`.
fn best_window(term: &str, target: &str) -> f64 {
    let width = term.chars().count();
    let chars: Vec<char> = target.chars().collect();

    if width == 0 || chars.len() <= width {
        return normalized_levenshtein(term, target);
    }

    chars
        .windows(width)
        .map(|window| normalized_levenshtein(term, &window.iter().collect::<String>()))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|value| (value - expected).abs() < 1e-9)
    }

    fn score_of(term: &str, target: &str) -> f64 {
        score(term, target).unwrap_or_default()
    }

    #[test]
    fn exact_match_scores_one() {
        assert!(approx(score("volle melk", "volle melk"), 1.0));
    }

    #[test]
    fn contiguous_substring_scores_above_ceiling() {
        let result = score("volle melk", "halfvolle melk");

        assert!(approx(result, 0.9 + 0.1 * 10.0 / 14.0));
    }

    #[test]
    fn typo_costs_little() {
        // One deleted "l" out of fourteen characters.
        assert!(approx(
            score("halfvolle melk", "halfvole melk"),
            0.9 * (1.0 - 1.0 / 14.0)
        ));
    }

    #[test]
    fn swapped_words_score_low() {
        // Eight edits turn "volle melk" into "melk volle".
        assert!(approx(score("melk volle", "volle melk"), 0.9 * 0.2));
        assert!(
            score_of("volle melk", "melk volle kaas") < score_of("volle melk", "volle verse melk")
        );
    }

    #[test]
    fn phrase_beats_reordered_words() {
        let reordered = score_of("chocolade melk", "milka melk chocolade reep");
        let compound = score_of("chocolade melk", "chocomel chocolademelk");

        assert!(reordered < compound, "{reordered} >= {compound}");
    }

    #[test]
    fn scattered_characters_score_low() {
        // No three character window holds more than one of "abc" in place.
        assert!(approx(score("abc", "axxbxxc"), 0.9 / 3.0));
    }

    #[test]
    fn best_window_is_used() {
        assert!(approx(score("mlk", "m x lk mxlk"), 0.9 * 2.0 / 3.0));
    }

    #[test]
    fn nothing_in_common_is_no_match() {
        assert_eq!(score("melk", "kaas"), None);
        assert_eq!(score("melk", "brood"), None);
        assert_eq!(score("melk", ""), None);
    }

    #[test]
    fn blank_term_is_no_match() {
        assert_eq!(score("", "melk"), None);
        assert_eq!(score("   ", "melk"), None);
    }

    #[test]
    fn search_orders_best_first_and_keeps_ties_stable() {
        let candidates = ["melk brood", "kaas", "volle melk", "melk", "karnemelk"];

        let results = search("melk", &candidates, |c| *c);
        let names: Vec<&str> = results.iter().map(|scored| *scored.item).collect();

        assert_eq!(
            names,
            ["melk", "karnemelk", "melk brood", "volle melk"],
            "unexpected order"
        );
    }

    #[test]
    fn search_skips_non_matching_candidates() {
        let candidates = ["kaas", "brood"];

        assert!(search("melk", &candidates, |c| *c).is_empty());
    }
}
