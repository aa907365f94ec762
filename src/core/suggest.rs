//! core::suggest
//!
//! Ranked "did you mean" suggestions for target labels that do not exist.
//!
//! # Ranking
//!
//! Every candidate gets a distance to the query: the smaller of
//!
//! - the Levenshtein distance between the full query and the full label, and
//! - the Levenshtein distance between their target-name parts
//!   (see [`TargetLabel::name`]).
//!
//! Candidates are ordered by ascending distance, ties broken by the label's
//! lexicographic order, and truncated to the suggester's limit. The result
//! depends only on `(query, universe, limit)`.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use ict::core::suggest::Suggester;
//! use ict::core::types::TargetLabel;
//!
//! let universe: BTreeSet<TargetLabel> = ["//rs/tests:basic_health_test", "//rs/tests:upgrade_test"]
//!     .into_iter()
//!     .map(|s| TargetLabel::new(s).unwrap())
//!     .collect();
//!
//! let suggestions = Suggester::default().suggest("//rs/tests:basic_helth_test", &universe);
//! assert_eq!(suggestions[0].as_str(), "//rs/tests:basic_health_test");
//! ```

use std::collections::BTreeSet;

use super::types::{target_name, TargetLabel};

/// Number of suggestions produced when nothing else is configured.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 7;

/// Bounded, deterministic suggestion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggester {
    limit: usize,
}

impl Default for Suggester {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_LIMIT)
    }
}

impl Suggester {
    /// Create a suggester returning at most `limit` candidates.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Maximum number of suggestions.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rank `universe` against `query`, closest first.
    pub fn suggest(&self, query: &str, universe: &BTreeSet<TargetLabel>) -> Vec<TargetLabel> {
        let mut scored: Vec<(usize, &TargetLabel)> = universe
            .iter()
            .map(|candidate| (distance(query, candidate.as_str()), candidate))
            .collect();

        // (distance, label) is a total order, so the ranking is reproducible.
        scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        scored
            .into_iter()
            .take(self.limit)
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }
}

/// Distance between a query and a candidate label. Lower is more similar.
pub fn distance(query: &str, candidate: &str) -> usize {
    let full = levenshtein(query, candidate);
    let short = levenshtein(target_name(query), target_name(candidate));
    full.min(short)
}

/// Character-level Levenshtein edit distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single-row dynamic programming table.
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe(labels: &[&str]) -> BTreeSet<TargetLabel> {
        labels.iter().map(|l| TargetLabel::new(*l).unwrap()).collect()
    }

    fn names(labels: &[TargetLabel]) -> Vec<&str> {
        labels.iter().map(|l| l.as_str()).collect()
    }

    mod levenshtein {
        use super::*;

        #[test]
        fn identical_is_zero() {
            assert_eq!(levenshtein("kitten", "kitten"), 0);
        }

        #[test]
        fn classic_example() {
            assert_eq!(levenshtein("kitten", "sitting"), 3);
        }

        #[test]
        fn empty_sides() {
            assert_eq!(levenshtein("", "abc"), 3);
            assert_eq!(levenshtein("abc", ""), 3);
            assert_eq!(levenshtein("", ""), 0);
        }

        #[test]
        fn symmetric() {
            assert_eq!(levenshtein("flaw", "lawn"), levenshtein("lawn", "flaw"));
        }

        #[test]
        fn counts_chars_not_bytes() {
            assert_eq!(levenshtein("é", "e"), 1);
        }
    }

    #[test]
    fn distance_uses_target_name_part() {
        // Full labels differ a lot, names are identical.
        assert_eq!(distance("basic_health_test", "//rs/tests:basic_health_test"), 0);
    }

    #[test]
    fn closest_first() {
        let u = universe(&[
            "//rs/tests:upgrade_test",
            "//rs/tests:basic_health_test",
            "//rs/tests:basic_health_test_colocate",
        ]);
        let got = Suggester::default().suggest("//rs/tests:basic_helth_test", &u);
        assert_eq!(got[0].as_str(), "//rs/tests:basic_health_test");
        assert_eq!(got[1].as_str(), "//rs/tests:basic_health_test_colocate");
        assert_eq!(got[2].as_str(), "//rs/tests:upgrade_test");
    }

    #[test]
    fn ties_broken_lexicographically() {
        // All three are one edit away from the query.
        let u = universe(&["//p:abd", "//p:abc", "//p:abe"]);
        let got = Suggester::default().suggest("//p:abx", &u);
        assert_eq!(names(&got), vec!["//p:abc", "//p:abd", "//p:abe"]);
    }

    #[test]
    fn bounded_by_limit() {
        let labels: Vec<String> = (0..20).map(|i| format!("//p:t{i:02}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let u = universe(&refs);

        assert_eq!(Suggester::default().suggest("//p:t", &u).len(), 7);
        assert_eq!(Suggester::new(3).suggest("//p:t", &u).len(), 3);
    }

    #[test]
    fn small_universe_returns_all() {
        let u = universe(&["//a:x", "//b:y"]);
        let got = Suggester::default().suggest("//c:z", &u);
        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|l| u.contains(l)));
    }

    #[test]
    fn empty_universe_returns_nothing() {
        let got = Suggester::default().suggest("//a:b", &BTreeSet::new());
        assert!(got.is_empty());
    }

    #[test]
    fn zero_limit_returns_nothing() {
        let u = universe(&["//a:x"]);
        assert!(Suggester::new(0).suggest("//a:x", &u).is_empty());
    }

    #[test]
    fn deterministic() {
        let u = universe(&["//a:one", "//a:two", "//a:three", "//b:one", "//b:onf"]);
        let s = Suggester::default();
        assert_eq!(s.suggest("//a:onx", &u), s.suggest("//a:onx", &u));
    }
}
