//! Committed query state and its canonical string form
//!
//! `QueryState` is the single source of truth for what the product listing
//! fetches: search text, page index, and the committed brand/category
//! selections. It round-trips losslessly through a compact query string
//! (`q=lamp&page=2&brands=5&brands=9`) used both for persistence and for
//! seeding a session from the command line.
//!
//! The canonical form omits defaults: empty search, page 0, and empty
//! selection sets produce no parameters at all, so the default state
//! serializes to the empty string.

mod store;

pub use store::{FileStore, MemoryStore, QueryStateStore, StoreError};

use std::collections::BTreeSet;

/// The full state driving the product listing query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Free-text search filter
    pub search: String,
    /// 0-based result page
    pub page: u32,
    /// Committed brand ids
    pub brands: BTreeSet<i64>,
    /// Committed category ids
    pub categories: BTreeSet<i64>,
}

impl QueryState {
    /// Whether this is the default state (serializes to an empty string)
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.search.is_empty()
            && self.page == 0
            && self.brands.is_empty()
            && self.categories.is_empty()
    }

    /// Whether any search text or facet selection is active
    #[must_use]
    pub fn has_criteria(&self) -> bool {
        !self.search.trim().is_empty() || !self.brands.is_empty() || !self.categories.is_empty()
    }

    /// Serialize to the canonical query string (no leading `?`)
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if !self.search.is_empty() {
            parts.push(format!("q={}", urlencoding::encode(&self.search)));
        }
        if self.page > 0 {
            parts.push(format!("page={}", self.page));
        }
        for brand in &self.brands {
            parts.push(format!("brands={brand}"));
        }
        for category in &self.categories {
            parts.push(format!("categories={category}"));
        }

        parts.join("&")
    }

    /// Parse a query string back into a state
    ///
    /// A leading `?` is tolerated. Unknown keys and unparsable numbers are
    /// skipped rather than rejected, so a hand-edited string degrades to
    /// the nearest valid state instead of failing.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut state = Self::default();
        let trimmed = input.trim().trim_start_matches('?');

        for pair in trimmed.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };

            match key {
                "q" => {
                    if let Ok(decoded) = urlencoding::decode(value) {
                        state.search = decoded.into_owned();
                    }
                }
                "page" => {
                    if let Ok(page) = value.parse::<u32>() {
                        state.page = page;
                    }
                }
                "brands" => {
                    if let Ok(id) = value.parse::<i64>() {
                        state.brands.insert(id);
                    }
                }
                "categories" => {
                    if let Ok(id) = value.parse::<i64>() {
                        state.categories.insert(id);
                    }
                }
                _ => {}
            }
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> BTreeSet<i64> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_default_state_serializes_to_empty_string() {
        assert_eq!(QueryState::default().to_query_string(), "");
        assert!(QueryState::default().is_default());
    }

    #[test]
    fn test_round_trip_full_state() {
        let state = QueryState {
            search: "lamp".to_string(),
            page: 2,
            brands: ids(&[5, 9]),
            categories: ids(&[3]),
        };

        let encoded = state.to_query_string();
        assert_eq!(encoded, "q=lamp&page=2&brands=5&brands=9&categories=3");
        assert_eq!(QueryState::parse(&encoded), state);
    }

    #[test]
    fn test_round_trip_search_with_spaces() {
        let state = QueryState {
            search: "desk lamp & shade".to_string(),
            ..QueryState::default()
        };

        assert_eq!(QueryState::parse(&state.to_query_string()), state);
    }

    #[test]
    fn test_defaults_are_omitted() {
        let state = QueryState {
            search: String::new(),
            page: 0,
            brands: ids(&[7]),
            categories: BTreeSet::new(),
        };

        assert_eq!(state.to_query_string(), "brands=7");
    }

    #[test]
    fn test_parse_tolerates_leading_question_mark() {
        let state = QueryState::parse("?q=lamp&page=1");
        assert_eq!(state.search, "lamp");
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_parse_skips_invalid_numbers_and_unknown_keys() {
        let state = QueryState::parse("q=lamp&page=abc&brands=5&brands=x&sort=asc");
        assert_eq!(state.search, "lamp");
        assert_eq!(state.page, 0);
        assert_eq!(state.brands, ids(&[5]));
        assert!(state.categories.is_empty());
    }

    #[test]
    fn test_parse_empty_string_is_default() {
        assert_eq!(QueryState::parse(""), QueryState::default());
    }

    #[test]
    fn test_has_criteria() {
        assert!(!QueryState::default().has_criteria());
        assert!(
            QueryState {
                search: "  lamp ".to_string(),
                ..QueryState::default()
            }
            .has_criteria()
        );
        assert!(
            QueryState {
                brands: ids(&[1]),
                ..QueryState::default()
            }
            .has_criteria()
        );
        // Whitespace-only search is not a criterion.
        assert!(
            !QueryState {
                search: "   ".to_string(),
                ..QueryState::default()
            }
            .has_criteria()
        );
    }
}
