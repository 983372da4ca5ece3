//! Index search query builders.
//!
//! Generates the `must` clause and the comma-separated target string used
//! to filter index listings. Query execution is handled by the search client.

use crate::query::models::{MatchAllQuery, OneOrMany, QueryFragment, QueryOperator, QueryStringQuery};

/// Search string matching every index.
pub const MATCH_ALL_PATTERN: &str = "*";

/// Suffix excluding data stream backing indices (`.ds-*`) from a search.
pub const DATA_STREAM_EXCLUSION: &str = " -.ds";

/// Whitespace and line terminators stripped from a search, the same set the
/// dashboard's JavaScript `String.prototype.trim` strips. Unlike
/// `char::is_whitespace` it includes U+FEFF and excludes U+0085.
fn is_search_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'..='\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Build the `must` clause matching `search` against `field`.
///
/// Every space-separated token must match, each one wildcarded on both
/// sides: `"foo bar"` becomes `*foo* *bar*`. A blank search matches all.
pub fn build_field_match(field: &str, search: &str) -> QueryFragment {
    let search = search.trim_matches(is_search_whitespace);
    if search.is_empty() {
        return QueryFragment::MatchAll(MatchAllQuery::default());
    }

    QueryFragment::QueryString(QueryStringQuery {
        default_field: field.to_string(),
        default_operator: QueryOperator::And,
        query: format!("*{}*", search.replace(' ', "* *")),
    })
}

/// Build the target string for an index search.
///
/// Terms are wildcarded, indices and data streams are matched exactly.
/// Falls back to [`MATCH_ALL_PATTERN`] when nothing is selected. Unless
/// `show_data_streams` is set, data stream backing indices are excluded.
pub fn build_search_string(
    terms: Option<&OneOrMany>,
    indices: Option<&OneOrMany>,
    data_streams: Option<&OneOrMany>,
    show_data_streams: bool,
) -> String {
    let search_terms = terms
        .map(|terms| format!("*{}*", terms.as_slice().join("*,*")))
        .unwrap_or_default();
    let search_indices = indices
        .map(|indices| indices.as_slice().join(","))
        .unwrap_or_default();
    let search_data_streams = data_streams
        .map(|data_streams| data_streams.as_slice().join(","))
        .unwrap_or_default();

    let clauses: Vec<&str> = [
        search_terms.as_str(),
        search_indices.as_str(),
        search_data_streams.as_str(),
    ]
    .into_iter()
    .filter(|clause| !clause.is_empty())
    .collect();

    let resolved = if clauses.is_empty() {
        MATCH_ALL_PATTERN.to_string()
    } else {
        clauses.join(",")
    };

    if show_data_streams {
        resolved
    } else {
        resolved + DATA_STREAM_EXCLUSION
    }
}

/// Selection made in the index listing: search terms, explicitly chosen
/// indices and data streams, and whether data stream indices are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub terms: Option<OneOrMany>,
    pub indices: Option<OneOrMany>,
    pub data_streams: Option<OneOrMany>,
    pub show_data_streams: bool,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            terms: None,
            indices: None,
            data_streams: None,
            show_data_streams: true,
        }
    }
}

impl SearchFilter {
    pub fn to_search_string(&self) -> String {
        build_search_string(
            self.terms.as_ref(),
            self.indices.as_ref(),
            self.data_streams.as_ref(),
            self.show_data_streams,
        )
    }
}
