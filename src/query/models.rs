//! Search engine query models.
//!
//! `QueryFragment` serializes to exactly the two shapes the search client
//! understands: `{"query_string": {...}}` and `{"match_all": {}}`.

use serde::{Deserialize, Serialize};

/// A `must` clause used when listing indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryFragment {
    QueryString(QueryStringQuery),
    MatchAll(MatchAllQuery),
}

impl QueryFragment {
    pub fn is_match_all(&self) -> bool {
        matches!(self, QueryFragment::MatchAll(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStringQuery {
    pub default_field: String,
    pub default_operator: QueryOperator,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryOperator {
    And,
}

/// Serializes as an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAllQuery {}

/// A single value or a list of values, as accepted for search terms,
/// indices and data streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        OneOrMany::One(value)
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(values: Vec<&str>) -> Self {
        OneOrMany::Many(values.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_string_shape() {
        let fragment = QueryFragment::QueryString(QueryStringQuery {
            default_field: "index".to_string(),
            default_operator: QueryOperator::And,
            query: "*logs*".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&fragment).unwrap(),
            json!({
                "query_string": {
                    "default_field": "index",
                    "default_operator": "AND",
                    "query": "*logs*"
                }
            })
        );
        assert!(!fragment.is_match_all());
    }

    #[test]
    fn test_match_all_shape() {
        let fragment = QueryFragment::MatchAll(MatchAllQuery::default());
        assert_eq!(serde_json::to_value(&fragment).unwrap(), json!({ "match_all": {} }));
        assert!(fragment.is_match_all());

        let parsed: QueryFragment = serde_json::from_value(json!({ "match_all": {} })).unwrap();
        assert_eq!(parsed, fragment);
    }

    #[test]
    fn test_one_or_many_from_json() {
        let one: OneOrMany = serde_json::from_value(json!("logs")).unwrap();
        assert_eq!(one.as_slice(), ["logs".to_string()]);

        let many: OneOrMany = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(many.as_slice(), ["a".to_string(), "b".to_string()]);
    }
}
