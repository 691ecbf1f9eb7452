//! Reusable query specification
//!
//! Represents the filter/sort/limit part of a collection read and compiles it
//! into the webservice query-string dialect

use super::filters::Condition;
use super::orderby::SortClause;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub sort: SortClause,
    /// `None` or `Some(0)` means unlimited
    #[serde(default)]
    pub limit: Option<u32>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.sort.is_empty() && self.effective_limit().is_none()
    }

    fn effective_limit(&self) -> Option<u32> {
        self.limit.filter(|limit| *limit > 0)
    }

    /// Compile into a query-string fragment without the leading `?`.
    ///
    /// `limit` and `sort` are percent-encoded, then literal brackets are put
    /// back since the webservice does not decode `%5B`/`%5D`. Filter clauses
    /// are appended verbatim.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();

        if let Some(limit) = self.effective_limit() {
            params.push(("limit", limit.to_string()));
        }

        if let Some(sort) = self.sort.to_sort_value() {
            params.push(("sort", sort));
        }

        let encoded = params
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let head = restore_brackets(&encoded);

        let filters = self
            .conditions
            .iter()
            .map(|condition| condition.to_query_string())
            .collect::<Vec<_>>()
            .join("&");

        match (head.is_empty(), filters.is_empty()) {
            (false, false) => format!("{}&{}", head, filters),
            (false, true) => head,
            (true, _) => filters,
        }
    }
}

/// Percent-decode only `[` and `]`, leaving every other escape intact
fn restore_brackets(encoded: &str) -> String {
    encoded
        .replace("%5B", "[")
        .replace("%5b", "[")
        .replace("%5D", "]")
        .replace("%5d", "]")
}

/// Join non-empty query-string fragments with `&`
pub fn join_query(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("&")
}
