//! QueryBuilder for fluent query construction
//!
//! Provides a fluent API that builds QuerySpec objects for execution

use super::filters::Condition;
use super::orderby::SortDirective;
use super::query::QuerySpec;
use super::result::QueryResult;
use crate::api::transport::{ApiRequest, Transport};

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    resource: String,
    spec: QuerySpec,
}

impl QueryBuilder {
    /// Start a query against a plural resource (e.g. "customers")
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            spec: QuerySpec::new(),
        }
    }

    /// Add filter condition
    pub fn filter(mut self, condition: Condition) -> Self {
        self.spec.conditions.push(condition);
        self
    }

    /// Add ordering
    pub fn sort(mut self, directive: SortDirective) -> Self {
        self.spec.sort = self.spec.sort.add(directive);
        self
    }

    /// Limit number of results
    pub fn limit(mut self, limit: u32) -> Self {
        self.spec.limit = Some(limit);
        self
    }

    /// Build the final QuerySpec (reusable)
    pub fn build(self) -> QuerySpec {
        self.spec
    }

    /// Build and execute immediately
    pub async fn execute(self, transport: &dyn Transport) -> anyhow::Result<QueryResult> {
        let query = self.spec.to_query_string();
        let response = transport.request(ApiRequest::get(&self.resource).query(query)).await?;
        QueryResult::from_response(&self.resource, response)
    }
}

// Convenience methods for common patterns
impl QueryBuilder {
    /// Records with an id strictly greater than `id`, oldest first
    pub fn created_after_id(self, id: u64) -> Self {
        self.filter(Condition::gt("id", id)).oldest_first()
    }

    /// Order by id (oldest first)
    pub fn oldest_first(self) -> Self {
        self.sort(SortDirective::asc("id"))
    }
}
