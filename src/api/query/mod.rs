//! PrestaShop Query Builder Module
//!
//! Provides the filter/sort/limit compiler for collection reads.
//! Follows the same pattern as operations with QuerySpec (reusable) and QueryBuilder (fluent).

pub mod builder;
pub mod filters;
pub mod orderby;
pub mod query;
pub mod result;

pub use builder::QueryBuilder;
pub use filters::{Condition, ConditionType, translate_like_pattern};
pub use orderby::{SortClause, SortDirection, SortDirective};
pub use query::{QuerySpec, join_query};
pub use result::{QueryResult, single_record, value_as_u64};
