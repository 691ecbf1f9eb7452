//! PrestaShop Webservice API Module
//!
//! Query compilation, payload assembly, transport and per-resource
//! operations for the PrestaShop REST webservice.

pub mod cache;
pub mod client;
pub mod constants;
pub mod lookups;
pub mod operations;
pub mod payload;
pub mod query;
pub mod resources;
pub mod response;
pub mod transport;

pub use cache::LookupCache;
pub use client::PrestashopClient;
pub use constants::OutputFormat;
pub use lookups::{Lookup, LookupOption, Lookups};
pub use operations::{Adapter, ItemOutput, Operation};
pub use payload::{EntityKind, EntityPayload, PayloadValue, TranslatableField, Translation};
pub use query::{Condition, ConditionType, QueryBuilder, QueryResult, QuerySpec, SortClause, SortDirection, SortDirective};
pub use transport::{ApiRequest, Method, Transport};
