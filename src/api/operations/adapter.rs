//! Operation dispatch
//!
//! The adapter owns the transport and lookup cache and runs host items one
//! at a time, in order.

use anyhow::Result;
use log::{debug, info, warn};
use serde_json::{Value, json};
use std::sync::Arc;

use super::operation::{ItemOutput, Operation};
use crate::api::cache::LookupCache;
use crate::api::constants::record_path;
use crate::api::lookups::Lookups;
use crate::api::payload::{EntityKind, EntityPayload, PayloadAssembler};
use crate::api::query::{QueryResult, QuerySpec, single_record};
use crate::api::transport::{ApiRequest, Transport};

pub struct Adapter {
    transport: Arc<dyn Transport>,
    cache: LookupCache,
    default_query_limit: u32,
}

impl Adapter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cache: LookupCache::new(),
            default_query_limit: 0,
        }
    }

    /// Limit applied to `get_all` reads that do not set one
    pub fn with_default_query_limit(mut self, limit: u32) -> Self {
        self.default_query_limit = limit;
        self
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn lookups(&self) -> Lookups<'_> {
        Lookups::new(self.transport.as_ref(), &self.cache)
    }

    /// Run one operation and return the host items it produces
    pub async fn execute(&self, operation: &Operation) -> Result<Vec<Value>> {
        debug!("Executing {}", operation.describe());
        match operation {
            Operation::Customer(op) => op.execute(self).await,
            Operation::Order(op) => op.execute(self).await,
            Operation::Product(op) => op.execute(self).await,
            Operation::SpecificPrice(op) => op.execute(self).await,
        }
    }

    /// Run items sequentially.
    ///
    /// A failing item aborts the batch unless `continue_on_fail` is set, in
    /// which case it yields `{"error": message}` and processing moves on.
    pub async fn execute_items(&self, operations: &[Operation], continue_on_fail: bool) -> Result<Vec<ItemOutput>> {
        let mut outputs = Vec::with_capacity(operations.len());

        for (index, operation) in operations.iter().enumerate() {
            match self.execute(operation).await {
                Ok(items) => {
                    outputs.extend(items.into_iter().map(|json| ItemOutput::new(index, json)));
                }
                Err(e) if continue_on_fail => {
                    warn!("Item {} ({}) failed: {}", index, operation.describe(), e);
                    outputs.push(ItemOutput::error(index, e.to_string()));
                }
                Err(e) => {
                    return Err(e.context(format!("Item {} ({}) failed", index, operation.describe())));
                }
            }
        }

        info!("Processed {} items into {} outputs", operations.len(), outputs.len());
        Ok(outputs)
    }

    pub(crate) async fn get_record(&self, kind: EntityKind, id: &str) -> Result<Vec<Value>> {
        let response = self
            .transport
            .request(ApiRequest::get(record_path(kind.resource(), id)))
            .await?;
        Ok(vec![single_record(response, kind.element())])
    }

    pub(crate) async fn get_records(&self, kind: EntityKind, query: &QuerySpec) -> Result<Vec<Value>> {
        let mut query = query.clone();
        if query.limit.is_none() && self.default_query_limit > 0 {
            query.limit = Some(self.default_query_limit);
        }
        self.search(kind, &query.to_query_string()).await
    }

    /// Collection read with an already compiled query string
    pub(crate) async fn search(&self, kind: EntityKind, query: &str) -> Result<Vec<Value>> {
        let response = self
            .transport
            .request(ApiRequest::get(kind.resource()).query(query))
            .await?;
        Ok(QueryResult::from_response(kind.resource(), response)?.into_records())
    }

    pub(crate) async fn delete_record(&self, kind: EntityKind, id: &str) -> Result<Vec<Value>> {
        self.transport
            .request(ApiRequest::delete(record_path(kind.resource(), id)))
            .await?;
        Ok(vec![json!({"success": true})])
    }

    /// POST a body assembled from the blank schema
    pub(crate) async fn create(&self, kind: EntityKind, required: EntityPayload, optional: EntityPayload) -> Result<Vec<Value>> {
        let body = PayloadAssembler::new(self.transport.as_ref())
            .create_body(kind, required, optional)
            .await?;
        let response = self.transport.request(ApiRequest::post(kind.resource(), body)).await?;
        Ok(vec![response])
    }

    /// PATCH the supplied fields onto one record
    pub(crate) async fn patch(&self, kind: EntityKind, id: &str, fields: EntityPayload) -> Result<Vec<Value>> {
        let body = PayloadAssembler::update_body(kind, id, fields)?;
        let response = self
            .transport
            .request(ApiRequest::patch(record_path(kind.resource(), id), body))
            .await?;
        Ok(vec![response])
    }
}
