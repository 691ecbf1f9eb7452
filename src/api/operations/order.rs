//! Order operations
//!
//! Orders are never created through the webservice here; the writes are
//! single-attribute patches.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::adapter::Adapter;
use crate::api::payload::multilang::string_or_number;
use crate::api::payload::{EntityKind, EntityPayload};
use crate::api::query::QuerySpec;

const KIND: EntityKind = EntityKind::Order;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OrderOperation {
    ChangeStatus {
        #[serde(alias = "order_id", deserialize_with = "string_or_number")]
        id: String,
        #[serde(deserialize_with = "string_or_number")]
        order_state_id: String,
    },
    SetShippingNumber {
        #[serde(alias = "order_id", deserialize_with = "string_or_number")]
        id: String,
        shipping_number: String,
    },
    SetNote {
        #[serde(alias = "order_id", deserialize_with = "string_or_number")]
        id: String,
        #[serde(default)]
        note: String,
    },
    Get {
        #[serde(alias = "order_id", deserialize_with = "string_or_number")]
        id: String,
    },
    GetAll {
        #[serde(default)]
        query: QuerySpec,
    },
    Delete {
        #[serde(alias = "order_id", deserialize_with = "string_or_number")]
        id: String,
    },
}

impl OrderOperation {
    pub fn operation_type(&self) -> &'static str {
        match self {
            Self::ChangeStatus { .. } => "change_status",
            Self::SetShippingNumber { .. } => "set_shipping_number",
            Self::SetNote { .. } => "set_note",
            Self::Get { .. } => "get",
            Self::GetAll { .. } => "get_all",
            Self::Delete { .. } => "delete",
        }
    }

    pub(crate) async fn execute(&self, adapter: &Adapter) -> Result<Vec<Value>> {
        match self {
            Self::ChangeStatus { id, order_state_id } => {
                adapter.patch(KIND, id, single_field("current_state", order_state_id)).await
            }
            Self::SetShippingNumber { id, shipping_number } => {
                adapter.patch(KIND, id, single_field("shipping_number", shipping_number)).await
            }
            // An empty note is sent as-is so it clears the existing one
            Self::SetNote { id, note } => adapter.patch(KIND, id, single_field("note", note)).await,
            Self::Get { id } => adapter.get_record(KIND, id).await,
            Self::GetAll { query } => adapter.get_records(KIND, query).await,
            Self::Delete { id } => adapter.delete_record(KIND, id).await,
        }
    }
}

fn single_field(key: &str, value: &str) -> EntityPayload {
    let mut fields = EntityPayload::new();
    fields.insert(key, value);
    fields
}
