//! Polling trigger for newly created entities
//!
//! Each poll asks for records with an id above the last one seen, oldest
//! first, and advances the host-owned `PollState` to the highest id returned.

use anyhow::{Result, bail};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::api::query::QueryBuilder;
use crate::api::transport::Transport;

/// Resources that can be watched for creations
pub const WATCHABLE_RESOURCES: &[&str] = &[
    "addresses",
    "carriers",
    "cart_rules",
    "carts",
    "categories",
    "combinations",
    "customer_messages",
    "customer_threads",
    "customers",
    "employees",
    "manufacturers",
    "messages",
    "order_carriers",
    "order_details",
    "order_histories",
    "order_payments",
    "orders",
    "products",
    "specific_price_rules",
    "specific_prices",
    "stock_availables",
    "stores",
    "suppliers",
    "tags",
];

/// Bookkeeping the host persists between polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PollState {
    #[serde(default)]
    pub last_checked_id: Option<u64>,
}

/// `<resource>.created`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    resource: String,
}

impl TriggerEvent {
    pub fn created(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl FromStr for TriggerEvent {
    type Err = anyhow::Error;

    fn from_str(event: &str) -> Result<Self> {
        let Some((resource, action)) = event.split_once('.') else {
            bail!("Invalid event '{}', expected <resource>.created", event);
        };
        if action != "created" {
            bail!("Unsupported event action '{}', only 'created' is available", action);
        }
        if !WATCHABLE_RESOURCES.contains(&resource) {
            bail!("Unknown resource '{}' in event '{}'", resource, event);
        }
        Ok(Self::created(resource))
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.created", self.resource)
    }
}

/// Fetch records created since the last poll.
///
/// `starting_id` only applies until the state holds a non-zero id. The state
/// is left untouched when nothing new is found.
pub async fn poll(
    transport: &dyn Transport,
    event: &TriggerEvent,
    starting_id: u64,
    state: &mut PollState,
) -> Result<Vec<Value>> {
    let last_id = state.last_checked_id.filter(|id| *id > 0).unwrap_or(starting_id);
    debug!("Polling {} above id {}", event, last_id);

    let result = QueryBuilder::new(event.resource())
        .created_after_id(last_id)
        .execute(transport)
        .await?;

    if result.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(max_id) = result.max_id() {
        state.last_checked_id = Some(max_id);
    }
    info!("{} new {} records, last id now {:?}", result.len(), event.resource(), state.last_checked_id);

    Ok(result.into_records())
}
