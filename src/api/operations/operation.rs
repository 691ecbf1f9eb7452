//! Core operation types
//!
//! Host items are JSON objects tagged with `resource` and `operation`, e.g.
//! `{"resource": "order", "operation": "set_note", "id": 5, "note": "..."}`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::customer::CustomerOperation;
use super::order::OrderOperation;
use super::product::ProductOperation;
use super::specific_price::SpecificPriceOperation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resource", rename_all = "snake_case")]
pub enum Operation {
    Customer(CustomerOperation),
    Order(OrderOperation),
    Product(ProductOperation),
    SpecificPrice(SpecificPriceOperation),
}

impl Operation {
    pub fn resource(&self) -> &'static str {
        match self {
            Operation::Customer(_) => "customer",
            Operation::Order(_) => "order",
            Operation::Product(_) => "product",
            Operation::SpecificPrice(_) => "specific_price",
        }
    }

    pub fn operation_type(&self) -> &'static str {
        match self {
            Operation::Customer(op) => op.operation_type(),
            Operation::Order(op) => op.operation_type(),
            Operation::Product(op) => op.operation_type(),
            Operation::SpecificPrice(op) => op.operation_type(),
        }
    }

    /// `resource.operation`, for logs and error context
    pub fn describe(&self) -> String {
        format!("{}.{}", self.resource(), self.operation_type())
    }
}

/// One host output item, attributed to the input item that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOutput {
    pub item: usize,
    pub json: Value,
}

impl ItemOutput {
    pub fn new(item: usize, json: Value) -> Self {
        Self { item, json }
    }

    pub fn error(item: usize, message: impl Into<String>) -> Self {
        Self {
            item,
            json: json!({"error": message.into()}),
        }
    }

    pub fn is_error(&self) -> bool {
        self.json.get("error").is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::ConditionType;

    #[test]
    fn test_deserialize_tagged_items() {
        let operation: Operation = serde_json::from_value(json!({
            "resource": "customer",
            "operation": "get_all",
            "query": {
                "conditions": [{"field": "email", "conditionType": "like", "value": "%@b.com"}],
                "limit": 5
            }
        }))
        .unwrap();

        assert_eq!(operation.describe(), "customer.get_all");
        match operation {
            Operation::Customer(CustomerOperation::GetAll { query }) => {
                assert_eq!(query.conditions[0].condition_type, ConditionType::Like);
                assert_eq!(query.limit, Some(5));
            }
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_resource_is_rejected() {
        let result = serde_json::from_value::<Operation>(json!({"resource": "cart", "operation": "get", "id": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_item_output_error() {
        let output = ItemOutput::error(3, "boom");
        assert!(output.is_error());
        assert_eq!(output.json, json!({"error": "boom"}));
    }
}
