//! End-to-end item runs through the adapter

mod common;

use common::ScriptedTransport;
use prestashop_cli::api::{Adapter, Lookup, Method, Operation};
use prestashop_cli::trigger::{PollState, TriggerEvent, poll};
use serde_json::json;
use std::sync::Arc;

fn operations(items: serde_json::Value) -> Vec<Operation> {
    serde_json::from_value(items).unwrap()
}

#[tokio::test]
async fn test_batch_continues_after_failure() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .then_fail(Method::Get, "orders/404", "PrestaShop API error (404 Not Found): Order not found")
            .then(Method::Delete, "customers/8", json!({}))
            .then(Method::Patch, "orders/5", json!({"order": {"id": "5", "note": "gift"}})),
    );
    let adapter = Adapter::new(transport.clone());

    let items = operations(json!([
        {"resource": "order", "operation": "get", "id": 404},
        {"resource": "customer", "operation": "delete", "customer_id": "8"},
        {"resource": "order", "operation": "set_note", "order_id": 5, "note": "gift"}
    ]));
    let outputs = adapter.execute_items(&items, true).await.unwrap();

    assert_eq!(outputs.len(), 3);
    assert!(outputs[0].is_error());
    assert_eq!(
        outputs[0].json,
        json!({"error": "PrestaShop API error (404 Not Found): Order not found"})
    );
    assert_eq!(outputs[1].json, json!({"success": true}));
    assert_eq!(outputs[2].item, 2);
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn test_batch_stops_on_failure() {
    let transport = Arc::new(ScriptedTransport::new().then_fail(Method::Get, "products/1", "boom"));
    let adapter = Adapter::new(transport.clone());

    let items = operations(json!([
        {"resource": "product", "operation": "get", "id": 1},
        {"resource": "product", "operation": "get", "id": 2}
    ]));
    let error = adapter.execute_items(&items, false).await.unwrap_err();

    assert!(format!("{:#}", error).contains("boom"));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_get_all_yields_one_item_per_record() {
    let transport = Arc::new(ScriptedTransport::new().then(
        Method::Get,
        "specific_prices",
        json!({"specific_prices": [{"id": 1}, {"id": 2}]}),
    ));
    let adapter = Adapter::new(transport.clone()).with_default_query_limit(50);

    let items = operations(json!([{
        "resource": "specific_price",
        "operation": "get_all",
        "query": {"conditions": [{"field": "id_product", "value": 7}]}
    }]));
    let outputs = adapter.execute_items(&items, false).await.unwrap();

    assert_eq!(outputs.len(), 2);
    assert!(outputs.iter().all(|output| output.item == 0));
    assert_eq!(transport.requests()[0].query, "limit=50&filter[id_product]=[7]");
}

#[tokio::test]
async fn test_poll_then_poll_again() {
    let transport = ScriptedTransport::new()
        .then(Method::Get, "customers", json!({"customers": [{"id": 3}, {"id": 4}]}))
        .then(Method::Get, "customers", json!([]));
    let event: TriggerEvent = "customers.created".parse().unwrap();
    let mut state = PollState::default();

    let first = poll(&transport, &event, 2, &mut state).await.unwrap();
    let second = poll(&transport, &event, 2, &mut state).await.unwrap();

    assert_eq!(first.len(), 2);
    assert!(second.is_empty());
    assert_eq!(state.last_checked_id, Some(4));
    assert_eq!(transport.requests()[1].query, "sort=[id_ASC]&filter[id]=>[4]");
}

#[tokio::test]
async fn test_lookup_languages_cached() {
    let transport = Arc::new(ScriptedTransport::new().then(
        Method::Get,
        "languages",
        json!({"languages": [{"id": 2, "name": "Français"}, {"id": 1, "name": "English"}]}),
    ));
    let adapter = Adapter::new(transport.clone());

    let first = adapter.lookups().load(Lookup::Languages).await.unwrap();
    let second = adapter.lookups().load(Lookup::Languages).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].name, "English");
    assert_eq!(first[0].value, "1");
    assert_eq!(transport.requests().len(), 1);
}
