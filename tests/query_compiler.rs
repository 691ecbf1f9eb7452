//! Query-string compilation against the webservice filter dialect

use prestashop_cli::api::{Condition, ConditionType, QueryBuilder, QuerySpec, SortDirective};
use serde_json::json;

#[test]
fn test_empty_query_compiles_to_nothing() {
    assert_eq!(QuerySpec::new().to_query_string(), "");
    assert_eq!(QuerySpec::new().with_limit(0).to_query_string(), "");
}

#[test]
fn test_limit_sort_and_filters_in_order() {
    let query = QueryBuilder::new("orders")
        .limit(25)
        .sort(SortDirective::desc("date_add"))
        .sort(SortDirective::asc("id"))
        .filter(Condition::new("current_state", ConditionType::In, "2|3"))
        .filter(Condition::like("reference", "%XK"))
        .build();

    assert_eq!(
        query.to_query_string(),
        "limit=25&sort=[date_add_DESC%2Cid_ASC]&filter[current_state]=[2|3]&filter[reference]=%[XK]"
    );
}

#[test]
fn test_query_from_host_json() {
    let query: QuerySpec = serde_json::from_value(json!({
        "conditions": [
            {"field": "id", "conditionType": "interval", "value": "10,20"},
            {"field": "active", "conditionType": "neq", "value": 0}
        ],
        "sort": [{"field": "lastname"}],
        "limit": 3
    }))
    .unwrap();

    assert_eq!(
        query.to_query_string(),
        "limit=3&sort=[lastname_ASC]&filter[id]=[10,20]&filter[active]=![0]"
    );
}

#[test]
fn test_created_after_id_preset() {
    let query = QueryBuilder::new("customers").created_after_id(99).build();
    assert_eq!(query.to_query_string(), "sort=[id_ASC]&filter[id]=>[99]");
}
