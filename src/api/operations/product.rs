//! Product and stock operations

use anyhow::{Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::adapter::Adapter;
use crate::api::payload::multilang::string_or_number;
use crate::api::payload::{EntityKind, EntityPayload, TranslatableField};
use crate::api::query::{Condition, QuerySpec, value_as_u64};

const KIND: EntityKind = EntityKind::Product;

/// How the `stock_available` record to update is found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockSearchMode {
    #[default]
    ByStockId,
    ByCombination,
}

/// Shop context for multistore installations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopScope {
    #[serde(default)]
    pub shop_id: u64,
    #[serde(default)]
    pub shop_group_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ProductOperation {
    Create {
        #[serde(default)]
        name: TranslatableField,
        #[serde(default)]
        link_rewrite: TranslatableField,
        #[serde(default)]
        price: f64,
        /// Extra translatable attributes, e.g. `description`
        #[serde(default)]
        translation_fields: Map<String, Value>,
        #[serde(default)]
        additional_fields: Map<String, Value>,
    },
    Update {
        #[serde(alias = "product_id", deserialize_with = "string_or_number")]
        id: String,
        #[serde(default)]
        name: Option<TranslatableField>,
        #[serde(default)]
        link_rewrite: Option<TranslatableField>,
        #[serde(default)]
        price: Option<f64>,
        #[serde(default)]
        translation_fields: Map<String, Value>,
        #[serde(default)]
        additional_fields: Map<String, Value>,
    },
    Stock {
        #[serde(default)]
        search_mode: StockSearchMode,
        #[serde(default)]
        stock_id: u64,
        #[serde(default, deserialize_with = "string_or_number")]
        product_id: String,
        #[serde(default)]
        combination_id: u64,
        #[serde(default)]
        multishop: Option<ShopScope>,
        quantity: i64,
    },
    Get {
        #[serde(alias = "product_id", deserialize_with = "string_or_number")]
        id: String,
    },
    GetAll {
        #[serde(default)]
        query: QuerySpec,
    },
    Delete {
        #[serde(alias = "product_id", deserialize_with = "string_or_number")]
        id: String,
    },
}

impl ProductOperation {
    pub fn operation_type(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Stock { .. } => "stock",
            Self::Get { .. } => "get",
            Self::GetAll { .. } => "get_all",
            Self::Delete { .. } => "delete",
        }
    }

    pub(crate) async fn execute(&self, adapter: &Adapter) -> Result<Vec<Value>> {
        match self {
            Self::Create {
                name,
                link_rewrite,
                price,
                translation_fields,
                additional_fields,
            } => {
                let mut required = EntityPayload::new();
                required.insert("name", name.clone());
                required.insert("link_rewrite", link_rewrite.clone());
                required.insert("price", *price);
                required.insert("state", 1i64);
                for (key, field) in translatable_entries(translation_fields) {
                    required.insert(key, field);
                }
                let optional = EntityPayload::from_json_map(additional_fields.clone());
                adapter.create(KIND, required, optional).await
            }
            Self::Update {
                id,
                name,
                link_rewrite,
                price,
                translation_fields,
                additional_fields,
            } => {
                let mut fields = EntityPayload::new();
                fields.insert_present("name", name.clone());
                fields.insert_present("link_rewrite", link_rewrite.clone());
                if let Some(price) = price.filter(|price| *price > 0.0) {
                    fields.insert("price", price);
                }
                for (key, field) in translatable_entries(translation_fields) {
                    fields.insert(key, field);
                }
                fields.merge(EntityPayload::from_json_map(additional_fields.clone()));
                adapter.patch(KIND, id, fields).await
            }
            Self::Stock {
                search_mode,
                stock_id,
                product_id,
                combination_id,
                multishop,
                quantity,
            } => {
                let stock_id = match search_mode {
                    StockSearchMode::ByStockId => *stock_id,
                    StockSearchMode::ByCombination => {
                        find_stock_id(adapter, product_id, *combination_id, multishop.as_ref()).await?
                    }
                };
                if stock_id == 0 {
                    bail!("No valid stock record identifier found.");
                }

                let mut fields = EntityPayload::new();
                fields.insert("quantity", *quantity);
                adapter
                    .patch(EntityKind::StockAvailable, &stock_id.to_string(), fields)
                    .await
            }
            Self::Get { id } => adapter.get_record(KIND, id).await,
            Self::GetAll { query } => adapter.get_records(KIND, query).await,
            Self::Delete { id } => adapter.delete_record(KIND, id).await,
        }
    }
}

/// Entries of `translation_fields` that hold translations; anything else is ignored
fn translatable_entries(fields: &Map<String, Value>) -> Vec<(String, TranslatableField)> {
    fields
        .iter()
        .filter_map(|(key, value)| {
            serde_json::from_value::<TranslatableField>(value.clone())
                .ok()
                .map(|field| (key.clone(), field))
        })
        .collect()
}

/// First `stock_available` of a product combination, optionally within one shop
async fn find_stock_id(
    adapter: &Adapter,
    product_id: &str,
    combination_id: u64,
    multishop: Option<&ShopScope>,
) -> Result<u64> {
    let mut query = QuerySpec::new()
        .with_condition(Condition::eq("id_product", product_id))
        .with_condition(Condition::eq("id_product_attribute", combination_id));
    if let Some(scope) = multishop {
        query = query
            .with_condition(Condition::eq("id_shop", scope.shop_id))
            .with_condition(Condition::eq("id_shop_group", scope.shop_group_id));
    }

    let records = adapter
        .search(EntityKind::StockAvailable, &query.to_query_string())
        .await?;
    let Some(record) = records.first() else {
        bail!("No stock records were found with these parameters.");
    };

    let stock_id = record.get("id").and_then(value_as_u64).unwrap_or(0);
    debug!("Resolved product {} combination {} to stock {}", product_id, combination_id, stock_id);
    Ok(stock_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operations::Operation;
    use crate::api::transport::Method;
    use crate::api::transport::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn stock_by_combination(multishop: Option<ShopScope>) -> Operation {
        Operation::Product(ProductOperation::Stock {
            search_mode: StockSearchMode::ByCombination,
            stock_id: 0,
            product_id: "12".to_string(),
            combination_id: 3,
            multishop,
            quantity: 40,
        })
    }

    #[tokio::test]
    async fn test_stock_by_combination() {
        let transport = Arc::new(MockTransport::new().respond(
            Method::Get,
            "stock_availables",
            json!({"stock_availables": [{"id": "77"}]}),
        ));
        let adapter = Adapter::new(transport.clone());

        adapter
            .execute(&stock_by_combination(Some(ShopScope {
                shop_id: 1,
                shop_group_id: 2,
            })))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(
            requests[0].query,
            "filter[id_product]=[12]&filter[id_product_attribute]=[3]&filter[id_shop]=[1]&filter[id_shop_group]=[2]"
        );
        assert_eq!(requests[1].method, Method::Patch);
        assert_eq!(requests[1].resource, "stock_availables/77");
        let body = requests[1].body.as_deref().unwrap();
        assert!(body.contains("<stock_available>"));
        assert!(body.contains("<id>77</id>"));
        assert!(body.contains("<quantity>40</quantity>"));
    }

    #[tokio::test]
    async fn test_stock_search_without_results() {
        let transport = Arc::new(MockTransport::new().respond(Method::Get, "stock_availables", json!([])));
        let adapter = Adapter::new(transport.clone());

        let error = adapter.execute(&stock_by_combination(None)).await.unwrap_err();
        assert_eq!(error.to_string(), "No stock records were found with these parameters.");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_stock_without_identifier() {
        let adapter = Adapter::new(Arc::new(MockTransport::new()));
        let operation: Operation = serde_json::from_value(json!({
            "resource": "product",
            "operation": "stock",
            "quantity": 5
        }))
        .unwrap();

        let error = adapter.execute(&operation).await.unwrap_err();
        assert_eq!(error.to_string(), "No valid stock record identifier found.");
    }

    #[tokio::test]
    async fn test_create_sets_translations_and_state() {
        let transport = Arc::new(MockTransport::new().respond(
            Method::Get,
            "products",
            json!({"product": {
                "id": "",
                "name": "",
                "price": "",
                "state": "",
                "location": "",
                "description": "",
                "associations": {}
            }}),
        ));
        let adapter = Adapter::new(transport.clone());

        let operation: Operation = serde_json::from_value(json!({
            "resource": "product",
            "operation": "create",
            "name": {"translations": [{"idLang": 1, "valueLang": "Shoe"}]},
            "link_rewrite": [{"id": "1", "value": "shoe"}],
            "price": 19.9,
            "translation_fields": {
                "description": {"translations": [{"id": 1, "value": "<p>Red</p>"}]},
                "ignored": "plain"
            },
            "additional_fields": {"active": true}
        }))
        .unwrap();

        adapter.execute(&operation).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[1].method, Method::Post);
        let body = requests[1].body.as_deref().unwrap();
        assert!(body.contains("<language id=\"1\">Shoe</language>"));
        assert!(body.contains("<link_rewrite>"));
        assert!(body.contains("<price>19.9</price>"));
        assert!(body.contains("<state>1</state>"));
        assert!(body.contains("<active>1</active>"));
        assert!(body.contains("<![CDATA[<p>Red</p>]]>"));
        assert!(!body.contains("ignored"));
        assert!(!body.contains("location"));
        assert!(!body.contains("associations"));
    }

    #[tokio::test]
    async fn test_update_skips_non_positive_price() {
        let transport = Arc::new(MockTransport::new());
        let adapter = Adapter::new(transport.clone());

        let operation = Operation::Product(ProductOperation::Update {
            id: "9".to_string(),
            name: None,
            link_rewrite: None,
            price: Some(0.0),
            translation_fields: Map::new(),
            additional_fields: Map::new(),
        });
        adapter.execute(&operation).await.unwrap();

        let body = transport.requests()[0].body.clone().unwrap();
        assert!(body.contains("<id>9</id>"));
        assert!(!body.contains("<price"));
    }
}
