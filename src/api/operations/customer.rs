//! Customer operations

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::adapter::Adapter;
use crate::api::payload::multilang::string_or_number;
use crate::api::payload::{EntityKind, EntityPayload, PayloadValue};
use crate::api::query::QuerySpec;

const KIND: EntityKind = EntityKind::Customer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum CustomerOperation {
    Create {
        #[serde(default)]
        email: String,
        #[serde(default)]
        firstname: String,
        #[serde(default)]
        lastname: String,
        #[serde(default)]
        passwd: String,
        #[serde(default)]
        additional_fields: Map<String, Value>,
    },
    Update {
        #[serde(alias = "customer_id", deserialize_with = "string_or_number")]
        id: String,
        #[serde(default)]
        email: String,
        #[serde(default)]
        firstname: String,
        #[serde(default)]
        lastname: String,
        #[serde(default)]
        passwd: String,
        #[serde(default)]
        additional_fields: Map<String, Value>,
    },
    Get {
        #[serde(alias = "customer_id", deserialize_with = "string_or_number")]
        id: String,
    },
    GetAll {
        #[serde(default)]
        query: QuerySpec,
    },
    Delete {
        #[serde(alias = "customer_id", deserialize_with = "string_or_number")]
        id: String,
    },
}

impl CustomerOperation {
    pub fn operation_type(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Get { .. } => "get",
            Self::GetAll { .. } => "get_all",
            Self::Delete { .. } => "delete",
        }
    }

    pub(crate) async fn execute(&self, adapter: &Adapter) -> Result<Vec<Value>> {
        match self {
            Self::Create {
                email,
                firstname,
                lastname,
                passwd,
                additional_fields,
            } => {
                let required = identity_fields(email, firstname, lastname, passwd);
                let optional = EntityPayload::from_json_map(additional_fields.clone());
                adapter.create(KIND, required, optional).await
            }
            Self::Update {
                id,
                email,
                firstname,
                lastname,
                passwd,
                additional_fields,
            } => {
                let mut fields = identity_fields(email, firstname, lastname, passwd);
                fields.merge(EntityPayload::from_json_map(additional_fields.clone()));
                adapter.patch(KIND, id, truncate_birthday(fields)).await
            }
            Self::Get { id } => adapter.get_record(KIND, id).await,
            Self::GetAll { query } => adapter.get_records(KIND, query).await,
            Self::Delete { id } => adapter.delete_record(KIND, id).await,
        }
    }
}

fn identity_fields(email: &str, firstname: &str, lastname: &str, passwd: &str) -> EntityPayload {
    let mut fields = EntityPayload::new();
    fields.insert_present("email", Some(email));
    fields.insert_present("firstname", Some(firstname));
    fields.insert_present("lastname", Some(lastname));
    fields.insert_present("passwd", Some(passwd));
    fields
}

/// `birthday` is a date column; a picker datetime is cut to its date part
fn truncate_birthday(mut fields: EntityPayload) -> EntityPayload {
    let date = match fields.get("birthday") {
        Some(PayloadValue::Text(birthday)) => birthday.split_once('T').map(|(date, _)| date.to_string()),
        _ => None,
    };
    if let Some(date) = date {
        fields.insert("birthday", date);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operations::Operation;
    use crate::api::transport::Method;
    use crate::api::transport::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_truncate_birthday() {
        let mut fields = EntityPayload::new();
        fields.insert("birthday", "1990-02-03T00:00:00");
        let fields = truncate_birthday(fields);
        assert_eq!(fields.get("birthday"), Some(&PayloadValue::from("1990-02-03")));
    }

    #[tokio::test]
    async fn test_update_sends_partial_patch() {
        let transport = Arc::new(MockTransport::new().respond(
            Method::Patch,
            "customers/8",
            json!({"customer": {"id": 8}}),
        ));
        let adapter = Adapter::new(transport.clone());

        let operation: Operation = serde_json::from_value(json!({
            "resource": "customer",
            "operation": "update",
            "customer_id": 8,
            "lastname": "Lovelace",
            "additional_fields": {"birthday": "1990-02-03T00:00:00", "newsletter": false}
        }))
        .unwrap();

        let output = adapter.execute(&operation).await.unwrap();
        assert_eq!(output, vec![json!({"customer": {"id": 8}})]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let body = requests[0].body.as_deref().unwrap();
        assert!(body.contains("<id>8</id>"));
        assert!(body.contains("<lastname>Lovelace</lastname>"));
        assert!(body.contains("<birthday>1990-02-03</birthday>"));
        assert!(body.contains("<newsletter>0</newsletter>"));
        assert!(!body.contains("<email"));
        assert!(!body.contains("<firstname"));
    }

    #[tokio::test]
    async fn test_create_skips_empty_password() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(
                    Method::Get,
                    "customers",
                    json!({"customer": {"id": "", "passwd": "", "email": "", "date_add": ""}}),
                )
                .respond(Method::Post, "customers", json!({"customer": {"id": 21}})),
        );
        let adapter = Adapter::new(transport.clone());

        let operation = Operation::Customer(CustomerOperation::Create {
            email: "a@b.com".to_string(),
            firstname: String::new(),
            lastname: String::new(),
            passwd: String::new(),
            additional_fields: Map::new(),
        });

        adapter.execute(&operation).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[1].method, Method::Post);
        let body = requests[1].body.as_deref().unwrap();
        assert!(body.contains("<passwd/>"));
        assert!(body.contains("<email>a@b.com</email>"));
        assert!(!body.contains("date_add"));
    }
}
