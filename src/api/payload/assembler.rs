//! Entity payload assembly
//!
//! Create bodies start from the resource's blank schema so every attribute
//! the webservice expects is present; update bodies start from the record id
//! alone so only what the caller supplied is sent.

use log::debug;

use super::kind::EntityKind;
use super::value::EntityPayload;
use super::xml::serialize_payload;
use crate::api::constants::BLANK_SCHEMA_QUERY;
use crate::api::query::single_record;
use crate::api::transport::{ApiRequest, Transport};

/// Merge caller fields onto a template.
///
/// Precedence is `optional` over `required` over `template`. Blank required
/// values are skipped so an unset input never clears a template default.
pub fn overlay(template: EntityPayload, required: EntityPayload, optional: EntityPayload) -> EntityPayload {
    let mut payload = template;
    for (key, value) in required {
        if !value.is_blank() {
            payload.insert(key, value);
        }
    }
    payload.merge(optional);
    payload
}

/// Drop the keys the webservice manages for this kind
pub fn strip_read_only(mut payload: EntityPayload, kind: EntityKind) -> EntityPayload {
    for key in kind.read_only_keys() {
        payload.remove(key);
    }
    payload
}

/// Strip, normalize and serialize a merged payload
pub fn finish(kind: EntityKind, payload: EntityPayload) -> anyhow::Result<String> {
    let payload = strip_read_only(payload, kind).normalize();
    serialize_payload(kind, &payload)
}

pub struct PayloadAssembler<'a> {
    transport: &'a dyn Transport,
}

impl<'a> PayloadAssembler<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// `GET <resource>?schema=blank`, unwrapped to the record template
    pub async fn fetch_template(&self, kind: EntityKind) -> anyhow::Result<EntityPayload> {
        let request = ApiRequest::get(kind.resource()).query(BLANK_SCHEMA_QUERY);
        let response = self.transport.request(request).await?;
        let template = EntityPayload::from_json(single_record(response, kind.element()));
        debug!("Fetched {} blank schema with {} attributes", kind, template.len());
        Ok(template)
    }

    /// Full creation body: template, then caller fields, then cleanup
    pub async fn create_body(
        &self,
        kind: EntityKind,
        required: EntityPayload,
        optional: EntityPayload,
    ) -> anyhow::Result<String> {
        let template = self.fetch_template(kind).await?;
        finish(kind, overlay(template, required, optional))
    }

    /// Partial patch body: the id plus exactly the supplied fields
    pub fn update_body(kind: EntityKind, id: &str, fields: EntityPayload) -> anyhow::Result<String> {
        let mut payload = EntityPayload::with_id(id);
        payload.merge(fields);
        finish(kind, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::payload::{PayloadValue, TranslatableField};
    use crate::api::transport::Method;
    use crate::api::transport::mock::MockTransport;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> EntityPayload {
        EntityPayload::from_json(value)
    }

    #[test]
    fn test_overlay_precedence() {
        let template = payload(json!({"email": "", "firstname": "Template", "active": "0"}));
        let required = payload(json!({"email": "a@b.com", "firstname": ""}));
        let optional = payload(json!({"email": "override@b.com", "active": true}));

        let merged = overlay(template, required, optional);

        assert_eq!(merged.get("email"), Some(&PayloadValue::from("override@b.com")));
        assert_eq!(merged.get("firstname"), Some(&PayloadValue::from("Template")));
        assert_eq!(merged.get("active"), Some(&PayloadValue::Bool(true)));
    }

    #[test]
    fn test_strip_product_keys() {
        let template = payload(json!({
            "id": "",
            "location": "",
            "supplier_reference": "",
            "cache_default_attribute": "",
            "quantity_discount": "",
            "date_add": "",
            "date_upd": "",
            "associations": {"categories": []},
            "price": ""
        }));

        let stripped = strip_read_only(template, EntityKind::Product);
        let keys: Vec<&str> = stripped.keys().collect();
        assert_eq!(keys, vec!["id", "price"]);
    }

    #[tokio::test]
    async fn test_create_body_from_blank_schema() {
        let transport = MockTransport::new().respond(
            Method::Get,
            "customers",
            json!({
                "customer": {
                    "id": "",
                    "email": "",
                    "firstname": "",
                    "newsletter": "",
                    "date_add": "",
                    "date_upd": "",
                    "associations": {"groups": [{"id": ""}]}
                }
            }),
        );

        let required = payload(json!({"email": "a@b.com", "firstname": "Ada"}));
        let optional = payload(json!({"newsletter": true, "birthday": "1990-02-03T00:00:00"}));

        let body = PayloadAssembler::new(&transport)
            .create_body(EntityKind::Customer, required, optional)
            .await
            .unwrap();

        assert!(body.contains("<email>a@b.com</email>"));
        assert!(body.contains("<newsletter>1</newsletter>"));
        assert!(body.contains("<birthday>1990-02-03 00:00:00</birthday>"));
        assert!(!body.contains("date_add"));
        assert!(!body.contains("associations"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "schema=blank");
    }

    #[tokio::test]
    async fn test_template_fetch_error_propagates() {
        let transport = MockTransport::new().fail(Method::Get, "products", "Internal Server Error");

        let result = PayloadAssembler::new(&transport)
            .create_body(EntityKind::Product, EntityPayload::new(), EntityPayload::new())
            .await;

        assert_eq!(result.unwrap_err().to_string(), "Internal Server Error");
    }

    #[test]
    fn test_update_body_is_partial() {
        let mut fields = EntityPayload::new();
        fields.insert("name", TranslatableField::new().with(1, "Shoe"));

        let body = PayloadAssembler::update_body(EntityKind::Product, "12", fields).unwrap();

        assert!(body.contains("<id>12</id>"));
        assert!(body.contains("<language id=\"1\">Shoe</language>"));
        assert!(!body.contains("<price"));
        assert!(!body.contains("<active"));
    }
}
