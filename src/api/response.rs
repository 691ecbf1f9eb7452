//! Response decoding
//!
//! Converts `output_format=XML` documents into the same JSON shape the
//! webservice produces for `output_format=JSON`, and digs remote error
//! messages out of failed responses.

use anyhow::Context;
use roxmltree::{Document, Node};
use serde_json::{Map, Value};

/// Decode an XML webservice document into JSON.
///
/// The `<prestashop>` root is dropped, collections become arrays, leaf
/// elements become strings and attributes (minus `xlink:*`) become keys.
pub fn decode_xml(text: &str) -> anyhow::Result<Value> {
    let doc = Document::parse(text).context("Failed to parse XML response")?;
    let root = doc.root_element();

    let mut map = Map::new();
    for child in root.children().filter(|n| n.is_element()) {
        insert_child(&mut map, child.tag_name().name(), element_to_value(child));
    }
    Ok(Value::Object(map))
}

fn element_to_value(element: Node) -> Value {
    let children: Vec<Node> = element.children().filter(|n| n.is_element()).collect();
    let attributes: Vec<(String, String)> = element
        .attributes()
        .filter(|attr| attr.namespace().is_none())
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect();

    if children.is_empty() {
        let text: String = element
            .children()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();
        let text = text.trim().to_string();

        if attributes.is_empty() {
            return Value::String(text);
        }

        let mut map = Map::new();
        for (name, value) in attributes {
            map.insert(name, Value::String(value));
        }
        // Translations keep their value key even when empty, as in JSON output
        if !text.is_empty() || element.tag_name().name() == super::constants::XML_LANGUAGE {
            map.insert("value".to_string(), Value::String(text));
        }
        return Value::Object(map);
    }

    if is_collection(element, &children) {
        return Value::Array(children.into_iter().map(element_to_value).collect());
    }

    let mut map = Map::new();
    for (name, value) in attributes {
        map.insert(name, Value::String(value));
    }
    for child in children {
        insert_child(&mut map, child.tag_name().name(), element_to_value(child));
    }
    Value::Object(map)
}

/// Repeated keys turn into arrays instead of overwriting each other
fn insert_child(map: &mut Map<String, Value>, name: &str, value: Value) {
    match map.get_mut(name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name.to_string(), value);
        }
    }
}

fn is_collection(parent: Node, children: &[Node]) -> bool {
    let first = children[0].tag_name().name();
    if !children.iter().all(|child| child.tag_name().name() == first) {
        return false;
    }
    children.len() > 1 || first == super::constants::XML_LANGUAGE || is_plural_of(parent.tag_name().name(), first)
}

fn is_plural_of(plural: &str, singular: &str) -> bool {
    if plural == format!("{}s", singular) || plural == format!("{}es", singular) {
        return true;
    }
    singular
        .strip_suffix('y')
        .is_some_and(|stem| plural == format!("{}ies", stem))
}

/// First `errors[].message` of a failed response, JSON or XML
pub fn remote_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    let value = if trimmed.starts_with('<') {
        decode_xml(trimmed).ok()?
    } else {
        serde_json::from_str::<Value>(trimmed).ok()?
    };

    let errors = value.get("errors")?;
    let first = match errors {
        Value::Array(items) => items.first()?,
        Value::Object(map) => map.get("error").map(|e| match e {
            Value::Array(items) => items.first().unwrap_or(e),
            other => other,
        })?,
        _ => return None,
    };

    match first.get("message")? {
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
