//! Query result handling
//!
//! Unwraps webservice collection and record responses into host items

use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub resource: String,
    pub records: Vec<Value>,
}

impl QueryResult {
    /// Extract the `<resource>` collection from a response.
    ///
    /// The webservice answers an empty search with a bare `[]` instead of an
    /// object, and a single XML child decodes to an object instead of an array.
    pub fn from_response(resource: &str, response: Value) -> anyhow::Result<Self> {
        let records = match response {
            Value::Array(items) if items.is_empty() => Vec::new(),
            Value::Object(mut map) => match map.remove(resource) {
                Some(Value::Array(items)) => items,
                Some(Value::Object(item)) => vec![Value::Object(item)],
                Some(Value::Null) | None => Vec::new(),
                Some(Value::String(text)) if text.is_empty() => Vec::new(),
                Some(other) => anyhow::bail!("Unexpected '{}' collection shape: {}", resource, other),
            },
            Value::Null => Vec::new(),
            other => anyhow::bail!("Unexpected response for '{}': {}", resource, other),
        };

        Ok(Self {
            resource: resource.to_string(),
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&Value> {
        self.records.first()
    }

    /// Highest numeric `id` among the records; ids arrive as numbers or strings
    pub fn max_id(&self) -> Option<u64> {
        self.records.iter().filter_map(|record| record.get("id").and_then(value_as_u64)).max()
    }

    pub fn into_records(self) -> Vec<Value> {
        self.records
    }
}

/// Unwrap a single-record response (`{"customer": {...}}`), falling back to
/// the whole response when the wrapper key is absent
pub fn single_record(response: Value, singular: &str) -> Value {
    match response {
        Value::Object(mut map) if map.contains_key(singular) => map.remove(singular).unwrap_or(Value::Null),
        other => other,
    }
}

/// Read an id that may be encoded as a JSON number or a numeric string
pub fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
