//! Typed payload values and the wire normalization pass

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use serde_json::{Map, Number, Value};

use super::multilang::TranslatableField;

/// `YYYY-MM-DDTHH:MM:SS` as produced by host date pickers
static ISO_DATETIME: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$").expect("datetime pattern is valid")
});

/// Datetime layout the webservice accepts
pub const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Text(String),
    Number(Number),
    Bool(bool),
    DateTime(NaiveDateTime),
    Translatable(TranslatableField),
    /// Template sub-objects (e.g. `associations`) carried through untouched
    Nested(EntityPayload),
    List(Vec<PayloadValue>),
}

impl PayloadValue {
    /// Convert a template or caller JSON value.
    ///
    /// Arrays of `{id, value}` objects are the JSON rendering of a
    /// multi-language field and come back as `Translatable`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => PayloadValue::Text(String::new()),
            Value::Bool(flag) => PayloadValue::Bool(flag),
            Value::Number(number) => PayloadValue::Number(number),
            Value::String(text) => PayloadValue::Text(text),
            Value::Array(items) => match TranslatableField::from_json_items(&items) {
                Some(field) => PayloadValue::Translatable(field),
                None => PayloadValue::List(items.into_iter().map(PayloadValue::from_json).collect()),
            },
            Value::Object(map) => PayloadValue::Nested(EntityPayload::from_json_map(map)),
        }
    }

    /// Text content for scalar values, `None` for structured ones
    pub fn as_text(&self) -> Option<String> {
        match self {
            PayloadValue::Text(text) => Some(text.clone()),
            PayloadValue::Number(number) => Some(number.to_string()),
            PayloadValue::Bool(flag) => Some(if *flag { "1" } else { "0" }.to_string()),
            PayloadValue::DateTime(datetime) => Some(datetime.format(WIRE_DATETIME_FORMAT).to_string()),
            _ => None,
        }
    }

    /// Empty strings, empty translation lists and empty containers
    pub fn is_blank(&self) -> bool {
        match self {
            PayloadValue::Text(text) => text.is_empty(),
            PayloadValue::Translatable(field) => field.is_empty(),
            PayloadValue::Nested(payload) => payload.is_empty(),
            PayloadValue::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Apply the wire encoding: booleans become `"1"`/`"0"` and ISO
    /// datetimes lose their `T`. Applying it twice changes nothing.
    pub fn normalize(self) -> Self {
        match self {
            PayloadValue::Bool(flag) => PayloadValue::Text(if flag { "1" } else { "0" }.to_string()),
            PayloadValue::Text(text) if ISO_DATETIME.is_match(&text) => PayloadValue::Text(text.replacen('T', " ", 1)),
            PayloadValue::Nested(payload) => PayloadValue::Nested(payload.normalize()),
            PayloadValue::List(items) => PayloadValue::List(items.into_iter().map(PayloadValue::normalize).collect()),
            other => other,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            PayloadValue::Text(text) => Value::String(text.clone()),
            PayloadValue::Number(number) => Value::Number(number.clone()),
            PayloadValue::Bool(flag) => Value::Bool(*flag),
            PayloadValue::DateTime(datetime) => Value::String(datetime.format(WIRE_DATETIME_FORMAT).to_string()),
            PayloadValue::Translatable(field) => serde_json::to_value(field).unwrap_or(Value::Null),
            PayloadValue::Nested(payload) => payload.to_json(),
            PayloadValue::List(items) => Value::Array(items.iter().map(PayloadValue::to_json).collect()),
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        PayloadValue::Bool(value)
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        PayloadValue::Number(value.into())
    }
}

impl From<u64> for PayloadValue {
    fn from(value: u64) -> Self {
        PayloadValue::Number(value.into())
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(number) => PayloadValue::Number(number),
            None => PayloadValue::Text(value.to_string()),
        }
    }
}

impl From<NaiveDateTime> for PayloadValue {
    fn from(value: NaiveDateTime) -> Self {
        PayloadValue::DateTime(value)
    }
}

impl From<TranslatableField> for PayloadValue {
    fn from(value: TranslatableField) -> Self {
        PayloadValue::Translatable(value)
    }
}

impl From<Value> for PayloadValue {
    fn from(value: Value) -> Self {
        PayloadValue::from_json(value)
    }
}

/// Attribute name to value, kept in insertion order so the XML body lists
/// fields the way the template did
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityPayload {
    entries: Vec<(String, PayloadValue)>,
}

impl EntityPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update seed: nothing but the record identifier
    pub fn with_id(id: impl Into<PayloadValue>) -> Self {
        let mut payload = Self::new();
        payload.insert("id", id);
        payload
    }

    /// Build from a JSON object; anything else yields an empty payload
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_json_map(map),
            _ => Self::new(),
        }
    }

    pub fn from_json_map(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| (key, PayloadValue::from_json(value)))
                .collect(),
        }
    }

    /// Set `key`, replacing an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PayloadValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Set `key` only when a non-blank value is supplied
    pub fn insert_present(&mut self, key: impl Into<String>, value: Option<impl Into<PayloadValue>>) {
        if let Some(value) = value {
            let value = value.into();
            if !value.is_blank() {
                self.insert(key, value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
    }

    pub fn remove(&mut self, key: &str) -> Option<PayloadValue> {
        let position = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(position).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flat merge where `other` wins on shared keys
    pub fn merge(&mut self, other: EntityPayload) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn normalize(self) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .map(|(key, value)| (key, value.normalize()))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl IntoIterator for EntityPayload {
    type Item = (String, PayloadValue);
    type IntoIter = std::vec::IntoIter<(String, PayloadValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<PayloadValue>> FromIterator<(K, V)> for EntityPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = EntityPayload::new();
        for (key, value) in iter {
            payload.insert(key, value);
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_normalize_booleans() {
        assert_eq!(PayloadValue::Bool(true).normalize(), PayloadValue::from("1"));
        assert_eq!(PayloadValue::Bool(false).normalize(), PayloadValue::from("0"));
    }

    #[test]
    fn test_normalize_datetimes() {
        assert_eq!(
            PayloadValue::from("2024-05-01T10:00:00").normalize(),
            PayloadValue::from("2024-05-01 10:00:00")
        );
        assert_eq!(
            PayloadValue::from("2024-05-01 10:00:00").normalize(),
            PayloadValue::from("2024-05-01 10:00:00")
        );
        // Only the exact pattern is rewritten
        assert_eq!(
            PayloadValue::from("2024-05-01T10:00:00Z").normalize(),
            PayloadValue::from("2024-05-01T10:00:00Z")
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let payload: EntityPayload = vec![
            ("active", PayloadValue::Bool(true)),
            ("birthday", PayloadValue::from("1990-02-03T00:00:00")),
            ("price", PayloadValue::from(12.5)),
            ("note", PayloadValue::from("T-shirt")),
            ("nested", PayloadValue::from(json!({"newsletter": false}))),
        ]
        .into_iter()
        .collect();

        let once = payload.normalize();
        let twice = once.clone().normalize();
        assert_eq!(once, twice);
        assert_eq!(once.get("active"), Some(&PayloadValue::from("1")));
        assert_eq!(once.get("birthday"), Some(&PayloadValue::from("1990-02-03 00:00:00")));
    }

    #[test]
    fn test_datetime_renders_with_space() {
        let datetime = NaiveDate::from_ymd_opt(2025, 1, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        assert_eq!(
            PayloadValue::DateTime(datetime).as_text(),
            Some("2025-01-31 23:59:00".to_string())
        );
    }

    #[test]
    fn test_from_json_detects_translations() {
        let value = PayloadValue::from_json(json!([{"id": "1", "value": "Shoe"}]));
        assert!(matches!(value, PayloadValue::Translatable(_)));

        let associations = PayloadValue::from_json(json!([{"id": "2"}]));
        assert!(matches!(associations, PayloadValue::List(_)));
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut payload = EntityPayload::from_json(json!({"id": "", "email": "", "lastname": ""}));
        payload.insert("email", "a@b.com");
        payload.insert("firstname", "Ada");

        let keys: Vec<&str> = payload.keys().collect();
        assert_eq!(keys, vec!["id", "email", "lastname", "firstname"]);
    }

    #[test]
    fn test_insert_present_skips_blank() {
        let mut payload = EntityPayload::with_id("4");
        payload.insert_present("passwd", Some(""));
        payload.insert_present("email", None::<String>);
        payload.insert_present("lastname", Some("Lovelace"));

        assert_eq!(payload.len(), 2);
        assert!(!payload.contains_key("passwd"));
    }
}
