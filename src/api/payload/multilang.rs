//! Multi-language fields
//!
//! A translatable attribute is written as one `<language id="..">` child per
//! translation, in the order the caller listed them.

use anyhow::Context;
use quick_xml::Writer;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::xml::{TextEncoding, write_translatable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(rename = "id", alias = "idLang", alias = "language_id", deserialize_with = "string_or_number")]
    pub language_id: String,
    #[serde(alias = "valueLang", default)]
    pub value: String,
}

impl Translation {
    pub fn new(language_id: impl ToString, value: impl Into<String>) -> Self {
        Self {
            language_id: language_id.to_string(),
            value: value.into(),
        }
    }
}

/// Ids arrive as `"1"` from option lists and as `1` from typed input
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "id must be a string or number, got {}",
            other
        ))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TranslationList {
    Wrapped { translations: Vec<Translation> },
    Bare(Vec<Translation>),
}

impl From<TranslationList> for TranslatableField {
    fn from(list: TranslationList) -> Self {
        match list {
            TranslationList::Wrapped { translations } | TranslationList::Bare(translations) => Self(translations),
        }
    }
}

/// Ordered translations of one attribute.
///
/// Accepts either a bare list or `{"translations": [...]}` on input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "TranslationList")]
pub struct TranslatableField(Vec<Translation>);

impl TranslatableField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, language_id: impl ToString, value: impl Into<String>) -> Self {
        self.0.push(Translation::new(language_id, value));
        self
    }

    pub fn push(&mut self, translation: Translation) {
        self.0.push(translation);
    }

    pub fn translations(&self) -> &[Translation] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Translation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recognise the JSON rendering the webservice uses for language fields:
    /// a non-empty array whose items are all `{id, value}` objects.
    pub(crate) fn from_json_items(items: &[Value]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let all_translations = items.iter().all(|item| {
            item.as_object()
                .is_some_and(|object| object.len() == 2 && object.contains_key("id") && object.contains_key("value"))
        });
        if !all_translations {
            return None;
        }
        serde_json::from_value::<Vec<Translation>>(Value::Array(items.to_vec()))
            .ok()
            .map(Self)
    }
}

impl From<Vec<Translation>> for TranslatableField {
    fn from(translations: Vec<Translation>) -> Self {
        Self(translations)
    }
}

impl<'a> IntoIterator for &'a TranslatableField {
    type Item = &'a Translation;
    type IntoIter = std::slice::Iter<'a, Translation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Render `<tag><language id="..">..</language>...</tag>` as a standalone fragment
pub fn build_multilang_fragment(tag: &str, field: &TranslatableField) -> anyhow::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_translatable(&mut writer, tag, field, TextEncoding::Escaped)?;
    String::from_utf8(writer.into_inner()).context("Multi-language fragment is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fragment_preserves_order() {
        let field = TranslatableField::new().with(1, "Shoe").with(2, "Chaussure");
        let fragment = build_multilang_fragment("name", &field).unwrap();

        assert_eq!(
            fragment,
            "<name>\n  <language id=\"1\">Shoe</language>\n  <language id=\"2\">Chaussure</language>\n</name>"
        );
    }

    #[test]
    fn test_fragment_escapes_values() {
        let field = TranslatableField::new().with("1", "Salt & <Pepper>");
        let fragment = build_multilang_fragment("description_short", &field).unwrap();

        assert!(fragment.contains("<language id=\"1\">Salt &amp; &lt;Pepper&gt;</language>"));
    }

    #[test]
    fn test_deserialize_aliases() {
        let field: TranslatableField = serde_json::from_value(json!({
            "translations": [
                {"idLang": "1", "valueLang": "Shoe"},
                {"id": 2, "value": "Zapato"}
            ]
        }))
        .unwrap();

        assert_eq!(field.translations()[0], Translation::new("1", "Shoe"));
        assert_eq!(field.translations()[1], Translation::new("2", "Zapato"));

        let bare: TranslatableField = serde_json::from_value(json!([{"id": "3", "value": "Schuh"}])).unwrap();
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn test_rejects_invalid_language_id() {
        let result = serde_json::from_value::<Translation>(json!({"id": true, "value": "x"}));
        assert!(result.is_err());
    }
}
