//! XML envelope for POST/PATCH bodies
//!
//! Documents look like
//! `<?xml version="1.0" encoding="UTF-8"?><prestashop><customer>...</customer></prestashop>`
//! with scalars as text content and translatable attributes as nested
//! `<language id="..">` elements.

use anyhow::Context;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

use super::kind::EntityKind;
use super::multilang::TranslatableField;
use super::value::{EntityPayload, PayloadValue};
use crate::api::constants::{XML_LANGUAGE, XML_ROOT};

/// How translation text is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Standard entity escaping
    Escaped,
    /// CDATA when the text contains markup characters, escaping otherwise
    CdataForMarkup,
}

/// Serialize a payload into a complete webservice document
pub fn serialize_payload(kind: EntityKind, payload: &EntityPayload) -> anyhow::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(XML_ROOT)))?;
    write_record(&mut writer, kind.element(), payload, kind.text_encoding())?;
    writer.write_event(Event::End(BytesEnd::new(XML_ROOT)))?;

    String::from_utf8(writer.into_inner()).with_context(|| format!("{} payload is not valid UTF-8", kind))
}

fn write_record<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    payload: &EntityPayload,
    encoding: TextEncoding,
) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    for (key, value) in payload.iter() {
        write_value(writer, key, value, encoding)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_value<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &PayloadValue,
    encoding: TextEncoding,
) -> anyhow::Result<()> {
    match value {
        PayloadValue::Translatable(field) => write_translatable(writer, tag, field, encoding),
        PayloadValue::Nested(payload) => write_record(writer, tag, payload, encoding),
        PayloadValue::List(items) => {
            let item_tag = singular_of(tag);
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for item in items {
                write_value(writer, &item_tag, item, encoding)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
            Ok(())
        }
        scalar => {
            let text = scalar.as_text().unwrap_or_default();
            write_text_element(writer, tag, &text, TextEncoding::Escaped)
        }
    }
}

pub(crate) fn write_translatable<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    field: &TranslatableField,
    encoding: TextEncoding,
) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    for translation in field {
        let start = BytesStart::new(XML_LANGUAGE).with_attributes([("id", translation.language_id.as_str())]);
        write_text_content(writer, start, &translation.value, encoding)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
    encoding: TextEncoding,
) -> anyhow::Result<()> {
    write_text_content(writer, BytesStart::new(tag), text, encoding)
}

fn write_text_content<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart,
    text: &str,
    encoding: TextEncoding,
) -> anyhow::Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    if encoding == TextEncoding::CdataForMarkup && has_markup(text) && !text.contains("]]>") {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    } else {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn has_markup(text: &str) -> bool {
    text.contains(['<', '>', '&'])
}

fn singular_of(tag: &str) -> String {
    if let Some(stem) = tag.strip_suffix("ies") {
        format!("{}y", stem)
    } else if let Some(stem) = tag.strip_suffix('s') {
        stem.to_string()
    } else {
        tag.to_string()
    }
}
