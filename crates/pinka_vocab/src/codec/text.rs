//! JSON text codec.
//!
//! Decoding parses into a [`serde_json::Value`] tree and walks it with total
//! property extractors. Encoding streams straight into a byte buffer.

use jiff::{SignedDuration, Timestamp};
use serde_json::{Map, Number, Value};
use tracing::debug;

use super::{Properties, PropertyReader, PropertyWriter, read_record_item, write_item_properties};
use crate::duration::{decode_duration, encode_duration};
use crate::error::{DecodeError, EncodeError, Result};
use crate::item::Item;
use crate::item_collection::ItemCollection;
use crate::natural_language::NaturalLanguageValues;
use crate::types::{ActivityVocabularyType, ActivityVocabularyTypes};

/// JSON-LD context of the vocabulary.
pub const ACTIVITY_STREAMS_CONTEXT: &str = "https://www.w3.org/ns/activitystreams";

const ROOT: &str = "(document)";

/// Reads a document. `{}` and `null` mean "no data" and yield `None`.
pub fn decode_text(bytes: &[u8]) -> Result<Option<Item>> {
    let value: Value = serde_json::from_slice(bytes)?;
    match decode_value(ROOT, &value) {
        Err(DecodeError::UnknownItemShape { property }) if property == ROOT => Err(
            DecodeError::Syntax("document is not an item".to_string()),
        ),
        result => result,
    }
}

/// Writes an item without a JSON-LD context. Nothing to write yields
/// `null`.
pub fn encode_text(item: &Item) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(256);
    if !write_item_value(&mut buf, item)? {
        buf.clear();
        buf.extend_from_slice(b"null");
    }
    Ok(buf)
}

/// Writes a top level document, leading with `@context` when the item is a
/// record.
pub fn encode_text_document(item: &Item) -> Result<Vec<u8>, EncodeError> {
    if matches!(item, Item::Iri(_) | Item::ItemCollection(_)) {
        return encode_text(item);
    }
    let mut buf = Vec::with_capacity(256);
    let mut w = JsonWriter::open(&mut buf);
    w.prop("@context", |buf| {
        write_json_string(buf, ACTIVITY_STREAMS_CONTEXT);
        Ok(true)
    })?;
    write_item_properties(item, &mut w)?;
    w.close();
    Ok(buf)
}

fn decode_value(property: &str, value: &Value) -> Result<Option<Item>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(Item::Iri(s.as_str().into()))),
        Value::Array(values) => decode_array(property, values).map(|items| Some(items.into())),
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Object(map) => read_record_item(&JsonProperties { map }).map(Some),
        Value::Bool(_) | Value::Number(_) => Err(DecodeError::unknown_shape(property)),
    }
}

/// Each element is decoded on its own; `null` and `{}` elements are dropped.
fn decode_array(property: &str, values: &[Value]) -> Result<ItemCollection> {
    let mut items = Vec::with_capacity(values.len());
    for value in values {
        if let Some(item) = decode_value(property, value)? {
            items.push(item);
        }
    }
    Ok(items.into())
}

struct JsonProperties<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> JsonProperties<'a> {
    fn get(&self, name: &str) -> Option<&'a Value> {
        let value = match name {
            "id" => self.map.get("id").or_else(|| self.map.get("@id")),
            "type" => self.map.get("type").or_else(|| self.map.get("@type")),
            _ => self.map.get(name),
        };
        value.filter(|v| !v.is_null())
    }
}

impl PropertyReader for JsonProperties<'_> {
    fn read_str(&self, name: &'static str) -> Result<String> {
        Ok(match self.get(name) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        })
    }

    fn read_types(&self, name: &'static str) -> Result<ActivityVocabularyTypes> {
        Ok(match self.get(name) {
            Some(Value::String(tag)) => ActivityVocabularyType::new(tag).into(),
            Some(Value::Array(tags)) => tags
                .iter()
                .filter_map(Value::as_str)
                .map(ActivityVocabularyType::new)
                .collect(),
            _ => ActivityVocabularyTypes::default(),
        })
    }

    /// Merges the `<name>Map` companion too. When the companion map repeats
    /// the bare value, only the tagged entries are kept.
    fn read_natural_language(&self, name: &'static str) -> Result<NaturalLanguageValues> {
        let mut values = NaturalLanguageValues::new();
        if let Some(value) = self.get(name) {
            values.merge_json(value);
        }
        let mut tagged = NaturalLanguageValues::new();
        if let Some(value) = self.map.get(&format!("{name}Map")) {
            tagged.merge_json(value);
        }
        if tagged.is_empty() {
            return Ok(values);
        }
        let repeated = values.is_single_plain()
            && values
                .first()
                .is_some_and(|plain| tagged.iter().any(|it| it.value == plain.value));
        if values.is_empty() || repeated {
            return Ok(tagged);
        }
        for it in tagged.iter() {
            values.set(it.lang.clone(), it.value.as_str());
        }
        Ok(values)
    }

    fn read_u64(&self, name: &'static str) -> Result<u64> {
        Ok(self.get(name).and_then(Value::as_u64).unwrap_or_default())
    }

    fn read_i64(&self, name: &'static str) -> Result<i64> {
        Ok(self.get(name).and_then(Value::as_i64).unwrap_or_default())
    }

    fn read_f64(&self, name: &'static str) -> Result<f64> {
        Ok(self.get(name).and_then(Value::as_f64).unwrap_or_default())
    }

    fn read_bool(&self, name: &'static str) -> Result<bool> {
        Ok(self.get(name).and_then(Value::as_bool).unwrap_or_default())
    }

    fn read_time(&self, name: &'static str) -> Result<Option<Timestamp>> {
        let Some(text) = self.get(name).and_then(Value::as_str) else {
            return Ok(None);
        };
        match text.parse::<Timestamp>() {
            Ok(time) => Ok(Some(time)),
            Err(error) => {
                debug!(target: "vocab::text", property = name, %error, "ignoring timestamp");
                Ok(None)
            }
        }
    }

    fn read_duration(&self, name: &'static str) -> Result<SignedDuration> {
        let Some(text) = self.get(name).and_then(Value::as_str) else {
            return Ok(SignedDuration::ZERO);
        };
        match decode_duration(text) {
            Ok(duration) => Ok(duration),
            Err(error) => {
                debug!(target: "vocab::text", property = name, %error, "ignoring duration");
                Ok(SignedDuration::ZERO)
            }
        }
    }

    fn read_item(&self, name: &'static str) -> Result<Option<Item>> {
        match self.get(name) {
            Some(value) => decode_value(name, value),
            None => Ok(None),
        }
    }

    /// A single value is wrapped into a one element collection.
    fn read_items(&self, name: &'static str) -> Result<ItemCollection> {
        match self.get(name) {
            Some(Value::Array(values)) => decode_array(name, values),
            Some(value) => Ok(decode_value(name, value)?.into_iter().collect()),
            None => Ok(ItemCollection::new()),
        }
    }

    fn read_record<P: Properties>(&self, name: &'static str) -> Result<P> {
        let mut record = P::default();
        if let Some(Value::Object(map)) = self.get(name) {
            record.read_properties(&JsonProperties { map })?;
        }
        Ok(record)
    }
}

/// Writes the members of one JSON object. Keeps track of whether a member
/// was written so separators land only between members.
struct JsonWriter<'a> {
    buf: &'a mut Vec<u8>,
    written: bool,
}

impl<'a> JsonWriter<'a> {
    fn open(buf: &'a mut Vec<u8>) -> JsonWriter<'a> {
        buf.push(b'{');
        JsonWriter {
            buf,
            written: false,
        }
    }

    /// Returns whether any member was written.
    fn close(self) -> bool {
        self.buf.push(b'}');
        self.written
    }

    /// Writes `"name":value`. When `value` reports it wrote nothing, the key
    /// and separator are rolled back.
    fn prop(
        &mut self,
        name: &str,
        value: impl FnOnce(&mut Vec<u8>) -> Result<bool, EncodeError>,
    ) -> Result<bool, EncodeError> {
        let mark = self.buf.len();
        if self.written {
            self.buf.push(b',');
        }
        write_json_string(self.buf, name);
        self.buf.push(b':');
        if value(&mut *self.buf)? {
            self.written = true;
            Ok(true)
        } else {
            self.buf.truncate(mark);
            Ok(false)
        }
    }
}

impl PropertyWriter for JsonWriter<'_> {
    fn write_str(&mut self, name: &'static str, value: &str) -> Result<bool, EncodeError> {
        if value.is_empty() {
            return Ok(false);
        }
        self.prop(name, |buf| {
            write_json_string(buf, value);
            Ok(true)
        })
    }

    fn write_types(
        &mut self,
        name: &'static str,
        value: &ActivityVocabularyTypes,
    ) -> Result<bool, EncodeError> {
        self.prop(name, |buf| Ok(write_types_value(buf, value)))
    }

    fn write_natural_language(
        &mut self,
        name: &'static str,
        value: &NaturalLanguageValues,
    ) -> Result<bool, EncodeError> {
        self.prop(name, |buf| Ok(write_natural_language_value(buf, value)))
    }

    fn write_count(&mut self, name: &'static str, value: u64) -> Result<bool, EncodeError> {
        self.prop(name, |buf| {
            buf.extend_from_slice(value.to_string().as_bytes());
            Ok(true)
        })
    }

    fn write_i64(&mut self, name: &'static str, value: i64) -> Result<bool, EncodeError> {
        if value == 0 {
            return Ok(false);
        }
        self.prop(name, |buf| {
            buf.extend_from_slice(value.to_string().as_bytes());
            Ok(true)
        })
    }

    fn write_f64(&mut self, name: &'static str, value: f64) -> Result<bool, EncodeError> {
        if value == 0.0 {
            return Ok(false);
        }
        let number =
            Number::from_f64(value).ok_or(EncodeError::NonFiniteNumber { property: name })?;
        self.prop(name, |buf| {
            buf.extend_from_slice(number.to_string().as_bytes());
            Ok(true)
        })
    }

    fn write_bool(&mut self, name: &'static str, value: bool) -> Result<bool, EncodeError> {
        if !value {
            return Ok(false);
        }
        self.prop(name, |buf| {
            buf.extend_from_slice(b"true");
            Ok(true)
        })
    }

    fn write_time(
        &mut self,
        name: &'static str,
        value: Option<Timestamp>,
    ) -> Result<bool, EncodeError> {
        let Some(time) = value else {
            return Ok(false);
        };
        self.prop(name, |buf| {
            write_json_string(buf, &time.to_string());
            Ok(true)
        })
    }

    fn write_duration(
        &mut self,
        name: &'static str,
        value: SignedDuration,
    ) -> Result<bool, EncodeError> {
        if value.is_zero() {
            return Ok(false);
        }
        self.prop(name, |buf| {
            write_json_string(buf, &encode_duration(value));
            Ok(true)
        })
    }

    fn write_item(
        &mut self,
        name: &'static str,
        value: Option<&Item>,
    ) -> Result<bool, EncodeError> {
        let Some(item) = value else {
            return Ok(false);
        };
        self.prop(name, |buf| write_item_value(buf, item))
    }

    fn write_items(
        &mut self,
        name: &'static str,
        value: &ItemCollection,
    ) -> Result<bool, EncodeError> {
        self.prop(name, |buf| write_items_value(buf, value))
    }

    fn write_record<P: Properties>(
        &mut self,
        name: &'static str,
        value: &P,
    ) -> Result<bool, EncodeError> {
        self.prop(name, |buf| {
            let mut w = JsonWriter::open(buf);
            value.write_properties(&mut w)?;
            Ok(w.close())
        })
    }
}

fn write_item_value(buf: &mut Vec<u8>, item: &Item) -> Result<bool, EncodeError> {
    match item {
        Item::Iri(iri) if iri.is_empty() => Ok(false),
        Item::Iri(iri) => {
            write_json_string(buf, iri.as_str());
            Ok(true)
        }
        Item::ItemCollection(items) => write_items_value(buf, items),
        record => {
            let mut w = JsonWriter::open(buf);
            write_item_properties(record, &mut w)?;
            w.close();
            Ok(true)
        }
    }
}

fn write_items_value(buf: &mut Vec<u8>, items: &ItemCollection) -> Result<bool, EncodeError> {
    buf.push(b'[');
    let mut written = false;
    for item in items {
        let mark = buf.len();
        if written {
            buf.push(b',');
        }
        if write_item_value(buf, item)? {
            written = true;
        } else {
            buf.truncate(mark);
        }
    }
    buf.push(b']');
    Ok(written)
}

/// One tag as a string, several as an array.
fn write_types_value(buf: &mut Vec<u8>, types: &ActivityVocabularyTypes) -> bool {
    match types.len() {
        0 => false,
        1 => {
            write_json_string(buf, types.first().as_str());
            true
        }
        _ => {
            buf.push(b'[');
            for (idx, tag) in types.iter().enumerate() {
                if idx > 0 {
                    buf.push(b',');
                }
                write_json_string(buf, tag.as_str());
            }
            buf.push(b']');
            true
        }
    }
}

fn write_natural_language_value(buf: &mut Vec<u8>, values: &NaturalLanguageValues) -> bool {
    if values.is_empty() {
        return false;
    }
    if values.is_single_plain() {
        write_json_string(buf, &values.to_string());
        return true;
    }
    buf.push(b'{');
    for (idx, it) in values.distinct().enumerate() {
        if idx > 0 {
            buf.push(b',');
        }
        write_json_string(buf, it.lang.as_str());
        buf.push(b':');
        write_json_string(buf, &it.value);
    }
    buf.push(b'}');
    true
}

fn write_json_string(buf: &mut Vec<u8>, s: &str) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let bytes = s.as_bytes();
    buf.push(b'"');
    let mut start = 0;
    for (idx, &b) in bytes.iter().enumerate() {
        if !matches!(b, b'"' | b'\\' | 0x00..=0x1f) {
            continue;
        }
        buf.extend_from_slice(&bytes[start..idx]);
        match b {
            b'"' => buf.extend_from_slice(b"\\\""),
            b'\\' => buf.extend_from_slice(b"\\\\"),
            b'\n' => buf.extend_from_slice(b"\\n"),
            b'\r' => buf.extend_from_slice(b"\\r"),
            b'\t' => buf.extend_from_slice(b"\\t"),
            0x08 => buf.extend_from_slice(b"\\b"),
            0x0c => buf.extend_from_slice(b"\\f"),
            _ => buf.extend_from_slice(&[
                b'\\',
                b'u',
                b'0',
                b'0',
                HEX[(b >> 4) as usize],
                HEX[(b & 0xf) as usize],
            ]),
        }
        start = idx + 1;
    }
    buf.extend_from_slice(&bytes[start..]);
    buf.push(b'"');
}
