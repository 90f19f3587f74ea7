//! Binary property map codec.
//!
//! A record is a CBOR map from property name to a byte string holding the
//! independently encoded value. Keys nobody asks for are ignored and absent
//! keys read as zero values, so producers and consumers may disagree on the
//! property set.
//!
//! Item valued blobs describe their own shape:
//!
//! | CBOR                      | Item             |
//! |---------------------------|------------------|
//! | text string               | bare reference   |
//! | map of text to bytes      | record           |
//! | array of byte strings     | item collection  |
//! | array of text strings     | references       |
//!
//! An item with nothing to write encodes to an empty byte string, which
//! decodes back to `None`.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use jiff::{SignedDuration, Timestamp};
use minicbor::{Decode, Decoder, Encoder};
use tracing::{debug, trace};

use super::{Properties, PropertyReader, PropertyWriter, read_record_item, write_item_properties};
use crate::duration::{decode_duration, encode_duration};
use crate::error::{DecodeError, EncodeError, Result};
use crate::iri::Iri;
use crate::item::Item;
use crate::item_collection::ItemCollection;
use crate::natural_language::NaturalLanguageValues;
use crate::types::ActivityVocabularyTypes;

const ROOT: &str = "(document)";

/// Nesting limit for item blobs.
const MAX_DEPTH: u8 = 128;

pub fn encode_binary(item: &Item) -> Result<Vec<u8>, EncodeError> {
    item_blob(item)
}

/// Reads an item blob. An empty input yields `None`.
pub fn decode_binary(bytes: &[u8]) -> Result<Option<Item>> {
    match decode_item_blob(ROOT, bytes, 0) {
        Err(DecodeError::UnknownItemShape { property }) if property == ROOT => Err(
            DecodeError::Syntax("input is not a binary item".to_string()),
        ),
        result => result,
    }
}

fn item_blob(item: &Item) -> Result<Vec<u8>, EncodeError> {
    match item {
        Item::Iri(iri) if iri.is_empty() => Ok(vec![]),
        Item::Iri(iri) => Ok(minicbor::to_vec(iri.as_str())?),
        Item::ItemCollection(items) => items_blob(items),
        record => {
            let mut map = PropertyMap::default();
            write_item_properties(record, &mut map)?;
            map.into_bytes()
        }
    }
}

/// Collections of bare references use the compact text array.
fn items_blob(items: &ItemCollection) -> Result<Vec<u8>, EncodeError> {
    let mut e = Encoder::new(Vec::new());
    if items.iter().all(|it| matches!(it, Item::Iri(_))) {
        let iris: Vec<&str> = items
            .iter()
            .map(|it| it.id().as_str())
            .filter(|iri| !iri.is_empty())
            .collect();
        e.array(iris.len() as u64)?;
        for iri in iris {
            e.str(iri)?;
        }
    } else {
        let mut blobs = Vec::with_capacity(items.len());
        for item in items {
            let blob = item_blob(item)?;
            if !blob.is_empty() {
                blobs.push(blob);
            }
        }
        e.array(blobs.len() as u64)?;
        for blob in &blobs {
            e.bytes(blob)?;
        }
    }
    Ok(e.into_writer())
}

#[derive(Default)]
struct PropertyMap {
    entries: Vec<(&'static str, Vec<u8>)>,
}

impl PropertyMap {
    fn put(&mut self, name: &'static str, blob: Vec<u8>) -> Result<bool, EncodeError> {
        if blob.is_empty() {
            return Ok(false);
        }
        self.entries.push((name, blob));
        Ok(true)
    }

    fn put_value<T: minicbor::Encode<()>>(
        &mut self,
        name: &'static str,
        value: T,
    ) -> Result<bool, EncodeError> {
        self.put(name, minicbor::to_vec(value)?)
    }

    fn into_bytes(self) -> Result<Vec<u8>, EncodeError> {
        if self.entries.is_empty() {
            return Ok(vec![]);
        }
        let mut e = Encoder::new(Vec::new());
        e.map(self.entries.len() as u64)?;
        for (name, blob) in &self.entries {
            e.str(name)?.bytes(blob)?;
        }
        Ok(e.into_writer())
    }
}

impl PropertyWriter for PropertyMap {
    fn write_str(&mut self, name: &'static str, value: &str) -> Result<bool, EncodeError> {
        if value.is_empty() {
            return Ok(false);
        }
        self.put_value(name, value)
    }

    fn write_types(
        &mut self,
        name: &'static str,
        value: &ActivityVocabularyTypes,
    ) -> Result<bool, EncodeError> {
        if value.is_empty() {
            return Ok(false);
        }
        self.put_value(name, value)
    }

    fn write_natural_language(
        &mut self,
        name: &'static str,
        value: &NaturalLanguageValues,
    ) -> Result<bool, EncodeError> {
        if value.is_empty() {
            return Ok(false);
        }
        self.put_value(name, value)
    }

    fn write_count(&mut self, name: &'static str, value: u64) -> Result<bool, EncodeError> {
        self.put_value(name, value)
    }

    fn write_i64(&mut self, name: &'static str, value: i64) -> Result<bool, EncodeError> {
        if value == 0 {
            return Ok(false);
        }
        self.put_value(name, value)
    }

    fn write_f64(&mut self, name: &'static str, value: f64) -> Result<bool, EncodeError> {
        if value == 0.0 {
            return Ok(false);
        }
        self.put_value(name, value)
    }

    fn write_bool(&mut self, name: &'static str, value: bool) -> Result<bool, EncodeError> {
        if !value {
            return Ok(false);
        }
        self.put_value(name, value)
    }

    fn write_time(
        &mut self,
        name: &'static str,
        value: Option<Timestamp>,
    ) -> Result<bool, EncodeError> {
        match value {
            Some(time) => self.put_value(name, time.to_string().as_str()),
            None => Ok(false),
        }
    }

    fn write_duration(
        &mut self,
        name: &'static str,
        value: SignedDuration,
    ) -> Result<bool, EncodeError> {
        if value.is_zero() {
            return Ok(false);
        }
        self.put_value(name, encode_duration(value).as_str())
    }

    fn write_item(
        &mut self,
        name: &'static str,
        value: Option<&Item>,
    ) -> Result<bool, EncodeError> {
        match value {
            Some(item) => self.put(name, item_blob(item)?),
            None => Ok(false),
        }
    }

    fn write_items(
        &mut self,
        name: &'static str,
        value: &ItemCollection,
    ) -> Result<bool, EncodeError> {
        if value.is_empty() {
            return Ok(false);
        }
        self.put(name, items_blob(value)?)
    }

    fn write_record<P: Properties>(
        &mut self,
        name: &'static str,
        value: &P,
    ) -> Result<bool, EncodeError> {
        let mut map = PropertyMap::default();
        value.write_properties(&mut map)?;
        self.put(name, map.into_bytes()?)
    }
}

type Strategy = fn(&str, &[u8], u8) -> Option<Result<Item>>;

/// Tried in order. A strategy returns `None` when the blob is not its
/// shape; once a shape matches, its result is final.
static STRATEGIES: [Strategy; 4] = [iri_blob, record_blob, collection_blob, iris_blob];

fn decode_item_blob(property: &str, blob: &[u8], depth: u8) -> Result<Option<Item>> {
    if blob.is_empty() {
        return Ok(None);
    }
    if depth >= MAX_DEPTH {
        return Err(DecodeError::Syntax(format!(
            "property {property} is nested too deep"
        )));
    }
    for strategy in &STRATEGIES {
        if let Some(result) = strategy(property, blob, depth) {
            return result.map(Some);
        }
    }
    Err(DecodeError::unknown_shape(property))
}

fn iri_blob(_property: &str, blob: &[u8], _depth: u8) -> Option<Result<Item>> {
    let mut d = Decoder::new(blob);
    let iri = d.str().ok()?;
    (d.position() == blob.len()).then(|| Ok(Item::Iri(iri.into())))
}

fn record_blob(_property: &str, blob: &[u8], depth: u8) -> Option<Result<Item>> {
    let map = property_map(blob).ok()?;
    let props = BinaryProperties::new(map, depth + 1);
    let result = read_record_item(&props);
    props.trace_unknown();
    Some(result)
}

fn collection_blob(property: &str, blob: &[u8], depth: u8) -> Option<Result<Item>> {
    let mut d = Decoder::new(blob);
    let len = d.array().ok()??;
    let mut blobs = Vec::new();
    for _ in 0..len {
        blobs.push(d.bytes().ok()?);
    }
    if d.position() != blob.len() {
        return None;
    }
    let items = blobs
        .into_iter()
        .map(|blob| decode_item_blob(property, blob, depth + 1))
        .collect::<Result<Vec<_>>>();
    Some(items.map(|items| Item::ItemCollection(items.into_iter().flatten().collect())))
}

fn iris_blob(_property: &str, blob: &[u8], _depth: u8) -> Option<Result<Item>> {
    let mut d = Decoder::new(blob);
    let len = d.array().ok()??;
    let mut iris = Vec::new();
    for _ in 0..len {
        iris.push(Item::Iri(Iri::from(d.str().ok()?)));
    }
    if d.position() != blob.len() {
        return None;
    }
    Some(Ok(Item::ItemCollection(iris.into())))
}

fn property_map(blob: &[u8]) -> Result<BTreeMap<&str, &[u8]>, minicbor::decode::Error> {
    let mut d = Decoder::new(blob);
    let len = d
        .map()?
        .ok_or_else(|| minicbor::decode::Error::message("expected definite map"))?;
    let mut map = BTreeMap::new();
    for _ in 0..len {
        let name = d.str()?;
        let value = d.bytes()?;
        map.insert(name, value);
    }
    if d.position() != blob.len() {
        return Err(minicbor::decode::Error::message("trailing bytes after map"));
    }
    Ok(map)
}

struct BinaryProperties<'a> {
    map: BTreeMap<&'a str, &'a [u8]>,
    depth: u8,
    read: RefCell<BTreeSet<&'static str>>,
}

impl<'a> BinaryProperties<'a> {
    fn new(map: BTreeMap<&'a str, &'a [u8]>, depth: u8) -> BinaryProperties<'a> {
        BinaryProperties {
            map,
            depth,
            read: RefCell::new(BTreeSet::new()),
        }
    }

    fn blob(&self, name: &'static str) -> Option<&'a [u8]> {
        self.read.borrow_mut().insert(name);
        self.map.get(name).copied()
    }

    fn value<T: Decode<'a, ()>>(&self, name: &'static str) -> Result<Option<T>> {
        match self.blob(name) {
            Some(blob) => Ok(Some(minicbor::decode(blob)?)),
            None => Ok(None),
        }
    }

    fn text(&self, name: &'static str) -> Result<Option<&'a str>> {
        self.value::<&'a str>(name)
    }

    fn trace_unknown(&self) {
        let read = self.read.borrow();
        for property in self.map.keys().filter(|key| !read.contains(**key)) {
            trace!(target: "vocab::binary", property = *property, "ignoring unknown property");
        }
    }
}

impl PropertyReader for BinaryProperties<'_> {
    fn read_str(&self, name: &'static str) -> Result<String> {
        Ok(self.text(name)?.map(str::to_owned).unwrap_or_default())
    }

    fn read_types(&self, name: &'static str) -> Result<ActivityVocabularyTypes> {
        Ok(self.value(name)?.unwrap_or_default())
    }

    fn read_natural_language(&self, name: &'static str) -> Result<NaturalLanguageValues> {
        Ok(self.value(name)?.unwrap_or_default())
    }

    fn read_u64(&self, name: &'static str) -> Result<u64> {
        Ok(self.value(name)?.unwrap_or_default())
    }

    fn read_i64(&self, name: &'static str) -> Result<i64> {
        Ok(self.value(name)?.unwrap_or_default())
    }

    fn read_f64(&self, name: &'static str) -> Result<f64> {
        Ok(self.value(name)?.unwrap_or_default())
    }

    fn read_bool(&self, name: &'static str) -> Result<bool> {
        Ok(self.value(name)?.unwrap_or_default())
    }

    fn read_time(&self, name: &'static str) -> Result<Option<Timestamp>> {
        let Some(text) = self.text(name)? else {
            return Ok(None);
        };
        match text.parse::<Timestamp>() {
            Ok(time) => Ok(Some(time)),
            Err(error) => {
                debug!(target: "vocab::binary", property = name, %error, "ignoring timestamp");
                Ok(None)
            }
        }
    }

    fn read_duration(&self, name: &'static str) -> Result<SignedDuration> {
        let Some(text) = self.text(name)? else {
            return Ok(SignedDuration::ZERO);
        };
        match decode_duration(text) {
            Ok(duration) => Ok(duration),
            Err(error) => {
                debug!(target: "vocab::binary", property = name, %error, "ignoring duration");
                Ok(SignedDuration::ZERO)
            }
        }
    }

    fn read_item(&self, name: &'static str) -> Result<Option<Item>> {
        match self.blob(name) {
            Some(blob) => decode_item_blob(name, blob, self.depth),
            None => Ok(None),
        }
    }

    fn read_items(&self, name: &'static str) -> Result<ItemCollection> {
        Ok(match self.read_item(name)? {
            Some(Item::ItemCollection(items)) => items,
            Some(item) => [item].into_iter().collect(),
            None => ItemCollection::new(),
        })
    }

    fn read_record<P: Properties>(&self, name: &'static str) -> Result<P> {
        let mut record = P::default();
        if let Some(blob) = self.blob(name).filter(|blob| !blob.is_empty()) {
            let props = BinaryProperties::new(property_map(blob)?, self.depth + 1);
            record.read_properties(&props)?;
            props.trace_unknown();
        }
        Ok(record)
    }
}
