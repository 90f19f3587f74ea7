//! Language tagged strings and the other small string newtypes.

use std::fmt::Display;

use minicbor::{Decode, Encode};
use serde_json::{Map, Value};

/// Language tag used when a value carries no language information.
pub const NIL_LANG_REF: LangRef = LangRef::const_new("-");

/// A BCP47 language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LangRef(std::borrow::Cow<'static, str>);

impl LangRef {
    pub const fn const_new(tag: &'static str) -> LangRef {
        LangRef(std::borrow::Cow::Borrowed(tag))
    }
    pub fn new(tag: &str) -> LangRef {
        LangRef(std::borrow::Cow::Owned(tag.to_owned()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_nil(&self) -> bool {
        self.0.is_empty() || self.0 == NIL_LANG_REF.0
    }
}

impl Default for LangRef {
    fn default() -> Self {
        NIL_LANG_REF
    }
}

impl Display for LangRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for LangRef {
    fn from(value: &str) -> Self {
        LangRef::new(value)
    }
}

impl<C> Encode<C> for LangRef {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.str(&self.0)?;
        Ok(())
    }
}

impl<'b, C> Decode<'b, C> for LangRef {
    fn decode(
        d: &mut minicbor::Decoder<'b>,
        _ctx: &mut C,
    ) -> Result<Self, minicbor::decode::Error> {
        Ok(LangRef::new(d.str()?))
    }
}

/// A MIME media type such as `text/html`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MimeType(String);

impl MimeType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for MimeType {
    fn from(value: &str) -> Self {
        MimeType(value.to_owned())
    }
}

impl From<String> for MimeType {
    fn from(value: String) -> Self {
        MimeType(value)
    }
}

impl Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct LangRefValue {
    #[n(0)]
    pub lang: LangRef,
    #[n(1)]
    pub value: String,
}

/// Ordered `(language, text)` pairs.
///
/// A single untagged entry is written as a bare string, anything else as a
/// map keyed by language tag. Both wire shapes read back into this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaturalLanguageValues(Vec<LangRefValue>);

impl NaturalLanguageValues {
    pub fn new() -> NaturalLanguageValues {
        NaturalLanguageValues(vec![])
    }

    /// Value without a language tag.
    pub fn plain(value: impl Into<String>) -> NaturalLanguageValues {
        let mut values = NaturalLanguageValues::new();
        values.set(NIL_LANG_REF, value);
        values
    }

    /// Replace the value for `lang`, or add it when absent.
    pub fn set(&mut self, lang: LangRef, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|it| it.lang == lang) {
            Some(existing) => existing.value = value,
            None => self.0.push(LangRefValue { lang, value }),
        }
    }

    /// Add a value even if `lang` is already present. JSON language maps
    /// cannot repeat a key, so the text codec keeps only the first value per
    /// language, the one [`get`](Self::get) returns. The binary codec keeps
    /// them all.
    pub fn append(&mut self, lang: LangRef, value: impl Into<String>) {
        self.0.push(LangRefValue {
            lang,
            value: value.into(),
        });
    }

    pub fn get(&self, lang: &LangRef) -> Option<&str> {
        self.0
            .iter()
            .find(|it| &it.lang == lang)
            .map(|it| it.value.as_str())
    }

    pub fn first(&self) -> Option<&LangRefValue> {
        self.0.first()
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LangRefValue> {
        self.0.iter()
    }

    /// First value of every language, in insertion order.
    pub(crate) fn distinct(&self) -> impl Iterator<Item = &LangRefValue> {
        self.0
            .iter()
            .enumerate()
            .filter(|(idx, it)| !self.0[..*idx].iter().any(|prev| prev.lang == it.lang))
            .map(|(_, it)| it)
    }

    /// True when the bare string wire shape applies.
    pub fn is_single_plain(&self) -> bool {
        self.0.len() == 1 && self.0[0].lang.is_nil()
    }

    /// Standalone JSON rendering, `null` when empty.
    pub fn to_json(&self) -> Value {
        if self.is_empty() {
            return Value::Null;
        }
        if self.is_single_plain() {
            return Value::String(self.0[0].value.clone());
        }
        let mut map = Map::new();
        for it in self.distinct() {
            map.insert(it.lang.to_string(), Value::String(it.value.clone()));
        }
        Value::Object(map)
    }

    /// Reads a bare string or a language map. Other shapes are ignored.
    pub fn merge_json(&mut self, value: &Value) {
        match value {
            Value::String(s) => self.append(NIL_LANG_REF, s.as_str()),
            Value::Object(map) => {
                for (lang, v) in map {
                    if let Some(s) = v.as_str() {
                        self.append(LangRef::new(lang), s);
                    }
                }
            }
            _ => {}
        }
    }
}

impl Display for NaturalLanguageValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.first() {
            Some(it) => it.value.fmt(f),
            None => Ok(()),
        }
    }
}

impl From<&str> for NaturalLanguageValues {
    fn from(value: &str) -> Self {
        NaturalLanguageValues::plain(value)
    }
}

impl FromIterator<LangRefValue> for NaturalLanguageValues {
    fn from_iter<T: IntoIterator<Item = LangRefValue>>(iter: T) -> Self {
        NaturalLanguageValues(iter.into_iter().collect())
    }
}

impl<C> Encode<C> for NaturalLanguageValues {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.array(self.0.len() as u64)?;
        for it in &self.0 {
            it.encode(e, ctx)?;
        }
        Ok(())
    }
}

impl<'b, C> Decode<'b, C> for NaturalLanguageValues {
    fn decode(
        d: &mut minicbor::Decoder<'b>,
        ctx: &mut C,
    ) -> Result<Self, minicbor::decode::Error> {
        let len = d
            .array()?
            .ok_or_else(|| minicbor::decode::Error::message("expected definite array"))?;
        let mut values = Vec::new();
        for _ in 0..len {
            values.push(LangRefValue::decode(d, ctx)?);
        }
        Ok(NaturalLanguageValues(values))
    }
}
