use std::fmt::Display;
use std::ops::Deref;

use minicbor::{Decode, Encode};

use crate::item::Item;

/// The special collection addressing every actor.
pub const PUBLIC_NS: &str = "https://www.w3.org/ns/activitystreams#Public";

/// An opaque absolute URI used as a reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(String);

/// The `id` property. An empty id marks an anonymous object.
pub type Id = Iri;

impl Iri {
    pub const fn empty() -> Iri {
        Iri(String::new())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn is_public(&self) -> bool {
        self.0 == PUBLIC_NS
    }
    /// Appends a path segment, inserting exactly one separator.
    pub fn add_path(&self, segment: &str) -> Iri {
        let base = self.0.trim_end_matches('/');
        let segment = segment.trim_start_matches('/');
        Iri(format!("{base}/{segment}"))
    }
    /// True when `other` lives under this IRI, i.e. this IRI is a path prefix
    /// of `other`.
    pub fn contains(&self, other: &Iri) -> bool {
        if self.is_empty() {
            return false;
        }
        let base = self.0.trim_end_matches('/');
        match other.0.strip_prefix(base) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('#'),
            None => false,
        }
    }
    /// Compare with any item. Strict mode only accepts a bare reference with
    /// the same value; otherwise an object whose id matches is equal too.
    pub fn equals(&self, other: &Item, strict: bool) -> bool {
        match other {
            Item::Iri(iri) => iri == self,
            _ if strict => false,
            other => !self.is_empty() && other.id() == self,
        }
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Iri(value.to_owned())
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Iri(value)
    }
}

impl From<Iri> for String {
    fn from(value: Iri) -> Self {
        value.0
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Iri {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Iri {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<C> Encode<C> for Iri {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.str(&self.0)?;
        Ok(())
    }
}

impl<'b, C> Decode<'b, C> for Iri {
    fn decode(
        d: &mut minicbor::Decoder<'b>,
        _ctx: &mut C,
    ) -> Result<Self, minicbor::decode::Error> {
        Ok(Iri(d.str()?.to_owned()))
    }
}

/// Ordered list of bare references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Iris(Vec<Iri>);

impl Iris {
    pub fn new() -> Iris {
        Iris(vec![])
    }
    pub fn push(&mut self, iri: Iri) {
        self.0.push(iri);
    }
    pub fn contains(&self, iri: &Iri) -> bool {
        self.0.iter().any(|it| it == iri)
    }
}

impl Deref for Iris {
    type Target = [Iri];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Iri> for Iris {
    fn from_iter<T: IntoIterator<Item = Iri>>(iter: T) -> Self {
        Iris(iter.into_iter().collect())
    }
}

impl IntoIterator for Iris {
    type Item = Iri;
    type IntoIter = std::vec::IntoIter<Iri>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<Iri>> for Iris {
    fn from(value: Vec<Iri>) -> Self {
        Iris(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::item::Item;
    use crate::object::Object;
    use crate::types::NOTE;

    use super::{Iri, PUBLIC_NS};

    #[test]
    fn add_path_uses_single_separator() {
        let base = Iri::from("https://example.com/users/");
        assert_eq!(base.add_path("/john"), "https://example.com/users/john");
        assert_eq!(
            Iri::from("https://example.com").add_path("inbox"),
            "https://example.com/inbox"
        );
    }

    #[test]
    fn contains_respects_path_boundaries() {
        let actor = Iri::from("https://example.com/users/john");
        assert!(actor.contains(&Iri::from("https://example.com/users/john/outbox")));
        assert!(actor.contains(&Iri::from("https://example.com/users/john#main-key")));
        assert!(!actor.contains(&Iri::from("https://example.com/users/johnny")));
        assert!(!Iri::empty().contains(&actor));
    }

    #[test]
    fn equals_strict_and_lenient() {
        let iri = Iri::from("https://example.com/notes/1");
        let note = Item::from(Object::new("https://example.com/notes/1", NOTE));
        assert!(iri.equals(&Item::Iri(iri.clone()), true));
        assert!(!iri.equals(&note, true));
        assert!(iri.equals(&note, false));
        assert!(!Iri::empty().equals(&Item::from(Object::default()), false));
    }

    #[test]
    fn public_namespace() {
        assert!(Iri::from(PUBLIC_NS).is_public());
    }
}
