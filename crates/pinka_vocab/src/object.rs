//! The base Object record and the records that only extend it with a few
//! properties: Place, Profile, Relationship and Tombstone.

use jiff::{SignedDuration, Timestamp};

use crate::iri::{Id, Iri};
use crate::item::Item;
use crate::item_collection::{ItemCollection, item_collection_deduplication};
use crate::natural_language::{MimeType, NaturalLanguageValues};
use crate::types::{
    ActivityVocabularyType, ActivityVocabularyTypes, PLACE, PROFILE, RELATIONSHIP, TOMBSTONE,
};

/// Records embedding the shared Object properties.
pub trait AsObject {
    fn as_object(&self) -> &Object;
    fn as_object_mut(&mut self) -> &mut Object;
    /// Drops everything but the shared properties.
    fn into_object(self) -> Object;
}

macro_rules! impl_as_object {
    ($typ:ident, $($field:ident).+) => {
        impl crate::object::AsObject for $typ {
            fn as_object(&self) -> &crate::object::Object {
                &self.$($field).+
            }
            fn as_object_mut(&mut self) -> &mut crate::object::Object {
                &mut self.$($field).+
            }
            fn into_object(self) -> crate::object::Object {
                self.$($field).+
            }
        }
    };
}

/// Source material an object's content was converted from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Source {
    pub content: NaturalLanguageValues,
    pub media_type: MimeType,
}

impl Source {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.media_type.is_empty()
    }
}

/// The base record. Article, Audio, Document, Event, Image, Note, Page and
/// Video are all represented by this record with the matching tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    pub id: Id,
    pub kind: ActivityVocabularyTypes,
    pub name: NaturalLanguageValues,
    pub attachment: Option<Item>,
    pub attributed_to: Option<Item>,
    pub audience: ItemCollection,
    pub content: NaturalLanguageValues,
    pub context: Option<Item>,
    pub media_type: MimeType,
    pub end_time: Option<Timestamp>,
    pub generator: Option<Item>,
    pub icon: Option<Item>,
    pub image: Option<Item>,
    pub in_reply_to: Option<Item>,
    pub location: Option<Item>,
    pub preview: Option<Item>,
    pub published: Option<Timestamp>,
    pub replies: Option<Item>,
    pub start_time: Option<Timestamp>,
    pub summary: NaturalLanguageValues,
    pub tag: ItemCollection,
    pub updated: Option<Timestamp>,
    pub url: Option<Item>,
    pub to: ItemCollection,
    pub bto: ItemCollection,
    pub cc: ItemCollection,
    pub bcc: ItemCollection,
    pub duration: SignedDuration,
    pub likes: Option<Item>,
    pub shares: Option<Item>,
    pub source: Source,
}

impl Object {
    pub fn new(id: impl Into<Iri>, kind: ActivityVocabularyType) -> Object {
        Object {
            id: id.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Strips the blind recipients before the object leaves a private scope.
    pub fn clean(&mut self) {
        self.bto = ItemCollection::new();
        self.bcc = ItemCollection::new();
    }

    /// Merged audience. Redundant entries are removed from the later
    /// addressing lists, see [`item_collection_deduplication`].
    pub fn recipients(&mut self) -> ItemCollection {
        item_collection_deduplication(&mut [
            &mut self.to,
            &mut self.cc,
            &mut self.bto,
            &mut self.bcc,
            &mut self.audience,
        ])
    }
}

impl AsObject for Object {
    fn as_object(&self) -> &Object {
        self
    }
    fn as_object_mut(&mut self) -> &mut Object {
        self
    }
    fn into_object(self) -> Object {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
    pub base: Object,
    pub accuracy: f64,
    pub altitude: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: i64,
    pub units: String,
}

impl Place {
    pub fn new(id: impl Into<Iri>) -> Place {
        Place {
            base: Object::new(id, PLACE),
            ..Default::default()
        }
    }
}

impl_as_object!(Place, base);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub base: Object,
    pub describes: Option<Item>,
}

impl Profile {
    pub fn new(id: impl Into<Iri>) -> Profile {
        Profile {
            base: Object::new(id, PROFILE),
            ..Default::default()
        }
    }
}

impl_as_object!(Profile, base);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationship {
    pub base: Object,
    pub subject: Option<Item>,
    pub object: Option<Item>,
    pub relationship: Option<Item>,
}

impl Relationship {
    pub fn new(id: impl Into<Iri>) -> Relationship {
        Relationship {
            base: Object::new(id, RELATIONSHIP),
            ..Default::default()
        }
    }
}

impl_as_object!(Relationship, base);

/// Stands in for an object that was deleted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tombstone {
    pub base: Object,
    pub former_type: ActivityVocabularyTypes,
    pub deleted: Option<Timestamp>,
}

impl Tombstone {
    pub fn new(id: impl Into<Iri>) -> Tombstone {
        Tombstone {
            base: Object::new(id, TOMBSTONE),
            ..Default::default()
        }
    }

    /// Tombstone replacing `object`, keeping its id and former type.
    pub fn replacing(object: &Object, deleted: Timestamp) -> Tombstone {
        Tombstone {
            base: Object::new(object.id.clone(), TOMBSTONE),
            former_type: object.kind.clone(),
            deleted: Some(deleted),
        }
    }
}

impl_as_object!(Tombstone, base);
