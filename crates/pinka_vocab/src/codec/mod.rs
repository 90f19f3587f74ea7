//! Wire formats.
//!
//! Both codecs walk the same per record property lists: a record writes its
//! properties into a [`PropertyWriter`] and reads them back from a
//! [`PropertyReader`], so the textual and binary formats always agree on
//! names and order. Readers are total: a missing property yields the zero
//! value, only a malformed one is an error.

pub mod binary;
mod properties;
pub mod text;

use jiff::{SignedDuration, Timestamp};

use crate::error::{EncodeError, Result};
use crate::iri::Iri;
use crate::item::Item;
use crate::item_collection::ItemCollection;
use crate::natural_language::NaturalLanguageValues;
use crate::types::ActivityVocabularyTypes;

pub use self::binary::{decode_binary, encode_binary};
pub use self::text::{decode_text, encode_text, encode_text_document};

/// Sink for one record. Every method reports whether it wrote anything;
/// zero values are skipped.
pub(crate) trait PropertyWriter {
    fn write_str(&mut self, name: &'static str, value: &str) -> Result<bool, EncodeError>;
    fn write_types(
        &mut self,
        name: &'static str,
        value: &ActivityVocabularyTypes,
    ) -> Result<bool, EncodeError>;
    fn write_natural_language(
        &mut self,
        name: &'static str,
        value: &NaturalLanguageValues,
    ) -> Result<bool, EncodeError>;
    /// Written even when zero.
    fn write_count(&mut self, name: &'static str, value: u64) -> Result<bool, EncodeError>;
    fn write_i64(&mut self, name: &'static str, value: i64) -> Result<bool, EncodeError>;
    fn write_f64(&mut self, name: &'static str, value: f64) -> Result<bool, EncodeError>;
    fn write_bool(&mut self, name: &'static str, value: bool) -> Result<bool, EncodeError>;
    fn write_time(
        &mut self,
        name: &'static str,
        value: Option<Timestamp>,
    ) -> Result<bool, EncodeError>;
    fn write_duration(
        &mut self,
        name: &'static str,
        value: SignedDuration,
    ) -> Result<bool, EncodeError>;
    fn write_item(
        &mut self,
        name: &'static str,
        value: Option<&Item>,
    ) -> Result<bool, EncodeError>;
    fn write_items(
        &mut self,
        name: &'static str,
        value: &ItemCollection,
    ) -> Result<bool, EncodeError>;
    /// A nested record that is not an item, like `source` or `endpoints`.
    fn write_record<P: Properties>(
        &mut self,
        name: &'static str,
        value: &P,
    ) -> Result<bool, EncodeError>;

    fn write_iri(&mut self, name: &'static str, value: &Iri) -> Result<bool, EncodeError> {
        self.write_str(name, value.as_str())
    }

    fn write_u64(&mut self, name: &'static str, value: u64) -> Result<bool, EncodeError> {
        if value == 0 {
            return Ok(false);
        }
        self.write_count(name, value)
    }
}

/// Source for one record.
pub(crate) trait PropertyReader {
    fn read_str(&self, name: &'static str) -> Result<String>;
    fn read_types(&self, name: &'static str) -> Result<ActivityVocabularyTypes>;
    fn read_natural_language(&self, name: &'static str) -> Result<NaturalLanguageValues>;
    fn read_u64(&self, name: &'static str) -> Result<u64>;
    fn read_i64(&self, name: &'static str) -> Result<i64>;
    fn read_f64(&self, name: &'static str) -> Result<f64>;
    fn read_bool(&self, name: &'static str) -> Result<bool>;
    fn read_time(&self, name: &'static str) -> Result<Option<Timestamp>>;
    fn read_duration(&self, name: &'static str) -> Result<SignedDuration>;
    fn read_item(&self, name: &'static str) -> Result<Option<Item>>;
    fn read_items(&self, name: &'static str) -> Result<ItemCollection>;
    fn read_record<P: Properties>(&self, name: &'static str) -> Result<P>;

    fn read_iri(&self, name: &'static str) -> Result<Iri> {
        self.read_str(name).map(Iri::from)
    }
}

/// A record with a fixed property list.
pub(crate) trait Properties: Default {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError>;
    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()>;
}

/// Runs `$body` with `$v` bound to the record inside any variant that has
/// properties, `$other` for bare references and item collections.
macro_rules! with_record {
    ($item:expr, $v:ident => $body:expr, _ => $other:expr) => {
        match $item {
            Item::Object($v) => $body,
            Item::Place($v) => $body,
            Item::Profile($v) => $body,
            Item::Relationship($v) => $body,
            Item::Tombstone($v) => $body,
            Item::Link($v) => $body,
            Item::Activity($v) => $body,
            Item::IntransitiveActivity($v) => $body,
            Item::Question($v) => $body,
            Item::Actor($v) => $body,
            Item::Collection($v) => $body,
            Item::CollectionPage($v) => $body,
            Item::OrderedCollection($v) => $body,
            Item::OrderedCollectionPage($v) => $body,
            Item::Iri(_) | Item::ItemCollection(_) => $other,
        }
    };
}

pub(crate) fn write_item_properties<W: PropertyWriter>(
    item: &Item,
    w: &mut W,
) -> Result<(), EncodeError> {
    with_record!(item, v => v.write_properties(w), _ => Ok(()))
}

pub(crate) fn read_item_properties<R: PropertyReader>(item: &mut Item, r: &R) -> Result<()> {
    with_record!(item, v => v.read_properties(r), _ => Ok(()))
}

/// Builds the record named by the `type` property and fills it.
pub(crate) fn read_record_item<R: PropertyReader>(r: &R) -> Result<Item> {
    let types = r.read_types("type")?;
    let mut item = crate::factory::new_from_types(&types);
    read_item_properties(&mut item, r)?;
    if types.is_empty() {
        if let Some(object) = item.as_object_mut() {
            object.kind = crate::types::OBJECT.into();
        }
    }
    Ok(item)
}

/// Populated instances of every variant, shared by the codec tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use jiff::{SignedDuration, Timestamp};

    use crate::activity::{Activity, IntransitiveActivity, Question};
    use crate::actor::Actor;
    use crate::collection::{Collection, CollectionPage, OrderedCollection, OrderedCollectionPage};
    use crate::iri::PUBLIC_NS;
    use crate::item::Item;
    use crate::item_collection::ItemCollection;
    use crate::link::Link;
    use crate::natural_language::{LangRef, NaturalLanguageValues};
    use crate::object::{Object, Place, Profile, Relationship, Source, Tombstone};
    use crate::types::{ARRIVE, CREATE, LINK, NOTE, PERSON};

    fn iri(s: &str) -> Item {
        Item::Iri(s.into())
    }

    fn iris(list: &[&str]) -> ItemCollection {
        list.iter().map(|s| iri(s)).collect()
    }

    fn note() -> anyhow::Result<Object> {
        let mut note = Object::new("https://example.com/notes/1", NOTE);
        note.name = NaturalLanguageValues::plain("A note");
        note.summary.set(LangRef::new("en"), "short");
        note.summary.set(LangRef::new("fr"), "court");
        note.content = NaturalLanguageValues::plain("<p>hello \"world\"</p>\n");
        note.media_type = "text/html".into();
        note.attachment = Some(Link::to("https://example.com/files/1.png").into());
        note.attributed_to = Some(iri("https://example.com/users/john"));
        note.audience = iris(&[PUBLIC_NS]);
        note.context = Some(iri("https://example.com/contexts/1"));
        note.in_reply_to = Some(iri("https://example.org/notes/7"));
        note.published = Some("2024-11-04T05:12:16Z".parse::<Timestamp>()?);
        note.updated = Some("2024-11-05T10:00:00.5Z".parse::<Timestamp>()?);
        note.duration = SignedDuration::from_secs(5400);
        note.tag = [Item::from(Link::mention("https://example.org/users/jane", "@jane"))]
            .into_iter()
            .collect();
        note.url = Some(iri("https://example.com/@john/1"));
        note.to = iris(&["https://example.org/users/jane"]);
        note.cc = iris(&["https://example.com/users/john/followers"]);
        note.source = Source {
            content: NaturalLanguageValues::plain("hello *world*"),
            media_type: "text/markdown".into(),
        };
        Ok(note)
    }

    pub(crate) fn items() -> anyhow::Result<Vec<Item>> {
        let note = note()?;

        let mut place = Place::new("https://example.com/places/1");
        place.base.name = NaturalLanguageValues::plain("Fresno Area");
        place.accuracy = 94.5;
        place.latitude = 36.75;
        place.longitude = -119.7667;
        place.radius = 15;
        place.units = "miles".to_string();

        let mut profile = Profile::new("https://example.com/profiles/1");
        profile.describes = Some(iri("https://example.com/users/john"));

        let mut relationship = Relationship::new("https://example.com/relationships/1");
        relationship.subject = Some(iri("https://example.com/users/john"));
        relationship.relationship = Some(iri("http://purl.org/vocab/relationship/acquaintanceOf"));
        relationship.object = Some(iri("https://example.org/users/jane"));

        let tombstone = Tombstone::replacing(&note, "2024-12-01T00:00:00Z".parse::<Timestamp>()?);

        let mut link = Link::new("https://example.com/links/1", LINK);
        link.href = "https://example.com/files/2.png".into();
        link.rel = "canonical".into();
        link.media_type = "image/png".into();
        link.hreflang = Some(LangRef::new("en"));
        link.height = 600;
        link.width = 800;

        let mut create = Activity::new("https://example.com/activities/1", CREATE);
        create.actor = Some(iri("https://example.com/users/john"));
        create.object = Some(note.clone().into());
        create.base.to = note.to.clone();

        let mut arrive = IntransitiveActivity::new("https://example.com/activities/2", ARRIVE);
        arrive.actor = Some(iri("https://example.com/users/john"));
        arrive.base.location = Some(place.clone().into());
        arrive.origin = Some(iri("https://example.com/places/2"));

        let mut question = Question::new("https://example.com/questions/1");
        question.base.base.content = NaturalLanguageValues::plain("Tea or coffee?");
        question.one_of = [Object::new("", NOTE), Object::new("", NOTE)]
            .into_iter()
            .zip(["tea", "coffee"])
            .map(|(mut answer, name)| {
                answer.name = NaturalLanguageValues::plain(name);
                Item::from(answer)
            })
            .collect();
        question.closed = true;

        let mut actor = Actor::new("https://example.com/users/john", PERSON)
            .with_default_collections();
        actor.preferred_username = NaturalLanguageValues::plain("john");
        actor.endpoints.shared_inbox = Some(iri("https://example.com/inbox"));
        actor.streams = iris(&["https://example.com/users/john/photos"]);
        actor.public_key.id = "https://example.com/users/john#main-key".into();
        actor.public_key.owner = "https://example.com/users/john".into();
        actor.public_key.public_key_pem =
            "-----BEGIN PUBLIC KEY-----\nMIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8A\n-----END PUBLIC KEY-----\n"
                .to_string();

        let followers = Collection::new("https://example.com/users/john/followers");

        let mut outbox = OrderedCollection::new("https://example.com/users/john/outbox");
        outbox.append([
            iri("https://example.com/activities/1"),
            iri("https://example.com/activities/2"),
        ]);
        outbox.first = Some(iri("https://example.com/users/john/outbox?page=1"));

        let mut page = CollectionPage::new("https://example.com/users/john/followers?page=1");
        page.part_of = Some(iri("https://example.com/users/john/followers"));
        page.next = Some(iri("https://example.com/users/john/followers?page=2"));
        page.base.append([iri("https://example.org/users/jane")]);

        let mut ordered_page =
            OrderedCollectionPage::new("https://example.com/users/john/outbox?page=2");
        ordered_page.start_index = 10;
        ordered_page.prev = Some(iri("https://example.com/users/john/outbox?page=1"));
        ordered_page.base.append([Item::from(create.clone())]);

        Ok(vec![
            iri("https://example.com/users/john"),
            note.into(),
            place.into(),
            profile.into(),
            relationship.into(),
            tombstone.into(),
            link.into(),
            create.into(),
            arrive.into(),
            question.into(),
            actor.into(),
            followers.into(),
            outbox.into(),
            page.into(),
            ordered_page.into(),
            Item::ItemCollection(
                [iri("https://example.com/a"), Object::new("https://example.com/b", NOTE).into()]
                    .into_iter()
                    .collect(),
            ),
        ])
    }
}
