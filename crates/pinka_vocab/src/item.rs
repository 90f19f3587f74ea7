//! The polymorphic item.

use crate::activity::{Activity, IntransitiveActivity, Question, flatten_property};
use crate::actor::Actor;
use crate::collection::{Collection, CollectionPage, OrderedCollection, OrderedCollectionPage};
use crate::error::DecodeError;
use crate::iri::{Iri, Iris};
use crate::item_collection::ItemCollection;
use crate::link::Link;
use crate::object::{AsObject, Object, Place, Profile, Relationship, Tombstone};
use crate::types::{ActivityVocabularyType, ActivityVocabularyTypes, COLLECTION_OF_ITEMS, IRI_TYPE};

static EMPTY_IRI: Iri = Iri::empty();

/// Any addressable entity: a bare reference, a link, an object of some
/// concrete shape, or a list of items.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Iri(Iri),
    Object(Box<Object>),
    Place(Box<Place>),
    Profile(Box<Profile>),
    Relationship(Box<Relationship>),
    Tombstone(Box<Tombstone>),
    Link(Box<Link>),
    Activity(Box<Activity>),
    IntransitiveActivity(Box<IntransitiveActivity>),
    Question(Box<Question>),
    Actor(Box<Actor>),
    Collection(Box<Collection>),
    CollectionPage(Box<CollectionPage>),
    OrderedCollection(Box<OrderedCollection>),
    OrderedCollectionPage(Box<OrderedCollectionPage>),
    ItemCollection(ItemCollection),
}

impl Item {
    /// The id, empty for anonymous objects and item collections.
    pub fn id(&self) -> &Iri {
        match self {
            Item::Iri(iri) => iri,
            Item::Link(link) => &link.id,
            Item::ItemCollection(_) => &EMPTY_IRI,
            _ => self.as_object().map(|o| &o.id).unwrap_or(&EMPTY_IRI),
        }
    }

    /// The reference this item stands for.
    pub fn link(&self) -> Iri {
        match self {
            Item::Link(link) => link.resolved().clone(),
            _ => self.id().clone(),
        }
    }

    /// Primary type tag.
    pub fn kind(&self) -> &ActivityVocabularyType {
        match self {
            Item::Iri(_) => &IRI_TYPE,
            Item::ItemCollection(_) => &COLLECTION_OF_ITEMS,
            Item::Link(link) => link.kind.first(),
            _ => match self.as_object() {
                Some(o) => o.kind.first(),
                None => &IRI_TYPE,
            },
        }
    }

    /// Every type tag of a link or object.
    pub fn types(&self) -> Option<&ActivityVocabularyTypes> {
        match self {
            Item::Link(link) => Some(&link.kind),
            _ => self.as_object().map(|o| &o.kind),
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Item::Iri(_) | Item::Link(_))
    }

    pub fn is_object(&self) -> bool {
        self.as_object().is_some()
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Item::ItemCollection(_)
                | Item::Collection(_)
                | Item::CollectionPage(_)
                | Item::OrderedCollection(_)
                | Item::OrderedCollectionPage(_)
        )
    }

    /// The shared Object properties of any object shaped variant.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Item::Iri(_) | Item::Link(_) | Item::ItemCollection(_) => None,
            Item::Object(o) => Some(o.as_object()),
            Item::Place(o) => Some(o.as_object()),
            Item::Profile(o) => Some(o.as_object()),
            Item::Relationship(o) => Some(o.as_object()),
            Item::Tombstone(o) => Some(o.as_object()),
            Item::Activity(o) => Some(o.as_object()),
            Item::IntransitiveActivity(o) => Some(o.as_object()),
            Item::Question(o) => Some(o.as_object()),
            Item::Actor(o) => Some(o.as_object()),
            Item::Collection(o) => Some(o.as_object()),
            Item::CollectionPage(o) => Some(o.as_object()),
            Item::OrderedCollection(o) => Some(o.as_object()),
            Item::OrderedCollectionPage(o) => Some(o.as_object()),
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Item::Iri(_) | Item::Link(_) | Item::ItemCollection(_) => None,
            Item::Object(o) => Some(o.as_object_mut()),
            Item::Place(o) => Some(o.as_object_mut()),
            Item::Profile(o) => Some(o.as_object_mut()),
            Item::Relationship(o) => Some(o.as_object_mut()),
            Item::Tombstone(o) => Some(o.as_object_mut()),
            Item::Activity(o) => Some(o.as_object_mut()),
            Item::IntransitiveActivity(o) => Some(o.as_object_mut()),
            Item::Question(o) => Some(o.as_object_mut()),
            Item::Actor(o) => Some(o.as_object_mut()),
            Item::Collection(o) => Some(o.as_object_mut()),
            Item::CollectionPage(o) => Some(o.as_object_mut()),
            Item::OrderedCollection(o) => Some(o.as_object_mut()),
            Item::OrderedCollectionPage(o) => Some(o.as_object_mut()),
        }
    }

    /// Strips blind recipients, including those of an embedded object.
    pub fn clean(&mut self) {
        if let Some(o) = self.as_object_mut() {
            o.clean();
        }
        if let Item::Activity(a) = self {
            if let Some(object) = a.object.as_mut() {
                object.clean();
            }
        }
    }

    /// Activities get their actor, object and target flattened. Other
    /// items are returned as they are.
    pub fn flatten(self) -> Item {
        match self {
            Item::Activity(a) => Item::from(a.flatten()),
            Item::IntransitiveActivity(a) => Item::from(a.flatten()),
            Item::Question(q) => Item::from(q.flatten()),
            Item::ItemCollection(items) => {
                Item::ItemCollection(items.into_iter().map(flatten_property).collect())
            }
            item => item,
        }
    }

    pub(crate) fn invalid_type(&self, expected: &'static str) -> DecodeError {
        DecodeError::InvalidType {
            expected,
            found: self.kind().to_string(),
        }
    }
}

/// Both absent, or same id and primary type. Two anonymous items are
/// indistinguishable placeholders and always equal.
pub fn items_equal(a: Option<&Item>, b: Option<&Item>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            if a.id().is_empty() && b.id().is_empty() {
                return true;
            }
            a.id() == b.id() && a.kind() == b.kind()
        }
        _ => false,
    }
}

macro_rules! impl_item_variant {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for Item {
                fn from(value: $variant) -> Self {
                    Item::$variant(Box::new(value))
                }
            }
            impl From<Box<$variant>> for Item {
                fn from(value: Box<$variant>) -> Self {
                    Item::$variant(value)
                }
            }
        )+
    };
}

impl_item_variant!(
    Object,
    Place,
    Profile,
    Relationship,
    Tombstone,
    Link,
    Activity,
    IntransitiveActivity,
    Question,
    Actor,
    Collection,
    CollectionPage,
    OrderedCollection,
    OrderedCollectionPage
);

impl From<Iri> for Item {
    fn from(value: Iri) -> Self {
        Item::Iri(value)
    }
}

impl From<ItemCollection> for Item {
    fn from(value: ItemCollection) -> Self {
        Item::ItemCollection(value)
    }
}

impl From<Iris> for Item {
    fn from(value: Iris) -> Self {
        Item::ItemCollection(value.into())
    }
}

/// Conversions accepting exactly one variant.
macro_rules! impl_try_from_item {
    ($($variant:ident),+) => {
        $(
            impl TryFrom<Item> for $variant {
                type Error = DecodeError;

                fn try_from(item: Item) -> Result<Self, Self::Error> {
                    match item {
                        Item::$variant(v) => Ok(*v),
                        other => Err(other.invalid_type(stringify!($variant))),
                    }
                }
            }
        )+
    };
}

impl_try_from_item!(Place, Profile, Relationship, Tombstone, Link, Question, Actor);

impl TryFrom<Item> for Object {
    type Error = DecodeError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        match item {
            Item::Object(o) => Ok(*o),
            Item::Place(o) => Ok(o.into_object()),
            Item::Profile(o) => Ok(o.into_object()),
            Item::Relationship(o) => Ok(o.into_object()),
            Item::Tombstone(o) => Ok(o.into_object()),
            Item::Activity(o) => Ok(o.into_object()),
            Item::IntransitiveActivity(o) => Ok(o.into_object()),
            Item::Question(o) => Ok(o.into_object()),
            Item::Actor(o) => Ok(o.into_object()),
            Item::Collection(o) => Ok(o.into_object()),
            Item::CollectionPage(o) => Ok(o.into_object()),
            Item::OrderedCollection(o) => Ok(o.into_object()),
            Item::OrderedCollectionPage(o) => Ok(o.into_object()),
            other => Err(other.invalid_type("Object")),
        }
    }
}

impl TryFrom<Item> for Activity {
    type Error = DecodeError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        match item {
            Item::Activity(a) => Ok(*a),
            Item::IntransitiveActivity(a) => Ok(Activity::from(*a)),
            other => Err(other.invalid_type("Activity")),
        }
    }
}

impl TryFrom<Item> for IntransitiveActivity {
    type Error = DecodeError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        match item {
            Item::IntransitiveActivity(a) => Ok(*a),
            Item::Question(q) => Ok(IntransitiveActivity::from(*q)),
            other => Err(other.invalid_type("IntransitiveActivity")),
        }
    }
}

impl TryFrom<Item> for Collection {
    type Error = DecodeError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        match item {
            Item::Collection(c) => Ok(*c),
            Item::OrderedCollection(c) => Ok(Collection::from(*c)),
            other => Err(other.invalid_type("Collection")),
        }
    }
}

impl TryFrom<Item> for OrderedCollection {
    type Error = DecodeError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        match item {
            Item::OrderedCollection(c) => Ok(*c),
            Item::Collection(c) => Ok(OrderedCollection::from(*c)),
            other => Err(other.invalid_type("OrderedCollection")),
        }
    }
}

impl TryFrom<Item> for CollectionPage {
    type Error = DecodeError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        match item {
            Item::CollectionPage(c) => Ok(*c),
            Item::OrderedCollectionPage(c) => Ok(CollectionPage::from(*c)),
            other => Err(other.invalid_type("CollectionPage")),
        }
    }
}

impl TryFrom<Item> for OrderedCollectionPage {
    type Error = DecodeError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        match item {
            Item::OrderedCollectionPage(c) => Ok(*c),
            Item::CollectionPage(c) => Ok(OrderedCollectionPage::from(*c)),
            other => Err(other.invalid_type("OrderedCollectionPage")),
        }
    }
}

impl TryFrom<Item> for ItemCollection {
    type Error = DecodeError;

    fn try_from(item: Item) -> Result<Self, Self::Error> {
        match item {
            Item::ItemCollection(items) => Ok(items),
            Item::Collection(c) => Ok(c.items),
            Item::CollectionPage(c) => Ok(c.base.items),
            Item::OrderedCollection(c) => Ok(c.ordered_items),
            Item::OrderedCollectionPage(c) => Ok(c.base.ordered_items),
            other => Err(other.invalid_type("ItemCollection")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::activity::{Activity, Question};
    use crate::collection::{Collection, OrderedCollection};
    use crate::error::DecodeError;
    use crate::item_collection::ItemCollection;
    use crate::link::Link;
    use crate::object::{Object, Place};
    use crate::types::{COLLECTION_OF_ITEMS, IRI_TYPE, LIKE, NOTE, PERSON};

    use super::{Item, items_equal};

    #[test]
    fn accessors() {
        let iri = Item::Iri("https://example.com/a".into());
        assert_eq!(iri.id(), "https://example.com/a");
        assert_eq!(iri.kind(), &IRI_TYPE);
        assert!(iri.is_link());
        assert!(!iri.is_object());

        let like = Item::from(Activity::new("https://example.com/likes/1", LIKE));
        assert_eq!(like.kind(), &LIKE);
        assert!(like.is_object());
        assert!(!like.is_collection());

        let items = Item::ItemCollection(ItemCollection::new());
        assert_eq!(items.kind(), &COLLECTION_OF_ITEMS);
        assert!(items.id().is_empty());
        assert!(items.is_collection());

        let link = Item::from(Link::to("https://example.com/b"));
        assert!(link.is_link());
        assert_eq!(link.link(), "https://example.com/b");

        assert!(Item::from(OrderedCollection::new("https://example.com/c")).is_collection());
    }

    #[test]
    fn equality_by_id_and_type() {
        let note = Item::from(Object::new("https://example.com/n/1", NOTE));
        let person = Item::from(Object::new("https://example.com/n/1", PERSON));
        assert!(items_equal(None, None));
        assert!(!items_equal(Some(&note), None));
        assert!(items_equal(Some(&note), Some(&note.clone())));
        assert!(!items_equal(Some(&note), Some(&person)));

        let blank_note = Item::from(Object::new("", NOTE));
        let blank_place = Item::from(Place::new(""));
        assert!(items_equal(Some(&blank_note), Some(&blank_place)));
    }

    #[test]
    fn checked_conversions() {
        let question = Item::from(Question::new("https://example.com/q/1"));
        let Err(err) = Activity::try_from(question.clone()) else {
            panic!("a question is not a transitive activity");
        };
        assert_eq!(
            err,
            DecodeError::InvalidType {
                expected: "Activity",
                found: "Question".to_string()
            }
        );

        let object = Object::try_from(question).map(|o| o.id);
        assert_eq!(object, Ok("https://example.com/q/1".into()));

        let collection = Item::from(OrderedCollection::new("https://example.com/c"));
        assert!(Collection::try_from(collection).is_ok());
        assert!(Question::try_from(Item::Iri("https://example.com".into())).is_err());
    }
}
