//! Builds an empty record of the right shape for a type tag.

use tracing::debug;

use crate::activity::{Activity, IntransitiveActivity, Question};
use crate::actor::Actor;
use crate::collection::{Collection, CollectionPage, OrderedCollection, OrderedCollectionPage};
use crate::error::{DecodeError, Result};
use crate::item::Item;
use crate::link::Link;
use crate::object::{AsObject, Object, Place, Profile, Relationship, Tombstone};
use crate::types::*;

type Constructor = fn(ActivityVocabularyTypes) -> Item;

macro_rules! record_constructor {
    ($name:ident, $typ:ident) => {
        fn $name(kind: ActivityVocabularyTypes) -> Item {
            let mut record = $typ::default();
            record.as_object_mut().kind = kind;
            Item::from(record)
        }
    };
}

record_constructor!(object, Object);
record_constructor!(place, Place);
record_constructor!(profile, Profile);
record_constructor!(relationship, Relationship);
record_constructor!(tombstone, Tombstone);
record_constructor!(activity, Activity);
record_constructor!(intransitive_activity, IntransitiveActivity);
record_constructor!(question, Question);
record_constructor!(actor, Actor);
record_constructor!(collection, Collection);
record_constructor!(collection_page, CollectionPage);
record_constructor!(ordered_collection, OrderedCollection);
record_constructor!(ordered_collection_page, OrderedCollectionPage);

fn link(kind: ActivityVocabularyTypes) -> Item {
    Item::from(Link {
        kind,
        ..Default::default()
    })
}

static CONSTRUCTORS: &[(ActivityVocabularyType, Constructor)] = &[
    (OBJECT, object),
    (ARTICLE, object),
    (AUDIO, object),
    (DOCUMENT, object),
    (EVENT, object),
    (IMAGE, object),
    (NOTE, object),
    (PAGE, object),
    (VIDEO, object),
    (PLACE, place),
    (PROFILE, profile),
    (RELATIONSHIP, relationship),
    (TOMBSTONE, tombstone),
    (LINK, link),
    (MENTION, link),
    (ACTOR, actor),
    (APPLICATION, actor),
    (GROUP, actor),
    (ORGANIZATION, actor),
    (PERSON, actor),
    (SERVICE, actor),
    (COLLECTION, collection),
    (COLLECTION_PAGE, collection_page),
    (ORDERED_COLLECTION, ordered_collection),
    (ORDERED_COLLECTION_PAGE, ordered_collection_page),
    (INTRANSITIVE_ACTIVITY, intransitive_activity),
    (ARRIVE, intransitive_activity),
    (TRAVEL, intransitive_activity),
    (QUESTION, question),
    (ACTIVITY, activity),
    (ACCEPT, activity),
    (ADD, activity),
    (ANNOUNCE, activity),
    (BLOCK, activity),
    (CREATE, activity),
    (DELETE, activity),
    (DISLIKE, activity),
    (FLAG, activity),
    (FOLLOW, activity),
    (IGNORE, activity),
    (INVITE, activity),
    (JOIN, activity),
    (LEAVE, activity),
    (LIKE, activity),
    (LISTEN, activity),
    (MOVE, activity),
    (OFFER, activity),
    (REJECT, activity),
    (READ, activity),
    (REMOVE, activity),
    (TENTATIVE_REJECT, activity),
    (TENTATIVE_ACCEPT, activity),
    (UNDO, activity),
    (UPDATE, activity),
    (VIEW, activity),
];

fn constructor(tag: &ActivityVocabularyType) -> Option<Constructor> {
    CONSTRUCTORS
        .iter()
        .find(|(known, _)| known == tag)
        .map(|(_, ctor)| *ctor)
}

/// A zero valued record for exactly this tag.
pub fn new_from_type(tag: &ActivityVocabularyType) -> Result<Item> {
    let ctor = constructor(tag).ok_or_else(|| DecodeError::NoMatchingType(tag.to_string()))?;
    Ok(ctor(tag.clone().into()))
}

/// A zero valued record for the first tag that has a constructor. The
/// record keeps every tag. When no tag is known the result is a plain
/// Object, so extension types survive decoding.
pub fn new_from_types(types: &ActivityVocabularyTypes) -> Item {
    if types.is_empty() {
        return object(OBJECT.into());
    }
    match types.iter().find_map(constructor) {
        Some(ctor) => ctor(types.clone()),
        None => {
            debug!(target: "vocab::text", ?types, "unknown type, using Object");
            object(types.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DecodeError;
    use crate::item::Item;
    use crate::types::{
        ActivityVocabularyType, ActivityVocabularyTypes, ARRIVE, CREATE, LIKE, MENTION, NOTE,
        OBJECT, ORDERED_COLLECTION_PAGE, PERSON, PLACE, QUESTION,
    };

    use super::{new_from_type, new_from_types};

    #[test]
    fn dispatch_by_tag() -> anyhow::Result<()> {
        assert!(matches!(new_from_type(&NOTE)?, Item::Object(_)));
        assert!(matches!(new_from_type(&LIKE)?, Item::Activity(_)));
        assert!(matches!(new_from_type(&ARRIVE)?, Item::IntransitiveActivity(_)));
        assert!(matches!(new_from_type(&QUESTION)?, Item::Question(_)));
        assert!(matches!(new_from_type(&PERSON)?, Item::Actor(_)));
        assert!(matches!(new_from_type(&PLACE)?, Item::Place(_)));
        assert!(matches!(new_from_type(&MENTION)?, Item::Link(_)));
        assert!(matches!(
            new_from_type(&ORDERED_COLLECTION_PAGE)?,
            Item::OrderedCollectionPage(_)
        ));
        assert_eq!(new_from_type(&CREATE)?.kind(), &CREATE);
        Ok(())
    }

    #[test]
    fn unknown_tag_is_an_error() {
        assert_eq!(
            new_from_type(&ActivityVocabularyType::new("Emoji")),
            Err(DecodeError::NoMatchingType("Emoji".to_string()))
        );
    }

    #[test]
    fn first_resolving_tag_wins() {
        let types: ActivityVocabularyTypes = ["Hashtag", "Like", "Note"]
            .into_iter()
            .map(ActivityVocabularyType::from)
            .collect();
        let item = new_from_types(&types);
        assert!(matches!(item, Item::Activity(_)));
        assert_eq!(item.types(), Some(&types));
    }

    #[test]
    fn unknown_tags_fall_back_to_object() {
        let types = ActivityVocabularyTypes::from(ActivityVocabularyType::new("Emoji"));
        let item = new_from_types(&types);
        assert!(matches!(item, Item::Object(_)));
        assert_eq!(item.kind().as_str(), "Emoji");

        let item = new_from_types(&ActivityVocabularyTypes::default());
        assert_eq!(item.kind(), &OBJECT);
    }
}
