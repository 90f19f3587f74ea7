//! Vocabulary type tags and the static registry of valid tags.

use std::borrow::Cow;
use std::fmt::Display;

use minicbor::{Decode, Encode};

/// A single `type` tag such as `Note` or `Create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivityVocabularyType(Cow<'static, str>);

impl ActivityVocabularyType {
    pub const fn const_new(tag: &'static str) -> ActivityVocabularyType {
        ActivityVocabularyType(Cow::Borrowed(tag))
    }
    pub fn new(tag: &str) -> ActivityVocabularyType {
        ActivityVocabularyType(Cow::Owned(tag.to_owned()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_nil(&self) -> bool {
        self.0.is_empty()
    }
    /// An empty tag matches anything, otherwise the tag must equal one of
    /// the candidates.
    pub fn matches(&self, candidates: &[ActivityVocabularyType]) -> bool {
        if self.is_nil() {
            return true;
        }
        candidates.iter().any(|c| c == self)
    }
}

impl Display for ActivityVocabularyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ActivityVocabularyType {
    fn from(value: &str) -> Self {
        ActivityVocabularyType::new(value)
    }
}

impl PartialEq<str> for ActivityVocabularyType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ActivityVocabularyType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<C> Encode<C> for ActivityVocabularyType {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.str(&self.0)?;
        Ok(())
    }
}

impl<'b, C> Decode<'b, C> for ActivityVocabularyType {
    fn decode(
        d: &mut minicbor::Decoder<'b>,
        _ctx: &mut C,
    ) -> Result<Self, minicbor::decode::Error> {
        Ok(ActivityVocabularyType::new(d.str()?))
    }
}

/// One or many tags, as the `type` property allows either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ActivityVocabularyTypes(Vec<ActivityVocabularyType>);

impl ActivityVocabularyTypes {
    pub fn new(types: Vec<ActivityVocabularyType>) -> ActivityVocabularyTypes {
        ActivityVocabularyTypes(types)
    }
    /// The primary tag, or the nil tag when there is none.
    pub fn first(&self) -> &ActivityVocabularyType {
        self.0.first().unwrap_or(&NIL_TYPE)
    }
    pub fn contains(&self, tag: &ActivityVocabularyType) -> bool {
        self.0.iter().any(|t| t == tag)
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, ActivityVocabularyType> {
        self.0.iter()
    }
    /// Every tag of `self` has a match in `other`. An empty list on either
    /// side matches everything.
    pub fn match_other(&self, other: &ActivityVocabularyTypes) -> bool {
        if self.is_empty() || other.is_empty() {
            return true;
        }
        self.0.iter().all(|t| t.matches(&other.0))
    }
    /// Any tag of `self` is one of the candidates.
    pub fn matches(&self, candidates: &[ActivityVocabularyType]) -> bool {
        if self.is_empty() {
            return true;
        }
        self.0.iter().any(|t| t.matches(candidates))
    }
}

impl From<ActivityVocabularyType> for ActivityVocabularyTypes {
    fn from(value: ActivityVocabularyType) -> Self {
        ActivityVocabularyTypes(vec![value])
    }
}

impl FromIterator<ActivityVocabularyType> for ActivityVocabularyTypes {
    fn from_iter<T: IntoIterator<Item = ActivityVocabularyType>>(iter: T) -> Self {
        ActivityVocabularyTypes(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ActivityVocabularyTypes {
    type Item = &'a ActivityVocabularyType;
    type IntoIter = std::slice::Iter<'a, ActivityVocabularyType>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<C> Encode<C> for ActivityVocabularyTypes {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.array(self.0.len() as u64)?;
        for t in &self.0 {
            t.encode(e, ctx)?;
        }
        Ok(())
    }
}

impl<'b, C> Decode<'b, C> for ActivityVocabularyTypes {
    fn decode(
        d: &mut minicbor::Decoder<'b>,
        _ctx: &mut C,
    ) -> Result<Self, minicbor::decode::Error> {
        let len = d
            .array()?
            .ok_or_else(|| minicbor::decode::Error::message("expected definite array"))?;
        let mut types = Vec::new();
        for _ in 0..len {
            types.push(ActivityVocabularyType::new(d.str()?));
        }
        Ok(ActivityVocabularyTypes(types))
    }
}

macro_rules! vocabulary {
    ($($name:ident => $tag:literal,)+) => {
        $(pub const $name: ActivityVocabularyType = ActivityVocabularyType::const_new($tag);)+
    };
}

/// Matches anything.
pub static NIL_TYPE: ActivityVocabularyType = ActivityVocabularyType::const_new("");
/// Type reported by a bare reference.
pub static IRI_TYPE: ActivityVocabularyType = ActivityVocabularyType::const_new("IRI");
/// Type reported by an ItemCollection, not a vocabulary type.
pub static COLLECTION_OF_ITEMS: ActivityVocabularyType =
    ActivityVocabularyType::const_new("ItemCollection");

vocabulary! {
    OBJECT => "Object",
    LINK => "Link",
    ACTIVITY => "Activity",
    INTRANSITIVE_ACTIVITY => "IntransitiveActivity",
    ACTOR => "Actor",
    COLLECTION => "Collection",
    ORDERED_COLLECTION => "OrderedCollection",
    COLLECTION_PAGE => "CollectionPage",
    ORDERED_COLLECTION_PAGE => "OrderedCollectionPage",

    ARTICLE => "Article",
    AUDIO => "Audio",
    DOCUMENT => "Document",
    EVENT => "Event",
    IMAGE => "Image",
    NOTE => "Note",
    PAGE => "Page",
    PLACE => "Place",
    PROFILE => "Profile",
    RELATIONSHIP => "Relationship",
    TOMBSTONE => "Tombstone",
    VIDEO => "Video",

    MENTION => "Mention",

    APPLICATION => "Application",
    GROUP => "Group",
    ORGANIZATION => "Organization",
    PERSON => "Person",
    SERVICE => "Service",

    ACCEPT => "Accept",
    ADD => "Add",
    ANNOUNCE => "Announce",
    ARRIVE => "Arrive",
    BLOCK => "Block",
    CREATE => "Create",
    DELETE => "Delete",
    DISLIKE => "Dislike",
    FLAG => "Flag",
    FOLLOW => "Follow",
    IGNORE => "Ignore",
    INVITE => "Invite",
    JOIN => "Join",
    LEAVE => "Leave",
    LIKE => "Like",
    LISTEN => "Listen",
    MOVE => "Move",
    OFFER => "Offer",
    QUESTION => "Question",
    REJECT => "Reject",
    READ => "Read",
    REMOVE => "Remove",
    TENTATIVE_REJECT => "TentativeReject",
    TENTATIVE_ACCEPT => "TentativeAccept",
    TRAVEL => "Travel",
    UNDO => "Undo",
    UPDATE => "Update",
    VIEW => "View",
}

pub static GENERIC_TYPES: [ActivityVocabularyType; 3] = [OBJECT, ACTIVITY, INTRANSITIVE_ACTIVITY];

pub static OBJECT_TYPES: [ActivityVocabularyType; 12] = [
    ARTICLE,
    AUDIO,
    DOCUMENT,
    EVENT,
    IMAGE,
    NOTE,
    PAGE,
    PLACE,
    PROFILE,
    RELATIONSHIP,
    TOMBSTONE,
    VIDEO,
];

pub static LINK_TYPES: [ActivityVocabularyType; 2] = [LINK, MENTION];

pub static ACTOR_TYPES: [ActivityVocabularyType; 5] =
    [APPLICATION, GROUP, ORGANIZATION, PERSON, SERVICE];

pub static COLLECTION_TYPES: [ActivityVocabularyType; 4] = [
    COLLECTION,
    ORDERED_COLLECTION,
    COLLECTION_PAGE,
    ORDERED_COLLECTION_PAGE,
];

pub static INTRANSITIVE_ACTIVITY_TYPES: [ActivityVocabularyType; 3] = [ARRIVE, QUESTION, TRAVEL];

pub static ACTIVITY_TYPES: [ActivityVocabularyType; 25] = [
    ACCEPT,
    ADD,
    ANNOUNCE,
    BLOCK,
    CREATE,
    DELETE,
    DISLIKE,
    FLAG,
    FOLLOW,
    IGNORE,
    INVITE,
    JOIN,
    LEAVE,
    LIKE,
    LISTEN,
    MOVE,
    OFFER,
    REJECT,
    READ,
    REMOVE,
    TENTATIVE_REJECT,
    TENTATIVE_ACCEPT,
    UNDO,
    UPDATE,
    VIEW,
];

/// Object tags overlap with every other category in the vocabulary.
pub fn valid_object_type(tag: &ActivityVocabularyType) -> bool {
    OBJECT_TYPES.contains(tag)
        || valid_activity_type(tag)
        || valid_actor_type(tag)
        || valid_collection_type(tag)
        || valid_generic_type(tag)
}

pub fn valid_link_type(tag: &ActivityVocabularyType) -> bool {
    LINK_TYPES.contains(tag)
}

/// Transitive and intransitive verbs.
pub fn valid_activity_type(tag: &ActivityVocabularyType) -> bool {
    ACTIVITY_TYPES.contains(tag) || valid_intransitive_activity_type(tag)
}

pub fn valid_intransitive_activity_type(tag: &ActivityVocabularyType) -> bool {
    INTRANSITIVE_ACTIVITY_TYPES.contains(tag)
}

pub fn valid_actor_type(tag: &ActivityVocabularyType) -> bool {
    ACTOR_TYPES.contains(tag)
}

pub fn valid_collection_type(tag: &ActivityVocabularyType) -> bool {
    COLLECTION_TYPES.contains(tag)
}

pub fn valid_collection_page_type(tag: &ActivityVocabularyType) -> bool {
    *tag == COLLECTION_PAGE || *tag == ORDERED_COLLECTION_PAGE
}

pub fn valid_generic_type(tag: &ActivityVocabularyType) -> bool {
    GENERIC_TYPES.contains(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_type_matches_anything() {
        assert!(NIL_TYPE.matches(&[NOTE]));
        assert!(NIL_TYPE.matches(&[]));
        assert!(NOTE.matches(&[ARTICLE, NOTE]));
        assert!(!NOTE.matches(&[ARTICLE]));
        assert!(!ActivityVocabularyType::new("note").matches(&[NOTE]));
    }

    #[test]
    fn match_other() {
        let both = ActivityVocabularyTypes::new(vec![NOTE, ARTICLE]);
        let note = ActivityVocabularyTypes::from(NOTE);
        assert!(note.match_other(&both));
        assert!(!both.match_other(&note));
        assert!(ActivityVocabularyTypes::default().match_other(&note));
        assert!(both.match_other(&ActivityVocabularyTypes::default()));
    }

    #[test]
    fn object_types_fall_back_to_other_tables() {
        assert!(valid_object_type(&NOTE));
        assert!(valid_object_type(&CREATE));
        assert!(valid_object_type(&ARRIVE));
        assert!(valid_object_type(&PERSON));
        assert!(valid_object_type(&ORDERED_COLLECTION));
        assert!(valid_object_type(&OBJECT));
        assert!(!valid_object_type(&MENTION));
        assert!(!valid_object_type(&ActivityVocabularyType::new("Emoji")));
    }

    #[test]
    fn category_tables() {
        assert!(valid_activity_type(&QUESTION));
        assert!(!valid_activity_type(&NOTE));
        assert!(valid_intransitive_activity_type(&TRAVEL));
        assert!(!valid_intransitive_activity_type(&LIKE));
        assert!(valid_actor_type(&SERVICE));
        assert!(valid_link_type(&MENTION));
        assert!(valid_collection_page_type(&ORDERED_COLLECTION_PAGE));
        assert!(!valid_collection_page_type(&COLLECTION));
        assert!(valid_generic_type(&INTRANSITIVE_ACTIVITY));
    }

    #[test]
    fn primary_tag() {
        assert_eq!(ActivityVocabularyTypes::default().first(), &NIL_TYPE);
        assert_eq!(ActivityVocabularyTypes::new(vec![LIKE, NOTE]).first(), &LIKE);
    }
}
