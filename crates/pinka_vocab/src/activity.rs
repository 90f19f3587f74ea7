//! Activities: transitive verbs, intransitive verbs and questions.

use crate::iri::Iri;
use crate::item::Item;
use crate::item_collection::ItemCollection;
use crate::object::Object;
use crate::types::{ActivityVocabularyType, QUESTION};

/// Transitive activity. Every verb from `Accept` to `View` shares this
/// record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activity {
    pub base: Object,
    /// An actor, a reference, or a collection of either.
    pub actor: Option<Item>,
    pub object: Option<Item>,
    pub target: Option<Item>,
    pub result: Option<Item>,
    pub origin: Option<Item>,
    pub instrument: Option<Item>,
}

impl Activity {
    pub fn new(id: impl Into<Iri>, kind: ActivityVocabularyType) -> Activity {
        Activity {
            base: Object::new(id, kind),
            ..Default::default()
        }
    }

    /// Replaces embedded actor, object and target with their references.
    pub fn flatten(mut self) -> Activity {
        self.actor = self.actor.map(flatten_property);
        self.object = self.object.map(flatten_property);
        self.target = self.target.map(flatten_property);
        self
    }
}

impl_as_object!(Activity, base);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntransitiveActivity {
    pub base: Object,
    pub actor: Option<Item>,
    pub target: Option<Item>,
    pub result: Option<Item>,
    pub origin: Option<Item>,
    pub instrument: Option<Item>,
}

impl IntransitiveActivity {
    pub fn new(id: impl Into<Iri>, kind: ActivityVocabularyType) -> IntransitiveActivity {
        IntransitiveActivity {
            base: Object::new(id, kind),
            ..Default::default()
        }
    }

    pub fn flatten(mut self) -> IntransitiveActivity {
        self.actor = self.actor.map(flatten_property);
        self.target = self.target.map(flatten_property);
        self
    }
}

impl_as_object!(IntransitiveActivity, base);

/// An intransitive activity with a set of exclusive or inclusive answers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Question {
    pub base: IntransitiveActivity,
    pub one_of: ItemCollection,
    pub any_of: ItemCollection,
    pub closed: bool,
}

impl Question {
    pub fn new(id: impl Into<Iri>) -> Question {
        Question {
            base: IntransitiveActivity::new(id, QUESTION),
            ..Default::default()
        }
    }

    pub fn flatten(mut self) -> Question {
        self.base = self.base.flatten();
        self
    }
}

impl_as_object!(Question, base.base);

impl From<IntransitiveActivity> for Activity {
    fn from(value: IntransitiveActivity) -> Self {
        Activity {
            base: value.base,
            actor: value.actor,
            object: None,
            target: value.target,
            result: value.result,
            origin: value.origin,
            instrument: value.instrument,
        }
    }
}

impl From<Question> for IntransitiveActivity {
    fn from(value: Question) -> Self {
        value.base
    }
}

/// An identified object collapses to its reference. Anonymous activities
/// stay embedded but get their own properties flattened.
pub(crate) fn flatten_property(item: Item) -> Item {
    match item {
        Item::Iri(_) => item,
        Item::ItemCollection(items) => {
            Item::ItemCollection(items.into_iter().map(flatten_property).collect())
        }
        item if !item.id().is_empty() => Item::Iri(item.id().clone()),
        Item::Activity(a) => Item::from(a.flatten()),
        Item::IntransitiveActivity(a) => Item::from(a.flatten()),
        Item::Question(q) => Item::from(q.flatten()),
        item => item,
    }
}
