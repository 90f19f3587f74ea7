//! Collections and collection pages.
//!
//! Ordered and unordered collections have the same properties but keep
//! their items under different names. Converting between the two copies
//! fields by name and swaps the type tag.

use crate::iri::Iri;
use crate::item::Item;
use crate::item_collection::ItemCollection;
use crate::object::Object;
use crate::types::{
    ActivityVocabularyType, ActivityVocabularyTypes, COLLECTION, COLLECTION_PAGE,
    ORDERED_COLLECTION, ORDERED_COLLECTION_PAGE,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub base: Object,
    pub current: Option<Item>,
    pub first: Option<Item>,
    pub last: Option<Item>,
    pub total_items: u64,
    pub items: ItemCollection,
}

impl Collection {
    pub fn new(id: impl Into<Iri>) -> Collection {
        Collection {
            base: Object::new(id, COLLECTION),
            ..Default::default()
        }
    }

    /// Adds items not yet present and keeps `totalItems` in step.
    pub fn append(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.append(items);
        self.total_items = self.items.len() as u64;
    }
}

impl_as_object!(Collection, base);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedCollection {
    pub base: Object,
    pub current: Option<Item>,
    pub first: Option<Item>,
    pub last: Option<Item>,
    pub total_items: u64,
    pub ordered_items: ItemCollection,
}

impl OrderedCollection {
    pub fn new(id: impl Into<Iri>) -> OrderedCollection {
        OrderedCollection {
            base: Object::new(id, ORDERED_COLLECTION),
            ..Default::default()
        }
    }

    pub fn append(&mut self, items: impl IntoIterator<Item = Item>) {
        self.ordered_items.append(items);
        self.total_items = self.ordered_items.len() as u64;
    }

    pub fn clean(&mut self) {
        self.base.clean();
    }
}

impl_as_object!(OrderedCollection, base);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionPage {
    pub base: Collection,
    pub part_of: Option<Item>,
    pub next: Option<Item>,
    pub prev: Option<Item>,
}

impl CollectionPage {
    pub fn new(id: impl Into<Iri>) -> CollectionPage {
        CollectionPage {
            base: Collection {
                base: Object::new(id, COLLECTION_PAGE),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl_as_object!(CollectionPage, base.base);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedCollectionPage {
    pub base: OrderedCollection,
    pub part_of: Option<Item>,
    pub next: Option<Item>,
    pub prev: Option<Item>,
    pub start_index: u64,
}

impl OrderedCollectionPage {
    pub fn new(id: impl Into<Iri>) -> OrderedCollectionPage {
        OrderedCollectionPage {
            base: OrderedCollection {
                base: Object::new(id, ORDERED_COLLECTION_PAGE),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl_as_object!(OrderedCollectionPage, base.base);

/// Replaces `from` by `to` in the tag list, leaving extension tags alone.
fn swap_type(
    kind: ActivityVocabularyTypes,
    from: &ActivityVocabularyType,
    to: ActivityVocabularyType,
) -> ActivityVocabularyTypes {
    kind.iter()
        .map(|t| if t == from { to.clone() } else { t.clone() })
        .collect()
}

impl From<Collection> for OrderedCollection {
    fn from(value: Collection) -> Self {
        let mut base = value.base;
        base.kind = swap_type(base.kind, &COLLECTION, ORDERED_COLLECTION);
        OrderedCollection {
            base,
            current: value.current,
            first: value.first,
            last: value.last,
            total_items: value.total_items,
            ordered_items: value.items,
        }
    }
}

impl From<OrderedCollection> for Collection {
    fn from(value: OrderedCollection) -> Self {
        let mut base = value.base;
        base.kind = swap_type(base.kind, &ORDERED_COLLECTION, COLLECTION);
        Collection {
            base,
            current: value.current,
            first: value.first,
            last: value.last,
            total_items: value.total_items,
            items: value.ordered_items,
        }
    }
}

impl From<CollectionPage> for OrderedCollectionPage {
    fn from(value: CollectionPage) -> Self {
        let mut base = OrderedCollection::from(value.base);
        base.base.kind = swap_type(base.base.kind, &COLLECTION_PAGE, ORDERED_COLLECTION_PAGE);
        OrderedCollectionPage {
            base,
            part_of: value.part_of,
            next: value.next,
            prev: value.prev,
            start_index: 0,
        }
    }
}

impl From<OrderedCollectionPage> for CollectionPage {
    fn from(value: OrderedCollectionPage) -> Self {
        let mut base = Collection::from(value.base);
        base.base.kind = swap_type(base.base.kind, &ORDERED_COLLECTION_PAGE, COLLECTION_PAGE);
        CollectionPage {
            base,
            part_of: value.part_of,
            next: value.next,
            prev: value.prev,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::item::Item;
    use crate::types::{COLLECTION, COLLECTION_PAGE, ORDERED_COLLECTION, ORDERED_COLLECTION_PAGE};

    use super::{Collection, CollectionPage, OrderedCollection, OrderedCollectionPage};

    #[test]
    fn append_tracks_total_items() {
        let mut outbox = OrderedCollection::new("https://example.com/users/john/outbox");
        outbox.append([
            Item::Iri("https://example.com/activities/1".into()),
            Item::Iri("https://example.com/activities/2".into()),
            Item::Iri("https://example.com/activities/1".into()),
        ]);
        assert_eq!(outbox.total_items, 2);
    }

    #[test]
    fn convert_collection_to_ordered() {
        let mut followers = Collection::new("https://example.com/users/john/followers");
        followers.append([Item::Iri("https://example.com/users/jane".into())]);
        let ordered = OrderedCollection::from(followers.clone());
        assert_eq!(ordered.base.kind.first(), &ORDERED_COLLECTION);
        assert_eq!(ordered.ordered_items, followers.items);
        assert_eq!(ordered.total_items, 1);

        let back = Collection::from(ordered);
        assert_eq!(back.base.kind.first(), &COLLECTION);
        assert_eq!(back, followers);
    }

    #[test]
    fn convert_pages() {
        let mut page = CollectionPage::new("https://example.com/c?page=1");
        page.next = Some(Item::Iri("https://example.com/c?page=2".into()));
        let ordered = OrderedCollectionPage::from(page.clone());
        assert_eq!(ordered.base.base.kind.first(), &ORDERED_COLLECTION_PAGE);
        assert_eq!(ordered.next, page.next);
        assert_eq!(CollectionPage::from(ordered).base.base.kind.first(), &COLLECTION_PAGE);
    }
}
