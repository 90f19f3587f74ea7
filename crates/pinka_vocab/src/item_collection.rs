//! Ordered lists of items and the set operations used for addressing.

use std::collections::HashSet;
use std::ops::Deref;

use crate::iri::{Iri, Iris};
use crate::item::{Item, items_equal};

/// An ordered list of items. It is an item itself, reporting the
/// `ItemCollection` sentinel tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCollection(Vec<Item>);

impl ItemCollection {
    pub fn new() -> ItemCollection {
        ItemCollection(vec![])
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.0.iter().any(|it| items_equal(Some(it), Some(item)))
    }

    /// Set semantics: items already contained are skipped.
    pub fn append(&mut self, items: impl IntoIterator<Item = Item>) {
        for item in items {
            if !self.contains(&item) {
                self.0.push(item);
            }
        }
    }

    /// Removes the first match of every target. Absent targets are ignored.
    pub fn remove<'a>(&mut self, items: impl IntoIterator<Item = &'a Item>) {
        for target in items {
            if let Some(idx) = self
                .0
                .iter()
                .position(|it| items_equal(Some(it), Some(target)))
            {
                self.0.remove(idx);
            }
        }
    }

    /// Same cardinality and every member found in `other`, in any order.
    pub fn equals(&self, other: &ItemCollection) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|it| other.contains(it))
    }

    pub fn first(&self) -> Option<&Item> {
        self.0.first()
    }

    /// References of every member.
    pub fn iris(&self) -> Iris {
        self.0.iter().map(Item::link).collect()
    }

    /// Empty collections vanish and singletons collapse to their only item.
    pub fn normalize(mut self) -> Option<Item> {
        match self.0.len() {
            0 => None,
            1 => self.0.pop(),
            _ => Some(Item::ItemCollection(self)),
        }
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&Item) -> bool) {
        self.0.retain(f);
    }
}

impl Deref for ItemCollection {
    type Target = [Item];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Item> for ItemCollection {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        ItemCollection(iter.into_iter().collect())
    }
}

impl IntoIterator for ItemCollection {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ItemCollection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Item>> for ItemCollection {
    fn from(value: Vec<Item>) -> Self {
        ItemCollection(value)
    }
}

impl From<Iris> for ItemCollection {
    fn from(value: Iris) -> Self {
        value.into_iter().map(Item::Iri).collect()
    }
}

impl From<&ItemCollection> for Iris {
    fn from(value: &ItemCollection) -> Self {
        value.iris()
    }
}

/// Merges addressing lists (conventionally to, cc, bto, bcc, audience) into
/// one duplicate free list of references, in first seen order.
///
/// The lists are modified in place: the first list is left untouched, and
/// every later list loses the entries whose reference was already seen in
/// an earlier list or earlier in itself. The first list to name a
/// recipient keeps it.
pub fn item_collection_deduplication(lists: &mut [&mut ItemCollection]) -> ItemCollection {
    let mut seen: HashSet<Iri> = HashSet::new();
    let mut merged = ItemCollection::new();
    for (idx, list) in lists.iter_mut().enumerate() {
        if idx == 0 {
            for item in list.iter() {
                let iri = item.link();
                if !iri.is_empty() && seen.insert(iri.clone()) {
                    merged.0.push(Item::Iri(iri));
                }
            }
            continue;
        }
        list.retain(|item| {
            let iri = item.link();
            if iri.is_empty() {
                return true;
            }
            if seen.contains(&iri) {
                return false;
            }
            seen.insert(iri.clone());
            merged.0.push(Item::Iri(iri));
            true
        });
    }
    merged
}

#[cfg(test)]
mod tests {
    use crate::item::Item;
    use crate::object::Object;
    use crate::types::{NOTE, PERSON};

    use super::{ItemCollection, item_collection_deduplication};

    fn iri(s: &str) -> Item {
        Item::Iri(s.into())
    }

    fn list(items: &[&str]) -> ItemCollection {
        items.iter().map(|s| iri(s)).collect()
    }

    #[test]
    fn dedup_first_list_wins() {
        let mut first = list(&["https://a", "https://b"]);
        let mut second = list(&["https://c", "https://b"]);
        let merged = item_collection_deduplication(&mut [&mut first, &mut second]);
        assert_eq!(merged, list(&["https://a", "https://b", "https://c"]));
        assert_eq!(first, list(&["https://a", "https://b"]));
        assert_eq!(second, list(&["https://c"]));
    }

    #[test]
    fn dedup_resolves_embedded_objects() {
        let mut to = ItemCollection::from(vec![Item::from(Object::new("https://a", PERSON))]);
        let mut cc = list(&["https://a", "https://d", "https://d"]);
        let mut bcc = ItemCollection::new();
        let merged = item_collection_deduplication(&mut [&mut to, &mut cc, &mut bcc]);
        assert_eq!(merged, list(&["https://a", "https://d"]));
        assert_eq!(to.len(), 1);
        assert_eq!(cc, list(&["https://d"]));
    }

    #[test]
    fn equality_is_order_independent() {
        let ab = list(&["https://a", "https://b"]);
        let ba = list(&["https://b", "https://a"]);
        assert!(ab.equals(&ba));
        assert!(!ab.equals(&list(&["https://a"])));
        assert!(!ab.equals(&list(&["https://a", "https://c"])));
    }

    #[test]
    fn append_has_set_semantics() {
        let mut items = list(&["https://a"]);
        items.append([iri("https://a"), iri("https://b")]);
        assert_eq!(items, list(&["https://a", "https://b"]));
    }

    #[test]
    fn remove_first_match_only() {
        let mut items = ItemCollection::from(vec![
            iri("https://a"),
            iri("https://b"),
            iri("https://a"),
        ]);
        items.remove([&iri("https://a")]);
        assert_eq!(items, list(&["https://b", "https://a"]));

        items.remove([&iri("https://missing")]);
        assert_eq!(items, list(&["https://b", "https://a"]));
    }

    #[test]
    fn contains_matches_by_id_and_type() {
        let items = ItemCollection::from(vec![Item::from(Object::new("https://n/1", NOTE))]);
        assert!(items.contains(&Item::from(Object::new("https://n/1", NOTE))));
        assert!(!items.contains(&iri("https://n/1")));
        assert!(!items.contains(&Item::from(Object::new("https://n/2", NOTE))));
    }

    #[test]
    fn normalize() {
        assert_eq!(ItemCollection::new().normalize(), None);
        assert_eq!(list(&["https://a"]).normalize(), Some(iri("https://a")));
        assert_eq!(
            list(&["https://a", "https://b"]).normalize(),
            Some(Item::ItemCollection(list(&["https://a", "https://b"])))
        );
    }

    #[test]
    fn iris_round_trip() {
        let items = ItemCollection::from(vec![
            Item::from(Object::new("https://a", NOTE)),
            iri("https://b"),
        ]);
        let iris = items.iris();
        assert_eq!(ItemCollection::from(iris), list(&["https://a", "https://b"]));
    }
}
