use crate::iri::{Id, Iri};
use crate::item::Item;
use crate::item_collection::ItemCollection;
use crate::natural_language::NaturalLanguageValues;
use crate::object::Object;
use crate::types::ActivityVocabularyType;

/// Application, Group, Organization, Person and Service share this record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Actor {
    pub base: Object,
    pub inbox: Option<Item>,
    pub outbox: Option<Item>,
    pub following: Option<Item>,
    pub followers: Option<Item>,
    pub liked: Option<Item>,
    pub preferred_username: NaturalLanguageValues,
    pub endpoints: Endpoints,
    pub streams: ItemCollection,
    pub public_key: PublicKey,
}

impl Actor {
    pub fn new(id: impl Into<Iri>, kind: ActivityVocabularyType) -> Actor {
        Actor {
            base: Object::new(id, kind),
            ..Default::default()
        }
    }

    /// Fills the conventional collection endpoints below the actor's id.
    pub fn with_default_collections(mut self) -> Actor {
        let id = self.base.id.clone();
        if id.is_empty() {
            return self;
        }
        for (slot, path) in [
            (&mut self.inbox, "inbox"),
            (&mut self.outbox, "outbox"),
            (&mut self.followers, "followers"),
            (&mut self.following, "following"),
        ] {
            if slot.is_none() {
                *slot = Some(Item::Iri(id.add_path(path)));
            }
        }
        self
    }
}

impl_as_object!(Actor, base);

/// Server endpoints that are useful for this actor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Endpoints {
    pub upload_media: Option<Item>,
    pub oauth_authorization_endpoint: Option<Item>,
    pub oauth_token_endpoint: Option<Item>,
    pub provide_client_key: Option<Item>,
    pub sign_client_key: Option<Item>,
    pub shared_inbox: Option<Item>,
}

impl Endpoints {
    pub fn is_empty(&self) -> bool {
        self.upload_media.is_none()
            && self.oauth_authorization_endpoint.is_none()
            && self.oauth_token_endpoint.is_none()
            && self.provide_client_key.is_none()
            && self.sign_client_key.is_none()
            && self.shared_inbox.is_none()
    }
}

/// Key used to verify the actor's HTTP signatures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicKey {
    pub id: Id,
    pub owner: Iri,
    pub public_key_pem: String,
}

impl PublicKey {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.owner.is_empty() && self.public_key_pem.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::item::Item;
    use crate::types::PERSON;

    use super::Actor;

    #[test]
    fn default_collections() {
        let mut actor = Actor::new("https://social.example.com/users/john", PERSON);
        actor.outbox = Some(Item::Iri("https://social.example.com/outbox/john".into()));
        let actor = actor.with_default_collections();
        assert_eq!(
            actor.inbox,
            Some(Item::Iri("https://social.example.com/users/john/inbox".into()))
        );
        assert_eq!(
            actor.outbox,
            Some(Item::Iri("https://social.example.com/outbox/john".into()))
        );
        assert_eq!(
            actor.followers,
            Some(Item::Iri("https://social.example.com/users/john/followers".into()))
        );
    }
}
