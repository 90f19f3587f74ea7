use crate::iri::{Id, Iri};
use crate::item::Item;
use crate::natural_language::{LangRef, MimeType, NaturalLanguageValues};
use crate::types::{ActivityVocabularyType, ActivityVocabularyTypes, LINK, MENTION};

/// A qualified reference to a resource. Mention shares this record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub id: Id,
    pub kind: ActivityVocabularyTypes,
    pub media_type: MimeType,
    pub name: NaturalLanguageValues,
    pub hreflang: Option<LangRef>,
    pub height: u64,
    pub width: u64,
    pub preview: Option<Item>,
    pub href: Iri,
    pub rel: Iri,
}

impl Link {
    pub fn new(id: impl Into<Iri>, kind: ActivityVocabularyType) -> Link {
        Link {
            id: id.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Anonymous link pointing at `href`.
    pub fn to(href: impl Into<Iri>) -> Link {
        Link {
            href: href.into(),
            ..Link::new(Iri::empty(), LINK)
        }
    }

    pub fn mention(href: impl Into<Iri>, name: &str) -> Link {
        Link {
            href: href.into(),
            name: NaturalLanguageValues::plain(name),
            ..Link::new(Iri::empty(), MENTION)
        }
    }

    /// The reference this link resolves to: its id, or its target when it
    /// has none.
    pub fn resolved(&self) -> &Iri {
        if self.id.is_empty() { &self.href } else { &self.id }
    }
}
