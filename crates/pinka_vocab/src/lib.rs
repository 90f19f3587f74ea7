//! ActivityStreams object model with a JSON text codec and a compact CBOR
//! property map codec.
//!
//! Every addressable entity is an [`Item`]. Records are decoded by reading
//! their `type` and asking the [factory](new_from_types) for an empty record
//! of the right shape, then filling it property by property. Unknown types,
//! unknown properties and missing properties never fail a decode.

#[macro_use]
mod object;

mod activity;
mod actor;
pub mod codec;
mod collection;
mod duration;
mod error;
mod factory;
mod iri;
mod item;
mod item_collection;
mod link;
mod natural_language;
pub mod types;

pub use self::activity::{Activity, IntransitiveActivity, Question};
pub use self::actor::{Actor, Endpoints, PublicKey};
pub use self::codec::{decode_binary, decode_text, encode_binary, encode_text, encode_text_document};
pub use self::collection::{Collection, CollectionPage, OrderedCollection, OrderedCollectionPage};
pub use self::duration::{decode_duration, encode_duration};
pub use self::error::{DecodeError, EncodeError, Result};
pub use self::factory::{new_from_type, new_from_types};
pub use self::iri::{Id, Iri, Iris, PUBLIC_NS};
pub use self::item::{Item, items_equal};
pub use self::item_collection::{ItemCollection, item_collection_deduplication};
pub use self::link::Link;
pub use self::natural_language::{
    LangRef, LangRefValue, MimeType, NIL_LANG_REF, NaturalLanguageValues,
};
pub use self::object::{AsObject, Object, Place, Profile, Relationship, Source, Tombstone};
pub use self::types::{ActivityVocabularyType, ActivityVocabularyTypes};
