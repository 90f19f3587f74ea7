//! Property lists of every record, in canonical order.

use super::{Properties, PropertyReader, PropertyWriter};
use crate::activity::{Activity, IntransitiveActivity, Question};
use crate::actor::{Actor, Endpoints, PublicKey};
use crate::collection::{Collection, CollectionPage, OrderedCollection, OrderedCollectionPage};
use crate::error::{EncodeError, Result};
use crate::link::Link;
use crate::natural_language::LangRef;
use crate::object::{Object, Place, Profile, Relationship, Source, Tombstone};

impl Properties for Object {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_iri("id", &self.id)?;
        w.write_types("type", &self.kind)?;
        w.write_str("mediaType", self.media_type.as_str())?;
        w.write_natural_language("name", &self.name)?;
        w.write_natural_language("summary", &self.summary)?;
        w.write_natural_language("content", &self.content)?;
        w.write_item("attachment", self.attachment.as_ref())?;
        w.write_item("attributedTo", self.attributed_to.as_ref())?;
        w.write_items("audience", &self.audience)?;
        w.write_item("context", self.context.as_ref())?;
        w.write_item("generator", self.generator.as_ref())?;
        w.write_item("icon", self.icon.as_ref())?;
        w.write_item("image", self.image.as_ref())?;
        w.write_item("inReplyTo", self.in_reply_to.as_ref())?;
        w.write_item("location", self.location.as_ref())?;
        w.write_item("preview", self.preview.as_ref())?;
        w.write_time("published", self.published)?;
        w.write_item("replies", self.replies.as_ref())?;
        w.write_time("startTime", self.start_time)?;
        w.write_time("endTime", self.end_time)?;
        w.write_duration("duration", self.duration)?;
        w.write_items("tag", &self.tag)?;
        w.write_time("updated", self.updated)?;
        w.write_item("url", self.url.as_ref())?;
        w.write_items("to", &self.to)?;
        w.write_items("bto", &self.bto)?;
        w.write_items("cc", &self.cc)?;
        w.write_items("bcc", &self.bcc)?;
        w.write_item("likes", self.likes.as_ref())?;
        w.write_item("shares", self.shares.as_ref())?;
        w.write_record("source", &self.source)?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.id = r.read_iri("id")?;
        self.kind = r.read_types("type")?;
        self.media_type = r.read_str("mediaType")?.into();
        self.name = r.read_natural_language("name")?;
        self.summary = r.read_natural_language("summary")?;
        self.content = r.read_natural_language("content")?;
        self.attachment = r.read_item("attachment")?;
        self.attributed_to = r.read_item("attributedTo")?;
        self.audience = r.read_items("audience")?;
        self.context = r.read_item("context")?;
        self.generator = r.read_item("generator")?;
        self.icon = r.read_item("icon")?;
        self.image = r.read_item("image")?;
        self.in_reply_to = r.read_item("inReplyTo")?;
        self.location = r.read_item("location")?;
        self.preview = r.read_item("preview")?;
        self.published = r.read_time("published")?;
        self.replies = r.read_item("replies")?;
        self.start_time = r.read_time("startTime")?;
        self.end_time = r.read_time("endTime")?;
        self.duration = r.read_duration("duration")?;
        self.tag = r.read_items("tag")?;
        self.updated = r.read_time("updated")?;
        self.url = r.read_item("url")?;
        self.to = r.read_items("to")?;
        self.bto = r.read_items("bto")?;
        self.cc = r.read_items("cc")?;
        self.bcc = r.read_items("bcc")?;
        self.likes = r.read_item("likes")?;
        self.shares = r.read_item("shares")?;
        self.source = r.read_record("source")?;
        Ok(())
    }
}

impl Properties for Source {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_natural_language("content", &self.content)?;
        w.write_str("mediaType", self.media_type.as_str())?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.content = r.read_natural_language("content")?;
        self.media_type = r.read_str("mediaType")?.into();
        Ok(())
    }
}

impl Properties for Place {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_f64("accuracy", self.accuracy)?;
        w.write_f64("altitude", self.altitude)?;
        w.write_f64("latitude", self.latitude)?;
        w.write_f64("longitude", self.longitude)?;
        w.write_i64("radius", self.radius)?;
        w.write_str("units", &self.units)?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.accuracy = r.read_f64("accuracy")?;
        self.altitude = r.read_f64("altitude")?;
        self.latitude = r.read_f64("latitude")?;
        self.longitude = r.read_f64("longitude")?;
        self.radius = r.read_i64("radius")?;
        self.units = r.read_str("units")?;
        Ok(())
    }
}

impl Properties for Profile {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_item("describes", self.describes.as_ref())?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.describes = r.read_item("describes")?;
        Ok(())
    }
}

impl Properties for Relationship {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_item("subject", self.subject.as_ref())?;
        w.write_item("object", self.object.as_ref())?;
        w.write_item("relationship", self.relationship.as_ref())?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.subject = r.read_item("subject")?;
        self.object = r.read_item("object")?;
        self.relationship = r.read_item("relationship")?;
        Ok(())
    }
}

impl Properties for Tombstone {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_types("formerType", &self.former_type)?;
        w.write_time("deleted", self.deleted)?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.former_type = r.read_types("formerType")?;
        self.deleted = r.read_time("deleted")?;
        Ok(())
    }
}

impl Properties for Link {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_iri("id", &self.id)?;
        w.write_types("type", &self.kind)?;
        w.write_str("mediaType", self.media_type.as_str())?;
        w.write_natural_language("name", &self.name)?;
        w.write_iri("href", &self.href)?;
        w.write_iri("rel", &self.rel)?;
        w.write_str("hreflang", self.hreflang.as_ref().map_or("", |l| l.as_str()))?;
        w.write_u64("height", self.height)?;
        w.write_u64("width", self.width)?;
        w.write_item("preview", self.preview.as_ref())?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.id = r.read_iri("id")?;
        self.kind = r.read_types("type")?;
        self.media_type = r.read_str("mediaType")?.into();
        self.name = r.read_natural_language("name")?;
        self.href = r.read_iri("href")?;
        self.rel = r.read_iri("rel")?;
        let hreflang = r.read_str("hreflang")?;
        self.hreflang = (!hreflang.is_empty()).then(|| LangRef::new(&hreflang));
        self.height = r.read_u64("height")?;
        self.width = r.read_u64("width")?;
        self.preview = r.read_item("preview")?;
        Ok(())
    }
}

impl Properties for Activity {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_item("actor", self.actor.as_ref())?;
        w.write_item("object", self.object.as_ref())?;
        w.write_item("target", self.target.as_ref())?;
        w.write_item("result", self.result.as_ref())?;
        w.write_item("origin", self.origin.as_ref())?;
        w.write_item("instrument", self.instrument.as_ref())?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.actor = r.read_item("actor")?;
        self.object = r.read_item("object")?;
        self.target = r.read_item("target")?;
        self.result = r.read_item("result")?;
        self.origin = r.read_item("origin")?;
        self.instrument = r.read_item("instrument")?;
        Ok(())
    }
}

impl Properties for IntransitiveActivity {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_item("actor", self.actor.as_ref())?;
        w.write_item("target", self.target.as_ref())?;
        w.write_item("result", self.result.as_ref())?;
        w.write_item("origin", self.origin.as_ref())?;
        w.write_item("instrument", self.instrument.as_ref())?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.actor = r.read_item("actor")?;
        self.target = r.read_item("target")?;
        self.result = r.read_item("result")?;
        self.origin = r.read_item("origin")?;
        self.instrument = r.read_item("instrument")?;
        Ok(())
    }
}

impl Properties for Question {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_items("oneOf", &self.one_of)?;
        w.write_items("anyOf", &self.any_of)?;
        w.write_bool("closed", self.closed)?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.one_of = r.read_items("oneOf")?;
        self.any_of = r.read_items("anyOf")?;
        self.closed = r.read_bool("closed")?;
        Ok(())
    }
}

impl Properties for Actor {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_item("inbox", self.inbox.as_ref())?;
        w.write_item("outbox", self.outbox.as_ref())?;
        w.write_item("following", self.following.as_ref())?;
        w.write_item("followers", self.followers.as_ref())?;
        w.write_item("liked", self.liked.as_ref())?;
        w.write_natural_language("preferredUsername", &self.preferred_username)?;
        w.write_record("endpoints", &self.endpoints)?;
        w.write_items("streams", &self.streams)?;
        w.write_record("publicKey", &self.public_key)?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.inbox = r.read_item("inbox")?;
        self.outbox = r.read_item("outbox")?;
        self.following = r.read_item("following")?;
        self.followers = r.read_item("followers")?;
        self.liked = r.read_item("liked")?;
        self.preferred_username = r.read_natural_language("preferredUsername")?;
        self.endpoints = r.read_record("endpoints")?;
        self.streams = r.read_items("streams")?;
        self.public_key = r.read_record("publicKey")?;
        Ok(())
    }
}

impl Properties for Endpoints {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_item("uploadMedia", self.upload_media.as_ref())?;
        w.write_item(
            "oauthAuthorizationEndpoint",
            self.oauth_authorization_endpoint.as_ref(),
        )?;
        w.write_item("oauthTokenEndpoint", self.oauth_token_endpoint.as_ref())?;
        w.write_item("provideClientKey", self.provide_client_key.as_ref())?;
        w.write_item("signClientKey", self.sign_client_key.as_ref())?;
        w.write_item("sharedInbox", self.shared_inbox.as_ref())?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.upload_media = r.read_item("uploadMedia")?;
        self.oauth_authorization_endpoint = r.read_item("oauthAuthorizationEndpoint")?;
        self.oauth_token_endpoint = r.read_item("oauthTokenEndpoint")?;
        self.provide_client_key = r.read_item("provideClientKey")?;
        self.sign_client_key = r.read_item("signClientKey")?;
        self.shared_inbox = r.read_item("sharedInbox")?;
        Ok(())
    }
}

impl Properties for PublicKey {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        w.write_iri("id", &self.id)?;
        w.write_iri("owner", &self.owner)?;
        w.write_str("publicKeyPem", &self.public_key_pem)?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.id = r.read_iri("id")?;
        self.owner = r.read_iri("owner")?;
        self.public_key_pem = r.read_str("publicKeyPem")?;
        Ok(())
    }
}

impl Properties for Collection {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_item("current", self.current.as_ref())?;
        w.write_item("first", self.first.as_ref())?;
        w.write_item("last", self.last.as_ref())?;
        w.write_count("totalItems", self.total_items)?;
        w.write_items("items", &self.items)?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.current = r.read_item("current")?;
        self.first = r.read_item("first")?;
        self.last = r.read_item("last")?;
        self.total_items = r.read_u64("totalItems")?;
        self.items = r.read_items("items")?;
        Ok(())
    }
}

impl Properties for OrderedCollection {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_item("current", self.current.as_ref())?;
        w.write_item("first", self.first.as_ref())?;
        w.write_item("last", self.last.as_ref())?;
        w.write_count("totalItems", self.total_items)?;
        w.write_items("orderedItems", &self.ordered_items)?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.current = r.read_item("current")?;
        self.first = r.read_item("first")?;
        self.last = r.read_item("last")?;
        self.total_items = r.read_u64("totalItems")?;
        self.ordered_items = r.read_items("orderedItems")?;
        Ok(())
    }
}

impl Properties for CollectionPage {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_item("partOf", self.part_of.as_ref())?;
        w.write_item("next", self.next.as_ref())?;
        w.write_item("prev", self.prev.as_ref())?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.part_of = r.read_item("partOf")?;
        self.next = r.read_item("next")?;
        self.prev = r.read_item("prev")?;
        Ok(())
    }
}

impl Properties for OrderedCollectionPage {
    fn write_properties<W: PropertyWriter>(&self, w: &mut W) -> Result<(), EncodeError> {
        self.base.write_properties(w)?;
        w.write_item("partOf", self.part_of.as_ref())?;
        w.write_item("next", self.next.as_ref())?;
        w.write_item("prev", self.prev.as_ref())?;
        w.write_u64("startIndex", self.start_index)?;
        Ok(())
    }

    fn read_properties<R: PropertyReader>(&mut self, r: &R) -> Result<()> {
        self.base.read_properties(r)?;
        self.part_of = r.read_item("partOf")?;
        self.next = r.read_item("next")?;
        self.prev = r.read_item("prev")?;
        self.start_index = r.read_u64("startIndex")?;
        Ok(())
    }
}
