//! Error types for decoding, encoding and converting items.

use thiserror::Error;

/// Error while reading an item graph from either wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Malformed JSON text or CBOR envelope.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// A polymorphic value matched none of the known item shapes.
    #[error("property {property} does not hold a known item shape")]
    UnknownItemShape { property: String },

    /// The factory has no constructor for this type tag.
    #[error("no matching type for {0:?}")]
    NoMatchingType(String),

    /// A checked conversion found an incompatible variant.
    #[error("invalid type: expected {expected}, found {found}")]
    InvalidType {
        expected: &'static str,
        found: String,
    },
}

impl DecodeError {
    pub(crate) fn unknown_shape(property: impl Into<String>) -> DecodeError {
        DecodeError::UnknownItemShape {
            property: property.into(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        DecodeError::Syntax(value.to_string())
    }
}

impl From<minicbor::decode::Error> for DecodeError {
    fn from(value: minicbor::decode::Error) -> Self {
        DecodeError::Syntax(value.to_string())
    }
}

/// Error while writing an item graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("property {property} holds a non-finite number")]
    NonFiniteNumber { property: &'static str },

    #[error("binary encoding failed: {0}")]
    Binary(String),
}

impl<E: std::fmt::Display> From<minicbor::encode::Error<E>> for EncodeError {
    fn from(value: minicbor::encode::Error<E>) -> Self {
        EncodeError::Binary(value.to_string())
    }
}

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;
