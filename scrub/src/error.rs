//! Error types for scrubbing and codecs.

use std::{error::Error as StdError, string::FromUtf8Error};

use thiserror::Error;

use crate::codec::Format;

/// Failure reported by a [`Codec`](crate::Codec).
#[derive(Debug, Error)]
pub enum CodecError {
    /// serde_json failed to encode or decode.
    #[error("json codec failed: {0}")]
    Json(#[from] serde_json::Error),

    /// quick-xml failed to encode.
    #[cfg(feature = "xml")]
    #[error("xml codec failed to encode: {0}")]
    XmlEncode(#[from] quick_xml::se::SeError),

    /// quick-xml failed to decode.
    #[cfg(feature = "xml")]
    #[error("xml codec failed to decode: {0}")]
    XmlDecode(#[from] quick_xml::de::DeError),

    /// Failure from a codec implemented outside this crate.
    #[error("codec failed: {0}")]
    Custom(#[source] Box<dyn StdError + Send + Sync>),
}

impl CodecError {
    /// Wraps an error raised by a third-party codec.
    pub fn custom<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Custom(error.into())
    }
}

/// Why a scrubbed rendering could not be produced.
///
/// Walking and masking never fail; only missing input and codec failures do.
#[derive(Debug, Error)]
pub enum ScrubError {
    /// The target (or the receptacle for its clone) was absent.
    #[error("nothing to scrub: input is absent")]
    EmptyInput,

    /// Serializing a value failed.
    #[error("failed to encode value: {0}")]
    Encode(#[source] CodecError),

    /// Populating the clone from the encoded original failed.
    #[error("failed to decode clone: {0}")]
    Decode(#[source] CodecError),

    /// The codec produced bytes that are not valid UTF-8.
    #[error("encoded output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl ScrubError {
    /// The text returned in place of a rendering by the sentinel-style entry
    /// points: the format's canonical empty value.
    #[must_use]
    pub fn fallback_text(&self, format: Format) -> &'static str {
        format.empty_text()
    }
}
