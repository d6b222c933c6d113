//! Text serialization formats used to render scrubbed values.
//!
//! The scrubber needs two things from a format: encoding a value to bytes,
//! and decoding bytes into a fresh value (the clone used by
//! [`Scrubber::scrub_cloned`](crate::Scrubber::scrub_cloned)). Record
//! notation is provided by [`JsonCodec`], tag notation by `XmlCodec` behind
//! the `xml` feature. Other formats implement [`Codec`] themselves.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::CodecError;

/// Family of a text format, which decides its canonical empty rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Record notation (JSON).
    Record,
    /// Tag notation (XML-like).
    Tag,
}

impl Format {
    /// Rendering of "no value": `null` for record notation, nothing for tags.
    #[must_use]
    pub const fn empty_text(self) -> &'static str {
        match self {
            Self::Record => "null",
            Self::Tag => "",
        }
    }
}

/// Encodes values to text and decodes them back.
pub trait Codec {
    fn format(&self) -> Format;

    /// Serializes `value` to UTF-8 bytes.
    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, CodecError>
    where
        T: Serialize + ?Sized;

    /// Builds a new value from bytes produced by [`Codec::encode`].
    fn decode<T>(&self, bytes: &[u8]) -> Result<T, CodecError>
    where
        T: DeserializeOwned;
}

impl<C> Codec for &C
where
    C: Codec + ?Sized,
{
    fn format(&self) -> Format {
        (**self).format()
    }

    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, CodecError>
    where
        T: Serialize + ?Sized,
    {
        (**self).encode(value)
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T, CodecError>
    where
        T: DeserializeOwned,
    {
        (**self).decode(bytes)
    }
}

/// Record-notation codec backed by serde_json.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Compact output, no insignificant whitespace.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented, human-readable output.
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Record
    }

    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, CodecError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(bytes)
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T, CodecError>
    where
        T: DeserializeOwned,
    {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Tag-notation codec backed by quick-xml.
///
/// The root element is named after the serialized type, so only structs,
/// enums and maps can be encoded at the top level.
#[cfg(feature = "xml")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct XmlCodec;

#[cfg(feature = "xml")]
impl Codec for XmlCodec {
    fn format(&self) -> Format {
        Format::Tag
    }

    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, CodecError>
    where
        T: Serialize + ?Sized,
    {
        Ok(quick_xml::se::to_string(value)?.into_bytes())
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T, CodecError>
    where
        T: DeserializeOwned,
    {
        let text = std::str::from_utf8(bytes).map_err(CodecError::custom)?;
        Ok(quick_xml::de::from_str(text)?)
    }
}
