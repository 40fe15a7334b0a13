//! Parsers - turn a raw notification buffer into a decoded value
//!
//! Parsers never fail. Whatever does not decode cleanly is degraded (lossy
//! UTF-8, JSON falling back to text) rather than reported.

use serde::{Deserialize, Serialize};

/// A profile's parse function
pub type ParseFn = fn(&[u8]) -> ParsedValue;

/// Decoded payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ParsedValue {
    Text(String),
    Json(serde_json::Value),
    Bytes(#[serde(serialize_with = "hex_bytes::serialize")] Vec<u8>),
}

impl ParsedValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

mod hex_bytes {
    use serde::Serializer;

    pub fn serialize<S>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        serializer.serialize_str(&data_encoding::HEXLOWER.encode(bytes))
    }
}

/// UTF-8 text, malformed sequences become U+FFFD
pub fn utf8_text(data: &[u8]) -> ParsedValue {
    ParsedValue::Text(String::from_utf8_lossy(data).into_owned())
}

/// JSON document, or the text itself if it is not valid JSON
pub fn json(data: &[u8]) -> ParsedValue {
    let text = String::from_utf8_lossy(data);
    match serde_json::from_str(&text) {
        Ok(value) => ParsedValue::Json(value),
        Err(_) => ParsedValue::Text(text.into_owned()),
    }
}

/// The buffer as is
pub fn raw(data: &[u8]) -> ParsedValue {
    ParsedValue::Bytes(data.to_vec())
}

/// Name of a built-in parser, as written in the profiles file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    Utf8,
    Json,
    Raw,
}

impl Default for ParserKind {
    fn default() -> Self {
        Self::Utf8
    }
}

impl ParserKind {
    pub fn parse_fn(self) -> ParseFn {
        match self {
            Self::Utf8 => utf8_text,
            Self::Json => json,
            Self::Raw => raw,
        }
    }
}
