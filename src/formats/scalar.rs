//! Raw bytes and UTF-8 text

use super::{BYTES, UTF8, unexpected};
use crate::config::Options;
use crate::error::{DecodeError, Result};
use crate::registry::{Decoder, Encoder};
use crate::types::Node;

/// Identity on byte strings
#[derive(Debug, Clone, Copy, Default)]
pub struct Bytes;

impl Encoder for Bytes {
    fn encode(&self, value: &Node, _options: &Options) -> Result<Vec<u8>> {
        match value {
            Node::Bytes(bytes) => Ok(bytes.clone()),
            other => Err(unexpected(BYTES, "bytes", other)),
        }
    }
}

impl Decoder for Bytes {
    fn decode(&self, bytes: &[u8], _options: &Options) -> Result<Node> {
        Ok(Node::Bytes(bytes.to_vec()))
    }
}

/// Text as UTF-8
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8;

impl Encoder for Utf8 {
    fn encode(&self, value: &Node, _options: &Options) -> Result<Vec<u8>> {
        match value {
            Node::String(s) => Ok(s.as_bytes().to_vec()),
            other => Err(unexpected(UTF8, "string", other)),
        }
    }
}

impl Decoder for Utf8 {
    fn decode(&self, bytes: &[u8], _options: &Options) -> Result<Node> {
        let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
        Ok(Node::String(text.to_string()))
    }
}
