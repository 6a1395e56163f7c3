//! Structured formats: the array envelope, the tree codec and plain packing

use super::{ARRAY, unexpected};
use crate::config::{Options, TreeOptions};
use crate::error::Result;
use crate::parser;
use crate::registry::{Decoder, Encoder};
use crate::types::Node;
use crate::writer;

/// Nested nodes with embedded arrays
///
/// Options: `tagging` (`"sentinel"` or `"extension"`) and `max_depth`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tree;

impl Encoder for Tree {
    fn encode(&self, value: &Node, options: &Options) -> Result<Vec<u8>> {
        writer::to_bytes_with(value, &TreeOptions::from_options(options)?)
    }
}

impl Decoder for Tree {
    fn decode(&self, bytes: &[u8], options: &Options) -> Result<Node> {
        parser::parse_with(bytes, &TreeOptions::from_options(options)?)
    }
}

/// A single array as `[type-tag, shape, data]`
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayFormat;

impl Encoder for ArrayFormat {
    fn encode(&self, value: &Node, _options: &Options) -> Result<Vec<u8>> {
        match value {
            Node::Array(arr) => writer::array_to_bytes(arr),
            other => Err(unexpected(ARRAY, "array", other)),
        }
    }
}

impl Decoder for ArrayFormat {
    fn decode(&self, bytes: &[u8], _options: &Options) -> Result<Node> {
        Ok(Node::Array(parser::parse_array(bytes)?))
    }
}

/// Direct MessagePack packing, without array leaves
///
/// Honors `max_depth`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredObject;

impl Encoder for StructuredObject {
    fn encode(&self, value: &Node, options: &Options) -> Result<Vec<u8>> {
        let max_depth = TreeOptions::from_options(options)?.max_depth;
        writer::to_bytes_plain(value, max_depth)
    }
}

impl Decoder for StructuredObject {
    fn decode(&self, bytes: &[u8], options: &Options) -> Result<Node> {
        let max_depth = TreeOptions::from_options(options)?.max_depth;
        parser::parse_plain(bytes, max_depth)
    }
}
