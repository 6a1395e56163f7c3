//! Serialization of trees

pub mod array;
mod value;

use crate::config::TreeOptions;
use crate::error::Result;
use crate::packer;
use crate::types::{Array, Node};
use std::io::Write;
use tracing::debug;

pub(crate) use value::Substitute;

/// Write a tree to a writer
pub fn write<W: Write>(writer: &mut W, node: &Node, options: &TreeOptions) -> Result<()> {
    let value = Substitute::tagged(options).walk(node, 0)?;
    packer::write(writer, &value)
}

/// Encode a tree with default options
pub fn to_bytes(node: &Node) -> Result<Vec<u8>> {
    to_bytes_with(node, &TreeOptions::default())
}

/// Encode a tree
pub fn to_bytes_with(node: &Node, options: &TreeOptions) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write(&mut buf, node, options)?;
    debug!(
        root = ?node.tag(),
        tagging = options.tagging.name(),
        len = buf.len(),
        "encoded tree"
    );
    Ok(buf)
}

/// Pack a tree that holds no arrays, with no leaf substitution
pub fn to_bytes_plain(node: &Node, max_depth: usize) -> Result<Vec<u8>> {
    let value = Substitute::plain(max_depth).walk(node, 0)?;
    packer::pack(&value)
}

/// Encode a single array as `[type-tag, shape, data]`
pub fn array_to_bytes(arr: &Array) -> Result<Vec<u8>> {
    packer::pack(&array::pack(arr)?.into_triple_value())
}
