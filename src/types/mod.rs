//! Core types for tree encoding

mod array;
mod dtype;
mod value;
mod wire;

pub(crate) use array::expected_size;
pub use array::{Array, TaggedLeaf};
pub use dtype::{ByteOrder, DType, TypeTag};
pub use value::{Node, NodeTag};
pub use wire::{ARRAY_EXT_TYPE, DEFAULT_MAX_DEPTH, SENTINEL};
