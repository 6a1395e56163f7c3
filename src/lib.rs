//! blobtree - Binary codec for nested values with embedded typed arrays
//!
//! Encodes a tree of scalars, lists, string-keyed objects and typed numeric
//! arrays into one MessagePack blob, and decodes it back losslessly. Arrays are
//! stored as (type-tag, shape, row-major bytes) and marked so they can be told
//! apart from ordinary lists on decode.
//!
//! # Features
//!
//! - Typed arrays (numpy-like) with explicit byte order in the type-tag
//! - Nested key-value structure with insertion order preserved
//! - Two array tagging schemes: the sentinel scheme (`["_", tag, shape, data]`)
//!   and an unambiguous MessagePack extension scheme
//! - Name-indexed format registry for bytes, text, integers, arrays and trees
//! - Optional `image` feature: PNG and JPEG codecs for pixel arrays
//! - Optional `ndarray` feature: conversions to and from ndarray
//!
//! # Example
//!
//! ```rust
//! use blobtree::{Array, DType, Node, Options, Registry, TypeTag};
//!
//! let grid = [1i32, 2, 3, 4].iter().flat_map(|v| v.to_le_bytes()).collect();
//! let tree = Node::Object(vec![
//!     ("version".into(), Node::Int(1)),
//!     ("grid".into(), Node::Array(
//!         Array::new(TypeTag::little(DType::I32), vec![2, 2], grid).unwrap(),
//!     )),
//! ]);
//!
//! let registry = Registry::standard();
//! let bytes = registry.encode("tree", &tree, &Options::new()).unwrap();
//! let back = registry.decode("tree", &bytes, &Options::new()).unwrap();
//! assert_eq!(back, tree);
//! ```

pub mod config;
pub mod error;
pub mod formats;
pub mod packer;
pub mod parser;
pub mod registry;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use config::{Options, Tagging, TreeOptions};
pub use error::{DecodeError, Error, Result};
pub use parser::{parse, parse_with};
pub use registry::{Decoder, Encoder, Registry, RegistryBuilder};
pub use types::{
    ARRAY_EXT_TYPE, Array, ByteOrder, DEFAULT_MAX_DEPTH, DType, Node, NodeTag, SENTINEL,
    TaggedLeaf, TypeTag,
};
pub use writer::{to_bytes, to_bytes_with};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::{ArrayType, NdarrayError};
