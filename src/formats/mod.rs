//! Built-in formats
//!
//! [`IMAGE_PNG`] and [`IMAGE_JPEG`] are built in with the `image` feature.
//! Video has no built-in implementation; register a codec under [`VIDEO_MP4`]
//! or [`VIDEO_WEBM`] through [`RegistryBuilder`](crate::registry::RegistryBuilder).

mod int;
#[cfg(feature = "image")]
mod media;
mod scalar;
mod tree;

pub use int::Int;
#[cfg(feature = "image")]
pub use media::{Jpeg, Png};
pub use scalar::{Bytes, Utf8};
pub use tree::{ArrayFormat, StructuredObject, Tree};

use crate::error::Error;
use crate::registry::RegistryBuilder;
use crate::types::Node;

pub const BYTES: &str = "bytes";
pub const UTF8: &str = "utf8";
pub const STRUCTURED_OBJECT: &str = "structured-object";
pub const INT: &str = "int";
pub const ARRAY: &str = "array";
pub const TREE: &str = "tree";

pub const IMAGE_JPEG: &str = "image-jpeg";
pub const IMAGE_PNG: &str = "image-png";
pub const VIDEO_MP4: &str = "video-mp4";
pub const VIDEO_WEBM: &str = "video-webm";

/// Register every built-in format
pub(crate) fn install(builder: RegistryBuilder) -> RegistryBuilder {
    let builder = builder
        .codec(BYTES, Bytes)
        .codec(UTF8, Utf8)
        .codec(STRUCTURED_OBJECT, StructuredObject)
        .codec(INT, Int)
        .codec(ARRAY, ArrayFormat)
        .codec(TREE, Tree);
    #[cfg(feature = "image")]
    let builder = builder.codec(IMAGE_PNG, Png).codec(IMAGE_JPEG, Jpeg);
    builder
}

fn unexpected(format: &'static str, expected: &'static str, value: &Node) -> Error {
    Error::UnexpectedValue {
        format,
        expected,
        actual: value.tag(),
    }
}
