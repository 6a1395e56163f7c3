//! Error types for blobtree

use crate::types::NodeTag;
use std::error::Error as StdError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure of an encode or decode call
#[derive(Debug, Error)]
pub enum Error {
    /// Array buffer is not row-major without gaps
    #[error(
        "array is not contiguous (shape {shape:?}, strides {strides:?}); call .to_contiguous() first"
    )]
    NotContiguous { shape: Vec<u64>, strides: Vec<i64> },

    /// Array construction with inconsistent shape, strides or buffer length
    #[error("invalid array layout: {0}")]
    InvalidLayout(String),

    /// Malformed wire data
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// No codec registered under this name
    #[error("unknown format: {0:?}")]
    UnknownFormat(String),

    /// The structured packer cannot represent a value
    #[error("cannot pack value: {0}")]
    Pack(String),

    /// Tree nesting deeper than the configured limit
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// A codec was handed a node of the wrong kind
    #[error("format {format:?} expects {expected}, got {actual:?}")]
    UnexpectedValue {
        format: &'static str,
        expected: &'static str,
        actual: NodeTag,
    },

    /// A codec option has an unusable value
    #[error("invalid option {key:?}: {reason}")]
    InvalidOption { key: String, reason: String },

    /// Integer does not fit the requested width
    #[error("integer {value} does not fit in {size} bytes")]
    IntOverflow { value: i64, size: usize },

    /// Negative value given to an unsigned integer codec
    #[error("integer {value} is negative; only unsigned values can be encoded")]
    NegativeInt { value: i64 },

    /// Failure inside a caller-provided codec
    #[error("codec {format:?} failed")]
    Codec {
        format: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Malformed input found while decoding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The packer could not read the input
    #[error("malformed msgpack: {0}")]
    Msgpack(String),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// Array data length disagrees with shape and type-tag
    #[error("data size mismatch: expected {expected} bytes, got {actual}")]
    DataSizeMismatch { expected: u64, actual: u64 },

    #[error("invalid type-tag: {0:?}")]
    InvalidTypeTag(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A tagged array leaf whose fields have the wrong kinds
    #[error("invalid array envelope: {0}")]
    InvalidEnvelope(String),

    #[error("invalid UTF-8 in string")]
    InvalidUtf8,

    #[error("integer out of range: {0}")]
    IntegerOutOfRange(String),

    #[error("map key is not a string")]
    NonStringKey,

    #[error("unknown extension type {0}")]
    UnknownExtension(i8),

    /// A packed value with no node counterpart
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),
}
