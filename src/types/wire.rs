//! Wire-level constants

/// First element of a tagged array leaf `[SENTINEL, type-tag, shape, data]`
pub const SENTINEL: &str = "_";

/// MessagePack extension type carrying an array under [`Tagging::Extension`]
///
/// [`Tagging::Extension`]: crate::config::Tagging::Extension
pub const ARRAY_EXT_TYPE: i8 = 0x41;

/// Default nesting limit for encode and decode walks
pub const DEFAULT_MAX_DEPTH: usize = 256;
