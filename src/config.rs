//! Codec options
//!
//! [`Options`] is the untyped key/value bag that the registry forwards to
//! codecs. [`TreeOptions`] is the typed configuration of the tree codec.

use crate::error::{Error, Result};
use crate::types::{DEFAULT_MAX_DEPTH, Node};

/// Ordered codec options, forwarded verbatim by the registry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: Vec<(String, Node)>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an option
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Optional string option; present but not a string is an error
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Node::String(s)) => Ok(Some(s)),
            Some(other) => Err(invalid(key, format!("expected string, got {:?}", other.tag()))),
        }
    }

    /// Optional non-negative integer option
    pub fn get_usize(&self, key: &str) -> Result<Option<usize>> {
        match self.get(key) {
            None => Ok(None),
            Some(Node::Int(i)) => usize::try_from(*i)
                .map(Some)
                .map_err(|_| invalid(key, format!("expected non-negative integer, got {i}"))),
            Some(other) => Err(invalid(key, format!("expected integer, got {:?}", other.tag()))),
        }
    }
}

pub(crate) fn invalid(key: &str, reason: String) -> Error {
    Error::InvalidOption {
        key: key.to_string(),
        reason,
    }
}

/// How array leaves are marked inside the packed tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tagging {
    /// `[SENTINEL, type-tag, shape, data]` sequences. A genuine 4-element
    /// sequence starting with the sentinel decodes as an array.
    #[default]
    Sentinel,
    /// MessagePack extension values of type [`ARRAY_EXT_TYPE`]; plain data is
    /// never reinterpreted.
    ///
    /// [`ARRAY_EXT_TYPE`]: crate::types::ARRAY_EXT_TYPE
    Extension,
}

impl Tagging {
    pub fn name(self) -> &'static str {
        match self {
            Tagging::Sentinel => "sentinel",
            Tagging::Extension => "extension",
        }
    }
}

/// Tree codec configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    pub tagging: Tagging,
    /// Deepest container nesting accepted by encode and decode
    pub max_depth: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            tagging: Tagging::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TreeOptions {
    pub fn with_tagging(mut self, tagging: Tagging) -> Self {
        self.tagging = tagging;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Read `tagging` and `max_depth` from registry options; absent keys keep defaults
    pub fn from_options(options: &Options) -> Result<Self> {
        let mut tree = TreeOptions::default();
        if let Some(name) = options.get_str("tagging")? {
            tree.tagging = match name {
                "sentinel" => Tagging::Sentinel,
                "extension" => Tagging::Extension,
                other => {
                    return Err(invalid(
                        "tagging",
                        format!("expected \"sentinel\" or \"extension\", got {other:?}"),
                    ));
                }
            };
        }
        if let Some(depth) = options.get_usize("max_depth")? {
            tree.max_depth = depth;
        }
        Ok(tree)
    }
}
