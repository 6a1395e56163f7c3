//! Tree walk, decode side: packer values to nodes

use super::array;
use crate::config::{Tagging, TreeOptions};
use crate::error::{DecodeError, Error, Result};
use crate::types::{ARRAY_EXT_TYPE, Node, TaggedLeaf};
use rmpv::Value;
use tracing::trace;

/// Recognition of array leaves during the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leaves {
    Untag(Tagging),
    /// Plain structured unpacking; sequences are never reinterpreted
    Plain,
}

/// Rebuilds nodes, materializing tagged array leaves
pub(crate) struct Desubstitute {
    leaves: Leaves,
    max_depth: usize,
}

impl Desubstitute {
    pub fn tagged(options: &TreeOptions) -> Self {
        Self {
            leaves: Leaves::Untag(options.tagging),
            max_depth: options.max_depth,
        }
    }

    pub fn plain(max_depth: usize) -> Self {
        Self {
            leaves: Leaves::Plain,
            max_depth,
        }
    }

    /// `depth` counts the containers enclosing `value`
    pub fn walk(&self, value: Value, depth: usize) -> Result<Node> {
        let node = match value {
            Value::Nil => Node::Null,
            Value::Boolean(b) => Node::Bool(b),
            Value::Integer(i) => Node::Int(
                i.as_i64()
                    .ok_or_else(|| DecodeError::IntegerOutOfRange(format!("{i:?}")))?,
            ),
            Value::F32(f) => Node::Float(f64::from(f)),
            Value::F64(f) => Node::Float(f),
            Value::String(s) => Node::String(s.into_str().ok_or(DecodeError::InvalidUtf8)?),
            Value::Binary(b) => Node::Bytes(b),
            Value::Array(items) if self.is_sentinel_leaf(&items) => {
                trace!("untagging sentinel array leaf");
                Node::Array(array::unpack(TaggedLeaf::from_sentinel_items(items)?)?)
            }
            Value::Array(items) => {
                self.enter(depth)?;
                Node::List(
                    items
                        .into_iter()
                        .map(|item| self.walk(item, depth + 1))
                        .collect::<Result<_>>()?,
                )
            }
            Value::Map(entries) => {
                self.enter(depth)?;
                Node::Object(
                    entries
                        .into_iter()
                        .map(|(key, val)| Ok((object_key(key)?, self.walk(val, depth + 1)?)))
                        .collect::<Result<_>>()?,
                )
            }
            Value::Ext(ARRAY_EXT_TYPE, payload) if self.leaves != Leaves::Plain => {
                trace!("untagging extension array leaf");
                Node::Array(array::unpack(TaggedLeaf::from_extension_payload(&payload)?)?)
            }
            Value::Ext(ty, _) => return Err(DecodeError::UnknownExtension(ty).into()),
        };
        Ok(node)
    }

    fn is_sentinel_leaf(&self, items: &[Value]) -> bool {
        self.leaves == Leaves::Untag(Tagging::Sentinel) && TaggedLeaf::looks_tagged(items)
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}

fn object_key(key: Value) -> Result<String, DecodeError> {
    match key {
        Value::String(s) => s.into_str().ok_or(DecodeError::InvalidUtf8),
        _ => Err(DecodeError::NonStringKey),
    }
}
