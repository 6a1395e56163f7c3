//! Tree walk, encode side: nodes to packer values

use super::array;
use crate::config::{Tagging, TreeOptions};
use crate::error::{Error, Result};
use crate::types::{Array, Node};
use rmpv::Value;
use tracing::trace;

/// Handling of array leaves during the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leaves {
    Tag(Tagging),
    /// Plain structured packing has no array representation
    Reject,
}

/// Replaces array leaves with their tagged wire form
pub(crate) struct Substitute {
    leaves: Leaves,
    max_depth: usize,
}

impl Substitute {
    pub fn tagged(options: &TreeOptions) -> Self {
        Self {
            leaves: Leaves::Tag(options.tagging),
            max_depth: options.max_depth,
        }
    }

    pub fn plain(max_depth: usize) -> Self {
        Self {
            leaves: Leaves::Reject,
            max_depth,
        }
    }

    /// `depth` counts the containers enclosing `node`
    pub fn walk(&self, node: &Node, depth: usize) -> Result<Value> {
        let value = match node {
            Node::Null => Value::Nil,
            Node::Bool(b) => Value::Boolean(*b),
            Node::Int(i) => Value::from(*i),
            Node::Float(f) => Value::F64(*f),
            Node::String(s) => Value::from(s.as_str()),
            Node::Bytes(b) => Value::Binary(b.clone()),
            Node::Array(arr) => self.leaf(arr)?,
            Node::List(items) => {
                self.enter(depth)?;
                Value::Array(
                    items
                        .iter()
                        .map(|item| self.walk(item, depth + 1))
                        .collect::<Result<_>>()?,
                )
            }
            Node::Object(entries) => {
                self.enter(depth)?;
                Value::Map(
                    entries
                        .iter()
                        .map(|(key, val)| Ok((Value::from(key.as_str()), self.walk(val, depth + 1)?)))
                        .collect::<Result<_>>()?,
                )
            }
        };
        Ok(value)
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn leaf(&self, arr: &Array) -> Result<Value> {
        let tagging = match self.leaves {
            Leaves::Tag(tagging) => tagging,
            Leaves::Reject => {
                return Err(Error::Pack(format!(
                    "array leaf {} {:?} needs the tree format",
                    arr.tag(),
                    arr.shape()
                )));
            }
        };

        trace!(tag = %arr.tag(), shape = ?arr.shape(), tagging = tagging.name(), "tagging array leaf");
        let leaf = array::pack(arr)?;
        match tagging {
            Tagging::Sentinel => Ok(leaf.into_sentinel_value()),
            Tagging::Extension => leaf.into_extension_value(),
        }
    }
}
