//! Tree nodes

use super::Array;

/// Node kind tags, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTag {
    Null,
    Bool,
    Int,
    Float,
    String,
    Bytes,
    Array,
    List,
    Object,
}

/// A value in an encodable tree: a scalar, a container, or an array leaf
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Array),
    List(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl Node {
    /// Get the tag for this node
    pub fn tag(&self) -> NodeTag {
        match self {
            Node::Null => NodeTag::Null,
            Node::Bool(_) => NodeTag::Bool,
            Node::Int(_) => NodeTag::Int,
            Node::Float(_) => NodeTag::Float,
            Node::String(_) => NodeTag::String,
            Node::Bytes(_) => NodeTag::Bytes,
            Node::Array(_) => NodeTag::Array,
            Node::List(_) => NodeTag::List,
            Node::Object(_) => NodeTag::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Node::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a nested node by dot-separated path (e.g., "model.weights")
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut current = self;
        for key in path.split('.') {
            match current {
                Node::Object(entries) => {
                    current = entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)?;
                }
                _ => return None,
            }
        }
        Some(current)
    }
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Node::Bool(v)
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Node::Int(v)
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Node::Float(v)
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Node::String(v)
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Node::String(v.to_string())
    }
}

impl From<Vec<u8>> for Node {
    fn from(v: Vec<u8>) -> Self {
        Node::Bytes(v)
    }
}

impl From<Array> for Node {
    fn from(v: Array) -> Self {
        Node::Array(v)
    }
}

impl From<Vec<Node>> for Node {
    fn from(v: Vec<Node>) -> Self {
        Node::List(v)
    }
}
