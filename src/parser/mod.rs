//! Deserialization of trees

pub mod array;
mod value;

use crate::config::TreeOptions;
use crate::error::Result;
use crate::packer;
use crate::types::{Array, Node, TaggedLeaf};
use tracing::debug;

pub(crate) use value::Desubstitute;

/// Decode a tree with default options
pub fn parse(bytes: &[u8]) -> Result<Node> {
    parse_with(bytes, &TreeOptions::default())
}

/// Decode a tree
///
/// Under [`Tagging::Sentinel`] any 4-element sequence starting with the
/// sentinel is read as an array leaf, including sequences that were written as
/// plain data.
///
/// [`Tagging::Sentinel`]: crate::config::Tagging::Sentinel
pub fn parse_with(bytes: &[u8], options: &TreeOptions) -> Result<Node> {
    let value = packer::unpack(bytes)?;
    let node = Desubstitute::tagged(options).walk(value, 0)?;
    debug!(
        root = ?node.tag(),
        tagging = options.tagging.name(),
        len = bytes.len(),
        "decoded tree"
    );
    Ok(node)
}

/// Unpack a tree with no leaf recognition
pub fn parse_plain(bytes: &[u8], max_depth: usize) -> Result<Node> {
    Desubstitute::plain(max_depth).walk(packer::unpack(bytes)?, 0)
}

/// Decode a single array written as `[type-tag, shape, data]`
pub fn parse_array(bytes: &[u8]) -> Result<Array> {
    array::unpack(TaggedLeaf::from_triple_value(packer::unpack(bytes)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, Error};
    use crate::types::{DType, TypeTag};
    use crate::writer;

    #[test]
    fn test_roundtrip_scalars() {
        for node in [
            Node::Null,
            Node::Bool(true),
            Node::Int(-42),
            Node::Int(i64::MAX),
            Node::Float(-0.125),
            Node::String("hello world".into()),
            Node::Bytes(vec![0, 255]),
        ] {
            let bytes = writer::to_bytes(&node).unwrap();
            assert_eq!(parse(&bytes).unwrap(), node);
        }
    }

    #[test]
    fn test_roundtrip_object_order() {
        let node = Node::Object(vec![
            ("name".into(), Node::String("test".into())),
            ("count".into(), Node::Int(42)),
            ("alpha".into(), Node::Null),
        ]);
        let parsed = parse(&writer::to_bytes(&node).unwrap()).unwrap();

        let obj = parsed.as_object().unwrap();
        assert_eq!(obj[0].0, "name");
        assert_eq!(obj[1].0, "count");
        assert_eq!(obj[2].0, "alpha");
    }

    #[test]
    fn test_roundtrip_nested_array() {
        let data = [1.0f32, 2.0].iter().flat_map(|f| f.to_le_bytes()).collect();
        let arr = Array::new(TypeTag::little(DType::F32), vec![2], data).unwrap();
        let node = Node::Object(vec![(
            "stats".into(),
            Node::Object(vec![("mean".into(), Node::Array(arr.clone()))]),
        )]);
        let parsed = parse(&writer::to_bytes(&node).unwrap()).unwrap();
        assert_eq!(parsed.get("stats.mean").and_then(Node::as_array), Some(&arr));
    }

    #[test]
    fn test_parse_array_roundtrip() {
        let arr = Array::new(TypeTag::big(DType::U16), vec![3], vec![0, 1, 0, 2, 0, 3]).unwrap();
        let bytes = writer::array_to_bytes(&arr).unwrap();
        assert_eq!(parse_array(&bytes).unwrap(), arr);
    }

    #[test]
    fn test_parse_array_rejects_tree_leaf() {
        let arr = Array::new(TypeTag::little(DType::U8), vec![1], vec![1]).unwrap();
        let bytes = writer::to_bytes(&Node::Array(arr)).unwrap();
        assert!(matches!(
            parse_array(&bytes),
            Err(Error::Decode(DecodeError::InvalidEnvelope(_)))
        ));
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse(&[0xc1]).is_err());
        assert!(parse(&[0x92, 0x01]).is_err());
    }
}
