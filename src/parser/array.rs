//! Array envelope, decode side

use crate::error::{DecodeError, Result};
use crate::packer;
use crate::types::{Array, SENTINEL, TaggedLeaf, TypeTag, expected_size};
use rmpv::Value;

/// Materialize an array from its wire form
///
/// The data length must equal `product(shape) * element_size`; bytes are
/// taken verbatim in the byte order named by the type-tag.
pub fn unpack(leaf: TaggedLeaf) -> Result<Array> {
    let tag: TypeTag = leaf.tag.parse()?;
    let expected = expected_size(tag, &leaf.shape)
        .ok_or_else(|| DecodeError::InvalidShape(format!("{:?} overflows", leaf.shape)))?;
    let actual = leaf.data.len() as u64;
    if actual != expected {
        return Err(DecodeError::DataSizeMismatch { expected, actual }.into());
    }
    Array::new(tag, leaf.shape, leaf.data)
}

impl TaggedLeaf {
    fn from_fields(tag: Value, shape: Value, data: Value) -> Result<Self, DecodeError> {
        let tag = match tag {
            Value::String(s) => s.into_str().ok_or(DecodeError::InvalidUtf8)?,
            other => {
                return Err(DecodeError::InvalidEnvelope(format!(
                    "type-tag must be a string, got {other}"
                )));
            }
        };

        let shape = match shape {
            Value::Array(dims) => dims
                .iter()
                .map(|dim| {
                    dim.as_u64().ok_or_else(|| {
                        DecodeError::InvalidShape(format!("dimension {dim} is not a non-negative integer"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(DecodeError::InvalidShape(format!(
                    "expected a sequence, got {other}"
                )));
            }
        };

        let data = match data {
            Value::Binary(bytes) => bytes,
            other => {
                return Err(DecodeError::InvalidEnvelope(format!(
                    "data must be a byte string, got {other}"
                )));
            }
        };

        Ok(TaggedLeaf { tag, shape, data })
    }

    /// True for any 4-element sequence whose first element is the sentinel
    pub(crate) fn looks_tagged(items: &[Value]) -> bool {
        items.len() == 4 && items[0].as_str() == Some(SENTINEL)
    }

    /// From `[SENTINEL, type-tag, shape, data]`
    pub fn from_sentinel_items(items: Vec<Value>) -> Result<Self, DecodeError> {
        if !Self::looks_tagged(&items) {
            return Err(DecodeError::InvalidEnvelope(
                "expected [sentinel, type-tag, shape, data]".into(),
            ));
        }
        let [_, tag, shape, data] = <[Value; 4]>::try_from(items).map_err(|items| {
            DecodeError::InvalidEnvelope(format!("expected 4 items, got {}", items.len()))
        })?;
        Self::from_fields(tag, shape, data)
    }

    /// From `[type-tag, shape, data]`
    pub fn from_triple_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Array(items) => match <[Value; 3]>::try_from(items) {
                Ok([tag, shape, data]) => Self::from_fields(tag, shape, data),
                Err(items) => Err(DecodeError::InvalidEnvelope(format!(
                    "expected [type-tag, shape, data], got {} items",
                    items.len()
                ))),
            },
            other => Err(DecodeError::InvalidEnvelope(format!(
                "expected [type-tag, shape, data], got {other}"
            ))),
        }
    }

    /// From the payload of an array extension value
    pub fn from_extension_payload(payload: &[u8]) -> Result<Self> {
        Ok(Self::from_triple_value(packer::unpack(payload)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::DType;
    use crate::writer;

    fn leaf(tag: &str, shape: Vec<u64>, data: Vec<u8>) -> TaggedLeaf {
        TaggedLeaf {
            tag: tag.into(),
            shape,
            data,
        }
    }

    #[test]
    fn unpack_roundtrip_grid() {
        let dtypes = [DType::I8, DType::I32, DType::F32, DType::F64];
        let shapes: [&[u64]; 4] = [&[], &[5], &[3, 4], &[2, 3, 4]];

        for dtype in dtypes {
            for shape in shapes {
                let tag = TypeTag::little(dtype);
                let len = shape.iter().product::<u64>() as usize * dtype.element_size();
                let data: Vec<u8> = (0..len).map(|i| (i * 7 % 251) as u8).collect();
                let arr = Array::new(tag, shape.to_vec(), data.clone()).unwrap();

                let packed = writer::array::pack(&arr).unwrap();
                let back = unpack(packed).unwrap();
                assert_eq!(back.tag(), tag);
                assert_eq!(back.shape(), shape);
                assert_eq!(back.bytes().unwrap(), data.as_slice());
            }
        }
    }

    #[test]
    fn unpack_size_mismatch() {
        let result = unpack(leaf("<i4", vec![2, 2], vec![0u8; 12]));
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::DataSizeMismatch {
                expected: 16,
                actual: 12
            }))
        ));
    }

    #[test]
    fn unpack_zero_dim_needs_one_element() {
        assert!(unpack(leaf("<f8", vec![], vec![0u8; 8])).is_ok());
        assert!(unpack(leaf("<f8", vec![], vec![])).is_err());
    }

    #[test]
    fn unpack_invalid_tag() {
        assert!(matches!(
            unpack(leaf("x", vec![1], vec![0])),
            Err(Error::Decode(DecodeError::InvalidTypeTag(_)))
        ));
    }

    #[test]
    fn unpack_shape_overflow() {
        assert!(matches!(
            unpack(leaf("<f8", vec![u64::MAX, 2], vec![])),
            Err(Error::Decode(DecodeError::InvalidShape(_)))
        ));
    }

    #[test]
    fn big_endian_bytes_kept_verbatim() {
        let data = 0x0102_0304i32.to_be_bytes().to_vec();
        let arr = unpack(leaf(">i4", vec![1], data.clone())).unwrap();
        assert_eq!(arr.tag(), TypeTag::big(DType::I32));
        assert_eq!(arr.bytes().unwrap(), data.as_slice());
    }

    #[test]
    fn malformed_sentinel_items() {
        let items = vec![
            Value::from(SENTINEL),
            Value::from(1),
            Value::Array(vec![]),
            Value::Binary(vec![0]),
        ];
        assert!(matches!(
            TaggedLeaf::from_sentinel_items(items),
            Err(DecodeError::InvalidEnvelope(_))
        ));

        let items = vec![
            Value::from(SENTINEL),
            Value::from("|u1"),
            Value::Array(vec![Value::from(-1)]),
            Value::Binary(vec![0]),
        ];
        assert!(matches!(
            TaggedLeaf::from_sentinel_items(items),
            Err(DecodeError::InvalidShape(_))
        ));

        let items = vec![
            Value::from(SENTINEL),
            Value::from("|u1"),
            Value::Array(vec![Value::from(1)]),
            Value::from("not bytes"),
        ];
        assert!(matches!(
            TaggedLeaf::from_sentinel_items(items),
            Err(DecodeError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn triple_must_have_three_items() {
        let value = Value::Array(vec![Value::from("|u1"), Value::Array(vec![])]);
        assert!(TaggedLeaf::from_triple_value(value).is_err());
    }
}
