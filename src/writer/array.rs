//! Array envelope, encode side

use crate::error::{Error, Result};
use crate::packer;
use crate::types::{ARRAY_EXT_TYPE, Array, SENTINEL, TaggedLeaf};
use rmpv::Value;

/// Pack a contiguous array into its wire form
///
/// Non-contiguous arrays are rejected, never copied.
pub fn pack(arr: &Array) -> Result<TaggedLeaf> {
    let data = arr.bytes().ok_or_else(|| Error::NotContiguous {
        shape: arr.shape().to_vec(),
        strides: arr.strides().to_vec(),
    })?;
    Ok(TaggedLeaf {
        tag: arr.tag().to_string(),
        shape: arr.shape().to_vec(),
        data: data.to_vec(),
    })
}

impl TaggedLeaf {
    fn into_fields(self) -> [Value; 3] {
        [
            Value::from(self.tag),
            Value::Array(self.shape.into_iter().map(Value::from).collect()),
            Value::Binary(self.data),
        ]
    }

    /// `[SENTINEL, type-tag, shape, data]`
    pub fn into_sentinel_value(self) -> Value {
        let mut items = Vec::with_capacity(4);
        items.push(Value::from(SENTINEL));
        items.extend(self.into_fields());
        Value::Array(items)
    }

    /// `[type-tag, shape, data]`
    pub fn into_triple_value(self) -> Value {
        Value::Array(self.into_fields().into())
    }

    /// Extension value whose payload is the packed triple
    pub fn into_extension_value(self) -> Result<Value> {
        let payload = packer::pack(&self.into_triple_value())?;
        Ok(Value::Ext(ARRAY_EXT_TYPE, payload))
    }
}
