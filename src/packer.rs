//! Structured packing: MessagePack through `rmpv`
//!
//! The tree codec builds an [`rmpv::Value`] and hands it here. Maps keep their
//! entry order, so object key order survives a round trip.

use crate::error::{DecodeError, Error, Result};
use rmpv::Value;
use std::io::Write;

/// Pack a value into a fresh buffer
pub fn pack(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write(&mut buf, value)?;
    Ok(buf)
}

/// Pack a value into a writer
pub fn write<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    rmpv::encode::write_value(writer, value).map_err(|e| Error::Pack(e.to_string()))
}

/// Unpack exactly one value; leftover input is an error
pub fn unpack(bytes: &[u8]) -> Result<Value> {
    let mut rest = bytes;
    let value = rmpv::decode::read_value(&mut rest)
        .map_err(|e| DecodeError::Msgpack(e.to_string()))?;
    if !rest.is_empty() {
        return Err(DecodeError::TrailingBytes(rest.len()).into());
    }
    Ok(value)
}
