//! Unsigned integers with configurable width and byte order
//!
//! Options:
//! - `size`: width in bytes; defaults to the fewest bytes that hold the value,
//!   so zero encodes to an empty buffer. Decoding ignores it and reads every byte.
//! - `endian`: `"little"` (default) or `"big"`.

use super::{INT, unexpected};
use crate::config::{Options, invalid};
use crate::error::{DecodeError, Error, Result};
use crate::registry::{Decoder, Encoder};
use crate::types::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endian {
    Little,
    Big,
}

impl Endian {
    fn from_options(options: &Options) -> Result<Self> {
        match options.get_str("endian")? {
            None | Some("little") => Ok(Endian::Little),
            Some("big") => Ok(Endian::Big),
            Some(other) => Err(invalid(
                "endian",
                format!("expected \"little\" or \"big\", got {other:?}"),
            )),
        }
    }
}

/// Fewest bytes that hold `value`
fn minimal_size(value: u64) -> usize {
    (u64::BITS - value.leading_zeros()).div_ceil(8) as usize
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Int;

impl Encoder for Int {
    fn encode(&self, value: &Node, options: &Options) -> Result<Vec<u8>> {
        let signed = match value {
            Node::Int(i) => *i,
            other => return Err(unexpected(INT, "integer", other)),
        };
        let endian = Endian::from_options(options)?;
        let size = options.get_usize("size")?;

        let unsigned =
            u64::try_from(signed).map_err(|_| Error::NegativeInt { value: signed })?;
        let needed = minimal_size(unsigned);
        let size = size.unwrap_or(needed);
        if size < needed {
            return Err(Error::IntOverflow {
                value: signed,
                size,
            });
        }

        // significant bytes, zero-padded up to `size`
        let mut out = Vec::new();
        out.try_reserve_exact(size)
            .map_err(|err| invalid("size", format!("cannot allocate {size} bytes: {err}")))?;
        out.resize(size, 0);
        let le = unsigned.to_le_bytes();
        match endian {
            Endian::Little => out[..needed].copy_from_slice(&le[..needed]),
            Endian::Big => {
                for (slot, byte) in out.iter_mut().rev().zip(&le[..needed]) {
                    *slot = *byte;
                }
            }
        }
        Ok(out)
    }
}

impl Decoder for Int {
    fn decode(&self, bytes: &[u8], options: &Options) -> Result<Node> {
        let endian = Endian::from_options(options)?;

        let overflow = || DecodeError::IntegerOutOfRange(format!("{} bytes", bytes.len()));
        let push = |acc: u64, byte: &u8| acc.checked_mul(256).map(|a| a | u64::from(*byte));
        let value = match endian {
            Endian::Big => bytes.iter().try_fold(0u64, push),
            Endian::Little => bytes.iter().rev().try_fold(0u64, push),
        }
        .ok_or_else(overflow)?;

        let value = i64::try_from(value).map_err(|_| overflow())?;
        Ok(Node::Int(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: i64, options: Options) -> Result<Vec<u8>> {
        Int.encode(&Node::Int(value), &options)
    }

    fn decode(bytes: &[u8], options: Options) -> Result<Node> {
        Int.decode(bytes, &options)
    }

    #[test]
    fn minimal_width() {
        assert_eq!(encode(0, Options::new()).unwrap(), Vec::<u8>::new());
        assert_eq!(encode(1, Options::new()).unwrap(), vec![1]);
        assert_eq!(encode(255, Options::new()).unwrap(), vec![255]);
        assert_eq!(encode(256, Options::new()).unwrap(), vec![0, 1]);
        assert_eq!(encode(i64::MAX, Options::new()).unwrap().len(), 8);
    }

    #[test]
    fn explicit_size_and_endian() {
        let little = Options::new().with("size", 4i64);
        assert_eq!(encode(0x0102, little).unwrap(), vec![2, 1, 0, 0]);

        let big = Options::new().with("size", 4i64).with("endian", "big");
        assert_eq!(encode(0x0102, big).unwrap(), vec![0, 0, 1, 2]);

        let wide = Options::new().with("size", 10i64).with("endian", "big");
        let bytes = encode(7, wide).unwrap();
        assert_eq!(bytes.len(), 10);
        assert_eq!(bytes[9], 7);
    }

    #[test]
    fn decode_endian() {
        assert_eq!(decode(&[2, 1, 0, 0], Options::new()).unwrap(), Node::Int(0x0102));
        assert_eq!(
            decode(&[0, 0, 1, 2], Options::new().with("endian", "big")).unwrap(),
            Node::Int(0x0102)
        );
        assert_eq!(decode(&[], Options::new()).unwrap(), Node::Int(0));
    }

    #[test]
    fn decode_ignores_size() {
        let options = Options::new().with("size", 1i64);
        assert_eq!(decode(&[0, 1], options).unwrap(), Node::Int(256));
    }

    #[test]
    fn decode_leading_zero_padding() {
        let bytes = [5u8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(decode(&bytes, Options::new()).unwrap(), Node::Int(5));
    }

    #[test]
    fn decode_out_of_range() {
        assert!(matches!(
            decode(&[0xff; 8], Options::new()),
            Err(Error::Decode(DecodeError::IntegerOutOfRange(_)))
        ));
        assert!(matches!(
            decode(&[1; 9], Options::new()),
            Err(Error::Decode(DecodeError::IntegerOutOfRange(_)))
        ));
    }

    #[test]
    fn overflow_and_negative() {
        let options = Options::new().with("size", 1i64);
        assert!(matches!(
            encode(256, options),
            Err(Error::IntOverflow { value: 256, size: 1 })
        ));
        assert!(matches!(
            encode(-1, Options::new()),
            Err(Error::NegativeInt { value: -1 })
        ));
        assert!(matches!(
            encode(-1, Options::new().with("size", 8i64)),
            Err(Error::NegativeInt { value: -1 })
        ));
    }

    #[test]
    fn unallocatable_size_is_an_error() {
        let options = Options::new().with("size", i64::MAX);
        assert!(matches!(
            encode(1, options),
            Err(Error::InvalidOption { ref key, .. }) if key == "size"
        ));
    }

    #[test]
    fn bad_options() {
        let options = Options::new().with("endian", "middle");
        assert!(matches!(
            encode(1, options),
            Err(Error::InvalidOption { ref key, .. }) if key == "endian"
        ));
        assert!(matches!(
            Int.encode(&Node::from("1"), &Options::new()),
            Err(Error::UnexpectedValue { format: "int", .. })
        ));
    }
}
