//! Element types and the string type-tags that describe them on the wire

use crate::error::DecodeError;
use std::fmt;
use std::str::FromStr;

/// Element type of a typed array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F16,
    F32,
    F64,
}

impl DType {
    /// Size in bytes of a single element
    pub fn element_size(self) -> usize {
        match self {
            DType::Bool | DType::U8 | DType::I8 => 1,
            DType::U16 | DType::I16 | DType::F16 => 2,
            DType::U32 | DType::I32 | DType::F32 => 4,
            DType::U64 | DType::I64 | DType::F64 => 8,
        }
    }

    /// Kind character used in type-tags (`b`, `u`, `i` or `f`)
    pub fn kind(self) -> char {
        match self {
            DType::Bool => 'b',
            DType::U8 | DType::U16 | DType::U32 | DType::U64 => 'u',
            DType::I8 | DType::I16 | DType::I32 | DType::I64 => 'i',
            DType::F16 | DType::F32 | DType::F64 => 'f',
        }
    }

    /// Look up a dtype from its kind character and element size
    pub fn from_kind(kind: char, size: usize) -> Option<Self> {
        match (kind, size) {
            ('b', 1) => Some(DType::Bool),
            ('u', 1) => Some(DType::U8),
            ('i', 1) => Some(DType::I8),
            ('u', 2) => Some(DType::U16),
            ('i', 2) => Some(DType::I16),
            ('f', 2) => Some(DType::F16),
            ('u', 4) => Some(DType::U32),
            ('i', 4) => Some(DType::I32),
            ('f', 4) => Some(DType::F32),
            ('u', 8) => Some(DType::U64),
            ('i', 8) => Some(DType::I64),
            ('f', 8) => Some(DType::F64),
            _ => None,
        }
    }
}

/// Byte order of array elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
    /// Single-byte elements have no byte order
    NotApplicable,
}

impl ByteOrder {
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::Little;
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::Big;

    fn symbol(self) -> char {
        match self {
            ByteOrder::Little => '<',
            ByteOrder::Big => '>',
            ByteOrder::NotApplicable => '|',
        }
    }
}

/// Element type plus byte order, written as a numpy-style string such as `<f4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    pub dtype: DType,
    pub order: ByteOrder,
}

impl TypeTag {
    /// Single-byte dtypes always normalize to [`ByteOrder::NotApplicable`];
    /// multi-byte dtypes given `NotApplicable` fall back to native order.
    pub fn new(dtype: DType, order: ByteOrder) -> Self {
        let order = match (dtype.element_size(), order) {
            (1, _) => ByteOrder::NotApplicable,
            (_, ByteOrder::NotApplicable) => ByteOrder::NATIVE,
            (_, order) => order,
        };
        Self { dtype, order }
    }

    pub fn little(dtype: DType) -> Self {
        Self::new(dtype, ByteOrder::Little)
    }

    pub fn big(dtype: DType) -> Self {
        Self::new(dtype, ByteOrder::Big)
    }

    pub fn native(dtype: DType) -> Self {
        Self::new(dtype, ByteOrder::NATIVE)
    }

    /// Size in bytes of a single element
    pub fn element_size(self) -> usize {
        self.dtype.element_size()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.order.symbol(),
            self.dtype.kind(),
            self.dtype.element_size()
        )
    }
}

impl FromStr for TypeTag {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DecodeError::InvalidTypeTag(s.to_string());

        let mut chars = s.chars();
        let order = match chars.next() {
            Some('<') => ByteOrder::Little,
            Some('>') => ByteOrder::Big,
            Some('|') => ByteOrder::NotApplicable,
            _ => return Err(invalid()),
        };
        let kind = chars.next().ok_or_else(invalid)?;
        let size: usize = chars.as_str().parse().map_err(|_| invalid())?;
        let dtype = DType::from_kind(kind, size).ok_or_else(invalid)?;

        if order == ByteOrder::NotApplicable && size > 1 {
            return Err(invalid());
        }

        Ok(TypeTag::new(dtype, order))
    }
}
