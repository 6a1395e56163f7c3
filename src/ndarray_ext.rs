//! ndarray integration for tree arrays
//!
//! Converts between [`Array`] and ndarray's arrays. Values are copied in
//! native byte order, so arrays built here carry a native-order type-tag.
//!
//! Enable with the `ndarray` feature flag.

use crate::error::{Error, Result};
use crate::types::{Array, DType, TypeTag};
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn, ShapeError};

/// Error type for conversions into ndarray
#[derive(Debug, thiserror::Error)]
pub enum NdarrayError {
    /// Array type-tag differs from the requested element type
    #[error("type-tag mismatch: expected {expected}, got {actual}")]
    TagMismatch { expected: TypeTag, actual: TypeTag },
    /// ndarray refused the shape
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Element types that can live in an [`Array`]
pub trait ArrayType: Copy + 'static {
    const DTYPE: DType;

    /// Append this element in native byte order
    fn write_ne(self, out: &mut Vec<u8>);

    /// Read one element from exactly `DTYPE.element_size()` bytes
    fn read_ne(bytes: &[u8]) -> Self;
}

macro_rules! impl_array_type {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl ArrayType for $ty {
                const DTYPE: DType = DType::$dtype;

                fn write_ne(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_ne_bytes());
                }

                fn read_ne(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(buf)
                }
            }
        )*
    };
}

impl_array_type! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

impl ArrayType for bool {
    const DTYPE: DType = DType::Bool;

    fn write_ne(self, out: &mut Vec<u8>) {
        out.push(u8::from(self));
    }

    fn read_ne(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

// =============================================================================
// From ndarray
// =============================================================================

impl Array {
    /// Copy a standard-layout ndarray into an [`Array`]
    ///
    /// Returns [`Error::NotContiguous`] for any other layout (transposed or
    /// sliced views). Use `.as_standard_layout()` to make a contiguous copy first.
    pub fn from_ndarray<S, D, T>(arr: &ArrayBase<S, D>) -> Result<Self>
    where
        S: Data<Elem = T>,
        D: Dimension,
        T: ArrayType,
    {
        let shape: Vec<u64> = arr.shape().iter().map(|&d| d as u64).collect();
        if !arr.is_standard_layout() {
            let width = T::DTYPE.element_size() as i64;
            return Err(Error::NotContiguous {
                shape,
                strides: arr.strides().iter().map(|&s| s as i64 * width).collect(),
            });
        }

        let mut data = Vec::with_capacity(arr.len() * T::DTYPE.element_size());
        for &elem in arr.iter() {
            elem.write_ne(&mut data);
        }
        Array::new(TypeTag::native(T::DTYPE), shape, data)
    }
}

// =============================================================================
// To ndarray
// =============================================================================

impl Array {
    /// Copy into an owned ndarray; the type-tag must be `T` in native byte order
    pub fn to_ndarray<T: ArrayType>(&self) -> Result<ArrayD<T>, NdarrayError> {
        let expected = TypeTag::native(T::DTYPE);
        if self.tag() != expected {
            return Err(NdarrayError::TagMismatch {
                expected,
                actual: self.tag(),
            });
        }

        let elements: Vec<T> = self
            .row_major_bytes()
            .chunks_exact(T::DTYPE.element_size())
            .map(T::read_ne)
            .collect();
        let shape: Vec<usize> = self.shape().iter().map(|&d| d as usize).collect();

        Ok(ArrayD::from_shape_vec(IxDyn(&shape), elements)?)
    }
}
