//! Typed array types

use super::TypeTag;
use crate::error::{Error, Result};
use std::borrow::Cow;

/// Owned typed array
///
/// Elements are addressed through byte strides over `data`, so an `Array` can
/// describe a non-contiguous view (for example a transposed matrix) without
/// copying. Only C-contiguous arrays can be encoded.
#[derive(Debug, Clone)]
pub struct Array {
    tag: TypeTag,
    shape: Vec<u64>,
    strides: Vec<i64>,
    offset: usize,
    data: Vec<u8>,
}

impl Array {
    /// Create a C-contiguous array; `data` must hold exactly
    /// `product(shape) * element_size` bytes.
    pub fn new(tag: TypeTag, shape: Vec<u64>, data: Vec<u8>) -> Result<Self> {
        let expected = addressable_size(tag, &shape)?;
        if data.len() as u64 != expected {
            return Err(Error::InvalidLayout(format!(
                "shape {:?} of {} needs {} bytes, got {}",
                shape,
                tag,
                expected,
                data.len()
            )));
        }
        let strides = c_strides(&shape, tag.element_size());
        Ok(Self {
            tag,
            shape,
            strides,
            offset: 0,
            data,
        })
    }

    /// Create a view with explicit byte strides, starting `offset` bytes into `data`
    pub fn strided(
        tag: TypeTag,
        shape: Vec<u64>,
        strides: Vec<i64>,
        offset: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        if strides.len() != shape.len() {
            return Err(Error::InvalidLayout(format!(
                "{} strides for {} dimensions",
                strides.len(),
                shape.len()
            )));
        }

        addressable_size(tag, &shape)?;

        if !shape.contains(&0) {
            let overflow = || Error::InvalidLayout(format!("strides {:?} overflow", strides));
            let (mut lo, mut hi) = (0i128, 0i128);
            for (&dim, &stride) in shape.iter().zip(&strides) {
                let span = i128::from(stride)
                    .checked_mul(i128::from(dim) - 1)
                    .ok_or_else(overflow)?;
                let bound = if span >= 0 { &mut hi } else { &mut lo };
                *bound = bound.checked_add(span).ok_or_else(overflow)?;
            }
            let start = offset as i128 + lo;
            let end = offset as i128 + hi + tag.element_size() as i128;
            if start < 0 || end > data.len() as i128 {
                return Err(Error::InvalidLayout(format!(
                    "strides {:?} reach bytes {}..{} of a {}-byte buffer",
                    strides,
                    start,
                    end,
                    data.len()
                )));
            }
        }

        Ok(Self {
            tag,
            shape,
            strides,
            offset,
            data,
        })
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    /// Byte strides, one per dimension
    pub fn strides(&self) -> &[i64] {
        &self.strides
    }

    /// Total number of elements
    pub fn num_elements(&self) -> u64 {
        self.shape.iter().product()
    }

    /// Expected data size in bytes
    pub fn expected_size(&self) -> u64 {
        self.num_elements() * self.tag.element_size() as u64
    }

    /// True when elements are laid out row-major with no gaps
    pub fn is_contiguous(&self) -> bool {
        if self.num_elements() == 0 {
            return true;
        }
        let mut expected = self.tag.element_size() as i64;
        for (&dim, &stride) in self.shape.iter().zip(&self.strides).rev() {
            if dim != 1 && stride != expected {
                return false;
            }
            expected *= dim as i64;
        }
        true
    }

    /// Row-major bytes, or `None` if the array is not contiguous
    pub fn bytes(&self) -> Option<&[u8]> {
        if !self.is_contiguous() {
            return None;
        }
        if self.num_elements() == 0 {
            return Some(&[]);
        }
        let end = self.offset + self.expected_size() as usize;
        Some(&self.data[self.offset..end])
    }

    /// Swap axes order without copying (like numpy's `.T`)
    pub fn transpose(mut self) -> Self {
        self.shape.reverse();
        self.strides.reverse();
        self
    }

    /// Copy into a fresh C-contiguous array
    pub fn to_contiguous(&self) -> Array {
        let data = self.row_major_bytes().into_owned();
        Array {
            tag: self.tag,
            strides: c_strides(&self.shape, self.tag.element_size()),
            shape: self.shape.clone(),
            offset: 0,
            data,
        }
    }

    /// Elements in row-major order, whatever the layout; borrows when contiguous
    pub fn row_major_bytes(&self) -> Cow<'_, [u8]> {
        if let Some(bytes) = self.bytes() {
            return Cow::Borrowed(bytes);
        }

        let width = self.tag.element_size();
        let count = self.num_elements() as usize;
        let mut out = Vec::with_capacity(count * width);
        let mut index = vec![0u64; self.shape.len()];

        for _ in 0..count {
            let pos = index
                .iter()
                .zip(&self.strides)
                .fold(self.offset as i64, |acc, (&i, &s)| acc + i as i64 * s)
                as usize;
            out.extend_from_slice(&self.data[pos..pos + width]);

            for axis in (0..index.len()).rev() {
                index[axis] += 1;
                if index[axis] < self.shape[axis] {
                    break;
                }
                index[axis] = 0;
            }
        }
        Cow::Owned(out)
    }
}

/// Arrays compare by type-tag, shape and element bytes, regardless of layout
impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.shape == other.shape
            && self.row_major_bytes() == other.row_major_bytes()
    }
}

/// Wire form of an array: type-tag string, shape and row-major bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLeaf {
    pub tag: String,
    pub shape: Vec<u64>,
    pub data: Vec<u8>,
}

/// `product(shape) * element_size`, or `None` on overflow
pub(crate) fn expected_size(tag: TypeTag, shape: &[u64]) -> Option<u64> {
    shape
        .iter()
        .try_fold(tag.element_size() as u64, |acc, &dim| acc.checked_mul(dim))
}

/// Byte size of `shape`, rejecting shapes whose size or element count cannot
/// be addressed with signed 64-bit strides
fn addressable_size(tag: TypeTag, shape: &[u64]) -> Result<u64> {
    expected_size(tag, shape)
        .filter(|&size| i64::try_from(size).is_ok())
        .ok_or_else(|| Error::InvalidLayout(format!("shape {:?} of {} is too large", shape, tag)))
}

fn c_strides(shape: &[u64], width: usize) -> Vec<i64> {
    let mut strides = vec![0i64; shape.len()];
    let mut step = width as i64;
    for (stride, &dim) in strides.iter_mut().zip(shape).rev() {
        *stride = step;
        step *= dim.max(1) as i64;
    }
    strides
}
