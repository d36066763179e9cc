//! Dynamically typed N-dimensional arrays.
//!
//! [`Array`] wraps an `ndarray::ArrayD<T>` for every supported [`Scalar`]. It is
//! what callers hand to an [`crate::Arrayset`] and what they get back from it.
//! Construction goes through explicit factory functions parameterized by
//! [`ElementType`] and extents.
//!
//! Data is kept in row-major (standard) layout. Slicing an array along an axis
//! copies each slice into its own standard-layout buffer.
use ndarray::{ArrayD, ArrayViewD, Axis, Dimension, IxDyn};
use num_complex::{Complex32, Complex64};
use rayon::prelude::*;

use crate::dtype::{ElementType, Scalar};
use crate::error::{ArraysetError, Result};
use crate::shape::{ElementLayout, ElementShape};

#[derive(Clone, Debug, PartialEq)]
pub enum Array {
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    UInt8(ArrayD<u8>),
    UInt16(ArrayD<u16>),
    UInt32(ArrayD<u32>),
    UInt64(ArrayD<u64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Complex64(ArrayD<Complex32>),
    Complex128(ArrayD<Complex64>),
    Bool(ArrayD<bool>),
}

/// Runs `$body` with `$data` bound to the typed storage of `$array`.
macro_rules! dispatch {
    ($array:expr, $data:ident => $body:expr) => {
        match $array {
            Array::Int8($data) => $body,
            Array::Int16($data) => $body,
            Array::Int32($data) => $body,
            Array::Int64($data) => $body,
            Array::UInt8($data) => $body,
            Array::UInt16($data) => $body,
            Array::UInt32($data) => $body,
            Array::UInt64($data) => $body,
            Array::Float32($data) => $body,
            Array::Float64($data) => $body,
            Array::Complex64($data) => $body,
            Array::Complex128($data) => $body,
            Array::Bool($data) => $body,
        }
    };
}

/// Runs `$body` with `$t` aliased to the Rust scalar of `$element_type`.
macro_rules! with_scalar {
    ($element_type:expr, $t:ident => $body:expr) => {
        match $element_type {
            ElementType::Int8 => {
                type $t = i8;
                $body
            }
            ElementType::Int16 => {
                type $t = i16;
                $body
            }
            ElementType::Int32 => {
                type $t = i32;
                $body
            }
            ElementType::Int64 => {
                type $t = i64;
                $body
            }
            ElementType::UInt8 => {
                type $t = u8;
                $body
            }
            ElementType::UInt16 => {
                type $t = u16;
                $body
            }
            ElementType::UInt32 => {
                type $t = u32;
                $body
            }
            ElementType::UInt64 => {
                type $t = u64;
                $body
            }
            ElementType::Float32 => {
                type $t = f32;
                $body
            }
            ElementType::Float64 => {
                type $t = f64;
                $body
            }
            ElementType::Complex64 => {
                type $t = Complex32;
                $body
            }
            ElementType::Complex128 => {
                type $t = Complex64;
                $body
            }
            ElementType::Bool => {
                type $t = bool;
                $body
            }
        }
    };
}

impl Array {
    /// Builds an array of `extents` from a row-major buffer.
    pub fn from_shape_vec<T: Scalar>(extents: &[usize], data: Vec<T>) -> Result<Self> {
        let expected = num_elements(extents)?;
        if data.len() != expected {
            return Err(ArraysetError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        // ndarray also refuses shapes whose size exceeds `isize::MAX`
        let data = ArrayD::from_shape_vec(IxDyn(extents), data).map_err(|_| {
            ArraysetError::ShapeOverflow {
                extents: extents.to_vec(),
            }
        })?;
        Ok(T::into_array(data))
    }

    /// Array of `extents` filled with the default value of `element_type` (zero / `false`).
    ///
    /// # Panics
    ///
    /// Panics if the number of scalars overflows `isize`.
    pub fn zeros(element_type: ElementType, extents: &[usize]) -> Self {
        with_scalar!(element_type, T => T::into_array(ArrayD::from_elem(IxDyn(extents), T::default())))
    }

    /// Array of `extents` holding `0, 1, 2, ...` in row-major order.
    ///
    /// Complex values get a zero imaginary part; booleans are `true` at odd
    /// positions. Integer types narrower than the element count wrap.
    ///
    /// # Panics
    ///
    /// Panics if the number of scalars overflows `usize`.
    pub fn from_range(element_type: ElementType, extents: &[usize]) -> Self {
        with_scalar!(element_type, T => {
            let count: usize = extents.iter().product();
            let data: Vec<T> = (0..count).map(T::from_index).collect();
            match ArrayD::from_shape_vec(IxDyn(extents), data) {
                Ok(data) => T::into_array(data),
                Err(_) => unreachable!("buffer length is the product of the extents"),
            }
        })
    }

    pub fn element_type(&self) -> ElementType {
        dispatch!(self, data => element_type_of(data))
    }

    /// Extents of every dimension.
    pub fn shape(&self) -> &[usize] {
        dispatch!(self, data => data.shape())
    }

    pub fn rank(&self) -> usize {
        self.shape().len()
    }

    /// Extent along `dimension`, or `None` when the axis does not exist.
    pub fn extent(&self, dimension: usize) -> Option<usize> {
        self.shape().get(dimension).copied()
    }

    /// Total number of scalars.
    pub fn len(&self) -> usize {
        dispatch!(self, data => data.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Layout of this array when stored whole as one element.
    pub fn layout(&self) -> ElementLayout {
        ElementLayout::new(self.element_type(), ElementShape::from(self.shape()))
    }

    /// Layout of the elements produced by slicing along `dimension`.
    pub fn layout_without(&self, dimension: usize) -> Result<ElementLayout> {
        self.check_dimension(dimension)?;
        Ok(ElementLayout::new(
            self.element_type(),
            ElementShape::without_axis(self.shape(), dimension),
        ))
    }

    pub fn view<T: Scalar>(&self) -> Option<ArrayViewD<'_, T>> {
        T::as_typed(self).map(|data| data.view())
    }

    pub fn into_typed<T: Scalar>(self) -> Result<ArrayD<T>> {
        T::into_typed(self).map_err(|other| ArraysetError::TypeMismatch {
            expected: T::ELEMENT_TYPE,
            found: other.element_type(),
        })
    }

    /// Numeric equality: same element type, same shape and equal scalars.
    pub fn num_eq(&self, other: &Array) -> bool {
        self == other
    }

    /// Owned copy of the sub-array with axis `dimension` held at `index`.
    pub fn index_axis(&self, dimension: usize, index: usize) -> Result<Array> {
        self.check_dimension(dimension)?;
        let len = self.shape()[dimension];
        if index >= len {
            return Err(ArraysetError::OutOfRange { index, len });
        }
        let axis = Axis(dimension);
        Ok(dispatch!(self, data => index_owned(data, axis, index)))
    }

    /// Every slice along `dimension`, in increasing index order.
    pub fn slices(&self, dimension: usize) -> Result<Vec<Array>> {
        self.slices_with(dimension, false)
    }

    pub(crate) fn slices_with(&self, dimension: usize, parallel: bool) -> Result<Vec<Array>> {
        self.check_dimension(dimension)?;
        let axis = Axis(dimension);
        Ok(dispatch!(self, data => slice_owned(data, axis, parallel)))
    }

    fn check_dimension(&self, dimension: usize) -> Result<()> {
        let rank = self.rank();
        if dimension >= rank {
            return Err(ArraysetError::InvalidDimension { dimension, rank });
        }
        Ok(())
    }
}

/// Product of `extents`, failing instead of wrapping on overflow.
fn num_elements(extents: &[usize]) -> Result<usize> {
    extents
        .iter()
        .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
        .ok_or_else(|| ArraysetError::ShapeOverflow {
            extents: extents.to_vec(),
        })
}

fn element_type_of<T: Scalar>(_: &ArrayD<T>) -> ElementType {
    T::ELEMENT_TYPE
}

fn index_owned<T: Scalar>(data: &ArrayD<T>, axis: Axis, index: usize) -> Array {
    T::into_array(data.index_axis(axis, index).to_owned())
}

fn slice_owned<T: Scalar>(data: &ArrayD<T>, axis: Axis, parallel: bool) -> Vec<Array> {
    if parallel {
        (0..data.len_of(axis))
            .into_par_iter()
            .map(|index| index_owned(data, axis, index))
            .collect()
    } else {
        data.axis_iter(axis)
            .map(|view| T::into_array(view.to_owned()))
            .collect()
    }
}

impl<T: Scalar, D: Dimension> From<ndarray::Array<T, D>> for Array {
    fn from(value: ndarray::Array<T, D>) -> Self {
        T::into_array(value.into_dyn())
    }
}
