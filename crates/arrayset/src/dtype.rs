//! Scalar element types.
//!
//! [`ElementType`] is the closed set of scalar kinds an [`Array`] can hold.
//! The [`Scalar`] trait ties each Rust scalar type to its variant so that
//! typed storage is selected at compile time rather than through dynamic
//! typing.
use std::fmt;
use std::str::FromStr;

use ndarray::ArrayD;
use num_complex::{Complex32, Complex64};
use serde::{Deserialize, Serialize};

use crate::array::Array;
use crate::error::ArraysetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// Pair of `f32` (real, imaginary).
    Complex64,
    /// Pair of `f64` (real, imaginary).
    Complex128,
    Bool,
}

impl ElementType {
    pub const ALL: [ElementType; 13] = [
        ElementType::Int8,
        ElementType::Int16,
        ElementType::Int32,
        ElementType::Int64,
        ElementType::UInt8,
        ElementType::UInt16,
        ElementType::UInt32,
        ElementType::UInt64,
        ElementType::Float32,
        ElementType::Float64,
        ElementType::Complex64,
        ElementType::Complex128,
        ElementType::Bool,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            ElementType::Int8 => "int8",
            ElementType::Int16 => "int16",
            ElementType::Int32 => "int32",
            ElementType::Int64 => "int64",
            ElementType::UInt8 => "uint8",
            ElementType::UInt16 => "uint16",
            ElementType::UInt32 => "uint32",
            ElementType::UInt64 => "uint64",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
            ElementType::Complex64 => "complex64",
            ElementType::Complex128 => "complex128",
            ElementType::Bool => "bool",
        }
    }

    /// Size in bytes of one scalar of this type.
    pub const fn byte_width(&self) -> usize {
        match self {
            ElementType::Int8 | ElementType::UInt8 | ElementType::Bool => 1,
            ElementType::Int16 | ElementType::UInt16 => 2,
            ElementType::Int32 | ElementType::UInt32 | ElementType::Float32 => 4,
            ElementType::Int64
            | ElementType::UInt64
            | ElementType::Float64
            | ElementType::Complex64 => 8,
            ElementType::Complex128 => 16,
        }
    }

    pub const fn is_complex(&self) -> bool {
        matches!(self, ElementType::Complex64 | ElementType::Complex128)
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, ElementType::Float32 | ElementType::Float64)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = ArraysetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ElementType::ALL
            .into_iter()
            .find(|ty| ty.name() == wanted)
            .ok_or_else(|| ArraysetError::UnknownElementType(s.to_string()))
    }
}

/// A Rust scalar type that can be stored in an [`Array`].
pub trait Scalar: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    const ELEMENT_TYPE: ElementType;

    /// Value used by [`Array::from_range`] at row-major position `index`.
    fn from_index(index: usize) -> Self;

    fn into_array(data: ArrayD<Self>) -> Array;

    fn as_typed(array: &Array) -> Option<&ArrayD<Self>>;

    /// Unwraps the typed storage, handing the array back untouched on a type mismatch.
    fn into_typed(array: Array) -> Result<ArrayD<Self>, Array>;
}

macro_rules! impl_scalar {
    ($ty:ty, $variant:ident, |$index:ident| $from_index:expr) => {
        impl Scalar for $ty {
            const ELEMENT_TYPE: ElementType = ElementType::$variant;

            #[inline]
            fn from_index($index: usize) -> Self {
                $from_index
            }

            fn into_array(data: ArrayD<Self>) -> Array {
                Array::$variant(data)
            }

            fn as_typed(array: &Array) -> Option<&ArrayD<Self>> {
                match array {
                    Array::$variant(data) => Some(data),
                    _ => None,
                }
            }

            fn into_typed(array: Array) -> Result<ArrayD<Self>, Array> {
                match array {
                    Array::$variant(data) => Ok(data),
                    other => Err(other),
                }
            }
        }
    };
}

// Integer variants wrap when the index exceeds their range.
impl_scalar!(i8, Int8, |i| i as i8);
impl_scalar!(i16, Int16, |i| i as i16);
impl_scalar!(i32, Int32, |i| i as i32);
impl_scalar!(i64, Int64, |i| i as i64);
impl_scalar!(u8, UInt8, |i| i as u8);
impl_scalar!(u16, UInt16, |i| i as u16);
impl_scalar!(u32, UInt32, |i| i as u32);
impl_scalar!(u64, UInt64, |i| i as u64);
impl_scalar!(f32, Float32, |i| i as f32);
impl_scalar!(f64, Float64, |i| i as f64);
impl_scalar!(Complex32, Complex64, |i| Complex32::new(i as f32, 0.0));
impl_scalar!(Complex64, Complex128, |i| Complex64::new(i as f64, 0.0));
impl_scalar!(bool, Bool, |i| i % 2 == 1);
