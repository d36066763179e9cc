use thiserror::Error;

use crate::dtype::ElementType;
use crate::shape::{ElementLayout, ElementShape};

/// Errors reported by [`crate::Array`] and [`crate::Arrayset`] operations.
///
/// Every variant is recoverable: a failed insertion leaves the arrayset
/// exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArraysetError {
    /// The scalar type of an inserted element differs from the established one.
    #[error("element type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ElementType,
        found: ElementType,
    },
    /// The rank or an extent of an inserted element differs from the established shape.
    #[error("element shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        expected: ElementShape,
        found: ElementShape,
    },
    #[error("dimension {dimension} is not a valid axis for an array of rank {rank}")]
    InvalidDimension { dimension: usize, rank: usize },
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// A list insertion whose members disagree with the batch's first element.
    #[error("batch element {position} has layout {found}, expected {expected}")]
    InconsistentBatch {
        position: usize,
        expected: ElementLayout,
        found: ElementLayout,
    },
    #[error("buffer of {actual} scalars does not match a shape holding {expected} scalars")]
    InvalidBuffer { expected: usize, actual: usize },
    /// The product of the requested extents does not fit in memory addressing.
    #[error("shape {extents:?} holds more scalars than can be addressed")]
    ShapeOverflow { extents: Vec<usize> },
    #[error("unknown element type: {0}")]
    UnknownElementType(String),
}

pub type Result<T> = std::result::Result<T, ArraysetError>;
