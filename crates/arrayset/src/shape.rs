use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dtype::ElementType;
use crate::error::{ArraysetError, Result};

/// Extents of every dimension of one stored element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementShape(Vec<usize>);

impl ElementShape {
    pub fn new(extents: Vec<usize>) -> Self {
        Self(extents)
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    pub fn extents(&self) -> &[usize] {
        &self.0
    }

    /// Number of scalars held by an element of this shape.
    pub fn num_elements(&self) -> usize {
        self.0.iter().product()
    }

    /// The shape with axis `dimension` dropped, keeping the remaining axes in order.
    pub(crate) fn without_axis(extents: &[usize], dimension: usize) -> Self {
        let mut kept = Vec::with_capacity(extents.len().saturating_sub(1));
        kept.extend_from_slice(&extents[..dimension]);
        kept.extend_from_slice(&extents[dimension + 1..]);
        Self(kept)
    }
}

impl From<Vec<usize>> for ElementShape {
    fn from(value: Vec<usize>) -> Self {
        Self::new(value)
    }
}

impl From<&[usize]> for ElementShape {
    fn from(value: &[usize]) -> Self {
        Self::new(value.to_vec())
    }
}

impl AsRef<[usize]> for ElementShape {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for ElementShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, extent) in self.0.iter().enumerate() {
            write!(f, "{}", extent)?;
            if idx + 1 != self.0.len() {
                write!(f, ", ")?;
            }
        }
        // one-tuples keep their trailing comma
        if self.0.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

/// Element type and shape shared by every element of an arrayset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementLayout {
    pub element_type: ElementType,
    pub shape: ElementShape,
}

impl ElementLayout {
    pub fn new(element_type: ElementType, shape: ElementShape) -> Self {
        Self {
            element_type,
            shape,
        }
    }

    /// Checks that `found` matches this layout. Type is compared before shape.
    pub fn check(&self, found: &ElementLayout) -> Result<()> {
        if self.element_type != found.element_type {
            return Err(ArraysetError::TypeMismatch {
                expected: self.element_type,
                found: found.element_type,
            });
        }
        if self.shape != found.shape {
            return Err(ArraysetError::ShapeMismatch {
                expected: self.shape.clone(),
                found: found.shape.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for ElementLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.element_type, self.shape)
    }
}
