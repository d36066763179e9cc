//! The [`Arrayset`] container.
//!
//! An arrayset is an ordered, growable sequence of [`Array`] elements that all
//! share one [`ElementType`] and one [`ElementShape`]. The layout is committed
//! by the first successful insertion and checked on every later one. Each
//! insertion call is all-or-nothing: on error the arrayset is left untouched.
use std::ops::Index;

use crate::array::Array;
use crate::config::ArraysetConfig;
use crate::dtype::ElementType;
use crate::error::{ArraysetError, Result};
use crate::shape::{ElementLayout, ElementShape};

#[derive(Debug, Clone, Default)]
pub struct Arrayset {
    /// `None` exactly while the arrayset is empty.
    layout: Option<ElementLayout>,
    elements: Vec<Array>,
    config: ArraysetConfig,
}

impl Arrayset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ArraysetConfig) -> Self {
        Self {
            layout: None,
            elements: Vec::with_capacity(config.initial_capacity),
            config,
        }
    }

    /// Builds an arrayset holding `arrays`, one element each.
    pub fn from_arrays(arrays: Vec<Array>) -> Result<Self> {
        let mut set = Self::new();
        set.extend(arrays)?;
        Ok(set)
    }

    pub fn config(&self) -> &ArraysetConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element type and shape, or `None` while the arrayset is empty.
    pub fn layout(&self) -> Option<&ElementLayout> {
        self.layout.as_ref()
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.layout.as_ref().map(|layout| layout.element_type)
    }

    pub fn element_shape(&self) -> Option<&ElementShape> {
        self.layout.as_ref().map(|layout| &layout.shape)
    }

    /// Appends every slice of `source` along `dimension`, in increasing index order.
    ///
    /// Each element has the shape of `source` with `dimension` removed. The
    /// length grows by `source.extent(dimension)`.
    pub fn extend_along(&mut self, source: &Array, dimension: usize) -> Result<()> {
        let derived = self.prepare_slices(source, dimension)?;
        let count = source.shape()[dimension];
        if count == 0 {
            return Ok(());
        }
        let slices = source.slices_with(dimension, self.config.parallel_for(count))?;
        self.commit(derived, slices)
    }

    /// Appends each array of `elements` as one element, in order.
    ///
    /// The batch is checked against the established layout or, on an empty
    /// arrayset, against its own first member. Nothing is added if any member
    /// disagrees.
    pub fn extend<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator<Item = Array>,
    {
        let batch: Vec<Array> = elements.into_iter().collect();
        let Some(first) = batch.first() else {
            return Ok(());
        };

        let reference = match &self.layout {
            Some(layout) => layout.clone(),
            None => first.layout(),
        };
        for (position, element) in batch.iter().enumerate() {
            let found = element.layout();
            if found == reference {
                continue;
            }
            let err = match self.layout {
                Some(_) => match reference.check(&found) {
                    Err(err) => err,
                    Ok(()) => continue,
                },
                None => ArraysetError::InconsistentBatch {
                    position,
                    expected: reference.clone(),
                    found,
                },
            };
            log::debug!("Rejected batch of {} arrays: {}", batch.len(), err);
            return Err(err);
        }

        self.append(reference, batch);
        Ok(())
    }

    pub fn push(&mut self, element: Array) -> Result<()> {
        self.extend(std::iter::once(element))
    }

    pub fn get(&self, index: usize) -> Result<&Array> {
        self.elements.get(index).ok_or(ArraysetError::OutOfRange {
            index,
            len: self.elements.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Array> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Array] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Array> {
        self.elements
    }

    /// Validates `dimension` and checks the layout slicing would produce,
    /// without copying anything.
    pub(crate) fn prepare_slices(&self, source: &Array, dimension: usize) -> Result<ElementLayout> {
        let derived = source.layout_without(dimension)?;
        if let Some(layout) = &self.layout {
            if let Err(err) = layout.check(&derived) {
                log::debug!(
                    "Rejected {} slices of {} along dimension {}: {}",
                    source.shape()[dimension],
                    source.layout(),
                    dimension,
                    err
                );
                return Err(err);
            }
        }
        Ok(derived)
    }

    /// Appends pre-sliced elements whose common layout is `layout`, re-checking
    /// it against the established one.
    pub(crate) fn commit(&mut self, layout: ElementLayout, slices: Vec<Array>) -> Result<()> {
        if slices.is_empty() {
            return Ok(());
        }
        if let Some(current) = &self.layout {
            current.check(&layout)?;
        }
        self.append(layout, slices);
        Ok(())
    }

    fn append(&mut self, layout: ElementLayout, elements: Vec<Array>) {
        if self.layout.is_none() {
            log::debug!("Arrayset layout committed as {}", layout);
            self.layout = Some(layout);
        }
        let added = elements.len();
        self.elements.extend(elements);
        log::trace!("Appended {} elements, length is now {}", added, self.elements.len());
    }
}

impl PartialEq for Arrayset {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout && self.elements == other.elements
    }
}

impl Index<usize> for Arrayset {
    type Output = Array;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<'a> IntoIterator for &'a Arrayset {
    type Item = &'a Array;
    type IntoIter = std::slice::Iter<'a, Array>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for Arrayset {
    type Item = Array;
    type IntoIter = std::vec::IntoIter<Array>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_arrayset_has_no_layout() {
        let set = Arrayset::new();
        assert!(set.is_empty());
        assert_eq!(set.element_type(), None);
        assert_eq!(set.element_shape(), None);
        assert_eq!(set.get(0), Err(ArraysetError::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn zero_extent_source_commits_nothing() {
        let mut set = Arrayset::new();
        let source = Array::zeros(ElementType::Int32, &[4, 0, 2]);
        set.extend_along(&source, 1).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.layout(), None);

        // an int64 source is still accepted afterwards
        set.extend_along(&Array::zeros(ElementType::Int64, &[3, 2]), 0)
            .unwrap();
        assert_eq!(set.element_type(), Some(ElementType::Int64));
    }

    #[test]
    fn empty_batch_is_a_noop() {
        let mut set = Arrayset::new();
        set.extend(Vec::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.layout(), None);
    }

    #[test]
    fn commit_rechecks_established_layout() {
        let mut set = Arrayset::new();
        set.push(Array::zeros(ElementType::Float32, &[2])).unwrap();
        let layout = ElementLayout::new(ElementType::Float32, vec![3].into());
        let result = set.commit(layout, vec![Array::zeros(ElementType::Float32, &[3])]);
        assert!(matches!(result, Err(ArraysetError::ShapeMismatch { .. })));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn with_config_reserves_capacity() {
        let set = Arrayset::with_config(ArraysetConfig::new(32, None));
        assert!(set.elements.capacity() >= 32);
        assert_eq!(set.config().parallel_threshold, None);
    }
}
