//! Thread-shared arrayset with single-writer, multi-reader access.
//!
//! Readers take the read lock; insertions take the write lock once, for both
//! validation and append, so a reader observes either the state before an
//! insertion or the state after it. Slicing of a source array runs before the
//! write lock is taken.
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::array::Array;
use crate::arrayset::Arrayset;
use crate::dtype::ElementType;
use crate::error::Result;
use crate::shape::ElementShape;

#[derive(Debug, Clone, Default)]
pub struct SharedArrayset {
    inner: Arc<RwLock<Arrayset>>,
}

impl SharedArrayset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_arrayset(set: Arrayset) -> Self {
        Self {
            inner: Arc::new(RwLock::new(set)),
        }
    }

    // A panic while holding the lock cannot leave a half-applied insertion
    // behind, so poisoned guards are still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Arrayset> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arrayset> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.read().element_type()
    }

    pub fn element_shape(&self) -> Option<ElementShape> {
        self.read().element_shape().cloned()
    }

    /// Copy of the element at `index`.
    pub fn get(&self, index: usize) -> Result<Array> {
        self.read().get(index).cloned()
    }

    /// Copy of the whole arrayset as of now.
    pub fn snapshot(&self) -> Arrayset {
        self.read().clone()
    }

    pub fn extend_along(&self, source: &Array, dimension: usize) -> Result<()> {
        let (derived, parallel) = {
            let set = self.read();
            let derived = set.prepare_slices(source, dimension)?;
            (derived, set.config().parallel_for(source.shape()[dimension]))
        };
        let slices = source.slices_with(dimension, parallel)?;
        self.write().commit(derived, slices)
    }

    pub fn extend<I>(&self, elements: I) -> Result<()>
    where
        I: IntoIterator<Item = Array>,
    {
        let batch: Vec<Array> = elements.into_iter().collect();
        self.write().extend(batch)
    }

    pub fn push(&self, element: Array) -> Result<()> {
        self.write().push(element)
    }

    /// Unwraps the arrayset if this is the last handle, otherwise returns a snapshot.
    pub fn into_inner(self) -> Arrayset {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => lock.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared
                .read()
                .map(|set| set.clone())
                .unwrap_or_else(|poisoned| poisoned.into_inner().clone()),
        }
    }
}

impl From<Arrayset> for SharedArrayset {
    fn from(value: Arrayset) -> Self {
        Self::from_arrayset(value)
    }
}
