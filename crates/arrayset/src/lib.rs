//! arrayset: type- and shape-homogeneous collections of N-dimensional arrays.
//!
//! An [`Arrayset`] is the in-memory unit a dataset record holds: an ordered,
//! growable list of [`Array`] elements that all share one [`ElementType`] and
//! one [`ElementShape`]. Elements are added either by slicing a higher-rank
//! array along one of its dimensions or from a list of already-sliced arrays,
//! and read back by index or iteration in insertion order.
//!
//! [`SharedArrayset`] wraps an arrayset for multi-reader, single-writer use
//! across threads.
pub mod array;
pub mod arrayset;
pub mod config;
pub mod dtype;
pub mod error;
pub mod shape;
pub mod shared;

pub use array::Array;
pub use arrayset::Arrayset;
pub use config::{load_config, ArraysetConfig};
pub use dtype::{ElementType, Scalar};
pub use error::{ArraysetError, Result};
pub use shape::{ElementLayout, ElementShape};
pub use shared::SharedArrayset;
