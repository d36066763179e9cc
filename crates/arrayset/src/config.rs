use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tuning knobs for an [`crate::Arrayset`].
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ArraysetConfig {
    /// Number of elements to reserve room for up front.
    pub initial_capacity: usize,

    /// Slice counts at or above this value are sliced on the rayon pool.
    /// `None` keeps slicing on the calling thread.
    pub parallel_threshold: Option<usize>,
}

impl Default for ArraysetConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            parallel_threshold: Some(64),
        }
    }
}

impl ArraysetConfig {
    pub fn new(initial_capacity: usize, parallel_threshold: Option<usize>) -> Self {
        Self {
            initial_capacity,
            parallel_threshold,
        }
    }

    /// Configuration that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: None,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse arrayset config")
    }

    pub(crate) fn parallel_for(&self, slice_count: usize) -> bool {
        self.parallel_threshold
            .is_some_and(|threshold| slice_count >= threshold)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ArraysetConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    ArraysetConfig::from_json_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))
}
