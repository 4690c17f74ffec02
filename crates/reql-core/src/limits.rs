//! Bounds applied when parsing literals.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ARRAY_SIZE_LIMIT: usize = 100_000;
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// Limits on literal size and depth.
///
/// Missing fields fall back to their defaults when deserialized, so a config
/// file only needs to name what it overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfiguredLimits {
    /// Maximum number of elements in a single array literal.
    pub array_size_limit: usize,
    /// Maximum nesting of arrays and objects.
    pub max_nesting_depth: usize,
}

impl Default for ConfiguredLimits {
    fn default() -> Self {
        Self {
            array_size_limit: DEFAULT_ARRAY_SIZE_LIMIT,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ConfiguredLimits {
    /// No bounds at all.
    pub fn unlimited() -> Self {
        Self {
            array_size_limit: usize::MAX,
            max_nesting_depth: usize::MAX,
        }
    }

    pub fn with_array_size_limit(mut self, limit: usize) -> Self {
        self.array_size_limit = limit;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}
