//! Decoder configuration
//!
//! Options are plain data so an embedding application can keep them in its
//! own config file next to everything else.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result};

/// Configuration for a [`Decoder`](crate::Decoder)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Deepest list/dictionary nesting accepted. `None` is unbounded.
    pub max_depth: Option<usize>,
}

impl DecodeOptions {
    /// Create options with no limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how deep lists and dictionaries may nest
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Load options from a JSON document
    pub fn from_json(data: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(data)
            .map_err(|e| DecodeError::invalid_options(e.to_string(), "json"))?;
        options.validate()?;
        Ok(options)
    }

    /// Validate options
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            return Err(DecodeError::invalid_options(
                "must be at least 1, a top-level list already has depth 1",
                "max_depth",
            ));
        }

        Ok(())
    }
}
