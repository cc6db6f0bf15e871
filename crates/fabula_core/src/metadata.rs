//! Generation timing metadata.

use serde::{Deserialize, Serialize};

/// Timing and provenance metadata attached to every generator result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Wall-clock duration of the generation call(s), in milliseconds
    pub duration_ms: u64,
    /// Model that produced the result, when the provider reports one
    pub model: Option<String>,
}

/// A generator result: entity data plus timing metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generated<T> {
    /// The generated data, not yet validated for persistence
    pub data: T,
    /// Timing and provenance
    pub metadata: GenerationMetadata,
}

impl<T> Generated<T> {
    /// Wrap data with its metadata.
    pub fn new(data: T, metadata: GenerationMetadata) -> Self {
        Self { data, metadata }
    }

    /// Map the data, keeping metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generated<U> {
        Generated {
            data: f(self.data),
            metadata: self.metadata,
        }
    }
}
