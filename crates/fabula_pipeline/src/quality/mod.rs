//! Quality-improvement loops.
//!
//! Bounded evaluate-rewrite cycles over generated content. Both variants
//! share the same state machine: evaluate, accept at or above the
//! threshold, accept whatever exists on the final iteration (the ceiling),
//! otherwise rewrite and go around again. The toonplay variant adds a
//! structural gate checked independently of the LLM score.

mod prose;
mod toonplay;

pub use prose::{ProseQualityLoop, QualityOutcome};
pub use toonplay::{
    MAX_NARRATION_RATIO, MIN_DIALOGUE_RATIO, MIN_DISTINCT_SHOTS, ToonplayOutcome,
    ToonplayQualityLoop, structural_issues,
};

/// Score at or above which content is accepted without another rewrite.
pub const QUALITY_THRESHOLD: f32 = 3.0;

/// A rewrite replaces prior content only when its length exceeds this
/// fraction of the previous length. Crude anti-truncation guard; a policy
/// constant, not a load-bearing algorithm.
pub const MIN_REWRITE_RATIO: f32 = 0.5;

/// Default iteration ceiling.
pub const DEFAULT_MAX_ITERATIONS: u32 = 2;
