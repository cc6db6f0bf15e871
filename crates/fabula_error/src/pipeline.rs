//! Pipeline error types for the generation orchestrator.

/// Specific error conditions for pipeline operations.
///
/// `PhaseFailed` and `BatchAborted` keep the underlying error intact rather
/// than flattening it to a string, so callers can still match on the cause.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PipelineErrorKind {
    /// A generation phase failed and aborted the run
    #[display("Phase '{}' failed: {}", phase, source)]
    PhaseFailed {
        /// Phase name
        phase: String,
        /// Underlying error that aborted the phase
        source: Box<crate::FabulaError>,
    },
    /// A batch item failed, aborting the remaining items
    #[display("Batch item {} of {} failed: {}", item, total, source)]
    BatchAborted {
        /// 1-based index of the failed item
        item: usize,
        /// Total items requested
        total: usize,
        /// Underlying error that aborted the batch
        source: Box<crate::FabulaError>,
    },
    /// Generated prose was empty after trimming
    #[display("Generated content for '{}' was empty", _0)]
    EmptyContent(#[error(not(source))] String),
    /// Orchestration options are inconsistent
    #[display("Invalid generation options: {}", _0)]
    InvalidOptions(#[error(not(source))] String),
    /// A required intermediate artifact is missing
    #[display("Missing intermediate artifact: {}", _0)]
    MissingArtifact(#[error(not(source))] String),
}

/// Pipeline error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::EmptyContent("scene".to_string()));
/// assert!(format!("{}", err).contains("scene"));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
