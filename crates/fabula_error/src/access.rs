//! Access control and lookup error types.

use uuid::Uuid;

/// Specific access error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AccessErrorKind {
    /// A prerequisite row does not exist
    #[display("{} {} not found", entity, id)]
    NotFound {
        /// Entity kind (story, part, chapter, scene, ...)
        entity: &'static str,
        /// The missing id
        id: Uuid,
    },
    /// Actor does not own the story
    #[display("Actor {} does not own story {}", actor_id, story_id)]
    Denied {
        /// The story being accessed
        story_id: Uuid,
        /// The requesting actor
        actor_id: Uuid,
    },
}

/// Access error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{AccessError, AccessErrorKind};
/// use uuid::Uuid;
///
/// let err = AccessError::new(AccessErrorKind::NotFound {
///     entity: "story",
///     id: Uuid::nil(),
/// });
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Access Error: {} at line {} in {}", kind, line, file)]
pub struct AccessError {
    /// The kind of error that occurred
    pub kind: AccessErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AccessError {
    /// Create a new AccessError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AccessErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Convenience constructor for a missing prerequisite row.
    #[track_caller]
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::new(AccessErrorKind::NotFound { entity, id })
    }

    /// Convenience constructor for an ownership mismatch.
    #[track_caller]
    pub fn denied(story_id: Uuid, actor_id: Uuid) -> Self {
        Self::new(AccessErrorKind::Denied { story_id, actor_id })
    }
}
