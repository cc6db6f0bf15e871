//! Schema validation error types.
//!
//! Raised when AI output or a persistence payload fails validation against
//! its typed shape.

/// Specific schema validation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SchemaErrorKind {
    /// Raw provider text is not well-formed JSON
    #[display("Failed to parse provider output as JSON: {}", _0)]
    Parse(String),
    /// Parsed JSON does not satisfy the target type
    #[display("'{}' failed schema validation: {}", entity, message)]
    Validation {
        /// Entity or draft type under validation
        entity: String,
        /// Deserialization error message
        message: String,
    },
    /// Failed to build the JSON schema for a target type
    #[display("Failed to build schema for '{}': {}", entity, message)]
    SchemaConstruction {
        /// Entity or draft type the schema was built for
        entity: String,
        /// Error message
        message: String,
    },
}

/// Schema validation error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{SchemaError, SchemaErrorKind};
///
/// let err = SchemaError::new(SchemaErrorKind::Validation {
///     entity: "CharacterDraft".to_string(),
///     message: "unknown variant `villain-ish`".to_string(),
/// });
/// assert!(format!("{}", err).contains("CharacterDraft"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Schema Error: {} at line {} in {}", kind, line, file)]
pub struct SchemaError {
    /// The kind of error that occurred
    pub kind: SchemaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SchemaError {
    /// Create a new SchemaError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SchemaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
