//! Top-level error wrapper types.

use crate::{
    AccessError, BuilderError, ConfigError, HttpError, JsonError, PipelineError, ProviderError,
    SchemaError, StorageError,
};
#[cfg(feature = "database")]
use crate::DatabaseError;

/// Foundation error enum aggregating the per-domain error types.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaError, ProviderError, ProviderErrorKind};
///
/// let provider_err = ProviderError::new(ProviderErrorKind::EmptyResponse);
/// let err: FabulaError = provider_err.into();
/// assert!(format!("{}", err).contains("empty response"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulaErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// AI provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Schema validation error
    #[from(SchemaError)]
    Schema(SchemaError),
    /// Access control or lookup error
    #[from(AccessError)]
    Access(AccessError),
    /// Pipeline orchestration error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Blob storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Fabula error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaResult, ConfigError};
///
/// fn might_fail() -> FabulaResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabula Error: {}", _0)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FabulaErrorKind
impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabula operations.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaResult, HttpError};
///
/// fn fetch_data() -> FabulaResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type FabulaResult<T> = std::result::Result<T, FabulaError>;
