//! Provider error types for AI text and image backends.

/// Specific error conditions raised by generation providers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Provider returned blank text
    #[display("Provider returned an empty response")]
    EmptyResponse,
    /// API request failed with a non-success HTTP status
    #[display("Provider HTTP {} error: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the provider
        message: String,
    },
    /// Request failed before a status was received (connect, DNS, TLS)
    #[display("Provider request failed: {}", _0)]
    Request(String),
    /// Request exceeded the configured timeout
    #[display("Provider request timed out after {}s", _0)]
    Timeout(u64),
    /// API key or endpoint misconfigured
    #[display("Invalid provider configuration: {}", _0)]
    InvalidConfiguration(String),
    /// Generation stopped for a reason other than completion
    #[display("Generation stopped early: {}", _0)]
    Truncated(String),
}

impl ProviderErrorKind {
    /// Check if this error condition should be retried.
    ///
    /// Transient upstream failures are the dominant expected fault mode, so
    /// rate limiting and server-side errors are retryable; everything else
    /// propagates immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            ProviderErrorKind::Request(_) => true,
            _ => false,
        }
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::Api {
///     status: 429,
///     message: "rate limited".to_string(),
/// });
/// assert!(format!("{}", err).contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
