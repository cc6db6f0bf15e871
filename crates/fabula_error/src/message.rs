//! Message-carrying error wrappers.
//!
//! HTTP transport, JSON serialization, and configuration failures all reduce
//! to a message plus the location that raised them, so the three types share
//! one definition.

macro_rules! message_error {
    ($(#[$doc:meta])* $name:ident, $label:literal, $example:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
        #[display("{} Error: {} at line {} in {}", $label, message, line, file)]
        pub struct $name {
            /// The underlying error message
            pub message: String,
            /// Line number where the error occurred
            pub line: u32,
            /// File where the error occurred
            pub file: &'static str,
        }

        impl $name {
            #[doc = concat!("Create a new ", stringify!($name), " at the current location.")]
            ///
            /// # Examples
            ///
            /// ```
            #[doc = concat!("use fabula_error::", stringify!($name), ";")]
            ///
            #[doc = concat!("let err = ", stringify!($name), "::new(", stringify!($example), ");")]
            #[doc = concat!("assert!(err.message.contains(", stringify!($example), "));")]
            /// ```
            #[track_caller]
            pub fn new(message: impl Into<String>) -> Self {
                let location = std::panic::Location::caller();
                Self {
                    message: message.into(),
                    line: location.line(),
                    file: location.file(),
                }
            }
        }
    };
}

message_error!(
    /// HTTP error wrapping transport-level failures with source location.
    HttpError,
    "HTTP",
    "Connection refused"
);

message_error!(
    /// JSON error wrapping serde_json failures with source location.
    JsonError,
    "JSON",
    "expected value at line 1 column 1"
);

message_error!(
    /// Configuration error with source location.
    ConfigError,
    "Config",
    "FABULA_PROVIDER not set"
);
