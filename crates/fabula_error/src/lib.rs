//! Error types for the Fabula generation pipeline.
//!
//! This crate provides the foundation error types used throughout the Fabula
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use fabula_error::{FabulaResult, ProviderError, ProviderErrorKind};
//!
//! fn call_provider() -> FabulaResult<String> {
//!     Err(ProviderError::new(ProviderErrorKind::EmptyResponse))?
//! }
//!
//! match call_provider() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod access;
mod builder;
#[cfg(feature = "database")]
mod database;
mod error;
mod message;
mod pipeline;
mod provider;
mod schema;
mod storage;

pub use access::{AccessError, AccessErrorKind};
pub use builder::{BuilderError, BuilderErrorKind};
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{FabulaError, FabulaErrorKind, FabulaResult};
pub use message::{ConfigError, HttpError, JsonError};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use schema::{SchemaError, SchemaErrorKind};
pub use storage::{StorageError, StorageErrorKind};
