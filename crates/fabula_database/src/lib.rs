//! PostgreSQL persistence for Fabula novels.
//!
//! Stores the narrative hierarchy (stories, characters, settings, parts,
//! chapters, scenes, comic panels) via Diesel. Closed-vocabulary fields are
//! `Text` columns re-parsed on read; nested value objects are `Jsonb` blobs
//! re-deserialized into their typed shapes, so malformed rows surface as
//! `DatabaseError::Serialization` instead of silently corrupt data.
//!
//! The [`PostgresNovelRepository`] implements the pipeline's
//! `NovelRepository` seam; image bytes live in `fabula_storage`, only their
//! keys are recorded here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod conversions;
mod repository;
mod rows;
mod schema;

pub use fabula_error::{DatabaseError, DatabaseErrorKind};
pub use repository::{PostgresNovelRepository, establish_connection};
