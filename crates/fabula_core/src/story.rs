//! Story entity and draft.

use crate::{Genre, Tone};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted story, the root of a generation run.
///
/// Created once; read by every downstream phase; never regenerated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Database-assigned id
    pub id: Uuid,
    /// Owning user
    pub author_id: Uuid,
    /// Story title
    pub title: String,
    /// Genre
    pub genre: Genre,
    /// Tone
    pub tone: Tone,
    /// One-paragraph summary
    pub summary: String,
    /// The moral framework the adversity-triumph cycles exercise
    pub moral_framework: String,
    /// Creation timestamp (database-assigned)
    pub created_at: DateTime<Utc>,
}

/// Generator output for a story: the AI-populated subset of [`Story`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StoryDraft {
    /// Story title
    pub title: String,
    /// Genre, drawn from the closed vocabulary
    pub genre: Genre,
    /// Tone, drawn from the closed vocabulary
    pub tone: Tone,
    /// One-paragraph summary
    pub summary: String,
    /// The moral framework the story explores
    pub moral_framework: String,
}
