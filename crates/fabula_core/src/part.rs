//! Part entity and draft.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One character's movement through a part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CharacterArc {
    /// Name of the character this arc belongs to; resolved to a character id
    /// at persistence time
    pub character_name: String,
    /// The adversity the character faces in this part
    pub adversity: String,
    /// The virtue the character exercises in response
    pub virtue: String,
    /// The consequence, cost or reward, that lands
    pub consequence: String,
}

/// A persisted part: a major division of the story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Database-assigned id
    pub id: Uuid,
    /// Owning story
    pub story_id: Uuid,
    /// Part title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Per-character arcs through this part
    pub character_arcs: Vec<CharacterArc>,
    /// Settings this part plays out in
    pub setting_ids: Vec<Uuid>,
    /// Position within the story, assigned monotonically at creation
    pub order_index: i32,
    /// Creation timestamp (database-assigned)
    pub created_at: DateTime<Utc>,
}

/// Generator output for one part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PartDraft {
    /// Part title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Per-character arcs through this part
    pub character_arcs: Vec<CharacterArc>,
    /// Names of settings used; resolved to ids at persistence time, unknown
    /// names dropped
    pub setting_names: Vec<String>,
}
