//! Setting entity, nested value objects, and draft.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emotional atmosphere of a place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Mood {
    /// Feel of the place in daylight or activity
    pub active: Vec<String>,
    /// Feel of the place at rest or night
    pub quiet: Vec<String>,
}

/// Sensory texture of a place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Sensory {
    /// What is seen
    pub sights: Vec<String>,
    /// What is heard
    pub sounds: Vec<String>,
    /// What is smelled
    pub smells: Vec<String>,
    /// What is felt (texture, temperature)
    pub textures: Vec<String>,
}

/// What the place means within the story.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Symbolism {
    /// Motifs the place embodies
    pub motifs: Vec<String>,
    /// Thematic resonance with the moral framework
    pub meanings: Vec<String>,
}

/// A persisted setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Database-assigned id
    pub id: Uuid,
    /// Owning story
    pub story_id: Uuid,
    /// Setting name
    pub name: String,
    /// Prose description
    pub description: String,
    /// Emotional atmosphere
    pub mood: Mood,
    /// Sensory texture
    pub sensory: Sensory,
    /// Symbolic weight
    pub symbolism: Symbolism,
    /// Position within the story's setting batch
    pub order_index: i32,
    /// Creation timestamp (database-assigned)
    pub created_at: DateTime<Utc>,
}

/// Generator output for one setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SettingDraft {
    /// Setting name
    pub name: String,
    /// Prose description
    pub description: String,
    /// Emotional atmosphere
    pub mood: Mood,
    /// Sensory texture
    pub sensory: Sensory,
    /// Symbolic weight
    pub symbolism: Symbolism,
}
