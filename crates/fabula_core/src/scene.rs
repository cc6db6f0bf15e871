//! Scene entity and summary draft.

use crate::{CyclePhase, EmotionalBeat, PublishStatus};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted scene.
///
/// `content` and the comic fields are the only fields mutated after
/// creation: content by the scene content generator and evaluation loop,
/// the comic fields by the toonplay loop and panel generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Database-assigned id
    pub id: Uuid,
    /// Owning chapter
    pub chapter_id: Uuid,
    /// Scene title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Phase of the adversity-triumph cycle this scene occupies
    pub cycle_phase: CyclePhase,
    /// Dominant emotional beat
    pub emotional_beat: EmotionalBeat,
    /// Concrete sensory anchors prose generation must ground in
    pub sensory_anchors: Vec<String>,
    /// Generated prose, once the content phase has run
    pub content: Option<String>,
    /// Word count of `content`
    pub word_count: Option<i32>,
    /// Number of comic panels, once a toonplay has been accepted
    pub panel_count: Option<i32>,
    /// Accepted toonplay, stored as JSON
    pub toonplay: Option<serde_json::Value>,
    /// Publish status of the comic adaptation
    pub publish_status: PublishStatus,
    /// Position within the chapter, assigned monotonically at creation
    pub order_index: i32,
    /// Creation timestamp (database-assigned)
    pub created_at: DateTime<Utc>,
}

/// Generator output for one scene summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SceneSummaryDraft {
    /// Scene title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Phase of the adversity-triumph cycle
    pub cycle_phase: CyclePhase,
    /// Dominant emotional beat
    pub emotional_beat: EmotionalBeat,
    /// Concrete sensory anchors for prose generation
    pub sensory_anchors: Vec<String>,
}
