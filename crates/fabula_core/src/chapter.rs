//! Chapter entity and draft.

use crate::{AdversityType, ArcPosition, VirtueType};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Database-assigned id
    pub id: Uuid,
    /// Owning part
    pub part_id: Uuid,
    /// Chapter title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Position within the part's dramatic arc
    pub arc_position: ArcPosition,
    /// Kind of adversity confronted
    pub adversity_type: AdversityType,
    /// Virtue demonstrated in response
    pub virtue_type: VirtueType,
    /// Narrative seeds introduced here for later payoff
    pub seeds_planted: Vec<String>,
    /// Seeds from earlier chapters paid off here
    pub seeds_resolved: Vec<String>,
    /// Characters this chapter focuses on
    pub focus_character_ids: Vec<Uuid>,
    /// Settings this chapter plays out in
    pub setting_ids: Vec<Uuid>,
    /// Position within the part, assigned monotonically at creation
    pub order_index: i32,
    /// Creation timestamp (database-assigned)
    pub created_at: DateTime<Utc>,
}

/// Generator output for one chapter.
///
/// `arc_position` is nullable here: when the generator leaves it empty the
/// persistence service substitutes the documented default (`beginning`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ChapterDraft {
    /// Chapter title
    pub title: String,
    /// One-paragraph summary
    pub summary: String,
    /// Position within the part's dramatic arc, if the generator committed
    /// to one
    pub arc_position: Option<ArcPosition>,
    /// Kind of adversity confronted
    pub adversity_type: AdversityType,
    /// Virtue demonstrated in response
    pub virtue_type: VirtueType,
    /// Narrative seeds introduced here for later payoff
    pub seeds_planted: Vec<String>,
    /// Seeds from earlier chapters paid off here
    pub seeds_resolved: Vec<String>,
    /// Names of focus characters; resolved to ids at persistence time
    pub focus_character_names: Vec<String>,
    /// Names of settings used; resolved to ids at persistence time
    pub setting_names: Vec<String>,
}
