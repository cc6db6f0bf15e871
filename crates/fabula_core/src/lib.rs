//! Core data model for the Fabula generation pipeline.
//!
//! This crate defines the narrative entity hierarchy (story, characters,
//! settings, parts, chapters, scenes, comic panels), the closed vocabularies
//! shared between generation-time and persistence-time validation, and the
//! request/response types exchanged with AI providers.
//!
//! Draft types (`StoryDraft`, `CharacterDraft`, ...) are the shapes AI output
//! is deserialized into. Each is a strict subset of its persisted entity, so
//! every AI-generated field is independently re-validated before it is
//! trusted as a database value.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chapter;
mod character;
mod create;
mod evaluation;
mod metadata;
mod panel;
mod part;
mod request;
mod scene;
mod setting;
mod story;
mod toonplay;
mod vocab;

pub use chapter::{Chapter, ChapterDraft};
pub use character::{Appearance, Character, CharacterDraft, Personality, Voice};
pub use create::{
    NewChapter, NewCharacter, NewComicPanel, NewPart, NewScene, NewSetting, NewStory,
};
pub use evaluation::{ProseEvaluation, SCORE_MAX, SCORE_MIN, ToonplayEvaluation};
pub use metadata::{Generated, GenerationMetadata};
pub use panel::ComicPanel;
pub use part::{CharacterArc, Part, PartDraft};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError, GeneratedImage,
    TextGeneration,
};
pub use scene::{Scene, SceneSummaryDraft};
pub use setting::{Mood, Sensory, Setting, SettingDraft, Symbolism};
pub use story::{Story, StoryDraft};
pub use toonplay::{DialogueLine, Toonplay, ToonplayPanel};
pub use vocab::{
    AdversityType, ArcPosition, CharacterRole, CoreTrait, CyclePhase, EmotionalBeat, Genre,
    PublishStatus, ShotType, Tone, VirtueType,
};
