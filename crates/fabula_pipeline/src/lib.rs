//! The Fabula generation pipeline.
//!
//! Turns a premise into a persisted novel: context builders assemble prompt
//! context from prior entities, generators produce drafts through a
//! [`fabula_interface::TextDriver`], quality loops iterate scene prose and
//! toonplays against a scoring rubric, services validate and persist, and
//! the [`NovelOrchestrator`] sequences the whole run with progress events.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
mod generators;
mod memory;
mod orchestrator;
mod prompts;
mod quality;
mod services;

pub use generators::{
    ChapterGenerator, CharacterGenerator, PartGenerator, ProgressFn, ProseEvaluator,
    SceneContentGenerator, SceneProse, SceneSummaryGenerator, SettingGenerator, StoryGenerator,
    StoryParams, ToonplayEvaluator, ToonplayGenerator,
};
pub use memory::MemoryNovelRepository;
pub use orchestrator::{
    GeneratedNovel, GenerationOptions, GenerationOptionsBuilder, NovelOrchestrator, PhaseEvent,
};
pub use quality::{
    DEFAULT_MAX_ITERATIONS, MAX_NARRATION_RATIO, MIN_DIALOGUE_RATIO, MIN_DISTINCT_SHOTS,
    MIN_REWRITE_RATIO, ProseQualityLoop, QUALITY_THRESHOLD, QualityOutcome, ToonplayOutcome,
    ToonplayQualityLoop, structural_issues,
};
pub use services::{
    ChapterService, CharacterService, PartService, SceneService, SettingService, StoryService,
    ToonplayResult, ensure_owner,
};
