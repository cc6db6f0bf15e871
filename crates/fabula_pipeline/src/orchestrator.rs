//! End-to-end generation orchestrator.
//!
//! Sequences every phase of a run: story, characters, settings, parts,
//! chapters, scene outlines, scene prose, then optional evaluation and
//! comics. Strictly sequential; a phase error aborts the run and rows
//! persisted by earlier phases stay in the database.

use crate::generators::StoryParams;
use crate::quality::DEFAULT_MAX_ITERATIONS;
use crate::services::{
    ChapterService, CharacterService, PartService, SceneService, SettingService, StoryService,
};
use fabula_core::{
    Chapter, Character, ComicPanel, Genre, Part, Scene, Setting, Story, Tone,
};
use fabula_error::{FabulaError, FabulaResult, PipelineError, PipelineErrorKind};
use fabula_interface::{ImageDriver, NovelRepository, TextDriver};
use fabula_storage::ImageStorage;
use uuid::Uuid;

/// Options for a full generation run.
#[derive(Debug, Clone, derive_builder::Builder)]
#[builder(setter(into, strip_option), default)]
pub struct GenerationOptions {
    /// Free-text premise
    pub premise: String,
    /// Preferred genre, or let the model choose
    pub genre: Option<Genre>,
    /// Preferred tone, or let the model choose
    pub tone: Option<Tone>,
    /// Characters to create
    pub character_count: usize,
    /// Settings to create
    pub setting_count: usize,
    /// Parts to create
    pub part_count: usize,
    /// Chapters per part
    pub chapters_per_part: usize,
    /// Scenes per chapter
    pub scenes_per_chapter: usize,
    /// Output language
    pub language: String,
    /// Run the prose quality loop over each scene
    pub evaluate: bool,
    /// Iteration ceiling for the quality loops
    pub max_iterations: u32,
    /// Adapt scenes into toonplays, panels, and stored panel images
    pub generate_images: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            premise: String::new(),
            genre: None,
            tone: None,
            character_count: 3,
            setting_count: 2,
            part_count: 1,
            chapters_per_part: 3,
            scenes_per_chapter: 3,
            language: "English".to_string(),
            evaluate: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            generate_images: false,
        }
    }
}

impl GenerationOptions {
    /// Start building options.
    pub fn builder() -> GenerationOptionsBuilder {
        GenerationOptionsBuilder::default()
    }

    fn validate(&self) -> FabulaResult<()> {
        if self.premise.trim().is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::InvalidOptions(
                "premise must not be empty".to_string(),
            )))?;
        }
        let counts = [
            ("character_count", self.character_count),
            ("setting_count", self.setting_count),
            ("part_count", self.part_count),
            ("chapters_per_part", self.chapters_per_part),
            ("scenes_per_chapter", self.scenes_per_chapter),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(PipelineError::new(PipelineErrorKind::InvalidOptions(
                    format!("{name} must be at least 1"),
                )))?;
            }
        }
        Ok(())
    }
}

/// Progress event emitted after each phase (and per scene within the
/// later phases), carrying the newly persisted entities.
#[derive(Debug, Clone)]
pub enum PhaseEvent {
    /// Root story row created
    StoryCreated(Story),
    /// Character batch persisted
    CharactersCreated(Vec<Character>),
    /// Setting batch persisted
    SettingsCreated(Vec<Setting>),
    /// One part persisted
    PartCreated(Part),
    /// One chapter persisted
    ChapterCreated(Chapter),
    /// Scene outlines for one chapter persisted
    SceneSummariesCreated(Vec<Scene>),
    /// Prose written for one scene
    SceneContentGenerated(Scene),
    /// Quality loop finished for one scene
    SceneEvaluated {
        /// Scene after any rewrite was persisted
        scene: Scene,
        /// Maximum score observed
        best_score: f32,
        /// Iterations consumed
        iterations: u32,
        /// Whether a rewrite replaced the content
        improved: bool,
    },
    /// Toonplay and panels persisted for one scene
    ToonplayCreated {
        /// Scene after the toonplay update
        scene: Scene,
        /// Panels created
        panels: Vec<ComicPanel>,
        /// Whether the structural gate passed
        structural_pass: bool,
    },
    /// Panel images rendered and stored for one scene
    PanelImagesStored {
        /// The scene the panels belong to
        scene_id: Uuid,
        /// Panels with their image keys set
        panels: Vec<ComicPanel>,
    },
}

/// Everything a run produced, as persisted.
#[derive(Debug, Clone, Default)]
pub struct GeneratedNovel {
    /// The story row; `None` only before the first phase completes
    pub story: Option<Story>,
    /// Characters in order
    pub characters: Vec<Character>,
    /// Settings in order
    pub settings: Vec<Setting>,
    /// Parts in order
    pub parts: Vec<Part>,
    /// Chapters across all parts, in order
    pub chapters: Vec<Chapter>,
    /// Scenes across all chapters, in order, with final content
    pub scenes: Vec<Scene>,
    /// Comic panels across all scenes, when comics were generated
    pub panels: Vec<ComicPanel>,
}

/// Drives a complete generation run against one driver and one repository.
pub struct NovelOrchestrator<'a> {
    driver: &'a dyn TextDriver,
    repo: &'a dyn NovelRepository,
    image_backend: Option<(&'a dyn ImageDriver, &'a dyn ImageStorage)>,
}

impl<'a> NovelOrchestrator<'a> {
    /// Orchestrator without an image backend; `generate_images` will be
    /// rejected at validation.
    pub fn new(driver: &'a dyn TextDriver, repo: &'a dyn NovelRepository) -> Self {
        Self {
            driver,
            repo,
            image_backend: None,
        }
    }

    /// Attach an image backend for the comics phase.
    pub fn with_images(
        mut self,
        image_driver: &'a dyn ImageDriver,
        storage: &'a dyn ImageStorage,
    ) -> Self {
        self.image_backend = Some((image_driver, storage));
        self
    }

    /// Run every phase for `actor_id`, emitting a [`PhaseEvent`] after each.
    ///
    /// Phases run strictly one after another; the first error aborts the
    /// run as `PhaseFailed` naming the phase, and earlier phases' rows
    /// remain persisted.
    #[tracing::instrument(skip(self, options, on_event), fields(actor = %actor_id))]
    pub async fn run(
        &self,
        actor_id: Uuid,
        options: &GenerationOptions,
        mut on_event: impl FnMut(&PhaseEvent),
    ) -> FabulaResult<GeneratedNovel> {
        options.validate()?;
        let image_backend = if options.generate_images {
            match self.image_backend {
                Some(backend) => Some(backend),
                None => {
                    return Err(PipelineError::new(PipelineErrorKind::InvalidOptions(
                        "generate_images requires an image backend".to_string(),
                    )))?;
                }
            }
        } else {
            None
        };

        let mut novel = GeneratedNovel::default();

        let story = StoryService::new(self.driver, self.repo)
            .generate_and_save(
                actor_id,
                &StoryParams {
                    premise: options.premise.clone(),
                    genre: options.genre,
                    tone: options.tone,
                    language: options.language.clone(),
                },
            )
            .await
            .map_err(|e| phase_failed("story", e))?
            .data;
        on_event(&PhaseEvent::StoryCreated(story.clone()));
        let story_id = story.id;
        novel.story = Some(story);

        novel.characters = CharacterService::new(self.driver, self.repo)
            .generate_and_save_batch(story_id, actor_id, options.character_count, None)
            .await
            .map_err(|e| phase_failed("characters", e))?
            .data;
        on_event(&PhaseEvent::CharactersCreated(novel.characters.clone()));

        novel.settings = SettingService::new(self.driver, self.repo)
            .generate_and_save_batch(story_id, actor_id, options.setting_count, None)
            .await
            .map_err(|e| phase_failed("settings", e))?
            .data;
        on_event(&PhaseEvent::SettingsCreated(novel.settings.clone()));

        let part_service = PartService::new(self.driver, self.repo);
        for _ in 0..options.part_count {
            let part = part_service
                .generate_and_save(story_id, actor_id, options.part_count)
                .await
                .map_err(|e| phase_failed("parts", e))?
                .data;
            on_event(&PhaseEvent::PartCreated(part.clone()));
            novel.parts.push(part);
        }

        let chapter_service = ChapterService::new(self.driver, self.repo);
        for part in &novel.parts {
            for _ in 0..options.chapters_per_part {
                let chapter = chapter_service
                    .generate_and_save(part.id, actor_id, options.chapters_per_part)
                    .await
                    .map_err(|e| phase_failed("chapters", e))?
                    .data;
                on_event(&PhaseEvent::ChapterCreated(chapter.clone()));
                novel.chapters.push(chapter);
            }
        }

        let scene_service = SceneService::new(self.driver, self.repo);
        for chapter in &novel.chapters {
            let scenes = scene_service
                .generate_and_save_summaries(
                    chapter.id,
                    actor_id,
                    options.scenes_per_chapter,
                    None,
                )
                .await
                .map_err(|e| phase_failed("scene-summaries", e))?
                .data;
            on_event(&PhaseEvent::SceneSummariesCreated(scenes.clone()));
            novel.scenes.extend(scenes);
        }

        for scene in novel.scenes.iter_mut() {
            *scene = scene_service
                .generate_content(scene.id, actor_id, &options.language)
                .await
                .map_err(|e| phase_failed("scene-content", e))?
                .data;
            on_event(&PhaseEvent::SceneContentGenerated(scene.clone()));
        }

        if options.evaluate {
            for scene in novel.scenes.iter_mut() {
                let (updated, outcome) = scene_service
                    .evaluate_and_improve(scene.id, actor_id, options.max_iterations)
                    .await
                    .map_err(|e| phase_failed("evaluation", e))?;
                *scene = updated;
                on_event(&PhaseEvent::SceneEvaluated {
                    scene: scene.clone(),
                    best_score: outcome.best_score,
                    iterations: outcome.iterations,
                    improved: outcome.improved,
                });
            }
        }

        if let Some((image_driver, storage)) = image_backend {
            for scene in novel.scenes.iter_mut() {
                let result = scene_service
                    .generate_toonplay(scene.id, actor_id, options.max_iterations)
                    .await
                    .map_err(|e| phase_failed("toonplay", e))?;
                *scene = result.scene;
                on_event(&PhaseEvent::ToonplayCreated {
                    scene: scene.clone(),
                    panels: result.panels.clone(),
                    structural_pass: result.outcome.structural_pass,
                });

                let panels = scene_service
                    .render_panel_images(scene.id, actor_id, image_driver, storage)
                    .await
                    .map_err(|e| phase_failed("panel-images", e))?;
                on_event(&PhaseEvent::PanelImagesStored {
                    scene_id: scene.id,
                    panels: panels.clone(),
                });
                novel.panels.extend(panels);
            }
        }

        tracing::info!(
            characters = novel.characters.len(),
            settings = novel.settings.len(),
            parts = novel.parts.len(),
            chapters = novel.chapters.len(),
            scenes = novel.scenes.len(),
            "Generation run complete"
        );
        Ok(novel)
    }
}

fn phase_failed(phase: &'static str, e: FabulaError) -> FabulaError {
    tracing::error!(phase, error = %e, "Phase failed, aborting run");
    PipelineError::new(PipelineErrorKind::PhaseFailed {
        phase: phase.to_string(),
        source: Box::new(e),
    })
    .into()
}
