//! Scene service: outlines, prose, evaluation, toonplay, panel images.
//!
//! Scenes are the only entities mutated after creation: prose content and
//! the comic fields arrive in later phases as updates.

use super::{ensure_owner, require_chapter, require_part, require_scene, require_story};
use crate::generators::{
    ProgressFn, SceneContentGenerator, SceneSummaryGenerator, ToonplayGenerator, metadata_since,
};
use crate::quality::{
    ProseQualityLoop, QualityOutcome, ToonplayOutcome, ToonplayQualityLoop,
};
use fabula_core::{
    Chapter, ComicPanel, Generated, NewComicPanel, NewScene, Part, PublishStatus, Scene, Story,
    ToonplayPanel,
};
use fabula_error::{FabulaResult, PipelineError, PipelineErrorKind};
use fabula_interface::{ImageDriver, NovelRepository, TextDriver};
use fabula_storage::{ImageEntity, ImagePath, ImageStorage, ImageVariant};
use std::time::Instant;
use uuid::Uuid;

/// A scene's toonplay adaptation after the quality loop, with its panels.
#[derive(Debug, Clone)]
pub struct ToonplayResult {
    /// The scene row after the toonplay update
    pub scene: Scene,
    /// Persisted panels, in panel order
    pub panels: Vec<ComicPanel>,
    /// Quality loop outcome, including gate issues
    pub outcome: ToonplayOutcome,
}

/// Creates and mutates scenes.
pub struct SceneService<'a> {
    driver: &'a dyn TextDriver,
    repo: &'a dyn NovelRepository,
}

impl<'a> SceneService<'a> {
    /// Create a service over the given driver and repository.
    pub fn new(driver: &'a dyn TextDriver, repo: &'a dyn NovelRepository) -> Self {
        Self { driver, repo }
    }

    async fn chain(&self, scene_id: Uuid) -> FabulaResult<(Scene, Chapter, Part, Story)> {
        let scene = require_scene(self.repo, scene_id).await?;
        let chapter = require_chapter(self.repo, scene.chapter_id).await?;
        let part = require_part(self.repo, chapter.part_id).await?;
        let story = require_story(self.repo, part.story_id).await?;
        Ok((scene, chapter, part, story))
    }

    /// Outline and persist `count` scenes for a chapter, one write per
    /// item; same batch contract as the character and setting services.
    #[tracing::instrument(skip(self, on_progress), fields(chapter = %chapter_id, count))]
    pub async fn generate_and_save_summaries(
        &self,
        chapter_id: Uuid,
        actor_id: Uuid,
        count: usize,
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> FabulaResult<Generated<Vec<Scene>>> {
        let start = Instant::now();
        let chapter = require_chapter(self.repo, chapter_id).await?;
        let part = require_part(self.repo, chapter.part_id).await?;
        let story = require_story(self.repo, part.story_id).await?;
        ensure_owner(&story, actor_id)?;

        let generator = SceneSummaryGenerator::new(self.driver);
        let mut prior = self.repo.list_scenes(chapter_id).await?;
        let base_index = prior.len() as i32;

        let mut saved = Vec::with_capacity(count);
        for current in 1..=count {
            let scene = async {
                let draft = generator
                    .generate(&story, &chapter, &prior, current, count)
                    .await?
                    .data;
                self.repo
                    .insert_scene(NewScene {
                        chapter_id,
                        title: draft.title,
                        summary: draft.summary,
                        cycle_phase: draft.cycle_phase,
                        emotional_beat: draft.emotional_beat,
                        sensory_anchors: draft.sensory_anchors,
                        order_index: base_index + (current as i32 - 1),
                    })
                    .await
            }
            .await
            .map_err(|e| {
                PipelineError::new(PipelineErrorKind::BatchAborted {
                    item: current,
                    total: count,
                    source: Box::new(e),
                })
            })?;
            prior.push(scene.clone());
            saved.push(scene);
            if let Some(cb) = on_progress.as_deref_mut() {
                cb(current, count);
            }
        }

        tracing::info!(saved = saved.len(), "Persisted scene outlines");
        Ok(Generated::new(
            saved,
            metadata_since(start, self.driver.model_name()),
        ))
    }

    /// Generate prose for an outlined scene and persist it.
    #[tracing::instrument(skip(self), fields(scene = %scene_id))]
    pub async fn generate_content(
        &self,
        scene_id: Uuid,
        actor_id: Uuid,
        language: &str,
    ) -> FabulaResult<Generated<Scene>> {
        let (scene, chapter, _, story) = self.chain(scene_id).await?;
        ensure_owner(&story, actor_id)?;

        let characters = self.repo.list_characters(story.id).await?;
        let settings = self.repo.list_settings(story.id).await?;
        let prior: Vec<Scene> = self
            .repo
            .list_scenes(scene.chapter_id)
            .await?
            .into_iter()
            .filter(|s| s.order_index < scene.order_index)
            .collect();

        let generated = SceneContentGenerator::new(self.driver)
            .generate(
                &story, &characters, &settings, &chapter, &prior, &scene, language,
            )
            .await?;
        let prose = generated.data;
        let scene = self
            .repo
            .update_scene_content(scene_id, &prose.content, prose.word_count)
            .await?;
        tracing::info!(words = prose.word_count, "Persisted scene prose");
        Ok(Generated::new(scene, generated.metadata))
    }

    /// Run the prose quality loop over a scene's content and persist the
    /// final version.
    ///
    /// # Errors
    ///
    /// `MissingArtifact` when the scene has no content yet.
    #[tracing::instrument(skip(self), fields(scene = %scene_id))]
    pub async fn evaluate_and_improve(
        &self,
        scene_id: Uuid,
        actor_id: Uuid,
        max_iterations: u32,
    ) -> FabulaResult<(Scene, QualityOutcome)> {
        let (scene, _, _, story) = self.chain(scene_id).await?;
        ensure_owner(&story, actor_id)?;

        let content = scene.content.clone().ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::MissingArtifact(format!(
                "scene {scene_id} has no content to evaluate"
            )))
        })?;

        let outcome = ProseQualityLoop::with_max_iterations(self.driver, max_iterations)
            .run(content)
            .await?;

        let scene = if outcome.improved {
            let word_count = outcome.content.split_whitespace().count() as i32;
            self.repo
                .update_scene_content(scene_id, &outcome.content, word_count)
                .await?
        } else {
            scene
        };
        tracing::info!(
            score = outcome.best_score,
            iterations = outcome.iterations,
            improved = outcome.improved,
            "Scene evaluation finished"
        );
        Ok((scene, outcome))
    }

    /// Adapt a scene's prose into a toonplay, run the quality loop, persist
    /// the script and its panels, and mark the scene ready when the
    /// structural gate passes.
    ///
    /// # Errors
    ///
    /// `MissingArtifact` when the scene has no content yet.
    #[tracing::instrument(skip(self), fields(scene = %scene_id))]
    pub async fn generate_toonplay(
        &self,
        scene_id: Uuid,
        actor_id: Uuid,
        max_iterations: u32,
    ) -> FabulaResult<ToonplayResult> {
        let (scene, _, _, story) = self.chain(scene_id).await?;
        ensure_owner(&story, actor_id)?;

        let content = scene.content.clone().ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::MissingArtifact(format!(
                "scene {scene_id} has no content to adapt"
            )))
        })?;

        let toonplay = ToonplayGenerator::new(self.driver)
            .generate(&scene.title, &content)
            .await?
            .data;
        let outcome = ToonplayQualityLoop::with_max_iterations(self.driver, max_iterations)
            .run(toonplay)
            .await?;

        let scene = self
            .repo
            .update_scene_toonplay(
                scene_id,
                &outcome.toonplay,
                outcome.toonplay.panel_count() as i32,
            )
            .await?;

        let mut panels = Vec::with_capacity(outcome.toonplay.panel_count());
        for panel in &outcome.toonplay.panels {
            panels.push(self.repo.insert_panel(panel_row(scene_id, panel)).await?);
        }

        let scene = if outcome.structural_pass {
            self.repo
                .update_scene_publish_status(scene_id, PublishStatus::Ready)
                .await?
        } else {
            scene
        };

        tracing::info!(
            panels = panels.len(),
            structural_pass = outcome.structural_pass,
            "Persisted toonplay"
        );
        Ok(ToonplayResult {
            scene,
            panels,
            outcome,
        })
    }

    /// Render and store an image for every panel that lacks one.
    #[tracing::instrument(skip(self, image_driver, storage), fields(scene = %scene_id))]
    pub async fn render_panel_images(
        &self,
        scene_id: Uuid,
        actor_id: Uuid,
        image_driver: &dyn ImageDriver,
        storage: &dyn ImageStorage,
    ) -> FabulaResult<Vec<ComicPanel>> {
        let (_, _, _, story) = self.chain(scene_id).await?;
        ensure_owner(&story, actor_id)?;

        let characters = self.repo.list_characters(story.id).await?;
        let characters_ctx = crate::context::characters_context(&characters);

        let mut updated = Vec::new();
        for panel in self.repo.list_panels(scene_id).await? {
            if panel.image_key.is_some() {
                updated.push(panel);
                continue;
            }
            let prompt = crate::prompts::panel_image_prompt(&panel.description, &characters_ctx);
            let image = image_driver.generate_image(&prompt, 1024, 1024).await?;
            let path = ImagePath::new(
                story.id,
                ImageEntity::Panel,
                ImageVariant::Original,
                Uuid::new_v4(),
                ext_for_mime(&image.mime),
            );
            let stored = storage.store(&path, &image.data).await?;
            updated.push(self.repo.set_panel_image(panel.id, &stored.key).await?);
        }
        tracing::info!(panels = updated.len(), "Panel images stored");
        Ok(updated)
    }
}

fn panel_row(scene_id: Uuid, panel: &ToonplayPanel) -> NewComicPanel {
    NewComicPanel {
        scene_id,
        panel_number: panel.panel_number as i32,
        shot_type: panel.shot_type,
        description: panel.description.clone(),
        dialogue: panel
            .dialogue
            .iter()
            .map(|line| format!("{}: {}", line.speaker, line.text))
            .collect(),
        narration: panel.narration.iter().cloned().collect(),
        sfx: panel.sfx.clone(),
    }
}

fn ext_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "bin",
    }
}
