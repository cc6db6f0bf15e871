//! Full-run orchestration: phase ordering, event emission, count fidelity,
//! cross-entity name resolution, and abort semantics.

mod common;

use common::{
    MemoryImageStorage, MockDriver, MockImageDriver, MockResponse, chapter_json, character_json,
    good_toonplay_json, part_json, prose_evaluation_json, scene_summary_json, setting_json,
    story_json, toonplay_evaluation_json,
};
use fabula_core::PublishStatus;
use fabula_error::{FabulaErrorKind, PipelineErrorKind};
use fabula_interface::NovelRepository;
use fabula_pipeline::{GenerationOptions, MemoryNovelRepository, NovelOrchestrator, PhaseEvent};
use uuid::Uuid;

const PROSE: &str = "The lamp caught on the third strike of the flint, and Mira watched the \
    flame take hold the way she watched everything: braced for it to fail. It did not fail.";

fn base_options(premise: &str) -> GenerationOptions {
    GenerationOptions::builder()
        .premise(premise)
        .character_count(2_usize)
        .setting_count(1_usize)
        .part_count(1_usize)
        .chapters_per_part(1_usize)
        .scenes_per_chapter(1_usize)
        .build()
        .unwrap()
}

fn event_name(event: &PhaseEvent) -> &'static str {
    match event {
        PhaseEvent::StoryCreated(_) => "story",
        PhaseEvent::CharactersCreated(_) => "characters",
        PhaseEvent::SettingsCreated(_) => "settings",
        PhaseEvent::PartCreated(_) => "part",
        PhaseEvent::ChapterCreated(_) => "chapter",
        PhaseEvent::SceneSummariesCreated(_) => "scene-summaries",
        PhaseEvent::SceneContentGenerated(_) => "scene-content",
        PhaseEvent::SceneEvaluated { .. } => "scene-evaluated",
        PhaseEvent::ToonplayCreated { .. } => "toonplay",
        PhaseEvent::PanelImagesStored { .. } => "panel-images",
    }
}

#[tokio::test]
async fn full_run_produces_exactly_the_requested_counts() {
    let driver = MockDriver::new(vec![
        MockResponse::Json(story_json()),
        MockResponse::Json(character_json("Mira", "protagonist")),
        MockResponse::Json(character_json("Teo", "ally")),
        MockResponse::Json(setting_json("The Lighthouse")),
        MockResponse::Json(part_json("Storm Season", "The Lighthouse")),
        MockResponse::Json(chapter_json("The Bar", "Mira", "The Lighthouse")),
        MockResponse::Json(scene_summary_json("The Singing Glass")),
        MockResponse::Text(PROSE.to_string()),
    ]);
    let repo = MemoryNovelRepository::new();
    let orchestrator = NovelOrchestrator::new(&driver, &repo);

    let mut events = Vec::new();
    let novel = orchestrator
        .run(Uuid::new_v4(), &base_options("A lighthouse keeper"), |e| {
            events.push(event_name(e))
        })
        .await
        .unwrap();

    assert_eq!(novel.characters.len(), 2);
    assert_eq!(novel.settings.len(), 1);
    assert_eq!(novel.parts.len(), 1);
    assert_eq!(novel.chapters.len(), 1);
    assert_eq!(novel.scenes.len(), 1);
    assert!(novel.panels.is_empty());

    let scene = &novel.scenes[0];
    assert_eq!(scene.content.as_deref(), Some(PROSE));
    assert!(scene.word_count.unwrap() > 0);
    assert_eq!(scene.publish_status, PublishStatus::Draft);

    // Names from later drafts resolve against earlier persisted rows.
    assert_eq!(novel.parts[0].setting_ids, vec![novel.settings[0].id]);
    assert_eq!(novel.chapters[0].focus_character_ids, vec![novel.characters[0].id]);

    assert_eq!(
        events,
        vec![
            "story",
            "characters",
            "settings",
            "part",
            "chapter",
            "scene-summaries",
            "scene-content",
        ]
    );
    assert_eq!(driver.call_count(), 8);
}

#[tokio::test]
async fn evaluation_phase_emits_scores() {
    let driver = MockDriver::new(vec![
        MockResponse::Json(story_json()),
        MockResponse::Json(character_json("Mira", "protagonist")),
        MockResponse::Json(character_json("Teo", "ally")),
        MockResponse::Json(setting_json("The Lighthouse")),
        MockResponse::Json(part_json("Storm Season", "The Lighthouse")),
        MockResponse::Json(chapter_json("The Bar", "Mira", "The Lighthouse")),
        MockResponse::Json(scene_summary_json("The Singing Glass")),
        MockResponse::Text(PROSE.to_string()),
        MockResponse::Json(prose_evaluation_json(3.5)),
    ]);
    let repo = MemoryNovelRepository::new();

    let mut options = base_options("A lighthouse keeper");
    options.evaluate = true;

    let mut evaluated = Vec::new();
    NovelOrchestrator::new(&driver, &repo)
        .run(Uuid::new_v4(), &options, |e| {
            if let PhaseEvent::SceneEvaluated {
                best_score,
                iterations,
                improved,
                ..
            } = e
            {
                evaluated.push((*best_score, *iterations, *improved));
            }
        })
        .await
        .unwrap();

    assert_eq!(evaluated, vec![(3.5, 1, false)]);
}

#[tokio::test]
async fn comics_phase_stores_an_image_for_every_panel() {
    let driver = MockDriver::new(vec![
        MockResponse::Json(story_json()),
        MockResponse::Json(character_json("Mira", "protagonist")),
        MockResponse::Json(character_json("Teo", "ally")),
        MockResponse::Json(setting_json("The Lighthouse")),
        MockResponse::Json(part_json("Storm Season", "The Lighthouse")),
        MockResponse::Json(chapter_json("The Bar", "Mira", "The Lighthouse")),
        MockResponse::Json(scene_summary_json("The Singing Glass")),
        MockResponse::Text(PROSE.to_string()),
        MockResponse::Json(good_toonplay_json("The Singing Glass")),
        MockResponse::Json(toonplay_evaluation_json(3.5)),
    ]);
    let repo = MemoryNovelRepository::new();
    let image_driver = MockImageDriver::new();
    let storage = MemoryImageStorage::new();

    let mut options = base_options("A lighthouse keeper");
    options.generate_images = true;

    let novel = NovelOrchestrator::new(&driver, &repo)
        .with_images(&image_driver, &storage)
        .run(Uuid::new_v4(), &options, |_| {})
        .await
        .unwrap();

    assert_eq!(novel.panels.len(), 6);
    assert!(novel.panels.iter().all(|p| p.image_key.is_some()));
    assert_eq!(novel.scenes[0].publish_status, PublishStatus::Ready);
    assert_eq!(image_driver.call_count(), 6);
    assert_eq!(storage.len(), 6);
}

#[tokio::test]
async fn empty_premise_is_rejected_before_any_call() {
    let driver = MockDriver::new(Vec::new());
    let repo = MemoryNovelRepository::new();

    let err = NovelOrchestrator::new(&driver, &repo)
        .run(Uuid::new_v4(), &base_options("   "), |_| {})
        .await
        .unwrap_err();

    match err.kind() {
        FabulaErrorKind::Pipeline(e) => {
            assert!(matches!(e.kind, PipelineErrorKind::InvalidOptions(_)))
        }
        other => panic!("expected invalid options, got {other}"),
    }
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn image_generation_without_a_backend_is_rejected() {
    let driver = MockDriver::new(Vec::new());
    let repo = MemoryNovelRepository::new();
    let mut options = base_options("A lighthouse keeper");
    options.generate_images = true;

    let err = NovelOrchestrator::new(&driver, &repo)
        .run(Uuid::new_v4(), &options, |_| {})
        .await
        .unwrap_err();

    match err.kind() {
        FabulaErrorKind::Pipeline(e) => {
            assert!(matches!(e.kind, PipelineErrorKind::InvalidOptions(_)))
        }
        other => panic!("expected invalid options, got {other}"),
    }
}

#[tokio::test]
async fn phase_failure_aborts_but_keeps_earlier_rows() {
    let driver = MockDriver::new(vec![
        MockResponse::Json(story_json()),
        MockResponse::Error("provider down".to_string()),
    ]);
    let repo = MemoryNovelRepository::new();
    let actor = Uuid::new_v4();

    let mut story_id = None;
    let err = NovelOrchestrator::new(&driver, &repo)
        .run(actor, &base_options("A lighthouse keeper"), |e| {
            if let PhaseEvent::StoryCreated(story) = e {
                story_id = Some(story.id);
            }
        })
        .await
        .unwrap_err();

    match err.kind() {
        FabulaErrorKind::Pipeline(e) => match &e.kind {
            PipelineErrorKind::PhaseFailed { phase, source } => {
                assert_eq!(phase, "characters");
                // The batch failure that aborted the phase stays reachable
                // through the source chain.
                assert!(
                    matches!(
                        source.kind(),
                        FabulaErrorKind::Pipeline(inner)
                            if matches!(inner.kind, PipelineErrorKind::BatchAborted { .. })
                    ),
                    "expected the aborted batch as the cause, got {source}"
                );
            }
            other => panic!("expected phase failure, got {other}"),
        },
        other => panic!("expected pipeline error, got {other}"),
    }

    // The story row from the completed phase survives the abort.
    let story_id = story_id.expect("story phase completed");
    assert!(repo.get_story(story_id).await.unwrap().is_some());
}
