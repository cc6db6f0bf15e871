//! Service-layer contracts: ownership gating, validate-before-insert, the
//! batch persistence contract, and scene lifecycle updates.

mod common;

use common::{
    MemoryImageStorage, MockDriver, MockImageDriver, MockResponse, bad_toonplay_json,
    character_json, good_toonplay_json, prose_evaluation_json, seed_scene_chain, seed_story,
    toonplay_evaluation_json,
};
use fabula_core::PublishStatus;
use fabula_error::{AccessErrorKind, FabulaErrorKind, PipelineErrorKind};
use fabula_interface::NovelRepository;
use fabula_pipeline::{CharacterService, MemoryNovelRepository, SceneService};
use uuid::Uuid;

fn assert_batch_aborted(kind: &FabulaErrorKind, item: usize, total: usize) -> &FabulaErrorKind {
    match kind {
        FabulaErrorKind::Pipeline(e) => match &e.kind {
            PipelineErrorKind::BatchAborted {
                item: got_item,
                total: got_total,
                source,
            } => {
                assert_eq!(*got_item, item);
                assert_eq!(*got_total, total);
                source.kind()
            }
            other => panic!("expected BatchAborted, got {other}"),
        },
        other => panic!("expected pipeline error, got {other}"),
    }
}

#[tokio::test]
async fn ownership_is_checked_before_any_generation() {
    let repo = MemoryNovelRepository::new();
    let story = seed_story(&repo, Uuid::new_v4()).await;
    let driver = MockDriver::new(vec![MockResponse::Json(character_json(
        "Mira",
        "protagonist",
    ))]);

    let intruder = Uuid::new_v4();
    let err = CharacterService::new(&driver, &repo)
        .generate_and_save_batch(story.id, intruder, 1, None)
        .await
        .unwrap_err();

    match err.kind() {
        FabulaErrorKind::Access(e) => {
            assert!(matches!(e.kind, AccessErrorKind::Denied { .. }))
        }
        other => panic!("expected access denial, got {other}"),
    }
    assert_eq!(driver.call_count(), 0, "no generation before the ownership gate");
    assert!(repo.list_characters(story.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_vocabulary_is_rejected_before_insert() {
    let repo = MemoryNovelRepository::new();
    let author = Uuid::new_v4();
    let story = seed_story(&repo, author).await;
    // "sidekick" is not in the role vocabulary; deserialization must fail
    // and nothing may reach the repository.
    let driver = MockDriver::new(vec![MockResponse::Json(character_json("Mira", "sidekick"))]);

    let err = CharacterService::new(&driver, &repo)
        .generate_and_save_batch(story.id, author, 2, None)
        .await
        .unwrap_err();

    let cause = assert_batch_aborted(err.kind(), 1, 2);
    assert!(
        matches!(cause, FabulaErrorKind::Schema(_)),
        "the validation failure should survive as the typed cause, got {cause}"
    );
    assert!(repo.list_characters(story.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn batch_progress_fires_exactly_once_per_item() {
    let repo = MemoryNovelRepository::new();
    let author = Uuid::new_v4();
    let story = seed_story(&repo, author).await;
    let driver = MockDriver::new(vec![
        MockResponse::Json(character_json("Mira", "protagonist")),
        MockResponse::Json(character_json("Teo", "ally")),
        MockResponse::Json(character_json("The Warden", "antagonist")),
    ]);

    let mut ticks: Vec<(usize, usize)> = Vec::new();
    let mut on_progress = |current: usize, total: usize| ticks.push((current, total));
    let saved = CharacterService::new(&driver, &repo)
        .generate_and_save_batch(story.id, author, 3, Some(&mut on_progress))
        .await
        .unwrap()
        .data;

    assert_eq!(ticks, vec![(1, 3), (2, 3), (3, 3)]);
    assert_eq!(saved.len(), 3);
    let order: Vec<i32> = saved.iter().map(|c| c.order_index).collect();
    assert_eq!(order, vec![0, 1, 2]);
}

#[tokio::test]
async fn mid_batch_failure_keeps_earlier_items() {
    let repo = MemoryNovelRepository::new();
    let author = Uuid::new_v4();
    let story = seed_story(&repo, author).await;
    let driver = MockDriver::new(vec![
        MockResponse::Json(character_json("Mira", "protagonist")),
        MockResponse::Error("provider down".to_string()),
    ]);

    let mut ticks = 0usize;
    let mut on_progress = |_: usize, _: usize| ticks += 1;
    let err = CharacterService::new(&driver, &repo)
        .generate_and_save_batch(story.id, author, 3, Some(&mut on_progress))
        .await
        .unwrap_err();

    let cause = assert_batch_aborted(err.kind(), 2, 3);
    assert!(
        matches!(cause, FabulaErrorKind::Provider(_)),
        "the provider failure should survive as the typed cause, got {cause}"
    );
    assert_eq!(ticks, 1, "progress only for the persisted item");
    let persisted = repo.list_characters(story.id).await.unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].name, "Mira");
}

#[tokio::test]
async fn evaluating_a_scene_without_content_is_an_error() {
    let repo = MemoryNovelRepository::new();
    let author = Uuid::new_v4();
    let (_, _, _, scene) = seed_scene_chain(&repo, author).await;
    let driver = MockDriver::new(Vec::new());

    let err = SceneService::new(&driver, &repo)
        .evaluate_and_improve(scene.id, author, 2)
        .await
        .unwrap_err();

    match err.kind() {
        FabulaErrorKind::Pipeline(e) => {
            assert!(matches!(e.kind, PipelineErrorKind::MissingArtifact(_)))
        }
        other => panic!("expected missing artifact, got {other}"),
    }
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn improved_prose_is_persisted_with_a_fresh_word_count() {
    let repo = MemoryNovelRepository::new();
    let author = Uuid::new_v4();
    let (_, _, _, scene) = seed_scene_chain(&repo, author).await;
    let original = "The lamp caught on the third strike and Mira watched the flame take \
        hold, braced for it to fail. It did not fail.";
    repo.update_scene_content(scene.id, original, 24).await.unwrap();

    let rewrite = format!(
        "{original} The light walked out over the water and the water gave it back, \
         beat after beat, until the harbor believed it."
    );
    let driver = MockDriver::new(vec![
        MockResponse::Json(prose_evaluation_json(2.0)),
        MockResponse::Text(rewrite.clone()),
        MockResponse::Json(prose_evaluation_json(3.5)),
    ]);

    let (updated, outcome) = SceneService::new(&driver, &repo)
        .evaluate_and_improve(scene.id, author, 3)
        .await
        .unwrap();

    assert!(outcome.improved);
    assert_eq!(updated.content.as_deref(), Some(rewrite.as_str()));
    assert_eq!(
        updated.word_count,
        Some(rewrite.split_whitespace().count() as i32)
    );
}

#[tokio::test]
async fn accepted_toonplay_marks_the_scene_ready() {
    let repo = MemoryNovelRepository::new();
    let author = Uuid::new_v4();
    let (_, _, _, scene) = seed_scene_chain(&repo, author).await;
    repo.update_scene_content(scene.id, "Mira climbs the tower.", 4)
        .await
        .unwrap();

    let driver = MockDriver::new(vec![
        MockResponse::Json(good_toonplay_json("The Singing Glass")),
        MockResponse::Json(toonplay_evaluation_json(3.5)),
    ]);

    let result = SceneService::new(&driver, &repo)
        .generate_toonplay(scene.id, author, 2)
        .await
        .unwrap();

    assert!(result.outcome.structural_pass);
    assert_eq!(result.scene.publish_status, PublishStatus::Ready);
    assert_eq!(result.scene.panel_count, Some(6));
    assert_eq!(result.panels.len(), 6);
    assert_eq!(result.panels[0].dialogue, vec!["Mira: Line for panel 1."]);

    let stored = repo.list_panels(scene.id).await.unwrap();
    assert_eq!(stored.len(), 6);
}

#[tokio::test]
async fn gate_failure_leaves_the_scene_in_draft() {
    let repo = MemoryNovelRepository::new();
    let author = Uuid::new_v4();
    let (_, _, _, scene) = seed_scene_chain(&repo, author).await;
    repo.update_scene_content(scene.id, "Mira climbs the tower.", 4)
        .await
        .unwrap();

    let driver = MockDriver::new(vec![
        MockResponse::Json(bad_toonplay_json("The Singing Glass")),
        MockResponse::Json(toonplay_evaluation_json(4.0)),
    ]);

    let result = SceneService::new(&driver, &repo)
        .generate_toonplay(scene.id, author, 1)
        .await
        .unwrap();

    assert!(!result.outcome.structural_pass);
    assert_eq!(result.scene.publish_status, PublishStatus::Draft);
    // Panels persist either way; the gate only withholds readiness.
    assert_eq!(result.panels.len(), 6);
}

#[tokio::test]
async fn panel_rendering_skips_panels_that_already_have_images() {
    let repo = MemoryNovelRepository::new();
    let author = Uuid::new_v4();
    let (_, _, _, scene) = seed_scene_chain(&repo, author).await;
    repo.update_scene_content(scene.id, "Mira climbs the tower.", 4)
        .await
        .unwrap();

    let text_driver = MockDriver::new(vec![
        MockResponse::Json(good_toonplay_json("The Singing Glass")),
        MockResponse::Json(toonplay_evaluation_json(3.5)),
    ]);
    let service = SceneService::new(&text_driver, &repo);
    service.generate_toonplay(scene.id, author, 2).await.unwrap();

    let image_driver = MockImageDriver::new();
    let storage = MemoryImageStorage::new();
    let panels = service
        .render_panel_images(scene.id, author, &image_driver, &storage)
        .await
        .unwrap();

    assert_eq!(panels.len(), 6);
    assert!(panels.iter().all(|p| p.image_key.is_some()));
    assert_eq!(image_driver.call_count(), 6);
    assert_eq!(storage.len(), 6);

    // Second pass renders nothing new.
    service
        .render_panel_images(scene.id, author, &image_driver, &storage)
        .await
        .unwrap();
    assert_eq!(image_driver.call_count(), 6);
}
