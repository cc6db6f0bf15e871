//! Prose quality loop behavior: acceptance, ceiling, rewrite guard.

mod common;

use common::{MockDriver, MockResponse, prose_evaluation_json};
use fabula_error::{FabulaErrorKind, SchemaErrorKind};
use fabula_pipeline::ProseQualityLoop;

const CONTENT: &str = "The lamp caught on the third strike of the flint, and Mira watched \
    the flame take hold the way she watched everything: braced for it to fail. It did not \
    fail. The light walked out over the water and the water gave it back.";

fn long_rewrite() -> String {
    format!("{CONTENT} She counted the beats of the beam as it swung, one for the harbor, \
        one for the bar, one for the open dark beyond, and let herself believe the count.")
}

#[tokio::test]
async fn score_at_threshold_accepts_without_rewrite() {
    let driver = MockDriver::new(vec![MockResponse::Json(prose_evaluation_json(3.0))]);
    let outcome = ProseQualityLoop::with_max_iterations(&driver, 3)
        .run(CONTENT.to_string())
        .await
        .unwrap();

    assert_eq!(outcome.content, CONTENT);
    assert_eq!(outcome.iterations, 1);
    assert!(!outcome.improved);
    assert!(!outcome.accepted_at_ceiling);
    assert!((outcome.best_score - 3.0).abs() < f32::EPSILON);
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn low_score_rewrites_then_accepts_at_ceiling() {
    let driver = MockDriver::new(vec![
        MockResponse::Json(prose_evaluation_json(2.1)),
        MockResponse::Text(long_rewrite()),
        MockResponse::Json(prose_evaluation_json(2.6)),
    ]);
    let outcome = ProseQualityLoop::with_max_iterations(&driver, 2)
        .run(CONTENT.to_string())
        .await
        .unwrap();

    assert_eq!(outcome.content, long_rewrite());
    assert_eq!(outcome.iterations, 2);
    assert!(outcome.improved);
    assert!(outcome.accepted_at_ceiling);
    assert_eq!(driver.call_count(), 3);
}

#[tokio::test]
async fn best_score_is_maximum_observed_not_final() {
    let driver = MockDriver::new(vec![
        MockResponse::Json(prose_evaluation_json(2.8)),
        MockResponse::Text(long_rewrite()),
        MockResponse::Json(prose_evaluation_json(2.2)),
    ]);
    let outcome = ProseQualityLoop::with_max_iterations(&driver, 2)
        .run(CONTENT.to_string())
        .await
        .unwrap();

    assert!((outcome.best_score - 2.8).abs() < f32::EPSILON);
    assert!(outcome.accepted_at_ceiling);
}

#[tokio::test]
async fn rewrite_accepted_on_later_iteration() {
    let driver = MockDriver::new(vec![
        MockResponse::Json(prose_evaluation_json(2.0)),
        MockResponse::Text(long_rewrite()),
        MockResponse::Json(prose_evaluation_json(3.4)),
    ]);
    let outcome = ProseQualityLoop::with_max_iterations(&driver, 3)
        .run(CONTENT.to_string())
        .await
        .unwrap();

    assert_eq!(outcome.content, long_rewrite());
    assert_eq!(outcome.iterations, 2);
    assert!(outcome.improved);
    assert!(!outcome.accepted_at_ceiling);
    assert!((outcome.best_score - 3.4).abs() < f32::EPSILON);
}

#[tokio::test]
async fn short_rewrite_is_discarded_but_iteration_counts() {
    let driver = MockDriver::new(vec![
        MockResponse::Json(prose_evaluation_json(2.0)),
        MockResponse::Text("Too short.".to_string()),
        MockResponse::Json(prose_evaluation_json(2.4)),
    ]);
    let outcome = ProseQualityLoop::with_max_iterations(&driver, 2)
        .run(CONTENT.to_string())
        .await
        .unwrap();

    assert_eq!(outcome.content, CONTENT, "truncated rewrite must not replace content");
    assert_eq!(outcome.iterations, 2);
    assert!(!outcome.improved);
    assert!(outcome.accepted_at_ceiling);
}

#[tokio::test]
async fn iteration_ceiling_has_a_floor_of_one() {
    let driver = MockDriver::new(vec![MockResponse::Json(prose_evaluation_json(1.5))]);
    let outcome = ProseQualityLoop::with_max_iterations(&driver, 0)
        .run(CONTENT.to_string())
        .await
        .unwrap();

    assert_eq!(outcome.iterations, 1);
    assert!(outcome.accepted_at_ceiling);
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test]
async fn fabricated_score_above_the_rubric_range_is_rejected() {
    // A 9.9 must never drive acceptance; the loop errors instead of
    // treating it as a best score.
    let driver = MockDriver::new(vec![MockResponse::Json(prose_evaluation_json(9.9))]);
    let err = ProseQualityLoop::with_max_iterations(&driver, 2)
        .run(CONTENT.to_string())
        .await
        .unwrap_err();

    assert!(
        matches!(
            err.kind(),
            FabulaErrorKind::Schema(e)
                if matches!(&e.kind, SchemaErrorKind::Validation { entity, .. }
                    if entity == "ProseEvaluation")
        ),
        "expected a validation error, got {err}"
    );
    assert_eq!(driver.call_count(), 1, "no rewrite may follow a rejected evaluation");
}

#[tokio::test]
async fn evaluator_error_propagates() {
    let driver = MockDriver::new(vec![MockResponse::Error("provider down".to_string())]);
    let result = ProseQualityLoop::new(&driver).run(CONTENT.to_string()).await;
    assert!(result.is_err());
}
