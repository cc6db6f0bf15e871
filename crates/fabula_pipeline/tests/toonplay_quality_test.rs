//! Toonplay quality loop: the structural gate is checked independently of
//! the rubric score, and gate violations feed the rewrite.

mod common;

use common::{
    MockDriver, MockResponse, bad_toonplay_json, good_toonplay_json, toonplay_evaluation_json,
};
use fabula_core::Toonplay;
use fabula_pipeline::{ToonplayQualityLoop, structural_issues};

fn toonplay(value: serde_json::Value) -> Toonplay {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn high_score_cannot_override_structural_gate() {
    // Score 4.5 is well above threshold; the narration-heavy script must
    // still come back unaccepted.
    let driver = MockDriver::new(vec![MockResponse::Json(toonplay_evaluation_json(4.5))]);
    let outcome = ToonplayQualityLoop::with_max_iterations(&driver, 1)
        .run(toonplay(bad_toonplay_json("The Singing Glass")))
        .await
        .unwrap();

    assert!(!outcome.structural_pass);
    assert!(outcome.accepted_at_ceiling);
    assert!((outcome.best_score - 4.5).abs() < 1e-5);
    assert!(
        outcome
            .quality_gate_issues
            .iter()
            .any(|issue| issue.contains("Reduce narration")),
        "expected a narration violation, got {:?}",
        outcome.quality_gate_issues
    );
}

#[tokio::test]
async fn clean_script_at_threshold_accepts_first_pass() {
    let driver = MockDriver::new(vec![MockResponse::Json(toonplay_evaluation_json(3.2))]);
    let outcome = ToonplayQualityLoop::with_max_iterations(&driver, 2)
        .run(toonplay(good_toonplay_json("The Singing Glass")))
        .await
        .unwrap();

    assert!(outcome.structural_pass);
    assert!(outcome.quality_gate_issues.is_empty());
    assert_eq!(outcome.iterations, 1);
    assert!(!outcome.accepted_at_ceiling);
    assert_eq!(driver.call_count(), 1);
}

#[test]
fn silent_panel_fails_the_gate() {
    let mut script = toonplay(good_toonplay_json("The Singing Glass"));
    script.panels[3].dialogue.clear();
    script.panels[3].narration = None;

    let issues = structural_issues(&script);
    assert!(
        issues
            .iter()
            .any(|issue| issue.contains("neither dialogue nor narration")),
        "expected a silent-panel violation, got {issues:?}"
    );
}

#[tokio::test]
async fn gate_violations_are_fed_into_the_rewrite_prompt() {
    let driver = MockDriver::new(vec![
        MockResponse::Json(toonplay_evaluation_json(3.5)),
        MockResponse::Json(good_toonplay_json("The Singing Glass")),
        MockResponse::Json(toonplay_evaluation_json(3.5)),
    ]);
    let outcome = ToonplayQualityLoop::with_max_iterations(&driver, 2)
        .run(toonplay(bad_toonplay_json("The Singing Glass")))
        .await
        .unwrap();

    assert!(outcome.improved);
    assert!(outcome.structural_pass);
    assert_eq!(outcome.iterations, 2);
    assert!(!outcome.accepted_at_ceiling);

    let prompts = driver.prompts();
    assert!(
        prompts[1].contains("Reduce narration"),
        "rewrite prompt should carry the gate violation"
    );
}

#[tokio::test]
async fn rewrite_dropping_most_panels_is_discarded() {
    let tiny = serde_json::json!({
        "title": "The Singing Glass",
        "panels": [
            {"panel_number": 1, "shot_type": "wide", "description": "All of it at once.",
             "dialogue": [{"speaker": "Mira", "text": "Done."}], "narration": null, "sfx": []}
        ]
    });
    let driver = MockDriver::new(vec![
        MockResponse::Json(toonplay_evaluation_json(2.0)),
        MockResponse::Json(tiny),
        MockResponse::Json(toonplay_evaluation_json(2.0)),
    ]);
    let original = toonplay(bad_toonplay_json("The Singing Glass"));
    let outcome = ToonplayQualityLoop::with_max_iterations(&driver, 2)
        .run(original.clone())
        .await
        .unwrap();

    assert_eq!(outcome.toonplay, original, "collapsed rewrite must not replace the script");
    assert!(!outcome.improved);
}

#[test]
fn narration_on_eight_percent_of_panels_fails_the_gate() {
    use fabula_core::{DialogueLine, ShotType, ToonplayPanel};

    let shots = [
        ShotType::Wide,
        ShotType::Medium,
        ShotType::CloseUp,
        ShotType::ExtremeCloseUp,
        ShotType::Pov,
    ];
    // 2 narrated panels out of 25 is 8%, above the 5% limit; everything
    // else about the script is clean.
    let panels: Vec<ToonplayPanel> = (1..=25)
        .map(|n| ToonplayPanel {
            panel_number: n,
            shot_type: shots[(n as usize - 1) % shots.len()],
            description: format!("Panel {n}."),
            dialogue: vec![DialogueLine {
                speaker: "Mira".to_string(),
                text: format!("Line {n}."),
            }],
            narration: (n <= 2).then(|| "The tower waited.".to_string()),
            sfx: Vec::new(),
        })
        .collect();
    let script = Toonplay {
        title: "The Singing Glass".to_string(),
        panels,
    };

    let issues = structural_issues(&script);
    assert_eq!(issues.len(), 1, "only the narration check should fire: {issues:?}");
    assert!(issues[0].contains("Reduce narration"));
}

#[tokio::test]
async fn fabricated_category_scores_above_the_range_are_rejected() {
    use fabula_error::{FabulaErrorKind, SchemaErrorKind};

    let driver = MockDriver::new(vec![MockResponse::Json(toonplay_evaluation_json(9.9))]);
    let err = ToonplayQualityLoop::with_max_iterations(&driver, 2)
        .run(toonplay(good_toonplay_json("The Singing Glass")))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err.kind(),
            FabulaErrorKind::Schema(e)
                if matches!(&e.kind, SchemaErrorKind::Validation { entity, .. }
                    if entity == "ToonplayEvaluation")
        ),
        "expected a validation error, got {err}"
    );
}

#[test]
fn good_fixture_actually_passes_the_gate() {
    let script = toonplay(good_toonplay_json("The Singing Glass"));
    assert!(structural_issues(&script).is_empty());
}
