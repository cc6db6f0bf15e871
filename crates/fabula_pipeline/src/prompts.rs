//! Prompt templates for each generation phase.
//!
//! Templates are opaque text payloads assembled from context blocks; the
//! structured-output contract lives in the schemas, not in this wording.

use fabula_core::{Genre, ProseEvaluation, Tone, Toonplay};

const STORY_SYSTEM: &str = "You are a novelist planning a serialized story \
built on an adversity-triumph cycle. Answer with the requested fields only.";

pub(crate) fn story_system_prompt() -> String {
    STORY_SYSTEM.to_string()
}

pub(crate) fn story_prompt(
    premise: &str,
    genre: Option<Genre>,
    tone: Option<Tone>,
    language: &str,
) -> String {
    let genre = genre.map_or_else(|| "your choice".to_string(), |g| g.to_string());
    let tone = tone.map_or_else(|| "your choice".to_string(), |t| t.to_string());
    format!(
        "Plan a new serialized story in {language}.\n\
         Premise: {premise}\n\
         Genre: {genre}\n\
         Tone: {tone}\n\
         Provide a title, genre, tone, a one-paragraph summary, and the moral \
         framework the story argues for."
    )
}

pub(crate) fn character_prompt(
    story_ctx: &str,
    existing_names: &[String],
    current: usize,
    total: usize,
) -> String {
    let taken = if existing_names.is_empty() {
        "none yet".to_string()
    } else {
        existing_names.join(", ")
    };
    format!(
        "{story_ctx}\n\n\
         Create character {current} of {total} for this story. The first \
         character is the protagonist. Already created: {taken}. Do not reuse \
         an existing name. Give the character a role, a core trait, and \
         personality, appearance, and voice details."
    )
}

pub(crate) fn setting_prompt(
    story_ctx: &str,
    characters_ctx: &str,
    existing_names: &[String],
    current: usize,
    total: usize,
) -> String {
    let taken = if existing_names.is_empty() {
        "none yet".to_string()
    } else {
        existing_names.join(", ")
    };
    format!(
        "{story_ctx}\n\n{characters_ctx}\n\n\
         Create setting {current} of {total} for this story. Already created: \
         {taken}. Give it a name, a description, and mood, sensory, and \
         symbolism details."
    )
}

pub(crate) fn part_prompt(
    story_ctx: &str,
    characters_ctx: &str,
    settings_ctx: &str,
    current: usize,
    total: usize,
) -> String {
    format!(
        "{story_ctx}\n\n{characters_ctx}\n\n{settings_ctx}\n\n\
         Plan part {current} of {total}. Give it a title, a summary, one \
         adversity/virtue/consequence arc per character (use their exact \
         names), and name the settings it takes place in."
    )
}

pub(crate) fn chapter_prompt(
    story_ctx: &str,
    characters_ctx: &str,
    settings_ctx: &str,
    part_ctx: &str,
    current: usize,
    total: usize,
) -> String {
    format!(
        "{story_ctx}\n\n{characters_ctx}\n\n{settings_ctx}\n\n{part_ctx}\n\n\
         Plan chapter {current} of {total} for this part. Give it a title, a \
         summary, its arc position, the adversity and virtue it turns on, \
         seeds planted and resolved, and the focus characters and settings \
         by their exact names."
    )
}

pub(crate) fn scene_summary_prompt(
    story_ctx: &str,
    chapter_ctx: &str,
    prior_scenes_ctx: &str,
    current: usize,
    total: usize,
) -> String {
    format!(
        "{story_ctx}\n\n{chapter_ctx}\n\n{prior_scenes_ctx}\n\n\
         Outline scene {current} of {total} for this chapter. Give it a \
         title, a summary, a cycle phase, an emotional beat, and concrete \
         sensory anchors."
    )
}

pub(crate) fn scene_content_prompt(
    story_ctx: &str,
    characters_ctx: &str,
    settings_ctx: &str,
    chapter_ctx: &str,
    prior_scenes_ctx: &str,
    scene_title: &str,
    scene_summary: &str,
    language: &str,
) -> String {
    format!(
        "{story_ctx}\n\n{characters_ctx}\n\n{settings_ctx}\n\n{chapter_ctx}\n\n\
         {prior_scenes_ctx}\n\n\
         Write the full prose for the scene \"{scene_title}\" in {language}.\n\
         Scene summary: {scene_summary}\n\
         Write vivid, grounded prose. Return only the scene text."
    )
}

pub(crate) fn prose_evaluation_prompt(content: &str) -> String {
    format!(
        "Evaluate the following scene prose. Score plot advancement, \
         character consistency, emotional resonance, sensory grounding, and \
         prose quality from 1 to 4, give an overall score, one paragraph of \
         feedback, and concrete suggested improvements.\n\n\
         SCENE\n{content}"
    )
}

pub(crate) fn prose_rewrite_prompt(content: &str, evaluation: &ProseEvaluation) -> String {
    format!(
        "Rewrite the following scene as a full replacement, addressing the \
         feedback. Return only the rewritten scene text.\n\n\
         FEEDBACK\n{}\n\n\
         SUGGESTED IMPROVEMENTS\n{}\n\n\
         SCENE\n{content}",
        evaluation.feedback,
        evaluation.suggested_improvements.join("\n- "),
    )
}

pub(crate) fn toonplay_prompt(scene_title: &str, content: &str) -> String {
    format!(
        "Adapt the scene \"{scene_title}\" into a comic script: a sequence of \
         panels, each with a shot type, a visual description, dialogue lines \
         with speakers, optional narration, and sound effects. Favor dialogue \
         over narration, vary the shot types, and leave no panel without \
         either dialogue or narration.\n\n\
         SCENE\n{content}"
    )
}

pub(crate) fn toonplay_evaluation_prompt(toonplay: &Toonplay) -> String {
    let script = serde_json::to_string_pretty(toonplay).unwrap_or_default();
    format!(
        "Evaluate the following comic script. Score visual storytelling, \
         dialogue quality, pacing and flow, and emotional impact from 1 to 4, \
         give one paragraph of feedback, and concrete suggested \
         improvements.\n\n\
         SCRIPT\n{script}"
    )
}

pub(crate) fn toonplay_rewrite_prompt(
    toonplay: &Toonplay,
    feedback: &str,
    suggestions: &[String],
) -> String {
    let script = serde_json::to_string_pretty(toonplay).unwrap_or_default();
    format!(
        "Rewrite the following comic script as a full replacement, addressing \
         the feedback.\n\n\
         FEEDBACK\n{feedback}\n\n\
         SUGGESTED IMPROVEMENTS\n- {}\n\n\
         SCRIPT\n{script}",
        suggestions.join("\n- "),
    )
}

pub(crate) fn panel_image_prompt(description: &str, characters_ctx: &str) -> String {
    format!(
        "Comic panel, clean line art with flat colors.\n\
         {description}\n\n\
         Character reference:\n{characters_ctx}"
    )
}
