//! Prompt context builders.
//!
//! Pure formatting: entity in, deterministic text block out. Missing
//! optional fields render the literal `N/A` instead of dropping the line,
//! so prompt structure stays stable across partially-populated entities.
//! Nothing here can fail.

use fabula_core::{Chapter, Character, Part, Scene, Setting, Story};

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    }
}

fn optional(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "N/A",
    }
}

/// Story header used by every downstream phase.
pub fn story_context(story: &Story) -> String {
    format!(
        "STORY\n\
         Title: {}\n\
         Genre: {}\n\
         Tone: {}\n\
         Summary: {}\n\
         Moral framework: {}",
        story.title, story.genre, story.tone, story.summary, story.moral_framework
    )
}

/// One block per character, in order.
pub fn characters_context(characters: &[Character]) -> String {
    if characters.is_empty() {
        return "CHARACTERS\nN/A".to_string();
    }
    let blocks: Vec<String> = characters
        .iter()
        .map(|c| {
            format!(
                "- {} ({}, {})\n\
                 \x20 Strengths: {}\n\
                 \x20 Flaws: {}\n\
                 \x20 Desires: {}\n\
                 \x20 Fears: {}\n\
                 \x20 Appearance: {}\n\
                 \x20 Voice: {}",
                c.name,
                c.role,
                c.core_trait,
                list(&c.personality.strengths),
                list(&c.personality.flaws),
                list(&c.personality.desires),
                list(&c.personality.fears),
                list(&c.appearance.features),
                list(&c.voice.speech_patterns),
            )
        })
        .collect();
    format!("CHARACTERS\n{}", blocks.join("\n"))
}

/// One block per setting, in order.
pub fn settings_context(settings: &[Setting]) -> String {
    if settings.is_empty() {
        return "SETTINGS\nN/A".to_string();
    }
    let blocks: Vec<String> = settings
        .iter()
        .map(|s| {
            format!(
                "- {}\n\
                 \x20 Description: {}\n\
                 \x20 Mood (active): {}\n\
                 \x20 Mood (quiet): {}\n\
                 \x20 Sights: {}\n\
                 \x20 Sounds: {}\n\
                 \x20 Motifs: {}",
                s.name,
                optional(Some(&s.description)),
                list(&s.mood.active),
                list(&s.mood.quiet),
                list(&s.sensory.sights),
                list(&s.sensory.sounds),
                list(&s.symbolism.motifs),
            )
        })
        .collect();
    format!("SETTINGS\n{}", blocks.join("\n"))
}

/// Part header plus its per-character arcs.
pub fn part_context(part: &Part) -> String {
    let arcs = if part.character_arcs.is_empty() {
        "N/A".to_string()
    } else {
        part.character_arcs
            .iter()
            .map(|a| {
                format!(
                    "- {}: adversity={}; virtue={}; consequence={}",
                    a.character_name, a.adversity, a.virtue, a.consequence
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "PART {}\n\
         Title: {}\n\
         Summary: {}\n\
         Character arcs:\n{}",
        part.order_index + 1,
        part.title,
        part.summary,
        arcs
    )
}

/// Chapter header with seed tracking.
pub fn chapter_context(chapter: &Chapter) -> String {
    format!(
        "CHAPTER {}\n\
         Title: {}\n\
         Summary: {}\n\
         Arc position: {}\n\
         Adversity: {}\n\
         Virtue: {}\n\
         Seeds planted: {}\n\
         Seeds resolved: {}",
        chapter.order_index + 1,
        chapter.title,
        chapter.summary,
        chapter.arc_position,
        chapter.adversity_type,
        chapter.virtue_type,
        list(&chapter.seeds_planted),
        list(&chapter.seeds_resolved),
    )
}

/// Summaries of scenes that precede the one being generated.
pub fn prior_scenes_context(scenes: &[Scene]) -> String {
    if scenes.is_empty() {
        return "PRIOR SCENES\nN/A".to_string();
    }
    let blocks: Vec<String> = scenes
        .iter()
        .map(|s| {
            format!(
                "- Scene {} \"{}\" [{} / {}]: {}",
                s.order_index + 1,
                s.title,
                s.cycle_phase,
                s.emotional_beat,
                s.summary
            )
        })
        .collect();
    format!("PRIOR SCENES\n{}", blocks.join("\n"))
}
