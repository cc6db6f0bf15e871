//! Command-line interface for Fabula.
//!
//! Two commands: `run` drives a complete generation run through the
//! orchestrator, `story` generates and prints a single story draft without
//! persisting anything.

use clap::{Parser, Subcommand};
use fabula_core::{Genre, Tone};
use uuid::Uuid;

/// AI generation pipeline for serialized fiction and comic adaptations.
#[derive(Debug, Parser)]
#[command(name = "fabula", version, about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a complete generation: story through scenes, optionally comics.
    Run {
        /// Free-text premise for the story
        #[arg(long)]
        premise: String,
        /// Preferred genre (kebab-case, e.g. science-fiction)
        #[arg(long)]
        genre: Option<Genre>,
        /// Preferred tone (kebab-case, e.g. hopeful)
        #[arg(long)]
        tone: Option<Tone>,
        /// Number of characters
        #[arg(long, default_value_t = 3)]
        characters: usize,
        /// Number of settings
        #[arg(long, default_value_t = 2)]
        settings: usize,
        /// Number of parts
        #[arg(long, default_value_t = 1)]
        parts: usize,
        /// Chapters per part
        #[arg(long, default_value_t = 3)]
        chapters: usize,
        /// Scenes per chapter
        #[arg(long, default_value_t = 3)]
        scenes: usize,
        /// Output language
        #[arg(long, default_value = "English")]
        language: String,
        /// Run the prose quality loop over each scene
        #[arg(long)]
        evaluate: bool,
        /// Adapt scenes into toonplays with stored panel images
        #[arg(long)]
        images: bool,
        /// Directory for stored panel images
        #[arg(long, default_value = "./fabula-images")]
        images_dir: String,
        /// Acting author id; a fresh id is used when omitted
        #[arg(long)]
        author: Option<Uuid>,
    },
    /// Generate one story draft and print it as JSON; nothing is persisted.
    Story {
        /// Free-text premise for the story
        #[arg(long)]
        premise: String,
        /// Preferred genre
        #[arg(long)]
        genre: Option<Genre>,
        /// Preferred tone
        #[arg(long)]
        tone: Option<Tone>,
        /// Output language
        #[arg(long, default_value = "English")]
        language: String,
    },
}
