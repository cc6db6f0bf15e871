//! The `fabula` binary.

use clap::Parser;
use fabula::{
    Cli, Commands, FileSystemStorage, GenerationOptions, InferenceClient, NovelOrchestrator,
    PhaseEvent, Provider, ProviderConfig, StoryGenerator, StoryParams,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            premise,
            genre,
            tone,
            characters,
            settings,
            parts,
            chapters,
            scenes,
            language,
            evaluate,
            images,
            images_dir,
            author,
        } => {
            let config = ProviderConfig::load()?;
            let provider = Provider::from_config(&config)?;

            let mut builder = GenerationOptions::builder();
            builder
                .premise(premise)
                .character_count(characters)
                .setting_count(settings)
                .part_count(parts)
                .chapters_per_part(chapters)
                .scenes_per_chapter(scenes)
                .language(language)
                .evaluate(evaluate)
                .generate_images(images);
            if let Some(genre) = genre {
                builder.genre(genre);
            }
            if let Some(tone) = tone {
                builder.tone(tone);
            }
            let options = builder.build()?;

            let image_backend = if images {
                let ProviderConfig::Inference(inference) = &config else {
                    return Err("panel images require the inference provider".into());
                };
                Some((InferenceClient::new(inference)?, FileSystemStorage::new(&images_dir)?))
            } else {
                None
            };

            #[cfg(feature = "database")]
            let repo = fabula::PostgresNovelRepository::new(fabula::establish_connection()?);
            #[cfg(not(feature = "database"))]
            let repo = fabula::MemoryNovelRepository::new();

            let mut orchestrator = NovelOrchestrator::new(&provider, &repo);
            if let Some((image_driver, storage)) = &image_backend {
                orchestrator = orchestrator.with_images(image_driver, storage);
            }

            let actor_id = author.unwrap_or_else(Uuid::new_v4);
            let novel = orchestrator
                .run(actor_id, &options, print_event)
                .await?;

            if let Some(story) = &novel.story {
                println!("\nStory: {} ({} / {})", story.title, story.genre, story.tone);
            }
            println!(
                "Generated {} characters, {} settings, {} parts, {} chapters, {} scenes, {} panels",
                novel.characters.len(),
                novel.settings.len(),
                novel.parts.len(),
                novel.chapters.len(),
                novel.scenes.len(),
                novel.panels.len(),
            );
        }
        Commands::Story {
            premise,
            genre,
            tone,
            language,
        } => {
            let config = ProviderConfig::load()?;
            let provider = Provider::from_config(&config)?;
            let params = StoryParams {
                premise,
                genre,
                tone,
                language,
            };
            let draft = StoryGenerator::new(&provider).generate(&params).await?;
            println!("{}", serde_json::to_string_pretty(&draft.data)?);
        }
    }
    Ok(())
}

fn print_event(event: &PhaseEvent) {
    match event {
        PhaseEvent::StoryCreated(story) => println!("story: {}", story.title),
        PhaseEvent::CharactersCreated(characters) => {
            for character in characters {
                println!("character: {}", character.name);
            }
        }
        PhaseEvent::SettingsCreated(settings) => {
            for setting in settings {
                println!("setting: {}", setting.name);
            }
        }
        PhaseEvent::PartCreated(part) => println!("part: {}", part.title),
        PhaseEvent::ChapterCreated(chapter) => println!("chapter: {}", chapter.title),
        PhaseEvent::SceneSummariesCreated(scenes) => {
            for scene in scenes {
                println!("scene outline: {}", scene.title);
            }
        }
        PhaseEvent::SceneContentGenerated(scene) => {
            println!(
                "scene prose: {} ({} words)",
                scene.title,
                scene.word_count.unwrap_or(0)
            );
        }
        PhaseEvent::SceneEvaluated {
            scene,
            best_score,
            iterations,
            improved,
        } => {
            println!(
                "scene evaluated: {} score {best_score:.1} after {iterations} iteration(s){}",
                scene.title,
                if *improved { ", rewritten" } else { "" }
            );
        }
        PhaseEvent::ToonplayCreated {
            scene,
            panels,
            structural_pass,
        } => {
            println!(
                "toonplay: {} ({} panels{})",
                scene.title,
                panels.len(),
                if *structural_pass { "" } else { ", needs work" }
            );
        }
        PhaseEvent::PanelImagesStored { scene_id, panels } => {
            println!("panel images: {} stored for scene {scene_id}", panels.len());
        }
    }
}
