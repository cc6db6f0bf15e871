//! Shared test fixtures: scripted drivers, in-memory image storage, and
//! canned provider JSON.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use async_trait::async_trait;
use fabula_core::{
    AdversityType, ArcPosition, CyclePhase, EmotionalBeat, GenerateRequest, GeneratedImage, Genre,
    NewChapter, NewPart, NewScene, NewStory, TextGeneration, Tone, VirtueType,
};
use fabula_error::{FabulaResult, ProviderError, ProviderErrorKind};
use fabula_interface::{ImageDriver, NovelRepository, TextDriver};
use fabula_pipeline::MemoryNovelRepository;
use fabula_storage::{ImagePath, ImageStorage, StoredImage};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use uuid::Uuid;

/// One scripted driver response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Free text returned from `generate`
    Text(String),
    /// JSON value returned from `generate_json`
    Json(Value),
    /// Fail the call with a provider error
    Error(String),
}

/// A text driver replaying a fixed response sequence.
///
/// Records every prompt so tests can assert on what was sent; running past
/// the end of the script is an error, not a panic, so exhaustion surfaces
/// through the code path under test.
pub struct MockDriver {
    responses: Mutex<VecDeque<MockResponse>>,
    prompts: Mutex<Vec<String>>,
    call_count: Mutex<usize>,
}

impl MockDriver {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
        }
    }

    /// Number of driver calls made so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts sent so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next(&self, req: &GenerateRequest) -> FabulaResult<MockResponse> {
        *self.call_count.lock().unwrap() += 1;
        self.prompts.lock().unwrap().push(req.prompt.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(MockResponse::Error(message)) => {
                Err(ProviderError::new(ProviderErrorKind::Api {
                    status: 500,
                    message,
                }))?
            }
            Some(response) => Ok(response),
            None => Err(ProviderError::new(ProviderErrorKind::Request(
                "mock response script exhausted".to_string(),
            )))?,
        }
    }
}

#[async_trait]
impl TextDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<TextGeneration> {
        let text = match self.next(req)? {
            MockResponse::Text(text) => text,
            MockResponse::Json(value) => value.to_string(),
            MockResponse::Error(_) => unreachable!("next() returns errors"),
        };
        Ok(TextGeneration {
            text,
            model: "mock-model".to_string(),
            tokens_used: None,
            finish_reason: Some("stop".to_string()),
        })
    }

    async fn generate_json(
        &self,
        req: &GenerateRequest,
        _schema: &Value,
    ) -> FabulaResult<Value> {
        match self.next(req)? {
            MockResponse::Json(value) => Ok(value),
            MockResponse::Text(text) => Ok(serde_json::from_str(&text).unwrap_or(Value::Null)),
            MockResponse::Error(_) => unreachable!("next() returns errors"),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// An image driver returning a fixed PNG stub for every prompt.
#[derive(Default)]
pub struct MockImageDriver {
    call_count: Mutex<usize>,
}

impl MockImageDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ImageDriver for MockImageDriver {
    async fn generate_image(
        &self,
        _prompt: &str,
        _width: u32,
        _height: u32,
    ) -> FabulaResult<GeneratedImage> {
        *self.call_count.lock().unwrap() += 1;
        Ok(GeneratedImage {
            data: vec![0x89, b'P', b'N', b'G'],
            mime: "image/png".to_string(),
        })
    }
}

/// In-memory image storage keyed by rendered path.
#[derive(Default)]
pub struct MemoryImageStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageStorage for MemoryImageStorage {
    async fn store(&self, path: &ImagePath, data: &[u8]) -> FabulaResult<StoredImage> {
        let key = path.key();
        self.blobs
            .lock()
            .unwrap()
            .insert(key.clone(), data.to_vec());
        Ok(StoredImage {
            key,
            content_hash: String::new(),
            size_bytes: data.len() as i64,
        })
    }

    async fn retrieve(&self, key: &str) -> FabulaResult<Vec<u8>> {
        Ok(self
            .blobs
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn exists(&self, key: &str) -> FabulaResult<bool> {
        Ok(self.blobs.lock().unwrap().contains_key(key))
    }

    async fn delete(&self, key: &str) -> FabulaResult<()> {
        self.blobs.lock().unwrap().remove(key);
        Ok(())
    }
}

// Canned provider JSON, shaped like real structured-output responses.

pub fn story_json() -> Value {
    json!({
        "title": "The Lantern Keeper",
        "genre": "fantasy",
        "tone": "hopeful",
        "summary": "An apprentice keeper guards the last lit harbor.",
        "moral_framework": "Courage is tending small lights when the dark is large."
    })
}

pub fn character_json(name: &str, role: &str) -> Value {
    json!({
        "name": name,
        "role": role,
        "core_trait": "courage",
        "personality": {
            "strengths": ["steady under pressure"],
            "flaws": ["slow to ask for help"],
            "desires": ["keep the harbor lit"],
            "fears": ["the lamp going out on her watch"]
        },
        "appearance": {
            "features": ["wind-burned cheeks"],
            "attire": ["oilskin coat"],
            "distinguishing_marks": ["burn scar on the left wrist"]
        },
        "voice": {
            "speech_patterns": ["short declarative sentences"],
            "verbal_tics": ["counts under her breath"]
        }
    })
}

pub fn setting_json(name: &str) -> Value {
    json!({
        "name": name,
        "description": "A lighthouse on a basalt spit, last light on the coast.",
        "mood": {
            "active": ["storm bells"],
            "quiet": ["lamp oil hiss"]
        },
        "sensory": {
            "sights": ["green harbor water"],
            "sounds": ["gulls"],
            "smells": ["salt and kerosene"],
            "textures": ["rope-worn rails"]
        },
        "symbolism": {
            "motifs": ["a single flame"],
            "meanings": ["duty kept alone"]
        }
    })
}

pub fn part_json(title: &str, setting_name: &str) -> Value {
    json!({
        "title": title,
        "summary": "The storm season begins and the relief keeper never arrives.",
        "character_arcs": [{
            "character_name": "Mira",
            "adversity": "abandonment",
            "virtue": "perseverance",
            "consequence": "the harbor trusts her"
        }],
        "setting_names": [setting_name]
    })
}

pub fn chapter_json(title: &str, character_name: &str, setting_name: &str) -> Value {
    json!({
        "title": title,
        "summary": "The supply boat turns back at the bar.",
        "arc_position": "beginning",
        "adversity_type": "external",
        "virtue_type": "persistence",
        "seeds_planted": ["the cracked lens"],
        "seeds_resolved": [],
        "focus_character_names": [character_name],
        "setting_names": [setting_name]
    })
}

pub fn scene_summary_json(title: &str) -> Value {
    json!({
        "title": title,
        "summary": "Mira climbs the tower as the glass begins to sing.",
        "cycle_phase": "setup",
        "emotional_beat": "tension",
        "sensory_anchors": ["singing glass", "cold brass rail"]
    })
}

pub fn prose_evaluation_json(overall: f64) -> Value {
    json!({
        "plot_advancement": 3.0,
        "character_consistency": 3.0,
        "emotional_resonance": 3.0,
        "sensory_grounding": 3.0,
        "prose_quality": 3.0,
        "overall_score": overall,
        "feedback": "Competent but the middle sags.",
        "suggested_improvements": ["Cut the second paragraph", "Land the beat earlier"]
    })
}

/// Toonplay evaluation with every category at `score`, so the weighted
/// score equals `score`.
pub fn toonplay_evaluation_json(score: f64) -> Value {
    json!({
        "visual_storytelling": score,
        "dialogue_quality": score,
        "pacing_flow": score,
        "emotional_impact": score,
        "feedback": "Readable but flat.",
        "suggested_improvements": ["Push in closer on the turn"]
    })
}

fn panel_json(number: u32, shot: &str, dialogue: bool, narration: Option<&str>) -> Value {
    let dialogue = if dialogue {
        json!([{"speaker": "Mira", "text": format!("Line for panel {number}.")}])
    } else {
        json!([])
    };
    json!({
        "panel_number": number,
        "shot_type": shot,
        "description": format!("Panel {number} of the tower."),
        "dialogue": dialogue,
        "narration": narration,
        "sfx": []
    })
}

/// A toonplay that passes every structural check: six panels, all with
/// dialogue, zero narration, six distinct shots including specials.
pub fn good_toonplay_json(title: &str) -> Value {
    json!({
        "title": title,
        "panels": [
            panel_json(1, "wide", true, None),
            panel_json(2, "medium", true, None),
            panel_json(3, "close-up", true, None),
            panel_json(4, "extreme-close-up", true, None),
            panel_json(5, "pov", true, None),
            panel_json(6, "bird-eye", true, None),
        ]
    })
}

/// A toonplay that fails the structural gate: narration on half the
/// panels, sparse dialogue, three repeated shots, no specials.
pub fn bad_toonplay_json(title: &str) -> Value {
    json!({
        "title": title,
        "panels": [
            panel_json(1, "wide", false, Some("The tower waited.")),
            panel_json(2, "wide", true, None),
            panel_json(3, "medium", false, Some("Night came early.")),
            panel_json(4, "medium", true, None),
            panel_json(5, "close-up", false, Some("The glass sang.")),
            panel_json(6, "close-up", false, Some("Nobody answered.")),
        ]
    })
}

// Repository seed helpers.

pub async fn seed_story(repo: &MemoryNovelRepository, author_id: Uuid) -> fabula_core::Story {
    repo.insert_story(NewStory {
        author_id,
        title: "The Lantern Keeper".to_string(),
        genre: Genre::Fantasy,
        tone: Tone::Hopeful,
        summary: "An apprentice keeper guards the last lit harbor.".to_string(),
        moral_framework: "Courage is tending small lights.".to_string(),
    })
    .await
    .expect("seed story")
}

/// Seed a full story → part → chapter → scene chain and return each link.
pub async fn seed_scene_chain(
    repo: &MemoryNovelRepository,
    author_id: Uuid,
) -> (
    fabula_core::Story,
    fabula_core::Part,
    fabula_core::Chapter,
    fabula_core::Scene,
) {
    let story = seed_story(repo, author_id).await;
    let part = repo
        .insert_part(NewPart {
            story_id: story.id,
            title: "Storm Season".to_string(),
            summary: "The relief keeper never arrives.".to_string(),
            character_arcs: Vec::new(),
            setting_ids: Vec::new(),
            order_index: 0,
        })
        .await
        .expect("seed part");
    let chapter = repo
        .insert_chapter(NewChapter {
            part_id: part.id,
            title: "The Bar".to_string(),
            summary: "The supply boat turns back.".to_string(),
            arc_position: ArcPosition::Beginning,
            adversity_type: AdversityType::External,
            virtue_type: VirtueType::Persistence,
            seeds_planted: Vec::new(),
            seeds_resolved: Vec::new(),
            focus_character_ids: Vec::new(),
            setting_ids: Vec::new(),
            order_index: 0,
        })
        .await
        .expect("seed chapter");
    let scene = repo
        .insert_scene(NewScene {
            chapter_id: chapter.id,
            title: "The Singing Glass".to_string(),
            summary: "Mira climbs the tower.".to_string(),
            cycle_phase: CyclePhase::Setup,
            emotional_beat: EmotionalBeat::Tension,
            sensory_anchors: vec!["singing glass".to_string()],
            order_index: 0,
        })
        .await
        .expect("seed scene");
    (story, part, chapter, scene)
}
