//! Diesel table definitions for the novel hierarchy.
//!
//! Closed-vocabulary fields are stored as `Text` and parsed back through
//! strum; nested value objects (personality, mood, toonplay) live in `Jsonb`
//! columns and are re-validated by typed deserialization on every read.

diesel::table! {
    stories (id) {
        id -> Uuid,
        author_id -> Uuid,
        title -> Text,
        genre -> Text,
        tone -> Text,
        summary -> Text,
        moral_framework -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    characters (id) {
        id -> Uuid,
        story_id -> Uuid,
        name -> Text,
        role -> Text,
        core_trait -> Text,
        personality -> Jsonb,
        appearance -> Jsonb,
        voice -> Jsonb,
        order_index -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    settings (id) {
        id -> Uuid,
        story_id -> Uuid,
        name -> Text,
        description -> Text,
        mood -> Jsonb,
        sensory -> Jsonb,
        symbolism -> Jsonb,
        order_index -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    parts (id) {
        id -> Uuid,
        story_id -> Uuid,
        title -> Text,
        summary -> Text,
        character_arcs -> Jsonb,
        setting_ids -> Array<Uuid>,
        order_index -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    chapters (id) {
        id -> Uuid,
        part_id -> Uuid,
        title -> Text,
        summary -> Text,
        arc_position -> Text,
        adversity_type -> Text,
        virtue_type -> Text,
        seeds_planted -> Array<Text>,
        seeds_resolved -> Array<Text>,
        focus_character_ids -> Array<Uuid>,
        setting_ids -> Array<Uuid>,
        order_index -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    scenes (id) {
        id -> Uuid,
        chapter_id -> Uuid,
        title -> Text,
        summary -> Text,
        cycle_phase -> Text,
        emotional_beat -> Text,
        sensory_anchors -> Array<Text>,
        content -> Nullable<Text>,
        word_count -> Nullable<Int4>,
        panel_count -> Nullable<Int4>,
        toonplay -> Nullable<Jsonb>,
        publish_status -> Text,
        order_index -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    comic_panels (id) {
        id -> Uuid,
        scene_id -> Uuid,
        panel_number -> Int4,
        shot_type -> Text,
        description -> Text,
        dialogue -> Array<Text>,
        narration -> Array<Text>,
        sfx -> Array<Text>,
        image_key -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(characters -> stories (story_id));
diesel::joinable!(settings -> stories (story_id));
diesel::joinable!(parts -> stories (story_id));
diesel::joinable!(chapters -> parts (part_id));
diesel::joinable!(scenes -> chapters (chapter_id));
diesel::joinable!(comic_panels -> scenes (scene_id));

diesel::allow_tables_to_appear_in_same_query!(
    stories,
    characters,
    settings,
    parts,
    chapters,
    scenes,
    comic_panels,
);
