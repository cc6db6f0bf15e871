//! The image path convention.

use uuid::Uuid;

/// Which entity an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageEntity {
    /// Story cover art
    Story,
    /// Character reference sheet
    Character,
    /// Setting illustration
    Setting,
    /// Scene illustration
    Scene,
    /// Comic panel
    Panel,
}

impl ImageEntity {
    fn segment(&self) -> &'static str {
        match self {
            ImageEntity::Story => "story",
            ImageEntity::Character => "character",
            ImageEntity::Setting => "setting",
            ImageEntity::Scene => "scene",
            ImageEntity::Panel => "panel",
        }
    }
}

/// Original upload or derived variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageVariant {
    /// The generated image as produced
    Original,
    /// A resized/derived rendition
    Variant,
}

impl ImageVariant {
    fn segment(&self) -> &'static str {
        match self {
            ImageVariant::Original => "original",
            ImageVariant::Variant => "variants",
        }
    }
}

/// A fully-qualified image location under the path convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImagePath {
    /// Owning story
    pub story_id: Uuid,
    /// Entity kind
    pub entity: ImageEntity,
    /// Original or variant
    pub variant: ImageVariant,
    /// Unique image id
    pub image_id: Uuid,
    /// File extension, without the dot
    pub ext: String,
}

impl ImagePath {
    /// Build a path.
    pub fn new(
        story_id: Uuid,
        entity: ImageEntity,
        variant: ImageVariant,
        image_id: Uuid,
        ext: impl Into<String>,
    ) -> Self {
        Self {
            story_id,
            entity,
            variant,
            image_id,
            ext: ext.into(),
        }
    }

    /// Render the storage key:
    /// `stories/{story_id}/{entity}/original|variants/{image_id}.{ext}`.
    pub fn key(&self) -> String {
        format!(
            "stories/{}/{}/{}/{}.{}",
            self.story_id,
            self.entity.segment(),
            self.variant.segment(),
            self.image_id,
            self.ext
        )
    }
}

impl std::fmt::Display for ImagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_follows_convention() {
        let story_id = Uuid::nil();
        let image_id = Uuid::nil();
        let path = ImagePath::new(
            story_id,
            ImageEntity::Panel,
            ImageVariant::Original,
            image_id,
            "png",
        );
        assert_eq!(
            path.key(),
            format!("stories/{story_id}/panel/original/{image_id}.png")
        );
    }

    #[test]
    fn variant_segment_is_plural() {
        let path = ImagePath::new(
            Uuid::nil(),
            ImageEntity::Scene,
            ImageVariant::Variant,
            Uuid::nil(),
            "webp",
        );
        assert!(path.key().contains("/scene/variants/"));
    }
}
