//! Artifact kind enumeration.

use serde::{Deserialize, Serialize};

/// Kind of artifact a generation produces.
///
/// A closed set: adding a kind is a source change, which keeps the schema
/// introspector, the resolver, and storage conversions exhaustive. Each kind
/// has a marker type name (`ImageArtifact` and friends) used in generator
/// input schemas.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Still image content (PNG, JPEG, WebP, etc.)
    #[display("image")]
    Image,
    /// Video content (MP4, WebM, etc.)
    #[display("video")]
    Video,
    /// Audio content (MP3, WAV, OGG, etc.)
    #[display("audio")]
    Audio,
    /// Inline text content
    #[display("text")]
    Text,
    /// LoRA adapter weights
    #[display("lora")]
    Lora,
    /// Full model weights
    #[display("model")]
    Model,
}

impl ArtifactKind {
    /// Convert to string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Image => "image",
            ArtifactKind::Video => "video",
            ArtifactKind::Audio => "audio",
            ArtifactKind::Text => "text",
            ArtifactKind::Lora => "lora",
            ArtifactKind::Model => "model",
        }
    }

    /// Marker type name used in generator input schemas.
    pub fn marker(&self) -> &'static str {
        match self {
            ArtifactKind::Image => "ImageArtifact",
            ArtifactKind::Video => "VideoArtifact",
            ArtifactKind::Audio => "AudioArtifact",
            ArtifactKind::Text => "TextArtifact",
            ArtifactKind::Lora => "LoraArtifact",
            ArtifactKind::Model => "ModelArtifact",
        }
    }

    /// Resolve a schema marker type name back to its kind.
    ///
    /// Returns `None` for anything that is not exactly a known marker;
    /// classifying near-misses is the introspector's job.
    pub fn from_marker(marker: &str) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|kind| kind.marker() == marker)
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(ArtifactKind::Image),
            "video" => Ok(ArtifactKind::Video),
            "audio" => Ok(ArtifactKind::Audio),
            "text" => Ok(ArtifactKind::Text),
            "lora" => Ok(ArtifactKind::Lora),
            "model" => Ok(ArtifactKind::Model),
            _ => Err(format!("Unknown artifact kind: {}", s)),
        }
    }
}
