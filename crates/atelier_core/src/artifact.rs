//! Resolved artifact values.

use crate::{ArtifactKind, GenerationId};
use serde::{Deserialize, Serialize};

/// A fully resolved artifact reference, ready to hand to generator
/// execution.
///
/// One variant per [`ArtifactKind`]; the payload is what downstream code
/// needs to consume the artifact. Media kinds carry the storage URL, text
/// carries its content inline.
///
/// # Examples
///
/// ```
/// use atelier_core::{ArtifactKind, GenerationId, ResolvedArtifact};
///
/// let artifact = ResolvedArtifact::Text {
///     generation_id: GenerationId::new(),
///     content: "a quiet harbor at dawn".to_string(),
/// };
/// assert_eq!(artifact.kind(), ArtifactKind::Text);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolvedArtifact {
    /// Still image artifact.
    Image {
        /// Generation that produced the artifact
        generation_id: GenerationId,
        /// Location of the image bytes
        url: String,
        /// Pixel width, when recorded
        width: Option<u32>,
        /// Pixel height, when recorded
        height: Option<u32>,
        /// Encoding format, e.g. "png"
        format: Option<String>,
    },

    /// Video artifact.
    Video {
        /// Generation that produced the artifact
        generation_id: GenerationId,
        /// Location of the video bytes
        url: String,
        /// Pixel width, when recorded
        width: Option<u32>,
        /// Pixel height, when recorded
        height: Option<u32>,
        /// Duration in seconds, when recorded
        duration_secs: Option<f64>,
        /// Container format, e.g. "mp4"
        format: Option<String>,
    },

    /// Audio artifact.
    Audio {
        /// Generation that produced the artifact
        generation_id: GenerationId,
        /// Location of the audio bytes
        url: String,
        /// Duration in seconds, when recorded
        duration_secs: Option<f64>,
        /// Encoding format, e.g. "mp3"
        format: Option<String>,
    },

    /// Text artifact with inline content.
    Text {
        /// Generation that produced the artifact
        generation_id: GenerationId,
        /// The generated text itself
        content: String,
    },

    /// LoRA adapter weights.
    Lora {
        /// Generation that produced the artifact
        generation_id: GenerationId,
        /// Location of the weights
        url: String,
    },

    /// Full model weights.
    Model {
        /// Generation that produced the artifact
        generation_id: GenerationId,
        /// Location of the weights
        url: String,
    },
}

impl ResolvedArtifact {
    /// The kind of this artifact.
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ResolvedArtifact::Image { .. } => ArtifactKind::Image,
            ResolvedArtifact::Video { .. } => ArtifactKind::Video,
            ResolvedArtifact::Audio { .. } => ArtifactKind::Audio,
            ResolvedArtifact::Text { .. } => ArtifactKind::Text,
            ResolvedArtifact::Lora { .. } => ArtifactKind::Lora,
            ResolvedArtifact::Model { .. } => ArtifactKind::Model,
        }
    }

    /// The generation that produced this artifact.
    pub fn generation_id(&self) -> GenerationId {
        match self {
            ResolvedArtifact::Image { generation_id, .. }
            | ResolvedArtifact::Video { generation_id, .. }
            | ResolvedArtifact::Audio { generation_id, .. }
            | ResolvedArtifact::Text { generation_id, .. }
            | ResolvedArtifact::Lora { generation_id, .. }
            | ResolvedArtifact::Model { generation_id, .. } => *generation_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let id = GenerationId::new();
        let image = ResolvedArtifact::Image {
            generation_id: id,
            url: "https://cdn.example.com/a.png".into(),
            width: Some(512),
            height: Some(512),
            format: Some("png".into()),
        };
        assert_eq!(image.kind(), ArtifactKind::Image);
        assert_eq!(image.generation_id(), id);
    }

    #[test]
    fn serialized_form_carries_kind_tag() {
        let artifact = ResolvedArtifact::Lora {
            generation_id: GenerationId::new(),
            url: "https://cdn.example.com/w.safetensors".into(),
        };
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["kind"], "lora");
    }
}
