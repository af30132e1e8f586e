//! Generation records.

use crate::{ArtifactKind, GenerationId, GenerationStatus, TenantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output metadata recorded when a generation completes.
///
/// Which fields are populated depends on the artifact kind: media kinds
/// carry a storage URL plus dimensional metadata, text carries inline
/// content. Everything is optional here; the resolver checks that a
/// completed record holds what its kind requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct GenerationOutput {
    /// Location of the produced bytes (opaque to this subsystem)
    pub storage_url: Option<String>,
    /// Pixel width for image and video artifacts
    pub width: Option<u32>,
    /// Pixel height for image and video artifacts
    pub height: Option<u32>,
    /// Duration for audio and video artifacts
    pub duration_secs: Option<f64>,
    /// Container or encoding format (e.g. "png", "mp4")
    pub format: Option<String>,
    /// Inline content for text artifacts
    pub content: Option<String>,
}

/// A single generation tracked by the platform.
///
/// `input_params` holds the raw inputs the generation was submitted with,
/// in declaration order; generation-ID strings inside it are what the
/// lineage engine treats as references.
///
/// # Examples
///
/// ```
/// use atelier_core::{ArtifactKind, GenerationBuilder, GenerationStatus, TenantId};
///
/// let generation = GenerationBuilder::default()
///     .tenant_id(TenantId::new())
///     .generator("portrait_restyle")
///     .artifact_kind(ArtifactKind::Image)
///     .status(GenerationStatus::Pending)
///     .build()
///     .unwrap();
///
/// assert_eq!(generation.generator, "portrait_restyle");
/// assert!(generation.input_params.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct Generation {
    /// Unique identifier
    #[builder(default = "GenerationId::new()")]
    pub id: GenerationId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Name of the generator that produced (or will produce) the artifact
    pub generator: String,
    /// Lifecycle status
    #[builder(default = "GenerationStatus::Pending")]
    pub status: GenerationStatus,
    /// Kind of artifact this generation produces
    pub artifact_kind: ArtifactKind,
    /// Raw submitted inputs, insertion-ordered
    #[builder(default)]
    pub input_params: serde_json::Map<String, serde_json::Value>,
    /// Output metadata, populated on completion
    #[builder(default)]
    pub output: GenerationOutput,
    /// Submission timestamp
    #[builder(default = "Utc::now()")]
    pub created_at: DateTime<Utc>,
}

impl Generation {
    /// References this generation makes to other generations, in
    /// `input_params` order.
    pub fn references(&self) -> Vec<crate::InputRef> {
        crate::collect_refs(&self.input_params)
    }
}
