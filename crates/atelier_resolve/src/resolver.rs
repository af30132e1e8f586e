//! Artifact reference resolution.
//!
//! Replaces generation-ID strings in submitted inputs with fully resolved
//! artifacts, validating shape, existence, lifecycle status, and artifact
//! kind against the generator's compiled schema.

use atelier_core::{
    ArtifactKind, Generation, GenerationId, GenerationStatus, ResolvedArtifact, ResolvedInputs,
    ResolvedValue, TenantId,
};
use atelier_error::{AtelierResult, ResolveError, ResolveErrorKind};
use atelier_schema::{CompiledSchema, FieldDescriptor};
use atelier_store::GenerationStore;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Resolves artifact references in submitted inputs against a generation
/// store.
///
/// Resolution is all-or-nothing: the first failing check aborts the call
/// and no partial result is returned. The resolver never writes, so a
/// failed resolution leaves no trace in the store.
///
/// Each distinct referenced ID is fetched at most once per call; inputs
/// that repeat a reference do not multiply store reads.
#[derive(Debug, Clone)]
pub struct ArtifactResolver<S> {
    store: S,
}

impl<S: GenerationStore> ArtifactResolver<S> {
    /// Create a resolver over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolve raw submitted inputs against a compiled schema.
    ///
    /// Fields are processed in schema declaration order. Artifact fields
    /// have their value shape checked against the declared cardinality,
    /// then every referenced generation is validated in a fixed order:
    /// existence (tenant-scoped), completion, artifact kind. Plain fields
    /// pass through untouched, whatever their content happens to look
    /// like.
    ///
    /// # Arguments
    ///
    /// * `tenant` - Tenant on whose behalf the resolution runs
    /// * `schema` - Compiled schema of the target generator
    /// * `raw_inputs` - Submitted inputs, field name to JSON value
    ///
    /// # Returns
    ///
    /// Resolved inputs in schema declaration order
    ///
    /// # Errors
    ///
    /// Returns a resolve error naming the offending field (and ID, where
    /// one is involved) for the first failing check. A reference to
    /// another tenant's generation fails exactly like a missing one.
    #[instrument(skip(self, schema, raw_inputs), fields(tenant = %tenant, field_count = schema.len()))]
    pub async fn resolve(
        &self,
        tenant: TenantId,
        schema: &CompiledSchema,
        raw_inputs: &Map<String, Value>,
    ) -> AtelierResult<ResolvedInputs> {
        for field in raw_inputs.keys() {
            if !schema.contains(field) {
                warn!(field, "Rejecting input with undeclared field");
                return Err(
                    ResolveError::new(ResolveErrorKind::UnknownField(field.clone())).into(),
                );
            }
        }

        let mut cache: HashMap<GenerationId, Generation> = HashMap::new();
        let mut resolved = ResolvedInputs::new();

        for (field, compiled) in schema.fields() {
            let Some(value) = raw_inputs.get(field) else {
                if compiled.required {
                    return Err(
                        ResolveError::new(ResolveErrorKind::MissingField(field.clone())).into(),
                    );
                }
                continue;
            };

            match compiled.descriptor {
                FieldDescriptor::Plain => {
                    resolved.insert(field.clone(), ResolvedValue::Plain(value.clone()));
                }
                FieldDescriptor::Singular(kind) => {
                    let id = parse_single_reference(field, value)?;
                    let artifact = self
                        .resolve_reference(tenant, field, id, kind, &mut cache)
                        .await?;
                    resolved.insert(field.clone(), ResolvedValue::Artifact(artifact));
                }
                FieldDescriptor::List {
                    kind,
                    min_items,
                    max_items,
                } => {
                    let ids = parse_reference_list(field, value)?;
                    check_occupancy(field, min_items, max_items, ids.len())?;
                    let mut artifacts = Vec::with_capacity(ids.len());
                    for id in ids {
                        let artifact = self
                            .resolve_reference(tenant, field, id, kind, &mut cache)
                            .await?;
                        artifacts.push(artifact);
                    }
                    resolved.insert(field.clone(), ResolvedValue::Artifacts(artifacts));
                }
            }
        }

        debug!(
            resolved = resolved.len(),
            fetched = cache.len(),
            "Resolved submitted inputs"
        );
        Ok(resolved)
    }

    /// Validate one referenced generation and convert it to an artifact.
    ///
    /// The cache holds records already fetched during this call, so a
    /// repeated ID costs one store read. Validation still runs per
    /// occurrence because the expected kind depends on the field.
    async fn resolve_reference(
        &self,
        tenant: TenantId,
        field: &str,
        id: GenerationId,
        expected: ArtifactKind,
        cache: &mut HashMap<GenerationId, Generation>,
    ) -> AtelierResult<ResolvedArtifact> {
        let generation = match cache.get(&id) {
            Some(cached) => cached.clone(),
            None => {
                let fetched = self.store.get(tenant, id).await?.ok_or_else(|| {
                    warn!(field, %id, "Reference does not resolve for this tenant");
                    ResolveError::new(ResolveErrorKind::ReferenceNotFound {
                        field: field.to_string(),
                        id: id.to_string(),
                    })
                })?;
                cache.insert(id, fetched.clone());
                fetched
            }
        };

        if generation.status != GenerationStatus::Completed {
            warn!(
                field,
                %id,
                status = generation.status.as_str(),
                "Reference has not completed"
            );
            return Err(ResolveError::new(ResolveErrorKind::NotCompleted {
                field: field.to_string(),
                id: id.to_string(),
                status: generation.status.as_str().to_string(),
            })
            .into());
        }
        if generation.artifact_kind != expected {
            warn!(
                field,
                %id,
                expected = expected.as_str(),
                actual = generation.artifact_kind.as_str(),
                "Reference produced a different artifact kind"
            );
            return Err(ResolveError::new(ResolveErrorKind::KindMismatch {
                field: field.to_string(),
                id: id.to_string(),
                expected: expected.as_str().to_string(),
                actual: generation.artifact_kind.as_str().to_string(),
            })
            .into());
        }

        artifact_from_record(field, &generation)
    }
}

/// Parse the value of a singular artifact field into a generation ID.
fn parse_single_reference(field: &str, value: &Value) -> AtelierResult<GenerationId> {
    match value {
        Value::String(text) => parse_reference(field, text),
        Value::Array(items) => Err(ResolveError::new(ResolveErrorKind::CardinalityViolation {
            field: field.to_string(),
            detail: format!("expected a single reference, got a list of {}", items.len()),
        })
        .into()),
        other => Err(ResolveError::new(ResolveErrorKind::InvalidReference {
            field: field.to_string(),
            value: other.to_string(),
        })
        .into()),
    }
}

/// Parse the value of a list artifact field into generation IDs.
fn parse_reference_list(field: &str, value: &Value) -> AtelierResult<Vec<GenerationId>> {
    let items = match value {
        Value::Array(items) => items,
        Value::String(_) => {
            return Err(ResolveError::new(ResolveErrorKind::CardinalityViolation {
                field: field.to_string(),
                detail: "expected a list of references, got a single value".to_string(),
            })
            .into());
        }
        other => {
            return Err(ResolveError::new(ResolveErrorKind::InvalidReference {
                field: field.to_string(),
                value: other.to_string(),
            })
            .into());
        }
    };

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(text) => ids.push(parse_reference(field, text)?),
            other => {
                return Err(ResolveError::new(ResolveErrorKind::InvalidReference {
                    field: field.to_string(),
                    value: other.to_string(),
                })
                .into());
            }
        }
    }
    Ok(ids)
}

fn parse_reference(field: &str, text: &str) -> AtelierResult<GenerationId> {
    text.parse::<GenerationId>().map_err(|_| {
        ResolveError::new(ResolveErrorKind::InvalidReference {
            field: field.to_string(),
            value: text.to_string(),
        })
        .into()
    })
}

/// Enforce declared occupancy bounds on a list field.
fn check_occupancy(
    field: &str,
    min_items: u32,
    max_items: Option<u32>,
    provided: usize,
) -> AtelierResult<()> {
    let actual = provided as u32;
    if actual < min_items {
        return Err(ResolveError::new(ResolveErrorKind::TooFewItems {
            field: field.to_string(),
            min: min_items,
            actual,
        })
        .into());
    }
    if let Some(max) = max_items {
        if actual > max {
            return Err(ResolveError::new(ResolveErrorKind::TooManyItems {
                field: field.to_string(),
                max,
                actual,
            })
            .into());
        }
    }
    Ok(())
}

/// Build the resolved artifact for a completed generation record.
///
/// A completed record can still be missing the output its kind requires,
/// for example after a partial backfill; that surfaces as an incomplete
/// record error rather than an empty URL.
fn artifact_from_record(field: &str, generation: &Generation) -> AtelierResult<ResolvedArtifact> {
    let id = generation.id;
    let missing = |what: &str| {
        ResolveError::new(ResolveErrorKind::IncompleteRecord {
            field: field.to_string(),
            id: id.to_string(),
            detail: what.to_string(),
        })
    };
    let output = &generation.output;

    let artifact = match generation.artifact_kind {
        ArtifactKind::Image => ResolvedArtifact::Image {
            generation_id: id,
            url: output
                .storage_url
                .clone()
                .ok_or_else(|| missing("no storage URL recorded"))?,
            width: output.width,
            height: output.height,
            format: output.format.clone(),
        },
        ArtifactKind::Video => ResolvedArtifact::Video {
            generation_id: id,
            url: output
                .storage_url
                .clone()
                .ok_or_else(|| missing("no storage URL recorded"))?,
            width: output.width,
            height: output.height,
            duration_secs: output.duration_secs,
            format: output.format.clone(),
        },
        ArtifactKind::Audio => ResolvedArtifact::Audio {
            generation_id: id,
            url: output
                .storage_url
                .clone()
                .ok_or_else(|| missing("no storage URL recorded"))?,
            duration_secs: output.duration_secs,
            format: output.format.clone(),
        },
        ArtifactKind::Text => ResolvedArtifact::Text {
            generation_id: id,
            content: output
                .content
                .clone()
                .ok_or_else(|| missing("no text content recorded"))?,
        },
        ArtifactKind::Lora => ResolvedArtifact::Lora {
            generation_id: id,
            url: output
                .storage_url
                .clone()
                .ok_or_else(|| missing("no storage URL recorded"))?,
        },
        ArtifactKind::Model => ResolvedArtifact::Model {
            generation_id: id,
            url: output
                .storage_url
                .clone()
                .ok_or_else(|| missing("no storage URL recorded"))?,
        },
    };
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{GenerationBuilder, GenerationOutput};
    use atelier_error::AtelierErrorKind;
    use atelier_schema::{FieldDecl, GeneratorManifest, compile};
    use atelier_store::MemoryGenerationStore;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn restyle_schema() -> CompiledSchema {
        let manifest = GeneratorManifest::new("portrait_restyle", ArtifactKind::Image)
            .input("source", FieldDecl::singular(ArtifactKind::Image).required())
            .input(
                "style_refs",
                FieldDecl::list(ArtifactKind::Image).min_items(1).max_items(3),
            )
            .input("prompt", FieldDecl::plain("string").required());
        compile(&manifest).unwrap()
    }

    fn output_for(kind: ArtifactKind) -> GenerationOutput {
        match kind {
            ArtifactKind::Text => GenerationOutput::default().with_content("generated text"),
            _ => GenerationOutput::default()
                .with_storage_url("https://cdn.example.com/artifact.bin")
                .with_format("bin"),
        }
    }

    async fn seed(
        store: &MemoryGenerationStore,
        tenant: TenantId,
        kind: ArtifactKind,
        status: GenerationStatus,
    ) -> GenerationId {
        let output = if status == GenerationStatus::Completed {
            output_for(kind)
        } else {
            GenerationOutput::default()
        };
        let generation = GenerationBuilder::default()
            .tenant_id(tenant)
            .generator("seed")
            .artifact_kind(kind)
            .status(status)
            .output(output)
            .build()
            .unwrap();
        let id = generation.id;
        store.create(generation).await.unwrap();
        id
    }

    fn resolve_kind(err: atelier_error::AtelierError) -> ResolveErrorKind {
        match err.kind() {
            AtelierErrorKind::Resolve(e) => e.kind.clone(),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn resolves_singular_list_and_plain_fields() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let source = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let style = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let resolver = ArtifactResolver::new(store);

        let raw = json!({
            "source": source.to_string(),
            "style_refs": [style.to_string()],
            "prompt": "watercolor, muted palette",
        });
        let resolved = resolver
            .resolve(tenant, &restyle_schema(), raw.as_object().unwrap())
            .await
            .unwrap();

        let fields: Vec<_> = resolved.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(fields, vec!["source", "style_refs", "prompt"]);
        match resolved.get("source").unwrap() {
            ResolvedValue::Artifact(ResolvedArtifact::Image { generation_id, url, .. }) => {
                assert_eq!(*generation_id, source);
                assert_eq!(url, "https://cdn.example.com/artifact.bin");
            }
            other => panic!("unexpected value: {other:?}"),
        }
        match resolved.get("style_refs").unwrap() {
            ResolvedValue::Artifacts(artifacts) => assert_eq!(artifacts.len(), 1),
            other => panic!("unexpected value: {other:?}"),
        }
        assert_eq!(
            resolved.get("prompt").unwrap(),
            &ResolvedValue::Plain(json!("watercolor, muted palette"))
        );
    }

    #[tokio::test]
    async fn singular_field_rejects_list_shape() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let source = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let style = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let resolver = ArtifactResolver::new(store);

        // A one-element list is still the wrong shape for a singular field
        let raw = json!({
            "source": [source.to_string()],
            "style_refs": [style.to_string()],
            "prompt": "p",
        });
        let err = resolver
            .resolve(tenant, &restyle_schema(), raw.as_object().unwrap())
            .await
            .unwrap_err();

        match resolve_kind(err) {
            ResolveErrorKind::CardinalityViolation { field, .. } => assert_eq!(field, "source"),
            other => panic!("unexpected kind: {other}"),
        }
    }

    #[tokio::test]
    async fn list_field_rejects_bare_string() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let source = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let style = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let resolver = ArtifactResolver::new(store);

        let raw = json!({
            "source": source.to_string(),
            "style_refs": style.to_string(),
            "prompt": "p",
        });
        let err = resolver
            .resolve(tenant, &restyle_schema(), raw.as_object().unwrap())
            .await
            .unwrap_err();

        match resolve_kind(err) {
            ResolveErrorKind::CardinalityViolation { field, .. } => assert_eq!(field, "style_refs"),
            other => panic!("unexpected kind: {other}"),
        }
    }

    #[tokio::test]
    async fn occupancy_bounds_are_enforced() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let source = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let mut styles = Vec::new();
        for _ in 0..4 {
            let id = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
            styles.push(id.to_string());
        }
        let resolver = ArtifactResolver::new(store);
        let schema = restyle_schema();

        let raw = json!({
            "source": source.to_string(),
            "style_refs": [],
            "prompt": "p",
        });
        let err = resolver
            .resolve(tenant, &schema, raw.as_object().unwrap())
            .await
            .unwrap_err();
        match resolve_kind(err) {
            ResolveErrorKind::TooFewItems { field, min, actual } => {
                assert_eq!(field, "style_refs");
                assert_eq!(min, 1);
                assert_eq!(actual, 0);
            }
            other => panic!("unexpected kind: {other}"),
        }

        let raw = json!({
            "source": source.to_string(),
            "style_refs": styles,
            "prompt": "p",
        });
        let err = resolver
            .resolve(tenant, &schema, raw.as_object().unwrap())
            .await
            .unwrap_err();
        match resolve_kind(err) {
            ResolveErrorKind::TooManyItems { field, max, actual } => {
                assert_eq!(field, "style_refs");
                assert_eq!(max, 3);
                assert_eq!(actual, 4);
            }
            other => panic!("unexpected kind: {other}"),
        }
    }

    #[tokio::test]
    async fn undeclared_and_missing_fields_are_rejected() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let source = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let resolver = ArtifactResolver::new(store);
        let schema = restyle_schema();

        let raw = json!({
            "source": source.to_string(),
            "prompt": "p",
            "negative_prompt": "q",
        });
        let err = resolver
            .resolve(tenant, &schema, raw.as_object().unwrap())
            .await
            .unwrap_err();
        assert_eq!(
            resolve_kind(err),
            ResolveErrorKind::UnknownField("negative_prompt".to_string())
        );

        let raw = json!({ "source": source.to_string() });
        let err = resolver
            .resolve(tenant, &schema, raw.as_object().unwrap())
            .await
            .unwrap_err();
        assert_eq!(
            resolve_kind(err),
            ResolveErrorKind::MissingField("prompt".to_string())
        );
    }

    #[tokio::test]
    async fn absent_optional_field_is_skipped() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let source = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let resolver = ArtifactResolver::new(store);

        let manifest = GeneratorManifest::new("captioner", ArtifactKind::Text)
            .input("source", FieldDecl::singular(ArtifactKind::Image).required())
            .input("hints", FieldDecl::plain("string"));
        let schema = compile(&manifest).unwrap();

        let raw = json!({ "source": source.to_string() });
        let resolved = resolver
            .resolve(tenant, &schema, raw.as_object().unwrap())
            .await
            .unwrap();

        assert_eq!(resolved.len(), 1);
        assert!(resolved.get("hints").is_none());
    }

    #[tokio::test]
    async fn foreign_tenant_reference_fails_like_a_missing_one() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let other = TenantId::new();
        let foreign = seed(&store, other, ArtifactKind::Image, GenerationStatus::Completed).await;
        let style = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let resolver = ArtifactResolver::new(store);

        let raw = json!({
            "source": foreign.to_string(),
            "style_refs": [style.to_string()],
            "prompt": "p",
        });
        let err = resolver
            .resolve(tenant, &restyle_schema(), raw.as_object().unwrap())
            .await
            .unwrap_err();

        // Nothing in the error distinguishes a foreign record from no record
        assert_eq!(
            resolve_kind(err),
            ResolveErrorKind::ReferenceNotFound {
                field: "source".to_string(),
                id: foreign.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn pending_reference_is_rejected_with_its_status() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let pending = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Pending).await;
        let style = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let resolver = ArtifactResolver::new(store);

        let raw = json!({
            "source": pending.to_string(),
            "style_refs": [style.to_string()],
            "prompt": "p",
        });
        let err = resolver
            .resolve(tenant, &restyle_schema(), raw.as_object().unwrap())
            .await
            .unwrap_err();

        assert_eq!(
            resolve_kind(err),
            ResolveErrorKind::NotCompleted {
                field: "source".to_string(),
                id: pending.to_string(),
                status: "pending".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn kind_mismatch_names_expected_and_actual() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let video = seed(&store, tenant, ArtifactKind::Video, GenerationStatus::Completed).await;
        let style = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let resolver = ArtifactResolver::new(store);

        let raw = json!({
            "source": video.to_string(),
            "style_refs": [style.to_string()],
            "prompt": "p",
        });
        let err = resolver
            .resolve(tenant, &restyle_schema(), raw.as_object().unwrap())
            .await
            .unwrap_err();

        assert_eq!(
            resolve_kind(err),
            ResolveErrorKind::KindMismatch {
                field: "source".to_string(),
                id: video.to_string(),
                expected: "image".to_string(),
                actual: "video".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn invalid_reference_carries_the_offending_value() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let style = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let resolver = ArtifactResolver::new(store);
        let schema = restyle_schema();

        let raw = json!({
            "source": "not-a-uuid",
            "style_refs": [style.to_string()],
            "prompt": "p",
        });
        let err = resolver
            .resolve(tenant, &schema, raw.as_object().unwrap())
            .await
            .unwrap_err();
        assert_eq!(
            resolve_kind(err),
            ResolveErrorKind::InvalidReference {
                field: "source".to_string(),
                value: "not-a-uuid".to_string(),
            }
        );

        let raw = json!({
            "source": style.to_string(),
            "style_refs": [42],
            "prompt": "p",
        });
        let err = resolver
            .resolve(tenant, &schema, raw.as_object().unwrap())
            .await
            .unwrap_err();
        assert_eq!(
            resolve_kind(err),
            ResolveErrorKind::InvalidReference {
                field: "style_refs".to_string(),
                value: "42".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn completed_record_without_output_is_incomplete() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let generation = GenerationBuilder::default()
            .tenant_id(tenant)
            .generator("seed")
            .artifact_kind(ArtifactKind::Image)
            .status(GenerationStatus::Completed)
            .build()
            .unwrap();
        let bare = generation.id;
        store.create(generation).await.unwrap();
        let style = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let resolver = ArtifactResolver::new(store);

        let raw = json!({
            "source": bare.to_string(),
            "style_refs": [style.to_string()],
            "prompt": "p",
        });
        let err = resolver
            .resolve(tenant, &restyle_schema(), raw.as_object().unwrap())
            .await
            .unwrap_err();

        match resolve_kind(err) {
            ResolveErrorKind::IncompleteRecord { field, id, .. } => {
                assert_eq!(field, "source");
                assert_eq!(id, bare.to_string());
            }
            other => panic!("unexpected kind: {other}"),
        }
    }

    #[tokio::test]
    async fn plain_field_content_is_never_inspected() {
        let store = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let looks_like_id = seed(&store, tenant, ArtifactKind::Image, GenerationStatus::Completed)
            .await
            .to_string();
        let resolver = ArtifactResolver::new(store);

        let manifest = GeneratorManifest::new("echo", ArtifactKind::Text)
            .input("prompt", FieldDecl::plain("string").required());
        let schema = compile(&manifest).unwrap();

        let raw = json!({ "prompt": looks_like_id });
        let resolved = resolver
            .resolve(tenant, &schema, raw.as_object().unwrap())
            .await
            .unwrap();

        // The value stays a plain string even though it parses as an ID
        assert_eq!(
            resolved.get("prompt").unwrap(),
            &ResolvedValue::Plain(json!(looks_like_id))
        );
    }

    #[derive(Clone)]
    struct CountingStore {
        inner: MemoryGenerationStore,
        gets: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl GenerationStore for CountingStore {
        async fn get(
            &self,
            tenant: TenantId,
            id: GenerationId,
        ) -> AtelierResult<Option<Generation>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get(tenant, id).await
        }

        async fn find_referencing(
            &self,
            tenant: TenantId,
            id: GenerationId,
        ) -> AtelierResult<Vec<Generation>> {
            self.inner.find_referencing(tenant, id).await
        }

        async fn create(&self, generation: Generation) -> AtelierResult<()> {
            self.inner.create(generation).await
        }

        async fn complete(
            &self,
            tenant: TenantId,
            id: GenerationId,
            output: GenerationOutput,
        ) -> AtelierResult<()> {
            self.inner.complete(tenant, id, output).await
        }

        async fn set_status(
            &self,
            tenant: TenantId,
            id: GenerationId,
            status: GenerationStatus,
        ) -> AtelierResult<()> {
            self.inner.set_status(tenant, id, status).await
        }

        async fn list_recent(
            &self,
            tenant: TenantId,
            limit: i64,
        ) -> AtelierResult<Vec<Generation>> {
            self.inner.list_recent(tenant, limit).await
        }
    }

    #[tokio::test]
    async fn repeated_references_are_fetched_once() {
        let inner = MemoryGenerationStore::new();
        let tenant = TenantId::new();
        let image = seed(&inner, tenant, ArtifactKind::Image, GenerationStatus::Completed).await;
        let gets = Arc::new(AtomicUsize::new(0));
        let resolver = ArtifactResolver::new(CountingStore {
            inner,
            gets: Arc::clone(&gets),
        });

        // The same ID appears three times across two fields
        let raw = json!({
            "source": image.to_string(),
            "style_refs": [image.to_string(), image.to_string()],
            "prompt": "p",
        });
        let resolved = resolver
            .resolve(tenant, &restyle_schema(), raw.as_object().unwrap())
            .await
            .unwrap();

        assert_eq!(gets.load(Ordering::SeqCst), 1);
        assert_eq!(resolved.all_artifacts().count(), 3);
    }
}
