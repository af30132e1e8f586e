//! Integration tests for the full generation flow.
//!
//! Drives manifest registration, submission, worker hand-off, and lineage
//! queries through the facade's re-exported surface, over the in-memory
//! store.

use atelier::{
    ArtifactKind, AtelierConfig, FieldDecl, Generation, GenerationBuilder, GenerationId,
    GenerationOutput, GenerationStatus, GenerationStore, GeneratorManifest, GeneratorRegistry,
    LineageDirection, LineageService, MemoryGenerationStore, ResolvedValue, SubmissionService,
    TenantId,
};
use serde_json::{Map, Value, json};

const RESTYLE_MANIFEST: &str = r#"
name = "portrait_restyle"
produces = "image"

[inputs.source]
type = "ImageArtifact"
required = true

[inputs.style_refs]
type = "ImageArtifact"
list = true
min_items = 1
max_items = 4

[inputs.prompt]
type = "string"
required = true
"#;

/// A completed generation of the given kind with a stored artifact URL.
fn completed(tenant: TenantId, kind: ArtifactKind, url: &str) -> Generation {
    GenerationBuilder::default()
        .tenant_id(tenant)
        .generator("upload")
        .artifact_kind(kind)
        .status(GenerationStatus::Completed)
        .output(
            GenerationOutput::default()
                .with_storage_url(url)
                .with_format("png"),
        )
        .build()
        .expect("valid generation record")
}

fn registry() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    registry
        .register(GeneratorManifest::from_toml_str(RESTYLE_MANIFEST).expect("parse manifest"))
        .expect("register restyle");
    registry
        .register(
            GeneratorManifest::new("caption", ArtifactKind::Text)
                .input("source", FieldDecl::singular(ArtifactKind::Image).required()),
        )
        .expect("register caption");
    registry
}

fn restyle_inputs(source: GenerationId, style: GenerationId) -> Map<String, Value> {
    let mut inputs = Map::new();
    inputs.insert("source".to_string(), json!(source.to_string()));
    inputs.insert("style_refs".to_string(), json!([style.to_string()]));
    inputs.insert("prompt".to_string(), json!("gauzy pastel rework"));
    inputs
}

#[tokio::test]
async fn manifest_to_lineage_round_trip() {
    let store = MemoryGenerationStore::new();
    let tenant = TenantId::new();

    let source = completed(tenant, ArtifactKind::Image, "https://cdn.example.com/source.png");
    let style = completed(tenant, ArtifactKind::Image, "https://cdn.example.com/style.png");
    store.create(source.clone()).await.expect("seed source");
    store.create(style.clone()).await.expect("seed style");

    let service = SubmissionService::new(registry(), store.clone());

    // Submit the restyle; references resolve against the seeded records
    let outcome = service
        .submit(tenant, "portrait_restyle", restyle_inputs(source.id, style.id))
        .await
        .expect("submit restyle");
    let restyle_id = outcome.generation().id;

    assert_eq!(outcome.generation().status, GenerationStatus::Pending);
    let resolved_source = outcome.inputs().get("source").expect("source resolved");
    match resolved_source {
        ResolvedValue::Artifact(artifact) => {
            assert_eq!(artifact.generation_id(), source.id);
            assert_eq!(artifact.kind(), ArtifactKind::Image);
        }
        other => panic!("expected a singular artifact, got {other:?}"),
    }
    match outcome.inputs().get("style_refs").expect("styles resolved") {
        ResolvedValue::Artifacts(artifacts) => assert_eq!(artifacts.len(), 1),
        other => panic!("expected an artifact list, got {other:?}"),
    }

    // Worker hand-off: pick up the pending record and complete it
    store
        .set_status(tenant, restyle_id, GenerationStatus::Processing)
        .await
        .expect("claim for processing");
    store
        .complete(
            tenant,
            restyle_id,
            GenerationOutput::default()
                .with_storage_url("https://cdn.example.com/restyled.png")
                .with_width(768u32)
                .with_height(1024u32)
                .with_format("png"),
        )
        .await
        .expect("record output");

    // A second submission can now build on the restyle
    let mut caption_inputs = Map::new();
    caption_inputs.insert("source".to_string(), json!(restyle_id.to_string()));
    let caption = service
        .submit(tenant, "caption", caption_inputs)
        .await
        .expect("submit caption");
    let caption_id = caption.generation().id;

    // Lineage limits come from configuration
    let config = AtelierConfig::default();
    let lineage = LineageService::new(store.clone()).with_limits(config.lineage_limits());

    // Ancestry of the caption climbs through the restyle to its parents
    let up = lineage
        .ancestry(tenant, caption_id, None)
        .await
        .expect("ancestry");
    assert_eq!(up.direction, LineageDirection::Ancestry);
    assert_eq!(up.root.generation.id, caption_id);
    assert_eq!(up.node_count(), 4);

    let restyle_node = &up.root.links[0];
    assert_eq!(restyle_node.generation.id, restyle_id);
    assert_eq!(restyle_node.role.as_deref(), Some("source"));
    assert_eq!(restyle_node.depth, 1);

    let parent_ids: Vec<GenerationId> = restyle_node
        .links
        .iter()
        .map(|node| node.generation.id)
        .collect();
    assert_eq!(parent_ids, vec![source.id, style.id]);
    let roles: Vec<&str> = restyle_node
        .links
        .iter()
        .filter_map(|node| node.role.as_deref())
        .collect();
    assert_eq!(roles, vec!["source", "style_refs"]);

    // Descendants of the original source run down to the caption
    let down = lineage
        .descendants(tenant, source.id, None)
        .await
        .expect("descendants");
    assert_eq!(down.direction, LineageDirection::Descendants);
    assert_eq!(down.node_count(), 3);
    assert_eq!(down.root.links[0].generation.id, restyle_id);
    assert_eq!(down.root.links[0].links[0].generation.id, caption_id);

    // A requested depth truncates the tree below the restyle
    let shallow = lineage
        .descendants(tenant, source.id, Some(1))
        .await
        .expect("shallow descendants");
    assert_eq!(shallow.node_count(), 2);
    assert!(shallow.root.links[0].links.is_empty());
}

#[tokio::test]
async fn resolution_errors_name_field_and_id() {
    let store = MemoryGenerationStore::new();
    let tenant = TenantId::new();

    let clip = completed(tenant, ArtifactKind::Video, "https://cdn.example.com/clip.mp4");
    store.create(clip.clone()).await.expect("seed video");

    let service = SubmissionService::new(registry(), store);

    let mut inputs = Map::new();
    inputs.insert("source".to_string(), json!(clip.id.to_string()));
    let err = service
        .submit(tenant, "caption", inputs)
        .await
        .expect_err("video in an image field should be rejected");

    let message = err.to_string();
    assert!(message.contains("source"), "field missing from: {message}");
    assert!(
        message.contains(&clip.id.to_string()),
        "id missing from: {message}"
    );
    assert!(message.contains("image"), "expected kind missing from: {message}");
    assert!(message.contains("video"), "actual kind missing from: {message}");
}
