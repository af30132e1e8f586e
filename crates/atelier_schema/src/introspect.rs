//! Schema introspection: manifest to compiled descriptor table.
//!
//! Classification is purely structural. Only the declared type name and
//! cardinality flags matter; field names carry no meaning, and nothing here
//! touches storage.

use crate::{CompiledField, CompiledSchema, FieldDecl, FieldDescriptor, GeneratorManifest};
use atelier_core::ArtifactKind;
use atelier_error::{AtelierResult, SchemaError, SchemaErrorKind};
use tracing::{debug, instrument};

/// Type names accepted for plain data fields.
const PLAIN_TYPES: &[&str] = &["string", "integer", "number", "boolean", "object", "array"];

/// Suffix that marks a type name as intending to reference artifacts.
const ARTIFACT_SUFFIX: &str = "Artifact";

/// Compile a manifest's input declarations into a descriptor table.
///
/// Every field classifies as exactly one of plain, artifact-singular, or
/// artifact-list. A declaration that fits none of those is a configuration
/// defect and fails here, at registration, so request handling never sees
/// an unclassifiable field.
///
/// # Errors
///
/// - `AmbiguousSchema` for an `Artifact`-suffixed type whose stem is not a
///   known kind
/// - `UnknownType` for a type that is neither a marker nor a plain type
/// - `InvalidBounds` for occupancy bounds off a list field, `list` on a
///   plain type, or `min_items` above `max_items`
#[instrument(skip(manifest), fields(generator = %manifest.name, inputs = manifest.inputs.len()))]
pub fn compile(manifest: &GeneratorManifest) -> AtelierResult<CompiledSchema> {
    let mut schema = CompiledSchema::default();
    for (field, decl) in &manifest.inputs {
        let descriptor = classify(field, decl)?;
        debug!(field = %field, ?descriptor, required = decl.required, "Classified field");
        schema.insert(
            field.clone(),
            CompiledField {
                descriptor,
                required: decl.required,
            },
        );
    }
    debug!(
        fields = schema.len(),
        artifact_fields = schema.artifact_fields().count(),
        "Compiled generator schema"
    );
    Ok(schema)
}

fn classify(field: &str, decl: &FieldDecl) -> AtelierResult<FieldDescriptor> {
    if let Some(kind) = ArtifactKind::from_marker(&decl.type_name) {
        return classify_artifact(field, decl, kind);
    }
    if decl.type_name.ends_with(ARTIFACT_SUFFIX) {
        return Err(SchemaError::new(SchemaErrorKind::AmbiguousSchema {
            field: field.to_string(),
            type_name: decl.type_name.clone(),
        })
        .into());
    }
    if PLAIN_TYPES.contains(&decl.type_name.as_str()) {
        return classify_plain(field, decl);
    }
    Err(SchemaError::new(SchemaErrorKind::UnknownType {
        field: field.to_string(),
        type_name: decl.type_name.clone(),
    })
    .into())
}

fn classify_artifact(
    field: &str,
    decl: &FieldDecl,
    kind: ArtifactKind,
) -> AtelierResult<FieldDescriptor> {
    if !decl.list {
        if decl.min_items.is_some() || decl.max_items.is_some() {
            return Err(SchemaError::new(SchemaErrorKind::InvalidBounds {
                field: field.to_string(),
                detail: "occupancy bounds require list = true".to_string(),
            })
            .into());
        }
        return Ok(FieldDescriptor::Singular(kind));
    }

    let min_items = decl.min_items.unwrap_or(0);
    if let Some(max_items) = decl.max_items {
        if min_items > max_items {
            return Err(SchemaError::new(SchemaErrorKind::InvalidBounds {
                field: field.to_string(),
                detail: format!("min_items {} exceeds max_items {}", min_items, max_items),
            })
            .into());
        }
    }
    Ok(FieldDescriptor::List {
        kind,
        min_items,
        max_items: decl.max_items,
    })
}

fn classify_plain(field: &str, decl: &FieldDecl) -> AtelierResult<FieldDescriptor> {
    if decl.list || decl.min_items.is_some() || decl.max_items.is_some() {
        return Err(SchemaError::new(SchemaErrorKind::InvalidBounds {
            field: field.to_string(),
            detail: format!(
                "plain type '{}' cannot declare list cardinality",
                decl.type_name
            ),
        })
        .into());
    }
    Ok(FieldDescriptor::Plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_error::AtelierErrorKind;

    fn schema_kind(err: atelier_error::AtelierError) -> SchemaErrorKind {
        match err.kind() {
            AtelierErrorKind::Schema(e) => e.kind.clone(),
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn classifies_marker_plain_and_list_fields() {
        let manifest = GeneratorManifest::new("portrait_restyle", ArtifactKind::Image)
            .input("source", FieldDecl::singular(ArtifactKind::Image).required())
            .input(
                "style_refs",
                FieldDecl::list(ArtifactKind::Image).min_items(1).max_items(4),
            )
            .input("prompt", FieldDecl::plain("string").required())
            .input("steps", FieldDecl::plain("integer"));

        let schema = compile(&manifest).unwrap();
        assert_eq!(
            schema.field("source").unwrap().descriptor,
            FieldDescriptor::Singular(ArtifactKind::Image)
        );
        assert_eq!(
            schema.field("style_refs").unwrap().descriptor,
            FieldDescriptor::List {
                kind: ArtifactKind::Image,
                min_items: 1,
                max_items: Some(4),
            }
        );
        assert_eq!(
            schema.field("prompt").unwrap().descriptor,
            FieldDescriptor::Plain
        );
        assert!(schema.field("prompt").unwrap().required);
        assert!(!schema.field("steps").unwrap().required);
    }

    #[test]
    fn unknown_artifact_suffix_is_ambiguous() {
        let manifest = GeneratorManifest::new("bad", ArtifactKind::Image)
            .input("source", FieldDecl::plain("PaintingArtifact"));

        match schema_kind(compile(&manifest).unwrap_err()) {
            SchemaErrorKind::AmbiguousSchema { field, type_name } => {
                assert_eq!(field, "source");
                assert_eq!(type_name, "PaintingArtifact");
            }
            other => panic!("expected AmbiguousSchema, got {other}"),
        }
    }

    #[test]
    fn bare_artifact_suffix_is_ambiguous() {
        let manifest = GeneratorManifest::new("bad", ArtifactKind::Image)
            .input("source", FieldDecl::plain("Artifact"));

        assert!(matches!(
            schema_kind(compile(&manifest).unwrap_err()),
            SchemaErrorKind::AmbiguousSchema { .. }
        ));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let manifest = GeneratorManifest::new("bad", ArtifactKind::Image)
            .input("steps", FieldDecl::plain("count"));

        assert!(matches!(
            schema_kind(compile(&manifest).unwrap_err()),
            SchemaErrorKind::UnknownType { .. }
        ));
    }

    #[test]
    fn bounds_on_singular_field_are_rejected() {
        let manifest = GeneratorManifest::new("bad", ArtifactKind::Image)
            .input("source", FieldDecl::singular(ArtifactKind::Image).min_items(1));

        assert!(matches!(
            schema_kind(compile(&manifest).unwrap_err()),
            SchemaErrorKind::InvalidBounds { .. }
        ));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let manifest = GeneratorManifest::new("bad", ArtifactKind::Image).input(
            "style_refs",
            FieldDecl::list(ArtifactKind::Image).min_items(5).max_items(2),
        );

        assert!(matches!(
            schema_kind(compile(&manifest).unwrap_err()),
            SchemaErrorKind::InvalidBounds { .. }
        ));
    }

    #[test]
    fn list_flag_on_plain_type_is_rejected() {
        let mut decl = FieldDecl::plain("string");
        decl.list = true;
        let manifest = GeneratorManifest::new("bad", ArtifactKind::Image).input("tags", decl);

        assert!(matches!(
            schema_kind(compile(&manifest).unwrap_err()),
            SchemaErrorKind::InvalidBounds { .. }
        ));
    }

    #[test]
    fn list_defaults_to_unbounded() {
        let manifest = GeneratorManifest::new("collage", ArtifactKind::Image)
            .input("sources", FieldDecl::list(ArtifactKind::Image));

        let schema = compile(&manifest).unwrap();
        assert_eq!(
            schema.field("sources").unwrap().descriptor,
            FieldDescriptor::List {
                kind: ArtifactKind::Image,
                min_items: 0,
                max_items: None,
            }
        );
    }

    #[test]
    fn empty_manifest_compiles_to_empty_schema() {
        let manifest = GeneratorManifest::new("noop", ArtifactKind::Text);
        let schema = compile(&manifest).unwrap();
        assert!(schema.is_empty());
    }
}
