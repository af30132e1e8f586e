//! Generator manifest declarations.
//!
//! A manifest is the declarative description of a generator: its name, what
//! artifact kind it produces, and the shape of each input field. Manifests
//! arrive either from TOML files or built in code; compilation into
//! [`crate::CompiledSchema`] happens at registration.

use atelier_core::ArtifactKind;
use atelier_error::{AtelierResult, SchemaError, SchemaErrorKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One declared input field.
///
/// `type_name` is either an artifact marker (`"ImageArtifact"`, ...) or a
/// plain type name (`"string"`, `"integer"`, `"number"`, `"boolean"`,
/// `"object"`, `"array"`). The `list` flag and occupancy bounds only apply
/// to artifact fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Declared type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether the field takes a list of artifacts
    #[serde(default)]
    pub list: bool,
    /// Minimum list occupancy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u32>,
    /// Maximum list occupancy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u32>,
    /// Whether the field must be present in submitted inputs
    #[serde(default)]
    pub required: bool,
}

impl FieldDecl {
    /// Declare a plain data field.
    pub fn plain(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            list: false,
            min_items: None,
            max_items: None,
            required: false,
        }
    }

    /// Declare a singular artifact field of the given kind.
    pub fn singular(kind: ArtifactKind) -> Self {
        Self {
            type_name: kind.marker().to_string(),
            list: false,
            min_items: None,
            max_items: None,
            required: false,
        }
    }

    /// Declare an artifact list field of the given kind.
    pub fn list(kind: ArtifactKind) -> Self {
        Self {
            type_name: kind.marker().to_string(),
            list: true,
            min_items: None,
            max_items: None,
            required: false,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the minimum list occupancy.
    pub fn min_items(mut self, min: u32) -> Self {
        self.min_items = Some(min);
        self
    }

    /// Set the maximum list occupancy.
    pub fn max_items(mut self, max: u32) -> Self {
        self.max_items = Some(max);
        self
    }
}

/// Declarative description of a generator.
///
/// # Examples
///
/// Built in code:
///
/// ```
/// use atelier_core::ArtifactKind;
/// use atelier_schema::{FieldDecl, GeneratorManifest};
///
/// let manifest = GeneratorManifest::new("portrait_restyle", ArtifactKind::Image)
///     .input("source", FieldDecl::singular(ArtifactKind::Image).required())
///     .input("style_refs", FieldDecl::list(ArtifactKind::Image).min_items(1).max_items(4))
///     .input("prompt", FieldDecl::plain("string").required());
///
/// assert_eq!(manifest.inputs.len(), 3);
/// ```
///
/// Or loaded from TOML:
///
/// ```
/// use atelier_schema::GeneratorManifest;
///
/// let manifest = GeneratorManifest::from_toml_str(r#"
///     name = "caption"
///     produces = "text"
///
///     [inputs.source]
///     type = "ImageArtifact"
///     required = true
/// "#).unwrap();
///
/// assert_eq!(manifest.name, "caption");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorManifest {
    /// Unique generator name
    pub name: String,
    /// Kind of artifact this generator produces
    pub produces: ArtifactKind,
    /// Declared input fields, in declaration order
    #[serde(default)]
    pub inputs: IndexMap<String, FieldDecl>,
}

impl GeneratorManifest {
    /// Create a manifest with no inputs.
    pub fn new(name: impl Into<String>, produces: ArtifactKind) -> Self {
        Self {
            name: name.into(),
            produces,
            inputs: IndexMap::new(),
        }
    }

    /// Add an input field declaration.
    ///
    /// Fields keep the order they are added in, which is the order the
    /// resolver processes them and the order ancestry links follow.
    pub fn input(mut self, field: impl Into<String>, decl: FieldDecl) -> Self {
        self.inputs.insert(field.into(), decl);
        self
    }

    /// Parse a manifest from TOML text.
    #[instrument(skip(text), fields(text_len = text.len()))]
    pub fn from_toml_str(text: &str) -> AtelierResult<Self> {
        let manifest: Self = toml::from_str(text)
            .map_err(|e| SchemaError::new(SchemaErrorKind::TomlParse(e.to_string())))?;
        debug!(
            generator = %manifest.name,
            produces = %manifest.produces,
            inputs = manifest.inputs.len(),
            "Parsed generator manifest"
        );
        Ok(manifest)
    }

    /// Load a manifest from a TOML file.
    #[instrument]
    pub fn from_file(path: &str) -> AtelierResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SchemaError::new(SchemaErrorKind::FileRead(format!("{}: {}", path, e))))?;
        Self::from_toml_str(&text)
    }
}
