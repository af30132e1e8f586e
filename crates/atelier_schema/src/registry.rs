//! Generator registry.

use crate::{CompiledSchema, GeneratorManifest, compile};
use atelier_error::{AtelierResult, SchemaError, SchemaErrorKind};
use derive_getters::Getters;
use indexmap::IndexMap;
use tracing::{debug, info, instrument};

/// A registered generator: its manifest plus the schema compiled from it.
///
/// Compilation happens exactly once, at registration. Request handling only
/// ever reads the compiled form.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct RegisteredGenerator {
    /// The declarative manifest as registered
    manifest: GeneratorManifest,
    /// Descriptor table compiled from the manifest
    schema: CompiledSchema,
}

impl RegisteredGenerator {
    /// The generator's name.
    pub fn name(&self) -> &str {
        &self.manifest.name
    }
}

/// Registry of generators available to a deployment.
///
/// An explicit object handed to the services that need it; there is no
/// global registry. Registration order is preserved for listing.
///
/// # Example
///
/// ```
/// use atelier_core::ArtifactKind;
/// use atelier_schema::{FieldDecl, GeneratorManifest, GeneratorRegistry};
///
/// let mut registry = GeneratorRegistry::new();
/// registry
///     .register(
///         GeneratorManifest::new("caption", ArtifactKind::Text)
///             .input("source", FieldDecl::singular(ArtifactKind::Image).required()),
///     )
///     .unwrap();
///
/// assert_eq!(registry.len(), 1);
/// assert!(registry.get("caption").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    generators: IndexMap<String, RegisteredGenerator>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            generators: IndexMap::new(),
        }
    }

    /// Compile and register a generator manifest.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the manifest fails to compile or a
    /// generator with the same name is already registered. A failed
    /// registration leaves the registry unchanged.
    #[instrument(skip(self, manifest), fields(generator = %manifest.name))]
    pub fn register(&mut self, manifest: GeneratorManifest) -> AtelierResult<()> {
        if self.generators.contains_key(&manifest.name) {
            return Err(SchemaError::new(SchemaErrorKind::DuplicateGenerator(
                manifest.name.clone(),
            ))
            .into());
        }
        let schema = compile(&manifest)?;
        info!(
            generator = %manifest.name,
            produces = %manifest.produces,
            fields = schema.len(),
            artifact_fields = schema.artifact_fields().count(),
            "Registered generator"
        );
        self.generators
            .insert(manifest.name.clone(), RegisteredGenerator { manifest, schema });
        Ok(())
    }

    /// Look up a generator by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredGenerator> {
        let found = self.generators.get(name);
        debug!(generator = name, found = found.is_some(), "Registry lookup");
        found
    }

    /// Number of registered generators.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Names of all registered generators, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldDecl;
    use atelier_core::ArtifactKind;
    use atelier_error::AtelierErrorKind;

    fn restyle_manifest() -> GeneratorManifest {
        GeneratorManifest::new("portrait_restyle", ArtifactKind::Image)
            .input("source", FieldDecl::singular(ArtifactKind::Image).required())
            .input("prompt", FieldDecl::plain("string").required())
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = GeneratorRegistry::new();
        registry.register(restyle_manifest()).unwrap();

        let registered = registry.get("portrait_restyle").unwrap();
        assert_eq!(registered.name(), "portrait_restyle");
        assert_eq!(registered.schema().len(), 2);
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = GeneratorRegistry::new();
        registry.register(restyle_manifest()).unwrap();

        let err = registry.register(restyle_manifest()).unwrap_err();
        match err.kind() {
            AtelierErrorKind::Schema(e) => {
                assert!(matches!(e.kind, SchemaErrorKind::DuplicateGenerator(_)))
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn failed_compilation_leaves_registry_unchanged() {
        let mut registry = GeneratorRegistry::new();
        let bad = GeneratorManifest::new("bad", ArtifactKind::Image)
            .input("source", FieldDecl::plain("SketchArtifact"));

        assert!(registry.register(bad).is_err());
        assert!(registry.is_empty());
        assert!(registry.get("bad").is_none());
    }

    #[test]
    fn names_follow_registration_order() {
        let mut registry = GeneratorRegistry::new();
        registry
            .register(GeneratorManifest::new("zeta", ArtifactKind::Text))
            .unwrap();
        registry
            .register(GeneratorManifest::new("alpha", ArtifactKind::Text))
            .unwrap();

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }
}
