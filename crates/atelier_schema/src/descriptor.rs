//! Compiled field descriptors.

use atelier_core::ArtifactKind;
use indexmap::IndexMap;

/// Classification of one input field, computed at registration.
///
/// Everything the resolver needs to know about a field is in here; no
/// structural inspection happens at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDescriptor {
    /// Plain data, passed through without artifact resolution
    Plain,
    /// Exactly one artifact reference of the given kind
    Singular(ArtifactKind),
    /// A list of artifact references of the given kind
    List {
        /// Kind every element must resolve to
        kind: ArtifactKind,
        /// Minimum element count
        min_items: u32,
        /// Maximum element count, unbounded when `None`
        max_items: Option<u32>,
    },
}

impl FieldDescriptor {
    /// The artifact kind this field resolves, if it is an artifact field.
    pub fn artifact_kind(&self) -> Option<ArtifactKind> {
        match self {
            FieldDescriptor::Plain => None,
            FieldDescriptor::Singular(kind) => Some(*kind),
            FieldDescriptor::List { kind, .. } => Some(*kind),
        }
    }

    /// Whether this field resolves artifacts.
    pub fn is_artifact(&self) -> bool {
        !matches!(self, FieldDescriptor::Plain)
    }
}

/// One compiled field: its shape classification plus presence requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompiledField {
    /// Shape classification
    pub descriptor: FieldDescriptor,
    /// Whether the field must be present in submitted inputs
    pub required: bool,
}

/// The compiled form of a generator's input schema.
///
/// Field order matches manifest declaration order; the resolver and the
/// ancestry ordering guarantee both lean on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledSchema {
    fields: IndexMap<String, CompiledField>,
}

impl CompiledSchema {
    pub(crate) fn insert(&mut self, field: String, compiled: CompiledField) {
        self.fields.insert(field, compiled);
    }

    /// Look up one field's compiled form.
    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.fields.get(name)
    }

    /// Whether a field with this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterate all fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &CompiledField)> {
        self.fields.iter()
    }

    /// Iterate only artifact fields, in declaration order.
    pub fn artifact_fields(&self) -> impl Iterator<Item = (&String, &CompiledField)> {
        self.fields
            .iter()
            .filter(|(_, compiled)| compiled.descriptor.is_artifact())
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_fields_filters_plain_fields() {
        let mut schema = CompiledSchema::default();
        schema.insert(
            "source".into(),
            CompiledField {
                descriptor: FieldDescriptor::Singular(ArtifactKind::Image),
                required: true,
            },
        );
        schema.insert(
            "prompt".into(),
            CompiledField {
                descriptor: FieldDescriptor::Plain,
                required: true,
            },
        );
        schema.insert(
            "style_refs".into(),
            CompiledField {
                descriptor: FieldDescriptor::List {
                    kind: ArtifactKind::Image,
                    min_items: 0,
                    max_items: None,
                },
                required: false,
            },
        );

        let artifact_names: Vec<_> = schema
            .artifact_fields()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(artifact_names, vec!["source", "style_refs"]);
        assert_eq!(schema.len(), 3);
    }
}
