//! Resolved input collections.

use crate::ResolvedArtifact;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One resolved input field value.
///
/// The variant is dictated by the field's declared shape, never by how many
/// IDs the caller happened to send: a singular artifact field is always
/// `Artifact`, a list field is always `Artifacts` (even with one element),
/// and plain fields pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    /// A single resolved artifact
    Artifact(ResolvedArtifact),
    /// A list of resolved artifacts
    Artifacts(Vec<ResolvedArtifact>),
    /// Plain data, passed through verbatim
    Plain(serde_json::Value),
}

impl ResolvedValue {
    /// The artifacts carried by this value, if any.
    pub fn artifacts(&self) -> &[ResolvedArtifact] {
        match self {
            ResolvedValue::Artifact(artifact) => std::slice::from_ref(artifact),
            ResolvedValue::Artifacts(artifacts) => artifacts,
            ResolvedValue::Plain(_) => &[],
        }
    }
}

/// Resolved inputs for one submission, keyed by field name.
///
/// Iteration order follows the generator schema's declaration order.
///
/// # Examples
///
/// ```
/// use atelier_core::{ResolvedInputs, ResolvedValue};
/// use serde_json::json;
///
/// let mut inputs = ResolvedInputs::new();
/// inputs.insert("prompt", ResolvedValue::Plain(json!("a quiet harbor")));
/// assert_eq!(inputs.len(), 1);
/// assert!(inputs.get("prompt").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInputs(IndexMap<String, ResolvedValue>);

impl ResolvedInputs {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert a resolved value for a field.
    pub fn insert(&mut self, field: impl Into<String>, value: ResolvedValue) {
        self.0.insert(field.into(), value);
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&ResolvedValue> {
        self.0.get(field)
    }

    /// Number of resolved fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields were resolved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in schema declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResolvedValue)> {
        self.0.iter()
    }

    /// All artifacts across every field, in declaration order.
    pub fn all_artifacts(&self) -> impl Iterator<Item = &ResolvedArtifact> {
        self.0.values().flat_map(|value| value.artifacts().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GenerationId;
    use serde_json::json;

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut inputs = ResolvedInputs::new();
        inputs.insert("zeta", ResolvedValue::Plain(json!(1)));
        inputs.insert("alpha", ResolvedValue::Plain(json!(2)));
        inputs.insert("mid", ResolvedValue::Plain(json!(3)));

        let fields: Vec<_> = inputs.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(fields, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn all_artifacts_walks_singular_and_list_values() {
        let text = |content: &str| ResolvedArtifact::Text {
            generation_id: GenerationId::new(),
            content: content.into(),
        };

        let mut inputs = ResolvedInputs::new();
        inputs.insert("one", ResolvedValue::Artifact(text("a")));
        inputs.insert("many", ResolvedValue::Artifacts(vec![text("b"), text("c")]));
        inputs.insert("plain", ResolvedValue::Plain(json!("d")));

        assert_eq!(inputs.all_artifacts().count(), 3);
    }
}
