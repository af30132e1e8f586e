//! Reference extraction from stored input parameters.

use crate::GenerationId;
use serde_json::{Map, Value};

/// One reference a generation makes to another generation.
///
/// `role` is the input field under which the reference appears, e.g.
/// `"source"` or `"style_refs"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_new::new)]
pub struct InputRef {
    /// Input field name the reference appears under
    pub role: String,
    /// The referenced generation
    pub id: GenerationId,
}

/// Scan stored input parameters for generation references.
///
/// A reference is a string value (or string element of an array value)
/// that parses as a UUID. Anything else is plain data and is ignored.
/// The returned order follows `input_params` insertion order, then element
/// order within arrays, which is what lineage ancestry ordering is built
/// on.
///
/// UUID-shaped plain strings that never named a generation will match here
/// too; callers tolerate that by skipping references that do not resolve.
///
/// # Examples
///
/// ```
/// use atelier_core::collect_refs;
/// use serde_json::{Map, json};
///
/// let mut params = Map::new();
/// params.insert("source".into(), json!("0e3f9a12-6b5c-4f7d-8e21-aa90cd34be56"));
/// params.insert("prompt".into(), json!("sunset, oil on canvas"));
///
/// let refs = collect_refs(&params);
/// assert_eq!(refs.len(), 1);
/// assert_eq!(refs[0].role, "source");
/// ```
pub fn collect_refs(params: &Map<String, Value>) -> Vec<InputRef> {
    let mut refs = Vec::new();
    for (key, value) in params {
        match value {
            Value::String(text) => {
                if let Ok(id) = text.parse::<GenerationId>() {
                    refs.push(InputRef::new(key.clone(), id));
                }
            }
            Value::Array(items) => {
                for item in items {
                    if let Value::String(text) = item {
                        if let Ok(id) = text.parse::<GenerationId>() {
                            refs.push(InputRef::new(key.clone(), id));
                        }
                    }
                }
            }
            _ => {}
        }
    }
    refs
}
