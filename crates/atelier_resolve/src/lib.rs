//! Artifact resolution and submission intake for Atelier.
//!
//! This crate turns the generation-ID strings in submitted inputs into
//! fully resolved, typed artifacts. [`ArtifactResolver`] validates every
//! reference against a generator's compiled schema (existence, ownership,
//! completion, kind, cardinality) and [`SubmissionService`] wraps it into
//! the write path: resolve first, persist a pending record only on
//! success.
//!
//! # Example
//!
//! ```rust
//! use atelier_core::{ArtifactKind, TenantId};
//! use atelier_resolve::SubmissionService;
//! use atelier_schema::{FieldDecl, GeneratorManifest, GeneratorRegistry};
//! use atelier_store::MemoryGenerationStore;
//! use serde_json::json;
//!
//! # async fn example() -> atelier_error::AtelierResult<()> {
//! let mut registry = GeneratorRegistry::new();
//! registry.register(
//!     GeneratorManifest::new("storyboard", ArtifactKind::Text)
//!         .input("prompt", FieldDecl::plain("string").required()),
//! )?;
//!
//! let service = SubmissionService::new(registry, MemoryGenerationStore::new());
//! let raw = json!({ "prompt": "a heist, but polite" });
//! let outcome = service
//!     .submit(TenantId::new(), "storyboard", raw.as_object().unwrap().clone())
//!     .await?;
//! assert_eq!(outcome.inputs().len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod resolver;
mod submission;

pub use atelier_error::{ResolveError, ResolveErrorKind};
pub use resolver::ArtifactResolver;
pub use submission::{SubmissionOutcome, SubmissionService};
