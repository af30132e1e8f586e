//! Lineage traversal for Atelier.
//!
//! Generations reference the generations they were built from through the
//! ID strings in their stored `input_params`. This crate walks that graph
//! in either direction and returns bounded trees: [`LineageWalker`] does
//! the traversal (depth clamping, cycle truncation, tenant scoping) and
//! [`LineageService`] wraps it with per-query tracing.
//!
//! # Example
//!
//! ```rust
//! use atelier_core::{ArtifactKind, GenerationBuilder, TenantId};
//! use atelier_lineage::LineageService;
//! use atelier_store::{GenerationStore, MemoryGenerationStore};
//! use serde_json::json;
//!
//! # async fn example() -> atelier_error::AtelierResult<()> {
//! let store = MemoryGenerationStore::new();
//! let tenant = TenantId::new();
//!
//! let source = GenerationBuilder::default()
//!     .tenant_id(tenant)
//!     .generator("sketch")
//!     .artifact_kind(ArtifactKind::Image)
//!     .build()
//!     .unwrap();
//! let remix = GenerationBuilder::default()
//!     .tenant_id(tenant)
//!     .generator("restyle")
//!     .artifact_kind(ArtifactKind::Image)
//!     .input_params(
//!         json!({ "source": source.id.to_string() })
//!             .as_object()
//!             .unwrap()
//!             .clone(),
//!     )
//!     .build()
//!     .unwrap();
//! store.create(source.clone()).await?;
//! store.create(remix.clone()).await?;
//!
//! let service = LineageService::new(store);
//! let tree = service.ancestry(tenant, remix.id, None).await?;
//! assert_eq!(tree.root.links[0].generation.id, source.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod node;
mod service;
mod walker;

pub use atelier_error::{LineageError, LineageErrorKind};
pub use node::{LineageDirection, LineageNode, LineageTree};
pub use service::LineageService;
pub use walker::{LineageLimits, LineageWalker};
