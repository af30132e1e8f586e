//! Generation record storage for Atelier.
//!
//! This crate defines the tenant-scoped [`GenerationStore`] trait that the
//! resolver and lineage engine read through, plus an in-memory backend for
//! tests and embedding. The PostgreSQL backend lives in `atelier_database`.
//!
//! # Example
//!
//! ```rust
//! use atelier_core::{ArtifactKind, GenerationBuilder, GenerationOutput, TenantId};
//! use atelier_store::{GenerationStore, MemoryGenerationStore};
//!
//! # async fn example() -> atelier_error::AtelierResult<()> {
//! let store = MemoryGenerationStore::new();
//! let tenant = TenantId::new();
//!
//! let generation = GenerationBuilder::default()
//!     .tenant_id(tenant)
//!     .generator("sketch")
//!     .artifact_kind(ArtifactKind::Image)
//!     .build()
//!     .unwrap();
//! let id = generation.id;
//! store.create(generation).await?;
//!
//! let output = GenerationOutput::default().with_storage_url("https://cdn.example.com/a.png");
//! store.complete(tenant, id, output).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;
mod store;

pub use atelier_error::{StoreError, StoreErrorKind};
pub use memory::MemoryGenerationStore;
pub use store::GenerationStore;
