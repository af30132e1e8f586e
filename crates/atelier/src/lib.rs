//! Atelier - Tenant-Scoped Artifact Generation
//!
//! Atelier tracks AI-generated artifacts (images, video, audio, text, LoRA
//! weights, models) whose inputs may reference earlier artifacts. Generators
//! declare their input schemas in TOML manifests; submissions are resolved
//! against those schemas before anything runs, with every cross-artifact
//! reference checked for existence, tenancy, status, and kind; and the
//! stored reference graph answers ancestry and descendant queries as
//! bounded trees.
//!
//! # Features
//!
//! - **Schema Introspection**: Declarative generator manifests compiled
//!   into field descriptors at registration time
//! - **Artifact Resolution**: All-or-nothing input validation with
//!   field- and ID-attributable errors
//! - **Lineage Traversal**: Depth-bounded, cycle-safe ancestry and
//!   descendant trees with deterministic ordering
//! - **Submission Intake**: Resolve-then-persist hand-off producing
//!   pending generation records
//! - **Database Integration**: PostgreSQL persistence for generation
//!   records (behind the `database` feature)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use atelier::{
//!     GeneratorManifest, GeneratorRegistry, MemoryGenerationStore,
//!     SubmissionService, TenantId,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut registry = GeneratorRegistry::new();
//!     registry.register(GeneratorManifest::from_toml_str(MANIFEST)?)?;
//!
//!     let service = SubmissionService::new(registry, MemoryGenerationStore::new());
//!     let outcome = service
//!         .submit(TenantId::new(), "portrait_restyle", inputs)
//!         .await?;
//!     println!("queued {}", outcome.generation().id);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `database` - PostgreSQL-backed generation store
//!
//! # Architecture
//!
//! Atelier is organized as a workspace with focused crates:
//!
//! - `atelier_core` - Core data types (identifiers, kinds, records)
//! - `atelier_error` - Error types
//! - `atelier_schema` - Manifest parsing, introspection, and the registry
//! - `atelier_store` - Store trait and in-memory implementation
//! - `atelier_resolve` - Reference resolution and submission intake
//! - `atelier_lineage` - Lineage walker and query service
//! - `atelier_database` - PostgreSQL integration
//!
//! This crate (`atelier`) re-exports everything for convenience.

// Re-export core crates (always available)
pub use atelier_core::*;
pub use atelier_error::*;
pub use atelier_lineage::*;
pub use atelier_resolve::*;
pub use atelier_schema::*;
pub use atelier_store::*;

// Re-export optional crates based on features
#[cfg(feature = "database")]
pub use atelier_database::*;

// Runtime configuration
mod config;

pub use config::{AtelierConfig, DatabaseConfig};
