//! PostgreSQL integration for Atelier.
//!
//! This crate provides the Diesel schema, row models, and the
//! [`PostgresGenerationStore`] implementation of
//! [`GenerationStore`](atelier_store::GenerationStore) for persisting
//! generation records.
//!
//! # Features
//!
//! - Diesel-based PostgreSQL integration with r2d2 pooling
//! - Tenant-scoped generation persistence
//! - Reverse reference lookup for descendant traversal
//!
//! # Example
//!
//! ```rust,ignore
//! use atelier_database::PostgresGenerationStore;
//! use atelier_store::GenerationStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PostgresGenerationStore::from_env()?;
//! let recent = store.list_recent(tenant, 20).await?;
//! # Ok(())
//! # }
//! ```

mod connection;
mod models;
mod store;

// Public module for external access
pub mod schema;

// Re-export connection utilities
pub use connection::{build_pool, pool_from_env, PgPool};

// Re-export row types
pub use models::{GenerationRow, NewGenerationRow};

// Re-export the store implementation
pub use store::PostgresGenerationStore;

// Re-export error types for convenience
pub use atelier_error::{DatabaseError, DatabaseErrorKind};
