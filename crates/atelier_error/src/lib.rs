//! Error types for the Atelier library.
//!
//! This crate provides the foundation error types used throughout the Atelier
//! ecosystem.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use atelier_error::{AtelierResult, ResolveError, ResolveErrorKind};
//!
//! fn resolve_reference() -> AtelierResult<String> {
//!     Err(ResolveError::new(ResolveErrorKind::MissingField("source".into())))?
//! }
//!
//! match resolve_reference() {
//!     Ok(url) => println!("Got: {}", url),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod lineage;
mod resolve;
mod schema;
mod store;

pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{AtelierError, AtelierErrorKind, AtelierResult};
pub use lineage::{LineageError, LineageErrorKind};
pub use resolve::{ResolveError, ResolveErrorKind};
pub use schema::{SchemaError, SchemaErrorKind};
pub use store::{StoreError, StoreErrorKind};
