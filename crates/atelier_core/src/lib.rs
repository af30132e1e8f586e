//! Core data types for the Atelier artifact generation library.
//!
//! This crate provides the foundation data types used across all Atelier
//! crates: identifiers, artifact kinds, generation records, resolved
//! artifact values, and reference extraction from stored inputs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod generation;
mod id;
mod inputs;
mod kind;
mod reference;
mod status;
mod telemetry;

pub use artifact::ResolvedArtifact;
pub use generation::{Generation, GenerationBuilder, GenerationOutput};
pub use id::{GenerationId, TenantId};
pub use inputs::{ResolvedInputs, ResolvedValue};
pub use kind::ArtifactKind;
pub use reference::{InputRef, collect_refs};
pub use status::GenerationStatus;
pub use telemetry::{init_telemetry, shutdown_telemetry};
