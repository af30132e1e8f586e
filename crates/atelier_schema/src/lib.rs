//! Generator schemas for the Atelier artifact generation library.
//!
//! Generators declare their input surface in a [`GeneratorManifest`]; at
//! registration the introspector compiles each declaration into a
//! [`FieldDescriptor`] (plain, artifact-singular, or artifact-list with
//! occupancy bounds). Anything unclassifiable is a registration-time error,
//! so the resolver works from a closed, pre-validated descriptor table.
//!
//! # Example
//!
//! ```
//! use atelier_core::ArtifactKind;
//! use atelier_schema::{FieldDecl, FieldDescriptor, GeneratorManifest, compile};
//!
//! let manifest = GeneratorManifest::new("portrait_restyle", ArtifactKind::Image)
//!     .input("source", FieldDecl::singular(ArtifactKind::Image).required())
//!     .input("prompt", FieldDecl::plain("string").required());
//!
//! let schema = compile(&manifest).unwrap();
//! assert_eq!(
//!     schema.field("source").unwrap().descriptor,
//!     FieldDescriptor::Singular(ArtifactKind::Image)
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod decl;
mod descriptor;
mod introspect;
mod registry;

pub use atelier_error::{SchemaError, SchemaErrorKind};
pub use decl::{FieldDecl, GeneratorManifest};
pub use descriptor::{CompiledField, CompiledSchema, FieldDescriptor};
pub use introspect::compile;
pub use registry::{GeneratorRegistry, RegisteredGenerator};
