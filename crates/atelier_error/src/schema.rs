//! Schema introspection error types.

/// Specific error conditions for generator schema handling.
///
/// All of these surface at registration time; a manifest that compiles
/// cleanly cannot produce schema errors during request handling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SchemaErrorKind {
    /// Field declares an artifact-suffixed type that maps to no known kind
    #[display("Field '{}' declares ambiguous artifact type '{}'", field, type_name)]
    AmbiguousSchema {
        /// Field name
        field: String,
        /// Declared type name
        type_name: String,
    },
    /// Field declares a type name that is neither an artifact marker nor a plain type
    #[display("Field '{}' declares unknown type '{}'", field, type_name)]
    UnknownType {
        /// Field name
        field: String,
        /// Declared type name
        type_name: String,
    },
    /// Occupancy bounds are malformed or applied to a non-list field
    #[display("Field '{}' has invalid bounds: {}", field, detail)]
    InvalidBounds {
        /// Field name
        field: String,
        /// What is wrong with the bounds
        detail: String,
    },
    /// A generator with this name is already registered
    #[display("Generator '{}' is already registered", _0)]
    DuplicateGenerator(String),
    /// No generator with this name is registered
    #[display("Generator '{}' is not registered", _0)]
    UnknownGenerator(String),
    /// Failed to read a manifest file
    #[display("Failed to read manifest file: {}", _0)]
    FileRead(String),
    /// Failed to parse TOML manifest content
    #[display("Failed to parse manifest TOML: {}", _0)]
    TomlParse(String),
}

/// Error type for schema introspection and registry operations.
///
/// # Examples
///
/// ```
/// use atelier_error::{SchemaError, SchemaErrorKind};
///
/// let err = SchemaError::new(SchemaErrorKind::AmbiguousSchema {
///     field: "source".into(),
///     type_name: "PaintingArtifact".into(),
/// });
/// assert!(format!("{}", err).contains("ambiguous"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Schema Error: {} at line {} in {}", kind, line, file)]
pub struct SchemaError {
    /// The specific error condition
    pub kind: SchemaErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SchemaError {
    /// Create a new SchemaError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SchemaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
