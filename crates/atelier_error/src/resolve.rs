//! Artifact resolution error types.

/// Specific error conditions for input resolution.
///
/// Every variant that concerns a referenced generation carries the field
/// name and the offending ID so callers can attribute the failure without
/// parsing display strings. Identifiers, kinds, and statuses are carried
/// in their canonical string forms.
///
/// A reference to a generation owned by another tenant is reported as
/// `ReferenceNotFound`, indistinguishable from a genuinely missing ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ResolveErrorKind {
    /// Referenced generation does not exist for this tenant
    #[display("Field '{}' references unknown generation '{}'", field, id)]
    ReferenceNotFound {
        /// Field name
        field: String,
        /// Referenced generation ID
        id: String,
    },
    /// Referenced generation exists but has not completed
    #[display("Field '{}' references generation '{}' with status '{}'", field, id, status)]
    NotCompleted {
        /// Field name
        field: String,
        /// Referenced generation ID
        id: String,
        /// Actual status of the record
        status: String,
    },
    /// Referenced generation produced a different artifact kind
    #[display(
        "Field '{}' expects '{}' but generation '{}' produced '{}'",
        field,
        expected,
        id,
        actual
    )]
    KindMismatch {
        /// Field name
        field: String,
        /// Referenced generation ID
        id: String,
        /// Kind the schema declares
        expected: String,
        /// Kind the record holds
        actual: String,
    },
    /// Input shape does not match the declared cardinality
    #[display("Field '{}' violates declared cardinality: {}", field, detail)]
    CardinalityViolation {
        /// Field name
        field: String,
        /// What shape was provided
        detail: String,
    },
    /// List field holds fewer elements than its declared minimum
    #[display("Field '{}' requires at least {} items, got {}", field, min, actual)]
    TooFewItems {
        /// Field name
        field: String,
        /// Declared minimum
        min: u32,
        /// Provided count
        actual: u32,
    },
    /// List field holds more elements than its declared maximum
    #[display("Field '{}' allows at most {} items, got {}", field, max, actual)]
    TooManyItems {
        /// Field name
        field: String,
        /// Declared maximum
        max: u32,
        /// Provided count
        actual: u32,
    },
    /// Value in an artifact position is not a generation ID
    #[display("Field '{}' holds '{}' which is not a generation ID", field, value)]
    InvalidReference {
        /// Field name
        field: String,
        /// The offending value
        value: String,
    },
    /// Required field absent from the inputs
    #[display("Required field '{}' is missing", _0)]
    MissingField(String),
    /// Input field not declared by the generator schema
    #[display("Field '{}' is not declared by the generator schema", _0)]
    UnknownField(String),
    /// Completed record lacks the output its kind requires
    #[display("Field '{}': generation '{}' is incomplete: {}", field, id, detail)]
    IncompleteRecord {
        /// Field name
        field: String,
        /// Referenced generation ID
        id: String,
        /// What the record is missing
        detail: String,
    },
}

/// Error type for artifact resolution.
///
/// # Examples
///
/// ```
/// use atelier_error::{ResolveError, ResolveErrorKind};
///
/// let err = ResolveError::new(ResolveErrorKind::MissingField("prompt".into()));
/// assert!(format!("{}", err).contains("prompt"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Resolve Error: {} at line {} in {}", kind, line, file)]
pub struct ResolveError {
    /// The specific error condition
    pub kind: ResolveErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ResolveError {
    /// Create a new ResolveError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ResolveErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
