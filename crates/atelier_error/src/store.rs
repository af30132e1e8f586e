//! Generation store error types.

/// Kinds of generation store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// A record with this ID already exists
    #[display("Generation '{}' already exists", _0)]
    DuplicateId(String),
    /// No record with this ID exists for the tenant
    #[display("Generation '{}' not found", _0)]
    NotFound(String),
    /// Status change not allowed from the record's current status
    #[display("Generation '{}' cannot move from '{}' to '{}'", id, from, to)]
    InvalidTransition {
        /// Record identifier
        id: String,
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },
    /// Storage backend is unavailable or failed
    #[display("Store backend error: {}", _0)]
    Backend(String),
}

/// Generation store error with location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::NotFound(
///     "0e3f9a12-6b5c-4f7d-8e21-aa90cd34be56".to_string(),
/// ));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
