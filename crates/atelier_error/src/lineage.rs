//! Lineage traversal error types.

/// Specific error conditions for lineage queries.
///
/// Deliberately small: depth overruns are clamped rather than rejected,
/// cycles are resolved by truncating the tree, and dangling interior
/// references are skipped. Only a missing root is an error to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum LineageErrorKind {
    /// The generation at the root of the query does not exist for this tenant
    #[display("Root generation '{}' not found for tenant '{}'", id, tenant)]
    RootNotFound {
        /// Tenant scoping the query
        tenant: String,
        /// Requested root generation ID
        id: String,
    },
    /// The backing store failed during traversal
    #[display("Lineage storage failure: {}", _0)]
    Storage(String),
}

/// Error type for lineage queries.
///
/// # Examples
///
/// ```
/// use atelier_error::{LineageError, LineageErrorKind};
///
/// let err = LineageError::new(LineageErrorKind::RootNotFound {
///     tenant: "2b7e1f0a-4c9d-4d2e-9f23-8a0c6d1b5e44".into(),
///     id: "0e3f9a12-6b5c-4f7d-8e21-aa90cd34be56".into(),
/// });
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Lineage Error: {} at line {} in {}", kind, line, file)]
pub struct LineageError {
    /// The specific error condition
    pub kind: LineageErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl LineageError {
    /// Create a new LineageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LineageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
