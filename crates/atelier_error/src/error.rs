//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{ConfigError, LineageError, ResolveError, SchemaError, StoreError};

/// This is the foundation error enum. Each atelier crate contributes a
/// domain-specific variant.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierError, SchemaError, SchemaErrorKind};
///
/// let schema_err = SchemaError::new(SchemaErrorKind::DuplicateGenerator("restyle".into()));
/// let err: AtelierError = schema_err.into();
/// assert!(format!("{}", err).contains("already registered"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AtelierErrorKind {
    /// Schema introspection or registry error
    #[from(SchemaError)]
    Schema(SchemaError),
    /// Artifact resolution error
    #[from(ResolveError)]
    Resolve(ResolveError),
    /// Lineage traversal error
    #[from(LineageError)]
    Lineage(LineageError),
    /// Generation store error
    #[from(StoreError)]
    Store(StoreError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Atelier error with kind discrimination.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierResult, ConfigError};
///
/// fn might_fail() -> AtelierResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Atelier Error: {}", _0)]
pub struct AtelierError(Box<AtelierErrorKind>);

impl AtelierError {
    /// Create a new error from a kind.
    pub fn new(kind: AtelierErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AtelierErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AtelierErrorKind
impl<T> From<T> for AtelierError
where
    T: Into<AtelierErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Atelier operations.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierResult, ResolveError, ResolveErrorKind};
///
/// fn resolve_one() -> AtelierResult<String> {
///     Err(ResolveError::new(ResolveErrorKind::MissingField("prompt".into())))?
/// }
/// ```
pub type AtelierResult<T> = std::result::Result<T, AtelierError>;
