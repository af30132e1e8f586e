//! Identifier newtypes for generations and tenants.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a generation record.
///
/// Wraps a UUID; the display form is the canonical hyphenated string, which
/// is also the shape references take inside `input_params`.
///
/// # Examples
///
/// ```
/// use atelier_core::GenerationId;
///
/// let id = GenerationId::new();
/// let text = id.to_string();
/// let parsed: GenerationId = text.parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct GenerationId(Uuid);

impl GenerationId {
    /// Create a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for GenerationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for GenerationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for GenerationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of the tenant that owns a generation.
///
/// Lookups in the subsystem are always scoped by tenant; a record owned by
/// another tenant is indistinguishable from one that does not exist.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct TenantId(Uuid);

impl TenantId {
    /// Create a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TenantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for TenantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_id_roundtrips_through_display() {
        let id = GenerationId::new();
        let parsed: GenerationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn generation_id_rejects_non_uuid_text() {
        assert!("not-a-uuid".parse::<GenerationId>().is_err());
        assert!("".parse::<GenerationId>().is_err());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = TenantId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
