//! Generation lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a generation record.
///
/// Only `Completed` generations may be referenced as inputs to new
/// generations.
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
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    /// Accepted, waiting for a worker
    #[display("pending")]
    Pending,
    /// A worker is executing the generation
    #[display("processing")]
    Processing,
    /// Finished successfully; output metadata is populated
    #[display("completed")]
    Completed,
    /// Finished unsuccessfully
    #[display("failed")]
    Failed,
    /// Cancelled before completion
    #[display("cancelled")]
    Cancelled,
}

impl GenerationStatus {
    /// Convert to string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Pending => "pending",
            GenerationStatus::Processing => "processing",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Failed => "failed",
            GenerationStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the record can still transition to another status.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            GenerationStatus::Pending | GenerationStatus::Processing
        )
    }
}

impl std::str::FromStr for GenerationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(GenerationStatus::Pending),
            "processing" => Ok(GenerationStatus::Processing),
            "completed" => Ok(GenerationStatus::Completed),
            "failed" => Ok(GenerationStatus::Failed),
            "cancelled" => Ok(GenerationStatus::Cancelled),
            _ => Err(format!("Unknown generation status: {}", s)),
        }
    }
}
