//! Diesel models for generation records.

use atelier_core::{ArtifactKind, Generation, GenerationOutput, GenerationStatus};
use atelier_error::{AtelierError, DatabaseError, DatabaseErrorKind};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// Database row for the `generations` table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::generations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GenerationRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub generator: String,
    pub status: String,
    pub artifact_kind: String,
    pub input_params: serde_json::Value,
    pub storage_url: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration_secs: Option<f64>,
    pub format: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable row for new generation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::generations)]
pub struct NewGenerationRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub generator: String,
    pub status: String,
    pub artifact_kind: String,
    pub input_params: serde_json::Value,
    pub storage_url: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration_secs: Option<f64>,
    pub format: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Generation> for NewGenerationRow {
    fn from(generation: &Generation) -> Self {
        Self {
            id: generation.id.as_uuid(),
            tenant_id: generation.tenant_id.as_uuid(),
            generator: generation.generator.clone(),
            status: generation.status.as_str().to_string(),
            artifact_kind: generation.artifact_kind.as_str().to_string(),
            input_params: serde_json::Value::Object(generation.input_params.clone()),
            storage_url: generation.output.storage_url.clone(),
            width: generation.output.width.map(|w| w as i32),
            height: generation.output.height.map(|h| h as i32),
            duration_secs: generation.output.duration_secs,
            format: generation.output.format.clone(),
            content: generation.output.content.clone(),
            created_at: generation.created_at,
        }
    }
}

impl TryFrom<GenerationRow> for Generation {
    type Error = AtelierError;

    fn try_from(row: GenerationRow) -> Result<Self, Self::Error> {
        let status: GenerationStatus = row.status.parse().map_err(|e: String| {
            AtelierError::from(DatabaseError::new(DatabaseErrorKind::Serialization(e)))
        })?;
        let artifact_kind: ArtifactKind = row.artifact_kind.parse().map_err(|e: String| {
            AtelierError::from(DatabaseError::new(DatabaseErrorKind::Serialization(e)))
        })?;
        let input_params = match row.input_params {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(DatabaseError::new(DatabaseErrorKind::Serialization(format!(
                    "input_params is not a JSON object: {other}"
                )))
                .into());
            }
        };

        Ok(Generation {
            id: row.id.into(),
            tenant_id: row.tenant_id.into(),
            generator: row.generator,
            status,
            artifact_kind,
            input_params,
            output: GenerationOutput {
                storage_url: row.storage_url,
                width: row.width.map(|w| w as u32),
                height: row.height.map(|h| h as u32),
                duration_secs: row.duration_secs,
                format: row.format,
                content: row.content,
            },
            created_at: row.created_at,
        })
    }
}
