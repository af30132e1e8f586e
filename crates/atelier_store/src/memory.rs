//! In-memory generation store.

use crate::GenerationStore;
use atelier_core::{Generation, GenerationId, GenerationOutput, GenerationStatus, TenantId};
use atelier_error::{AtelierResult, StoreError, StoreErrorKind};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory generation store backed by a shared map.
///
/// Intended for tests, demos, and embedding without Postgres. Clones share
/// the same underlying records, so a store handed to a service and a handle
/// kept by a test observe the same state.
///
/// # Examples
///
/// ```
/// use atelier_core::{ArtifactKind, GenerationBuilder, TenantId};
/// use atelier_store::{GenerationStore, MemoryGenerationStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> atelier_error::AtelierResult<()> {
/// let store = MemoryGenerationStore::new();
/// let tenant = TenantId::new();
/// let generation = GenerationBuilder::default()
///     .tenant_id(tenant)
///     .generator("sketch")
///     .artifact_kind(ArtifactKind::Image)
///     .build()
///     .unwrap();
/// let id = generation.id;
///
/// store.create(generation).await?;
/// assert!(store.get(tenant, id).await?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryGenerationStore {
    records: Arc<RwLock<HashMap<GenerationId, Generation>>>,
}

impl MemoryGenerationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all tenants.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl GenerationStore for MemoryGenerationStore {
    async fn get(
        &self,
        tenant: TenantId,
        id: GenerationId,
    ) -> AtelierResult<Option<Generation>> {
        let records = self.records.read().await;
        Ok(records
            .get(&id)
            .filter(|record| record.tenant_id == tenant)
            .cloned())
    }

    async fn find_referencing(
        &self,
        tenant: TenantId,
        id: GenerationId,
    ) -> AtelierResult<Vec<Generation>> {
        let records = self.records.read().await;
        let mut matches: Vec<Generation> = records
            .values()
            .filter(|record| record.tenant_id == tenant)
            .filter(|record| record.references().iter().any(|input_ref| input_ref.id == id))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matches)
    }

    async fn create(&self, generation: Generation) -> AtelierResult<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&generation.id) {
            return Err(StoreError::new(StoreErrorKind::DuplicateId(
                generation.id.to_string(),
            ))
            .into());
        }
        tracing::debug!(
            id = %generation.id,
            tenant = %generation.tenant_id,
            generator = %generation.generator,
            "Created generation record"
        );
        records.insert(generation.id, generation);
        Ok(())
    }

    async fn complete(
        &self,
        tenant: TenantId,
        id: GenerationId,
        output: GenerationOutput,
    ) -> AtelierResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .filter(|record| record.tenant_id == tenant)
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(id.to_string())))?;
        if !record.status.is_active() {
            return Err(StoreError::new(StoreErrorKind::InvalidTransition {
                id: id.to_string(),
                from: record.status.as_str().to_string(),
                to: GenerationStatus::Completed.as_str().to_string(),
            })
            .into());
        }
        record.status = GenerationStatus::Completed;
        record.output = output;
        Ok(())
    }

    async fn set_status(
        &self,
        tenant: TenantId,
        id: GenerationId,
        status: GenerationStatus,
    ) -> AtelierResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .filter(|record| record.tenant_id == tenant)
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound(id.to_string())))?;
        if status == GenerationStatus::Completed || !record.status.is_active() {
            return Err(StoreError::new(StoreErrorKind::InvalidTransition {
                id: id.to_string(),
                from: record.status.as_str().to_string(),
                to: status.as_str().to_string(),
            })
            .into());
        }
        record.status = status;
        Ok(())
    }

    async fn list_recent(&self, tenant: TenantId, limit: i64) -> AtelierResult<Vec<Generation>> {
        let records = self.records.read().await;
        let mut matches: Vec<Generation> = records
            .values()
            .filter(|record| record.tenant_id == tenant)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matches.truncate(limit.max(0) as usize);
        Ok(matches)
    }
}
