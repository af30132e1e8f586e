//! Generation store trait definition.

use atelier_core::{Generation, GenerationId, GenerationOutput, GenerationStatus, TenantId};
use atelier_error::AtelierResult;

/// Trait for pluggable generation record storage backends.
///
/// All read methods are tenant-scoped: a record owned by a different tenant
/// behaves exactly like a record that does not exist. Callers never receive
/// a foreign tenant's record, which is what keeps cross-tenant probing
/// impossible at the API level rather than by convention.
#[async_trait::async_trait]
pub trait GenerationStore: Send + Sync {
    /// Fetch one generation by ID within a tenant.
    ///
    /// # Arguments
    ///
    /// * `tenant` - Tenant scoping the lookup
    /// * `id` - The generation to fetch
    ///
    /// # Returns
    ///
    /// `Some(generation)` if the record exists and belongs to the tenant,
    /// `None` otherwise
    async fn get(
        &self,
        tenant: TenantId,
        id: GenerationId,
    ) -> AtelierResult<Option<Generation>>;

    /// Find generations whose `input_params` reference the given ID.
    ///
    /// Only string values (or string array elements) that are exactly the
    /// referenced ID count; substring matches do not.
    ///
    /// # Arguments
    ///
    /// * `tenant` - Tenant scoping the lookup
    /// * `id` - The referenced generation
    ///
    /// # Returns
    ///
    /// Matching generations ordered by `(created_at, id)` ascending, which
    /// is the ordering contract descendant traversal relies on
    async fn find_referencing(
        &self,
        tenant: TenantId,
        id: GenerationId,
    ) -> AtelierResult<Vec<Generation>>;

    /// Insert a new generation record.
    ///
    /// # Errors
    ///
    /// Returns a store error if a record with the same ID already exists.
    async fn create(&self, generation: Generation) -> AtelierResult<()>;

    /// Mark a generation completed and record its output metadata.
    ///
    /// # Arguments
    ///
    /// * `tenant` - Tenant scoping the record
    /// * `id` - The generation to complete
    /// * `output` - Output metadata produced by the worker
    ///
    /// # Errors
    ///
    /// Returns a store error if the record does not exist for the tenant or
    /// is not in an active status (`pending` or `processing`).
    async fn complete(
        &self,
        tenant: TenantId,
        id: GenerationId,
        output: GenerationOutput,
    ) -> AtelierResult<()>;

    /// Change a generation's lifecycle status.
    ///
    /// Used by workers to move records between `pending`, `processing`,
    /// `failed`, and `cancelled`. Completion goes through [`complete`]
    /// so output metadata lands atomically with the status change.
    ///
    /// # Errors
    ///
    /// Returns a store error if the record does not exist for the tenant,
    /// if its current status is not active, or if the requested status is
    /// `completed`.
    ///
    /// [`complete`]: GenerationStore::complete
    async fn set_status(
        &self,
        tenant: TenantId,
        id: GenerationId,
        status: GenerationStatus,
    ) -> AtelierResult<()>;

    /// List a tenant's most recent generations.
    ///
    /// # Arguments
    ///
    /// * `tenant` - Tenant scoping the lookup
    /// * `limit` - Maximum number of results
    ///
    /// # Returns
    ///
    /// Generations ordered by `created_at` descending
    async fn list_recent(&self, tenant: TenantId, limit: i64) -> AtelierResult<Vec<Generation>>;
}
