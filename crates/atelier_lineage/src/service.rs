//! Lineage query orchestration.

use crate::{LineageLimits, LineageTree, LineageWalker};
use atelier_core::{GenerationId, TenantId};
use atelier_error::AtelierResult;
use atelier_store::GenerationStore;
use tracing::{info, instrument};

/// Read-side service for the two lineage queries.
///
/// Thin by design: depth defaulting, clamping, cycle handling, and
/// ordering all live in the walker. The service adds per-query tracing
/// and is the layer callers hold. Callers arrive with an already
/// authenticated tenant; the service takes the `TenantId` on trust.
#[derive(Debug, Clone)]
pub struct LineageService<S> {
    walker: LineageWalker<S>,
}

impl<S: GenerationStore> LineageService<S> {
    /// Create a service over the given store with default depth limits.
    pub fn new(store: S) -> Self {
        Self {
            walker: LineageWalker::new(store),
        }
    }

    /// Replace the walker's depth limits.
    pub fn with_limits(mut self, limits: LineageLimits) -> Self {
        self.walker = self.walker.with_limits(limits);
        self
    }

    /// Ancestry of a generation: what it was built from.
    ///
    /// # Arguments
    ///
    /// * `tenant` - Tenant scoping the query
    /// * `id` - Root generation
    /// * `max_depth` - Requested depth; defaulted and clamped by the
    ///   walker's limits
    ///
    /// # Errors
    ///
    /// Returns a lineage error when the root does not exist for the
    /// tenant.
    #[instrument(
        skip(self),
        fields(
            tenant = %tenant,
            root = %id,
            direction = "ancestry",
            effective_depth = self.walker.limits().effective_depth(max_depth),
            node_count,
        )
    )]
    pub async fn ancestry(
        &self,
        tenant: TenantId,
        id: GenerationId,
        max_depth: Option<u32>,
    ) -> AtelierResult<LineageTree> {
        let tree = self.walker.ancestry(tenant, id, max_depth).await?;
        tracing::Span::current().record("node_count", tree.node_count());
        info!(nodes = tree.node_count(), "Ancestry query completed");
        Ok(tree)
    }

    /// Descendants of a generation: what was built from it.
    ///
    /// # Arguments
    ///
    /// * `tenant` - Tenant scoping the query
    /// * `id` - Root generation
    /// * `max_depth` - Requested depth; defaulted and clamped by the
    ///   walker's limits
    ///
    /// # Errors
    ///
    /// Returns a lineage error when the root does not exist for the
    /// tenant.
    #[instrument(
        skip(self),
        fields(
            tenant = %tenant,
            root = %id,
            direction = "descendants",
            effective_depth = self.walker.limits().effective_depth(max_depth),
            node_count,
        )
    )]
    pub async fn descendants(
        &self,
        tenant: TenantId,
        id: GenerationId,
        max_depth: Option<u32>,
    ) -> AtelierResult<LineageTree> {
        let tree = self.walker.descendants(tenant, id, max_depth).await?;
        tracing::Span::current().record("node_count", tree.node_count());
        info!(nodes = tree.node_count(), "Descendants query completed");
        Ok(tree)
    }
}
