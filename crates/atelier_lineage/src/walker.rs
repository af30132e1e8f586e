//! Bounded traversal over the generation reference graph.

use crate::{LineageDirection, LineageNode, LineageTree};
use atelier_core::{Generation, GenerationId, TenantId};
use atelier_error::{AtelierResult, LineageError, LineageErrorKind};
use atelier_store::GenerationStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Depth bounds applied to every traversal.
///
/// Requested depths are never rejected: a query asking for more than
/// `hard_max_depth` is clamped down to it, and a query asking for nothing
/// gets `default_max_depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageLimits {
    /// Depth used when the caller does not ask for one
    pub default_max_depth: u32,
    /// Ceiling no request can exceed
    pub hard_max_depth: u32,
}

impl Default for LineageLimits {
    fn default() -> Self {
        Self {
            default_max_depth: 25,
            hard_max_depth: 50,
        }
    }
}

impl LineageLimits {
    /// The depth a traversal actually runs with.
    pub fn effective_depth(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_max_depth)
            .min(self.hard_max_depth)
    }
}

/// Walks ancestry and descendant trees over a generation store.
///
/// Traversal is read-only and tenant-scoped throughout: an edge leading to
/// another tenant's generation looks exactly like an edge leading nowhere
/// and is skipped. Only the query root must exist; every interior dangling
/// reference is tolerated, since `input_params` may carry UUID-shaped
/// plain strings that never named a record.
///
/// Cycles cannot recurse: a visited set tracks the generations on the
/// current path, and an edge closing back into that path is dropped with
/// a warning instead of being expanded. The same generation reached along
/// different paths (a diamond) still appears once per path.
#[derive(Debug, Clone)]
pub struct LineageWalker<S> {
    store: S,
    limits: LineageLimits,
}

impl<S: GenerationStore> LineageWalker<S> {
    /// Create a walker over the given store with default depth limits.
    pub fn new(store: S) -> Self {
        Self {
            store,
            limits: LineageLimits::default(),
        }
    }

    /// Replace the depth limits.
    pub fn with_limits(mut self, limits: LineageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The depth limits this walker applies.
    pub fn limits(&self) -> LineageLimits {
        self.limits
    }

    /// Walk toward the generations the root was built from.
    ///
    /// A node's links are the generations its `input_params` reference,
    /// in `input_params` order, each labeled with the referencing field.
    ///
    /// # Errors
    ///
    /// Returns a lineage error when the root does not exist for the
    /// tenant. Interior references that do not resolve are skipped.
    pub async fn ancestry(
        &self,
        tenant: TenantId,
        id: GenerationId,
        max_depth: Option<u32>,
    ) -> AtelierResult<LineageTree> {
        self.walk(tenant, id, max_depth, LineageDirection::Ancestry)
            .await
    }

    /// Walk toward the generations built from the root.
    ///
    /// A node's links are the generations whose `input_params` reference
    /// it, ordered by `(created_at, id)` ascending, each labeled with the
    /// field under which the child makes the reference.
    ///
    /// # Errors
    ///
    /// Returns a lineage error when the root does not exist for the
    /// tenant.
    pub async fn descendants(
        &self,
        tenant: TenantId,
        id: GenerationId,
        max_depth: Option<u32>,
    ) -> AtelierResult<LineageTree> {
        self.walk(tenant, id, max_depth, LineageDirection::Descendants)
            .await
    }

    async fn walk(
        &self,
        tenant: TenantId,
        id: GenerationId,
        max_depth: Option<u32>,
        direction: LineageDirection,
    ) -> AtelierResult<LineageTree> {
        let effective = self.limits.effective_depth(max_depth);
        debug!(
            %tenant,
            root = %id,
            direction = direction.as_str(),
            requested = max_depth,
            effective_depth = effective,
            "Starting lineage traversal"
        );

        let root_record = self.store.get(tenant, id).await?.ok_or_else(|| {
            LineageError::new(LineageErrorKind::RootNotFound {
                tenant: tenant.to_string(),
                id: id.to_string(),
            })
        })?;

        let mut visited = HashSet::new();
        visited.insert(id);
        let links = self
            .expand(tenant, &root_record, 1, effective, direction, &mut visited)
            .await?;

        Ok(LineageTree {
            direction,
            root: LineageNode {
                generation: root_record,
                depth: 0,
                role: None,
                links,
            },
        })
    }

    /// Produce the links of a node, recursing one level further out.
    ///
    /// `depth` is the depth the produced links sit at; past the limit the
    /// node simply gets no links.
    async fn expand(
        &self,
        tenant: TenantId,
        node: &Generation,
        depth: u32,
        max_depth: u32,
        direction: LineageDirection,
        visited: &mut HashSet<GenerationId>,
    ) -> AtelierResult<Vec<LineageNode>> {
        if depth > max_depth {
            return Ok(Vec::new());
        }

        let adjacent = match direction {
            LineageDirection::Ancestry => self.referenced_by(tenant, node, visited).await?,
            LineageDirection::Descendants => self.referencing(tenant, node, visited).await?,
        };

        let mut links = Vec::with_capacity(adjacent.len());
        for (role, generation) in adjacent {
            visited.insert(generation.id);
            // Box::pin keeps the recursive future sized
            let child_links = Box::pin(self.expand(
                tenant,
                &generation,
                depth + 1,
                max_depth,
                direction,
                visited,
            ))
            .await?;
            visited.remove(&generation.id);
            links.push(LineageNode {
                generation,
                depth,
                role,
                links: child_links,
            });
        }
        Ok(links)
    }

    /// The generations `node` references, in `input_params` order.
    async fn referenced_by(
        &self,
        tenant: TenantId,
        node: &Generation,
        visited: &HashSet<GenerationId>,
    ) -> AtelierResult<Vec<(Option<String>, Generation)>> {
        let mut found = Vec::new();
        for input_ref in node.references() {
            if visited.contains(&input_ref.id) {
                warn!(
                    node = %node.id,
                    target = %input_ref.id,
                    role = input_ref.role,
                    "Reference closes a cycle, truncating here"
                );
                continue;
            }
            match self.store.get(tenant, input_ref.id).await? {
                Some(parent) => found.push((Some(input_ref.role), parent)),
                None => {
                    debug!(
                        node = %node.id,
                        target = %input_ref.id,
                        role = input_ref.role,
                        "Skipping reference that does not resolve"
                    );
                }
            }
        }
        Ok(found)
    }

    /// The generations referencing `node`, in `(created_at, id)` order.
    ///
    /// The role is the first field of the child's `input_params` carrying
    /// the reference; a child referencing the node under several fields
    /// still appears once.
    async fn referencing(
        &self,
        tenant: TenantId,
        node: &Generation,
        visited: &HashSet<GenerationId>,
    ) -> AtelierResult<Vec<(Option<String>, Generation)>> {
        let children = self.store.find_referencing(tenant, node.id).await?;
        let mut found = Vec::with_capacity(children.len());
        for child in children {
            if visited.contains(&child.id) {
                warn!(
                    node = %node.id,
                    target = %child.id,
                    "Referencing generation closes a cycle, truncating here"
                );
                continue;
            }
            let role = child
                .references()
                .into_iter()
                .find(|r| r.id == node.id)
                .map(|r| r.role);
            found.push((role, child));
        }
        Ok(found)
    }
}
