//! Lineage tree shapes.

use atelier_core::Generation;
use serde::{Deserialize, Serialize};

/// Which way a lineage query walks the reference graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum LineageDirection {
    /// Toward the generations this one was built from
    #[display("ancestry")]
    Ancestry,
    /// Toward the generations built from this one
    #[display("descendants")]
    Descendants,
}

impl LineageDirection {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineageDirection::Ancestry => "ancestry",
            LineageDirection::Descendants => "descendants",
        }
    }
}

/// One node in a lineage tree.
///
/// `links` point away from the query root: parents for an ancestry tree,
/// children for a descendants tree. A node at the traversal depth limit
/// has empty links whether or not the graph continues past it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageNode {
    /// The generation record at this node
    pub generation: Generation,
    /// Distance from the query root (the root itself is 0)
    pub depth: u32,
    /// Input field under which the edge to this node appears: the root
    /// node's own field for ancestry, the child's field for descendants.
    /// Always `None` at the root.
    pub role: Option<String>,
    /// Adjacent nodes one level further from the root
    pub links: Vec<LineageNode>,
}

impl LineageNode {
    /// Total number of nodes in this subtree, the root included.
    pub fn node_count(&self) -> usize {
        1 + self.links.iter().map(LineageNode::node_count).sum::<usize>()
    }

    /// Depth of the deepest node in this subtree.
    pub fn max_depth(&self) -> u32 {
        self.links
            .iter()
            .map(LineageNode::max_depth)
            .max()
            .unwrap_or(self.depth)
    }
}

/// A complete lineage query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageTree {
    /// Which way the tree was walked
    pub direction: LineageDirection,
    /// The queried generation with its lineage attached
    pub root: LineageNode,
}

impl LineageTree {
    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{ArtifactKind, GenerationBuilder, TenantId};

    fn leaf(depth: u32, role: &str) -> LineageNode {
        LineageNode {
            generation: GenerationBuilder::default()
                .tenant_id(TenantId::new())
                .generator("g")
                .artifact_kind(ArtifactKind::Image)
                .build()
                .unwrap(),
            depth,
            role: Some(role.to_string()),
            links: Vec::new(),
        }
    }

    #[test]
    fn node_count_and_max_depth_walk_the_whole_subtree() {
        let mut mid = leaf(1, "source");
        mid.links.push(leaf(2, "source"));
        let mut root = leaf(0, "ignored");
        root.role = None;
        root.links.push(mid);
        root.links.push(leaf(1, "style_refs"));

        assert_eq!(root.node_count(), 4);
        assert_eq!(root.max_depth(), 2);
    }

    #[test]
    fn direction_serializes_lowercase() {
        let json = serde_json::to_value(LineageDirection::Ancestry).unwrap();
        assert_eq!(json, "ancestry");
        assert_eq!(LineageDirection::Descendants.as_str(), "descendants");
    }
}
