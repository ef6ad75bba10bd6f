//! Region-tree capability and an in-memory map tree.
//!
//! The game never looks at how a map is drawn. It only needs to know which
//! nodes are selectable regions, how to climb from a clicked node to its
//! enclosing region, and how to read and write the status markers that
//! double as display styling.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Markers a region can carry. Hosts render them as styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMarker {
    Focused,
    Solved,
}

/// Status of a region as derived from its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionStatus {
    Unsolved,
    Focused,
    Solved,
}

/// Capabilities the game needs from a rendered map.
pub trait RegionTree {
    /// Cheap handle to a node of the map.
    type Node: Copy + Eq + fmt::Debug;

    /// Whether the node carries the structural role "region".
    fn is_region(&self, node: Self::Node) -> bool;

    /// Stable identifier of the node.
    fn region_id(&self, node: Self::Node) -> &str;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn has_marker(&self, node: Self::Node, marker: StatusMarker) -> bool;

    fn add_marker(&mut self, node: Self::Node, marker: StatusMarker);

    fn remove_marker(&mut self, node: Self::Node, marker: StatusMarker);

    fn status(&self, node: Self::Node) -> RegionStatus {
        if self.has_marker(node, StatusMarker::Solved) {
            RegionStatus::Solved
        } else if self.has_marker(node, StatusMarker::Focused) {
            RegionStatus::Focused
        } else {
            RegionStatus::Unsolved
        }
    }

    /// Nearest node at or above `node` that is a region.
    fn enclosing_region(&self, node: Self::Node) -> Option<Self::Node> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.is_region(candidate) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }
}

/// Handle into a [`MapTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The map container itself.
    Root,
    /// A selectable region (a group of shapes).
    Region,
    /// A drawing primitive; never selectable on its own.
    Shape,
}

#[derive(Debug, Clone)]
struct MapNode {
    kind: NodeKind,
    id: String,
    parent: Option<NodeId>,
    markers: BTreeSet<StatusMarker>,
}

/// Arena-backed map tree.
///
/// Regions may nest; a click resolves to the innermost region around the
/// clicked node.
#[derive(Debug, Clone)]
pub struct MapTree {
    nodes: Vec<MapNode>,
}

impl MapTree {
    /// Create a tree holding only the root container.
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            nodes: vec![MapNode {
                kind: NodeKind::Root,
                id: root_id.into(),
                parent: None,
                markers: BTreeSet::new(),
            }],
        }
    }

    /// One region per id, each holding a single shape, directly under the root.
    pub fn from_region_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tree = Self::new("map");
        let root = tree.root();
        for id in ids {
            let id = id.into();
            let region = tree.add_region(root, id.clone());
            tree.add_shape(region, format!("{id}-shape"));
        }
        tree
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add_region(&mut self, parent: NodeId, id: impl Into<String>) -> NodeId {
        self.push(NodeKind::Region, id.into(), parent)
    }

    pub fn add_shape(&mut self, parent: NodeId, id: impl Into<String>) -> NodeId {
        self.push(NodeKind::Shape, id.into(), parent)
    }

    fn push(&mut self, kind: NodeKind, id: String, parent: NodeId) -> NodeId {
        let handle = NodeId(self.nodes.len());
        self.nodes.push(MapNode {
            kind,
            id,
            parent: Some(parent),
            markers: BTreeSet::new(),
        });
        handle
    }

    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node.0].kind
    }

    /// First node with the given id.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    /// First child of `node`, if any. Hosts use it to click on a shape
    /// rather than the region itself.
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.parent == Some(node))
            .map(NodeId)
    }

    pub fn regions(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind == NodeKind::Region)
            .map(|(i, _)| NodeId(i))
    }

    pub fn focused_regions(&self) -> Vec<NodeId> {
        self.regions()
            .filter(|&r| self.status(r) == RegionStatus::Focused)
            .collect()
    }

    pub fn solved_count(&self) -> usize {
        self.regions()
            .filter(|&r| self.status(r) == RegionStatus::Solved)
            .count()
    }
}

impl RegionTree for MapTree {
    type Node = NodeId;

    fn is_region(&self, node: NodeId) -> bool {
        self.nodes[node.0].kind == NodeKind::Region
    }

    fn region_id(&self, node: NodeId) -> &str {
        &self.nodes[node.0].id
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn has_marker(&self, node: NodeId, marker: StatusMarker) -> bool {
        self.nodes[node.0].markers.contains(&marker)
    }

    fn add_marker(&mut self, node: NodeId, marker: StatusMarker) {
        self.nodes[node.0].markers.insert(marker);
    }

    fn remove_marker(&mut self, node: NodeId, marker: StatusMarker) {
        self.nodes[node.0].markers.remove(&marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_click_resolves_to_region() {
        let tree = MapTree::from_region_ids(["fr", "es"]);
        let fr = tree.find("fr").unwrap();
        let shape = tree.first_child(fr).unwrap();
        assert_eq!(tree.kind(shape), NodeKind::Shape);
        assert_eq!(tree.enclosing_region(shape), Some(fr));
    }

    #[test]
    fn root_has_no_enclosing_region() {
        let tree = MapTree::from_region_ids(["fr"]);
        assert_eq!(tree.enclosing_region(tree.root()), None);
    }

    #[test]
    fn nested_regions_resolve_to_innermost() {
        let mut tree = MapTree::new("map");
        let root = tree.root();
        let outer = tree.add_region(root, "uk");
        let inner = tree.add_region(outer, "scotland");
        let shape = tree.add_shape(inner, "scotland-path");
        assert_eq!(tree.enclosing_region(shape), Some(inner));
    }

    #[test]
    fn status_is_derived_from_markers() {
        let mut tree = MapTree::from_region_ids(["fr"]);
        let fr = tree.find("fr").unwrap();
        assert_eq!(tree.status(fr), RegionStatus::Unsolved);
        tree.add_marker(fr, StatusMarker::Focused);
        assert_eq!(tree.status(fr), RegionStatus::Focused);
        tree.add_marker(fr, StatusMarker::Solved);
        assert_eq!(tree.status(fr), RegionStatus::Solved);
        assert_eq!(tree.solved_count(), 1);
    }

    #[test]
    fn regions_skip_root_and_shapes() {
        let tree = MapTree::from_region_ids(["a", "b", "c"]);
        let ids: Vec<_> = tree.regions().map(|r| tree.region_id(r)).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
