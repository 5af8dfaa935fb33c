//! Arena of nested-view nodes.
//!
//! The nested layout works over view-specific clones of the uniform graph
//! nodes, held in an arena addressed by stable integer index plus a path
//! lookup table. Deep-mode splitting appends new arena entries and rewrites
//! edge lists through indices, never through live references, so cloning a
//! multi-parent node cannot alias the traversal that requested it.

use indexmap::IndexMap;
use serde::Serialize;

use lamina_core::{FamilyRelation, GraphNode, NodeKind, Relatable, path};

use crate::assembler::TopologyGraph;

/// A graph node enriched with nested-view geometry.
///
/// Nodes get a rectangle (`x`, `y`, `width`, `height`), term points a
/// circle (`cx`, `cy`, `r`). A record without geometry after a layout run
/// is inoperative: it was never placed. `layer_order` is the topological
/// depth used for render ordering, `split` the clone ordinal assigned by
/// deep-mode splitting (zero for originals).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedNode {
    #[serde(flatten)]
    pub node: GraphNode,
    pub split: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_order: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
}

impl NestedNode {
    fn from_graph(node: &GraphNode, reverse: bool) -> Self {
        let mut node = node.clone();
        if reverse {
            // Direction normalization: recurse "downward" over whatever
            // direction the caller requested.
            std::mem::swap(&mut node.parents, &mut node.children);
        }
        NestedNode {
            node,
            split: 0,
            layer_order: None,
            x: None,
            y: None,
            width: None,
            height: None,
            cx: None,
            cy: None,
            r: None,
        }
    }

    pub fn is_node(&self) -> bool {
        self.node.kind == NodeKind::Node
    }

    pub fn is_tp(&self) -> bool {
        self.node.kind == NodeKind::Tp
    }

    /// Whether this record received geometry during the layout run.
    pub fn operative(&self) -> bool {
        self.x.is_some() || self.cx.is_some()
    }

    /// Number of parent references that address nodes.
    pub fn parent_node_count(&self) -> usize {
        self.node.parent_node_count()
    }

    pub(crate) fn set_rect(&mut self, x: f64, y: f64, width: f64, height: f64, layer_order: u64) {
        self.x = Some(x);
        self.y = Some(y);
        self.width = Some(width);
        self.height = Some(height);
        self.layer_order = Some(layer_order);
    }

    pub(crate) fn set_circle(&mut self, cx: f64, cy: f64, r: f64, layer_order: u64) {
        self.cx = Some(cx);
        self.cy = Some(cy);
        self.r = Some(r);
        self.layer_order = Some(layer_order);
    }
}

impl Relatable for NestedNode {
    fn path(&self) -> &str {
        &self.node.path
    }

    fn name(&self) -> &str {
        &self.node.name
    }

    fn children(&self) -> &[String] {
        &self.node.children
    }

    fn parents(&self) -> &[String] {
        &self.node.parents
    }

    fn set_family(&mut self, family: FamilyRelation) {
        self.node.family = Some(family);
    }
}

/// The node arena of one layout run.
#[derive(Debug)]
pub struct Arena {
    pub nodes: Vec<NestedNode>,
    index: IndexMap<String, usize>,
}

impl Arena {
    /// Clone every graph node into the arena, optionally reversing the
    /// parent/child direction.
    pub fn from_graph(graph: &TopologyGraph, reverse: bool) -> Self {
        let nodes: Vec<NestedNode> = graph
            .nodes()
            .map(|node| NestedNode::from_graph(node, reverse))
            .collect();
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.node.path.clone(), i))
            .collect();
        Arena { nodes, index }
    }

    pub fn index_of(&self, node_path: &str) -> Option<usize> {
        self.index.get(node_path).copied()
    }

    /// Layout roots: nodes without any parent node path.
    ///
    /// Term-point-only parents do not anchor a node below another, so they
    /// do not disqualify it from being a root.
    pub fn root_indices(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_node() && n.parent_node_count() == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Term points owned by the node at `node_index`, in id order.
    ///
    /// Matching strips any split suffix: clones of a split node share the
    /// original's term point records, so declared links keep resolving
    /// through the original paths. When several clones are laid out, the
    /// shared circles keep the coordinates of the clone placed last.
    pub fn tp_indices_of(&self, node_index: usize) -> Vec<usize> {
        let node_path = path::base_path(&self.nodes[node_index].node.path).to_string();
        let mut tps: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_tp() && path::node_path_of(&n.node.path) == node_path)
            .map(|(i, _)| i)
            .collect();
        tps.sort_by_key(|&i| self.nodes[i].node.id);
        tps
    }

    /// Deep-mode split: clone the child at `child_index` for the parent at
    /// `parent_index` and return the clone's index.
    ///
    /// The clone takes over the parent's child reference and exactly one
    /// parent; the original loses that parent and advances its split
    /// counter. The clone's path is pushed onto the parents of every child
    /// it shares with the original, so shared descendants become
    /// multi-parent themselves and split per clone when visited. Term
    /// point records are not cloned; see [`Arena::tp_indices_of`].
    pub fn split_by_parent(&mut self, child_index: usize, parent_index: usize) -> usize {
        let parent_path = self.nodes[parent_index].node.path.clone();

        let clone = {
            let child = &mut self.nodes[child_index];
            let mut clone = child.clone();
            clone.node.path = path::split_path(&child.node.path, child.split);
            clone.node.parents = vec![parent_path.clone()];
            clone.split = child.split;

            child.split += 1;
            child.node.parents.retain(|p| p != &parent_path);
            clone
        };

        let original_path = self.nodes[child_index].node.path.clone();
        let clone_path = clone.node.path.clone();

        // Rewrite the parent's edge to point at the clone.
        for child_ref in &mut self.nodes[parent_index].node.children {
            if *child_ref == original_path {
                *child_ref = clone_path.clone();
            }
        }

        // Register the clone as an additional parent of shared descendants.
        let grandchildren: Vec<usize> = clone
            .node
            .children
            .iter()
            .filter_map(|p| self.index_of(p))
            .collect();
        for grandchild in grandchildren {
            self.nodes[grandchild].node.parents.push(clone_path.clone());
        }

        let clone_index = self.nodes.len();
        self.index.insert(clone_path, clone_index);
        self.nodes.push(clone);
        clone_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use lamina_core::{DiffState, GraphId};

    fn graph_node(kind: NodeKind, p: &str, parents: &[&str], children: &[&str]) -> GraphNode {
        GraphNode {
            kind,
            name: path::name_of(p).to_string(),
            id: GraphId::network(1).node(1),
            path: p.to_string(),
            children: children.iter().map(|s| s.to_string()).collect(),
            parents: parents.iter().map(|s| s.to_string()).collect(),
            attribute: serde_json::Value::Null,
            diff_state: DiffState::default(),
            family: None,
        }
    }

    fn arena(nodes: Vec<GraphNode>) -> Arena {
        let nodes: Vec<NestedNode> = nodes
            .iter()
            .map(|n| NestedNode::from_graph(n, false))
            .collect();
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.node.path.clone(), i))
            .collect();
        Arena { nodes, index }
    }

    #[test]
    fn roots_ignore_tp_parents() {
        let a = arena(vec![
            graph_node(NodeKind::Node, "l1/a", &["l2/x/p1"], &[]),
            graph_node(NodeKind::Node, "l1/b", &["l2/x"], &[]),
        ]);
        assert_eq!(a.root_indices(), vec![0]);
    }

    #[test]
    fn reverse_swaps_direction() {
        let node = graph_node(NodeKind::Node, "l1/a", &["l2/up"], &["l0/down"]);
        let reversed = NestedNode::from_graph(&node, true);
        assert_eq!(reversed.node.children, vec!["l2/up"]);
        assert_eq!(reversed.node.parents, vec!["l0/down"]);
    }

    #[test]
    fn split_moves_one_parent_to_the_clone() {
        let mut a = arena(vec![
            graph_node(NodeKind::Node, "l2/p1", &[], &["l1/d"]),
            graph_node(NodeKind::Node, "l2/p2", &[], &["l1/d"]),
            graph_node(NodeKind::Node, "l1/d", &["l2/p1", "l2/p2"], &["l0/g"]),
            graph_node(NodeKind::Node, "l0/g", &["l1/d"], &[]),
        ]);

        let clone = a.split_by_parent(2, 0);

        assert_eq!(a.nodes[clone].node.path, "l1/d::0");
        assert_eq!(a.nodes[clone].node.parents, vec!["l2/p1"]);
        assert_eq!(a.nodes[clone].split, 0);
        assert_eq!(a.nodes[2].node.parents, vec!["l2/p2"]);
        assert_eq!(a.nodes[2].split, 1);
        assert_eq!(a.nodes[0].node.children, vec!["l1/d::0"]);
        // shared grandchild now sees the clone as an extra parent
        assert_eq!(a.nodes[3].node.parents, vec!["l1/d", "l1/d::0"]);
        assert_eq!(a.index_of("l1/d::0"), Some(clone));
    }
}
