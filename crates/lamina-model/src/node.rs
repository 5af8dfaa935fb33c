//! A device within a layer.

use serde_json::Value;

use lamina_core::{DiffState, GraphId, path};

use crate::{
    attribute::{L2NodeAttr, L3NodeAttr, NodeAttr},
    network::LayerKind,
    support::SupportingNode,
    term_point::TermPoint,
    value::{diff_state_of, items, string_of},
};

/// Key holding the termination points of a node.
pub const TP_TAG: &str = "ietf-network-topology:termination-point";

/// A device within a [`Network`](crate::Network), owning an ordered list of
/// term points and the supporting-node references its `children` edges are
/// derived from.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub id: GraphId,
    pub path: String,
    pub term_points: Vec<TermPoint>,
    pub supports: Vec<SupportingNode>,
    pub attribute: NodeAttr,
    pub diff_state: DiffState,
}

impl Node {
    /// Build a node from its JSON value and 1-based ordinal within `network_path`.
    pub fn new(
        value: &Value,
        network_path: &str,
        network_id: GraphId,
        layer_kind: LayerKind,
        node_ordinal: u64,
    ) -> Self {
        let name = string_of(value, "node-id");
        let id = network_id.node(node_ordinal);
        let node_path = path::join(network_path, &name);

        let attribute = match layer_kind {
            LayerKind::Generic => NodeAttr::Generic,
            LayerKind::L2 => NodeAttr::L2(L2NodeAttr::new(value)),
            LayerKind::L3 => NodeAttr::L3(L3NodeAttr::new(value)),
        };

        let term_points = items(value, TP_TAG)
            .enumerate()
            .map(|(index, tp)| TermPoint::new(tp, &node_path, id, layer_kind, index as u64 + 1))
            .collect();

        let supports = items(value, "supporting-node")
            .map(SupportingNode::new)
            .collect();

        Node {
            name,
            id,
            path: node_path,
            term_points,
            supports,
            attribute,
            diff_state: diff_state_of(value),
        }
    }

    /// Paths of the lower-layer nodes this node is supported by.
    pub fn children_paths(&self) -> Vec<String> {
        self.supports.iter().map(SupportingNode::ref_path).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn builds_term_points_in_order() {
        let node = json!({
            "node-id": "host1",
            TP_TAG: [
                { "tp-id": "eth0" },
                { "tp-id": "eth1" }
            ]
        });
        let node = Node::new(&node, "layer1", GraphId::network(1), LayerKind::Generic, 1);

        assert_eq!(node.path, "layer1/host1");
        assert_eq!(node.id.value(), 10_100);
        assert_eq!(node.term_points.len(), 2);
        assert_eq!(node.term_points[0].path, "layer1/host1/eth0");
        assert_eq!(node.term_points[0].id.value(), 10_101);
        assert_eq!(node.term_points[1].id.value(), 10_102);
    }

    #[test]
    fn children_come_from_supporting_nodes() {
        let node = json!({
            "node-id": "vm1",
            "supporting-node": [
                { "network-ref": "layer1", "node-ref": "host1" }
            ]
        });
        let node = Node::new(&node, "layer2", GraphId::network(2), LayerKind::Generic, 1);
        assert_eq!(node.children_paths(), vec!["layer1/host1"]);
    }
}
