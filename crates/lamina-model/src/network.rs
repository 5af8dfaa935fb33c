//! A single topology layer and its layer-kind detection.

use serde_json::Value;

use lamina_core::{DiffState, GraphId};

use crate::{
    attribute::{L2NetworkAttr, L3NetworkAttr, NetworkAttr},
    link::Link,
    node::Node,
    support::SupportingNetwork,
    value::{diff_state_of, items, string_of},
};

/// Key holding the topology links of a layer.
pub const LINK_TAG: &str = "ietf-network-topology:link";

/// Type tag declaring an L3 unicast topology layer.
const L3_TYPE_TAG: &str = "ietf-l3-unicast-topology:l3-unicast-topology";

/// Type tag declaring an L2 topology layer.
const L2_TYPE_TAG: &str = "ietf-l2-topology:l2-network";

/// Detected kind of a layer, chosen once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Generic,
    L2,
    L3,
}

impl LayerKind {
    /// Detect the layer kind from a network's `network-types` subtree.
    ///
    /// All nested object keys are collected into a flat tag set; an L3 tag
    /// anywhere in the subtree wins over an L2 tag, and an unrecognized set
    /// stays generic.
    pub fn detect(network: &Value) -> Self {
        let mut tags = Vec::new();
        collect_type_tags(network.get("network-types").unwrap_or(&Value::Null), &mut tags);

        if tags.iter().any(|tag| tag == L3_TYPE_TAG) {
            LayerKind::L3
        } else if tags.iter().any(|tag| tag == L2_TYPE_TAG) {
            LayerKind::L2
        } else {
            LayerKind::Generic
        }
    }
}

fn collect_type_tags(value: &Value, tags: &mut Vec<String>) {
    if let Value::Object(map) = value {
        for (key, nested) in map {
            tags.push(key.clone());
            collect_type_tags(nested, tags);
        }
    }
}

/// One topology layer: an ordered list of nodes and links plus layer-wide
/// attributes. Constructed once per input document, immutable afterwards.
#[derive(Debug, Clone)]
pub struct Network {
    pub name: String,
    pub id: GraphId,
    pub path: String,
    pub layer_kind: LayerKind,
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub supports: Vec<SupportingNetwork>,
    pub attribute: NetworkAttr,
    pub diff_state: DiffState,
}

impl Network {
    /// Build a layer from its JSON value and 1-based ordinal.
    ///
    /// Nodes are built before links; link endpoint paths are derived purely
    /// from name pairs, so a link may reference a node that appears later
    /// in the document.
    pub fn new(value: &Value, layer_ordinal: u64) -> Self {
        let name = string_of(value, "network-id");
        let id = GraphId::network(layer_ordinal);
        let path = name.clone();
        let layer_kind = LayerKind::detect(value);

        let attribute = match layer_kind {
            LayerKind::Generic => NetworkAttr::Generic,
            LayerKind::L2 => NetworkAttr::L2(L2NetworkAttr::new(value)),
            LayerKind::L3 => NetworkAttr::L3(L3NetworkAttr::new(value)),
        };

        let nodes = items(value, "node")
            .enumerate()
            .map(|(index, node)| Node::new(node, &path, id, layer_kind, index as u64 + 1))
            .collect();

        let links = items(value, LINK_TAG)
            .map(|link| Link::new(link, &path, layer_kind))
            .collect();

        let supports = items(value, "supporting-network")
            .map(SupportingNetwork::new)
            .collect();

        Network {
            name,
            id,
            path,
            layer_kind,
            nodes,
            links,
            supports,
            attribute,
            diff_state: diff_state_of(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn detects_l3_layer() {
        let network = json!({
            "network-types": { "ietf-l3-unicast-topology:l3-unicast-topology": {} }
        });
        assert_eq!(LayerKind::detect(&network), LayerKind::L3);
    }

    #[test]
    fn detects_l2_layer_in_nested_types() {
        let network = json!({
            "network-types": { "vendor:topology": { "ietf-l2-topology:l2-network": {} } }
        });
        assert_eq!(LayerKind::detect(&network), LayerKind::L2);
    }

    #[test]
    fn unknown_types_stay_generic() {
        let network = json!({ "network-types": { "vendor:foo": {} } });
        assert_eq!(LayerKind::detect(&network), LayerKind::Generic);
        assert_eq!(LayerKind::detect(&json!({})), LayerKind::Generic);
    }

    #[test]
    fn builds_ordered_nodes_and_links() {
        let network = json!({
            "network-id": "layer1",
            "network-types": {},
            "node": [
                { "node-id": "host1" },
                { "node-id": "host2" }
            ],
            LINK_TAG: [
                {
                    "link-id": "host1,eth0,host2,eth0",
                    "source": { "source-node": "host1", "source-tp": "eth0" },
                    "destination": { "dest-node": "host2", "dest-tp": "eth0" }
                }
            ]
        });
        let network = Network::new(&network, 1);

        assert_eq!(network.path, "layer1");
        assert_eq!(network.id.value(), 10_000);
        assert_eq!(network.nodes.len(), 2);
        assert_eq!(network.nodes[0].path, "layer1/host1");
        assert_eq!(network.nodes[1].id.value(), 10_200);
        assert_eq!(network.links.len(), 1);
        assert_eq!(network.links[0].source_path, "layer1/host1/eth0");
        assert_eq!(network.links[0].target_path, "layer1/host2/eth0");
    }
}
