//! An interface (termination point) on a node.

use serde_json::Value;

use lamina_core::{DiffState, GraphId, path};

use crate::{
    attribute::{L2TpAttr, L3TpAttr, TpAttr},
    network::LayerKind,
    support::SupportingTermPoint,
    value::{diff_state_of, items, string_of},
};

/// An interface on a [`Node`](crate::Node), the unit links connect.
#[derive(Debug, Clone)]
pub struct TermPoint {
    pub name: String,
    pub id: GraphId,
    pub path: String,
    pub supports: Vec<SupportingTermPoint>,
    pub attribute: TpAttr,
    pub diff_state: DiffState,
}

impl TermPoint {
    /// Build a term point from its JSON value and 1-based ordinal on `node_path`.
    pub fn new(
        value: &Value,
        node_path: &str,
        node_id: GraphId,
        layer_kind: LayerKind,
        tp_ordinal: u64,
    ) -> Self {
        let name = string_of(value, "tp-id");

        let attribute = match layer_kind {
            LayerKind::Generic => TpAttr::Generic,
            LayerKind::L2 => TpAttr::L2(L2TpAttr::new(value)),
            LayerKind::L3 => TpAttr::L3(L3TpAttr::new(value)),
        };

        let supports = items(value, "supporting-termination-point")
            .map(SupportingTermPoint::new)
            .collect();

        TermPoint {
            path: path::join(node_path, &name),
            name,
            id: node_id.term_point(tp_ordinal),
            supports,
            attribute,
            diff_state: diff_state_of(value),
        }
    }

    /// Paths of the lower-layer term points this one is supported by.
    pub fn children_paths(&self) -> Vec<String> {
        self.supports
            .iter()
            .map(SupportingTermPoint::ref_path)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn children_come_from_supporting_tps() {
        let tp = json!({
            "tp-id": "p1",
            "supporting-termination-point": [
                { "network-ref": "layer1", "node-ref": "host1", "tp-ref": "eth0" }
            ]
        });
        let tp = TermPoint::new(
            &tp,
            "layer2/vm1",
            GraphId::network(2).node(1),
            LayerKind::Generic,
            1,
        );

        assert_eq!(tp.path, "layer2/vm1/p1");
        assert_eq!(tp.id.value(), 20_101);
        assert_eq!(tp.children_paths(), vec!["layer1/host1/eth0"]);
    }
}
