//! Dependency view packer.
//!
//! Each layer becomes one horizontal row of node boxes; each node's term
//! points become circles centered within the box. The packing is pure and
//! deterministic: box widths follow from the term point count, positions
//! accumulate left to right, and layer rows stack top to bottom. There is
//! no collision resolution beyond the formulas themselves.
//!
//! Term point positions are derived from the packed identity scheme: the
//! 1-based tp ordinal decoded from the id indexes the circle within its
//! node box.

use serde::Serialize;

use lamina_core::{DiffState, FamilyRelation, GraphId, GraphNode, NodeKind};

use crate::{assembler::TopologyGraph, config::DependencyConfig};

/// One packed layer row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyLayer {
    pub number: usize,
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub name: String,
    pub path: String,
    pub nodes: Vec<DependencyNode>,
    pub tps: Vec<DependencyTermPoint>,
}

/// A positioned node box.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub number: GraphId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub attribute: serde_json::Value,
    pub diff_state: DiffState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilyRelation>,
}

/// A positioned term point circle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyTermPoint {
    pub number: GraphId,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub attribute: serde_json::Value,
    pub diff_state: DiffState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilyRelation>,
}

/// Pack every layer of `graph` into positioned rows.
pub fn pack(graph: &TopologyGraph, config: &DependencyConfig) -> Vec<DependencyLayer> {
    graph
        .layers
        .iter()
        .enumerate()
        .map(|(number, layer)| pack_layer(layer, number, config))
        .collect()
}

fn pack_layer(
    layer: &crate::assembler::LayerGraph,
    number: usize,
    config: &DependencyConfig,
) -> DependencyLayer {
    let layer_y =
        config.layer_y_pad1 + number as f64 * (config.layer_height() + config.layer_y_pad2);

    let mut nodes = Vec::new();
    let mut tps = Vec::new();
    let mut node_x = config.node_x_base;

    for node in layer.nodes.iter().filter(|n| n.kind == NodeKind::Node) {
        let node_tps: Vec<&GraphNode> = layer
            .nodes
            .iter()
            .filter(|tp| {
                tp.kind == NodeKind::Tp
                    && tp.id.layer_ordinal() == node.id.layer_ordinal()
                    && tp.id.node_ordinal() == node.id.node_ordinal()
            })
            .collect();

        let width = config.node_width(node_tps.len());

        for tp in &node_tps {
            // tp ordinals are 1-based, so the first circle sits at pad + r
            let ordinal = tp.id.tp_ordinal() as f64;
            tps.push(DependencyTermPoint {
                number: tp.id,
                cx: node_x
                    + config.tp_x_pad1
                    + (2.0 * config.tp_r + config.tp_x_pad2) * (ordinal - 1.0)
                    + config.tp_r,
                cy: layer_y + config.tp_y_pad1 + config.tp_r,
                r: config.tp_r,
                name: tp.name.clone(),
                path: tp.path.clone(),
                kind: tp.kind,
                attribute: tp.attribute.clone(),
                diff_state: tp.diff_state.clone(),
                family: tp.family,
            });
        }

        nodes.push(DependencyNode {
            number: node.id,
            x: node_x,
            y: layer_y,
            width,
            height: config.node_height(),
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
            attribute: node.attribute.clone(),
            diff_state: node.diff_state.clone(),
            family: node.family,
        });

        node_x += width + config.node_x_pad;
    }

    DependencyLayer {
        number,
        x: config.node_x_base,
        y: layer_y,
        height: config.layer_height(),
        name: layer.name.clone(),
        path: layer.name.clone(),
        nodes,
        tps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;
    use lamina_model::build_networks;
    use serde_json::json;

    fn graph(document: serde_json::Value) -> TopologyGraph {
        let networks = build_networks(&document).unwrap();
        crate::assembler::assemble(&networks).unwrap()
    }

    fn layer_with_nodes(tp_counts: &[usize]) -> serde_json::Value {
        let nodes: Vec<_> = tp_counts
            .iter()
            .enumerate()
            .map(|(n, &count)| {
                let tps: Vec<_> = (0..count)
                    .map(|t| json!({ "tp-id": format!("p{t}") }))
                    .collect();
                json!({
                    "node-id": format!("n{n}"),
                    "ietf-network-topology:termination-point": tps
                })
            })
            .collect();
        json!({
            "ietf-network:networks": {
                "network": [
                    { "network-id": "layer1", "network-types": {}, "node": nodes }
                ]
            }
        })
    }

    #[test]
    fn layers_stack_vertically_in_input_order() {
        let document = json!({
            "ietf-network:networks": {
                "network": [
                    { "network-id": "logical", "network-types": {}, "node": [] },
                    { "network-id": "physical", "network-types": {}, "node": [] }
                ]
            }
        });
        let config = DependencyConfig::default();
        let layers = pack(&graph(document), &config);

        assert_eq!(layers[0].name, "logical");
        assert_eq!(layers[1].name, "physical");
        assert!(layers[0].y < layers[1].y);
        assert_approx_eq!(
            f64,
            layers[1].y - layers[0].y,
            config.layer_height() + config.layer_y_pad2
        );
    }

    #[test]
    fn nodes_flow_left_to_right_without_overlap() {
        let config = DependencyConfig::default();
        let layers = pack(&graph(layer_with_nodes(&[2, 3, 1])), &config);
        let nodes = &layers[0].nodes;

        for pair in nodes.windows(2) {
            assert!(pair[1].x >= pair[0].x + pair[0].width);
        }
    }

    #[test]
    fn width_is_monotone_in_tp_count_and_positive_for_zero() {
        let config = DependencyConfig::default();
        let layers = pack(&graph(layer_with_nodes(&[0, 1, 2, 3])), &config);
        let widths: Vec<f64> = layers[0].nodes.iter().map(|n| n.width).collect();

        assert!(widths[0] > 0.0);
        assert_approx_eq!(f64, widths[0], widths[1]); // zero is clamped to one
        assert!(widths[1] < widths[2]);
        assert!(widths[2] < widths[3]);
    }

    #[test]
    fn tp_circles_sit_inside_their_node_box() {
        let config = DependencyConfig::default();
        let layers = pack(&graph(layer_with_nodes(&[3])), &config);
        let node = &layers[0].nodes[0];

        for tp in &layers[0].tps {
            assert!(tp.cx - tp.r >= node.x);
            assert!(tp.cx + tp.r <= node.x + node.width);
            assert!(tp.cy - tp.r >= node.y);
            assert!(tp.cy + tp.r <= node.y + node.height);
        }
    }

    proptest::proptest! {
        #[test]
        fn packing_never_overlaps(tp_counts in proptest::collection::vec(0usize..6, 1..8)) {
            let config = DependencyConfig::default();
            let layers = pack(&graph(layer_with_nodes(&tp_counts)), &config);
            let nodes = &layers[0].nodes;

            for pair in nodes.windows(2) {
                proptest::prop_assert!(pair[1].x >= pair[0].x + pair[0].width);
            }
            for tp in &layers[0].tps {
                let owner = nodes
                    .iter()
                    .find(|n| n.number.node_ordinal() == tp.number.node_ordinal())
                    .unwrap();
                proptest::prop_assert!(tp.cx - tp.r >= owner.x);
                proptest::prop_assert!(tp.cx + tp.r <= owner.x + owner.width);
            }
        }
    }

    #[test]
    fn first_tp_center_matches_the_formula() {
        let config = DependencyConfig::default();
        let layers = pack(&graph(layer_with_nodes(&[1])), &config);
        let node = &layers[0].nodes[0];
        let tp = &layers[0].tps[0];

        assert_approx_eq!(f64, tp.cx, node.x + config.tp_x_pad1 + config.tp_r);
        assert_approx_eq!(f64, tp.cy, node.y + config.tp_y_pad1 + config.tp_r);
    }
}
