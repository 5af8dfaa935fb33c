//! Graph assembler: flattens the topology model into the uniform graph.
//!
//! Every [`Node`](lamina_model::Node) and [`TermPoint`](lamina_model::TermPoint)
//! becomes one [`GraphNode`]; every declared [`Link`](lamina_model::Link)
//! becomes one [`GraphLink`], plus one synthetic `node-tp` link per term
//! point connecting it to its owning node.
//!
//! After flattening, the assembler resolves the derived relations in two
//! passes over an explicit path lookup table:
//!
//! 1. `parents` back-references: for every declared `children` path, the
//!    referenced node gets this node's path pushed onto its `parents` list.
//!    This is the only place `parents` is populated. A child path that
//!    resolves to nothing is skipped with a warning.
//! 2. link endpoint identities: `source_path`/`target_path` are resolved to
//!    the corresponding node's packed numeric id. An unresolvable endpoint
//!    is a hard fault ([`LaminaError::UnresolvedEndpoint`]).

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use lamina_core::{DiffState, GraphLink, GraphNode, LinkKind, NodeKind, path};
use lamina_model::Network;

use crate::error::LaminaError;

/// The uniform graph of one layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerGraph {
    pub name: String,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub diff_state: DiffState,
}

/// The uniform graph of every layer, with resolved back-references and
/// link identities.
///
/// Serializes as the per-layer array consumed by the topology renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct TopologyGraph {
    pub layers: Vec<LayerGraph>,
}

impl TopologyGraph {
    /// Iterate all nodes of all layers in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.layers.iter().flat_map(|layer| layer.nodes.iter())
    }

    /// Iterate all nodes of all layers mutably, in document order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut GraphNode> {
        self.layers.iter_mut().flat_map(|layer| layer.nodes.iter_mut())
    }

    /// Iterate all links of all layers in document order.
    pub fn links(&self) -> impl Iterator<Item = &GraphLink> {
        self.layers.iter().flat_map(|layer| layer.links.iter())
    }

    /// Find a node by its path.
    pub fn find_node(&self, node_path: &str) -> Option<&GraphNode> {
        self.nodes().find(|node| node.path == node_path)
    }
}

/// Flatten `networks` into a [`TopologyGraph`] and resolve its relations.
///
/// # Errors
///
/// Returns [`LaminaError::UnresolvedEndpoint`] when a link references a
/// term point that does not exist in any layer.
pub fn assemble(networks: &[Network]) -> Result<TopologyGraph, LaminaError> {
    let mut layers = networks
        .iter()
        .map(flatten_layer)
        .collect::<Result<Vec<_>, _>>()?;

    resolve_parents(&mut layers);
    resolve_link_ids(&mut layers)?;

    debug!(
        layers_count = layers.len(),
        nodes_count = layers.iter().map(|l| l.nodes.len()).sum::<usize>(),
        links_count = layers.iter().map(|l| l.links.len()).sum::<usize>();
        "Topology graph assembled"
    );

    Ok(TopologyGraph { layers })
}

/// Flatten one network into nodes and links, leaving relations unresolved.
fn flatten_layer(network: &Network) -> Result<LayerGraph, LaminaError> {
    let mut nodes = Vec::new();
    let mut links = Vec::new();

    for node in &network.nodes {
        nodes.push(GraphNode {
            kind: NodeKind::Node,
            name: node.name.clone(),
            id: node.id,
            path: node.path.clone(),
            children: node.children_paths(),
            parents: Vec::new(),
            attribute: serde_json::to_value(&node.attribute)?,
            diff_state: node.diff_state.clone(),
            family: None,
        });

        for tp in &node.term_points {
            nodes.push(GraphNode {
                kind: NodeKind::Tp,
                name: tp.name.clone(),
                id: tp.id,
                path: tp.path.clone(),
                children: tp.children_paths(),
                parents: Vec::new(),
                attribute: serde_json::to_value(&tp.attribute)?,
                diff_state: tp.diff_state.clone(),
                family: None,
            });

            // Synthetic node-to-tp connection, one per term point.
            let name = format!("{},{}", node.name, tp.name);
            links.push(GraphLink {
                kind: LinkKind::NodeTp,
                path: path::join(&network.path, &name),
                name,
                source_path: node.path.clone(),
                target_path: tp.path.clone(),
                source_id: node.id,
                target_id: tp.id,
                attribute: serde_json::Value::Null,
                diff_state: tp.diff_state.clone(),
            });
        }
    }

    for link in &network.links {
        links.push(GraphLink {
            kind: LinkKind::TpTp,
            name: link.name.clone(),
            path: link.path.clone(),
            source_path: link.source_path.clone(),
            target_path: link.target_path.clone(),
            source_id: Default::default(),
            target_id: Default::default(),
            attribute: serde_json::to_value(&link.attribute)?,
            diff_state: link.diff_state.clone(),
        });
    }

    Ok(LayerGraph {
        name: network.name.clone(),
        nodes,
        links,
        diff_state: network.diff_state.clone(),
    })
}

/// Lookup table from node path to its (layer, node) position.
///
/// Built once per resolution pass and passed explicitly, instead of
/// re-scanning the layer lists per reference.
fn path_table(layers: &[LayerGraph]) -> IndexMap<String, (usize, usize)> {
    let mut table = IndexMap::new();
    for (layer_index, layer) in layers.iter().enumerate() {
        for (node_index, node) in layer.nodes.iter().enumerate() {
            table.insert(node.path.clone(), (layer_index, node_index));
        }
    }
    table
}

/// Populate `parents` by inverting every `children` edge.
fn resolve_parents(layers: &mut [LayerGraph]) {
    let table = path_table(layers);

    // Collect the inverted edges first, then apply them, so the mutation
    // never aliases the traversal.
    let mut back_refs: Vec<((usize, usize), String)> = Vec::new();
    for layer in layers.iter() {
        for node in &layer.nodes {
            for child_path in &node.children {
                match table.get(child_path) {
                    Some(&position) => back_refs.push((position, node.path.clone())),
                    None => {
                        warn!(
                            node = node.path,
                            child = child_path.as_str();
                            "Supporting reference does not resolve, skipping"
                        );
                    }
                }
            }
        }
    }

    for ((layer_index, node_index), parent_path) in back_refs {
        layers[layer_index].nodes[node_index].parents.push(parent_path);
    }
}

/// Resolve link endpoint paths to packed numeric ids.
fn resolve_link_ids(layers: &mut [LayerGraph]) -> Result<(), LaminaError> {
    let table = path_table(layers);
    let id_of = |link_path: &str, endpoint: &str| {
        table
            .get(endpoint)
            .map(|&(layer_index, node_index)| layers[layer_index].nodes[node_index].id)
            .ok_or_else(|| LaminaError::UnresolvedEndpoint {
                link: link_path.to_string(),
                endpoint: endpoint.to_string(),
            })
    };

    let mut resolved: Vec<(usize, usize, lamina_core::GraphId, lamina_core::GraphId)> = Vec::new();
    for (layer_index, layer) in layers.iter().enumerate() {
        for (link_index, link) in layer.links.iter().enumerate() {
            let source_id = id_of(&link.path, &link.source_path)?;
            let target_id = id_of(&link.path, &link.target_path)?;
            resolved.push((layer_index, link_index, source_id, target_id));
        }
    }

    for (layer_index, link_index, source_id, target_id) in resolved {
        let link = &mut layers[layer_index].links[link_index];
        link.source_id = source_id;
        link.target_id = target_id;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use lamina_model::build_networks;
    use serde_json::json;

    fn two_layer_graph() -> TopologyGraph {
        let document = json!({
            "ietf-network:networks": {
                "network": [
                    {
                        "network-id": "logical",
                        "network-types": {},
                        "node": [
                            {
                                "node-id": "C",
                                "ietf-network-topology:termination-point": [
                                    {
                                        "tp-id": "c1",
                                        "supporting-termination-point": [
                                            { "network-ref": "physical", "node-ref": "A", "tp-ref": "a1" }
                                        ]
                                    }
                                ],
                                "supporting-node": [
                                    { "network-ref": "physical", "node-ref": "A" }
                                ]
                            }
                        ]
                    },
                    {
                        "network-id": "physical",
                        "network-types": {},
                        "node": [
                            {
                                "node-id": "A",
                                "ietf-network-topology:termination-point": [ { "tp-id": "a1" } ]
                            },
                            {
                                "node-id": "B",
                                "ietf-network-topology:termination-point": [ { "tp-id": "b1" } ]
                            }
                        ],
                        "ietf-network-topology:link": [
                            {
                                "link-id": "A,a1,B,b1",
                                "source": { "source-node": "A", "source-tp": "a1" },
                                "destination": { "dest-node": "B", "dest-tp": "b1" }
                            }
                        ]
                    }
                ]
            }
        });
        let networks = build_networks(&document).unwrap();
        assemble(&networks).unwrap()
    }

    #[test]
    fn parents_are_the_exact_inverse_of_children() {
        let graph = two_layer_graph();

        let c = graph.find_node("logical/C").unwrap();
        assert_eq!(c.children, vec!["physical/A"]);

        let a = graph.find_node("physical/A").unwrap();
        assert_eq!(a.parents, vec!["logical/C"]);

        let a1 = graph.find_node("physical/A/a1").unwrap();
        assert_eq!(a1.parents, vec!["logical/C/c1"]);

        // Full bidirectional consistency over every node.
        for node in graph.nodes() {
            for child_path in &node.children {
                let child = graph.find_node(child_path).unwrap();
                assert!(child.parents.contains(&node.path));
            }
            for parent_path in &node.parents {
                let parent = graph.find_node(parent_path).unwrap();
                assert!(parent.children.contains(&node.path));
            }
        }
    }

    #[test]
    fn link_endpoints_resolve_to_packed_ids() {
        let graph = two_layer_graph();
        let link = graph
            .links()
            .find(|l| l.kind == LinkKind::TpTp)
            .unwrap();

        // physical is layer 2, A is node 1, a1 is tp 1
        assert_eq!(link.source_id.value(), 20_101);
        assert_eq!(link.target_id.value(), 20_201);
    }

    #[test]
    fn each_tp_gets_a_synthetic_node_tp_link() {
        let graph = two_layer_graph();
        let node_tp: Vec<_> = graph
            .links()
            .filter(|l| l.kind == LinkKind::NodeTp)
            .collect();
        assert_eq!(node_tp.len(), 3);
        assert!(
            node_tp
                .iter()
                .any(|l| l.source_path == "physical/A" && l.target_path == "physical/A/a1")
        );
    }

    #[test]
    fn dangling_support_is_skipped_but_dangling_link_is_fatal() {
        let document = json!({
            "ietf-network:networks": {
                "network": [
                    {
                        "network-id": "layer1",
                        "network-types": {},
                        "node": [
                            {
                                "node-id": "X",
                                "supporting-node": [
                                    { "network-ref": "nowhere", "node-ref": "ghost" }
                                ]
                            }
                        ],
                        "ietf-network-topology:link": [
                            {
                                "link-id": "bad",
                                "source": { "source-node": "X", "source-tp": "ghost0" },
                                "destination": { "dest-node": "X", "dest-tp": "ghost1" }
                            }
                        ]
                    }
                ]
            }
        });
        let networks = build_networks(&document).unwrap();
        let err = assemble(&networks).unwrap_err();
        assert!(matches!(err, LaminaError::UnresolvedEndpoint { .. }));
    }
}
