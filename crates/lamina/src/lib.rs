//! Lamina - layout engine for RFC 8345 multi-layer network topologies.
//!
//! Builds uniform graph data and per-view layouts (topology, dependency,
//! nested) from RFC 8345 networks-JSON documents.

pub mod config;
pub mod nested;

mod assembler;
mod dependency;
mod error;
mod family;

pub use lamina_core::{
    DiffElement, DiffState, FamilyRelation, GraphId, GraphLink, GraphNode, LinkKind, NodeKind,
    Relation,
};
pub use lamina_model::Network;

pub use assembler::{LayerGraph, TopologyGraph};
pub use dependency::{DependencyLayer, DependencyNode, DependencyTermPoint, pack};
pub use error::LaminaError;
pub use family::mark_family;
pub use nested::{NestedOptions, NestedViewData};

use log::{debug, info};

use config::AppConfig;

/// The entity whose dependency family a view should mark.
#[derive(Debug, Clone, Default)]
pub struct TargetSpec {
    /// Node or term-point name to look for.
    pub name: String,
    /// Network layer to search; without it the lowest layer containing the
    /// name wins.
    pub layer: Option<String>,
}

/// Builder for assembling topology graphs and computing view layouts.
///
/// # Examples
///
/// ```rust,no_run
/// use lamina::{ViewBuilder, config::AppConfig};
///
/// let json = std::fs::read_to_string("topology.json").unwrap();
///
/// let builder = ViewBuilder::new(AppConfig::default());
/// let networks = builder.parse(&json).expect("Failed to parse");
/// let graph = builder.topology_view(&networks, None).expect("Failed to assemble");
/// let layers = builder.dependency_view(&graph);
/// ```
#[derive(Default)]
pub struct ViewBuilder {
    config: AppConfig,
}

impl ViewBuilder {
    /// Create a view builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse an RFC 8345 networks-JSON document into layered networks.
    ///
    /// # Errors
    ///
    /// Returns `LaminaError` when the document is not valid JSON or the
    /// networks container is malformed.
    pub fn parse(&self, json: &str) -> Result<Vec<Network>, LaminaError> {
        info!("Parsing networks document");
        let networks = lamina_model::build_networks_str(json)?;
        debug!(networks_count = networks.len(); "Networks parsed");
        Ok(networks)
    }

    /// Assemble the uniform topology graph, optionally marking the family
    /// of a target entity.
    ///
    /// # Errors
    ///
    /// Returns `LaminaError` when a link endpoint cannot be resolved.
    pub fn topology_view(
        &self,
        networks: &[Network],
        target: Option<&TargetSpec>,
    ) -> Result<TopologyGraph, LaminaError> {
        info!(networks_count = networks.len(); "Assembling topology graph");
        let mut graph = assembler::assemble(networks)?;

        if let Some(target) = target {
            let mut nodes: Vec<&mut GraphNode> = graph.nodes_mut().collect();
            let found = mark_family(&mut nodes, &target.name, target.layer.as_deref());
            debug!(target = target.name.as_str(), found = found; "Family marking done");
        }

        Ok(graph)
    }

    /// Pack an assembled graph into the dependency-view grid.
    pub fn dependency_view(&self, graph: &TopologyGraph) -> Vec<DependencyLayer> {
        info!("Packing dependency view");
        dependency::pack(graph, self.config.dependency())
    }

    /// Run the nested layout over an assembled graph.
    pub fn nested_view(&self, graph: &TopologyGraph, options: &NestedOptions) -> NestedViewData {
        info!(deep = options.deep, reverse = options.reverse; "Building nested view");
        nested::build(graph, self.config.nested(), options)
    }
}
