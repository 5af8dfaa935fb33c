//! Topology model builder for the Lamina viewer.
//!
//! This crate turns an RFC-8345-style JSON document (networks → nodes →
//! termination points → links, with cross-layer supporting references) into
//! typed [`Network`] entities. Heterogeneous per-layer attribute schemas
//! (generic, L2, L3) are normalized into tagged attribute enums, selected
//! once per layer by scanning the declared `network-types` subtree.
//!
//! Construction order is Networks → Nodes → TermPoints → Links: link
//! endpoint paths are computed from ordinal position, not from existence of
//! the target, so forward references are safe.
//!
//! Missing attribute fields fall back to documented defaults rather than
//! erroring; the only hard failure at this stage is a document whose
//! required top-level tag is absent.

pub mod attribute;
pub mod error;
pub mod link;
pub mod network;
pub mod node;
pub mod support;
pub mod term_point;

pub(crate) mod value;

pub use error::ModelError;
pub use link::Link;
pub use network::{LayerKind, Network};
pub use node::Node;
pub use term_point::TermPoint;

use log::{debug, info};
use serde_json::Value;

/// Top-level tag a topology document must carry.
pub const NETWORKS_TAG: &str = "ietf-network:networks";

/// Build every layer of a topology document.
///
/// # Errors
///
/// Returns [`ModelError::MalformedInput`] when the document does not carry
/// the [`NETWORKS_TAG`] object or its `network` list.
pub fn build_networks(document: &Value) -> Result<Vec<Network>, ModelError> {
    let container = document
        .get(NETWORKS_TAG)
        .ok_or_else(|| ModelError::MalformedInput(format!("missing top-level tag {NETWORKS_TAG}")))?;

    let layers = container
        .get("network")
        .and_then(Value::as_array)
        .ok_or_else(|| ModelError::MalformedInput("missing network list".to_string()))?;

    info!(layers_count = layers.len(); "Building topology model");

    let networks = layers
        .iter()
        .enumerate()
        .map(|(index, layer)| Network::new(layer, index as u64 + 1))
        .collect::<Vec<_>>();

    for network in &networks {
        debug!(
            layer = network.name,
            kind:? = network.layer_kind,
            nodes_count = network.nodes.len(),
            links_count = network.links.len();
            "Layer built"
        );
    }

    Ok(networks)
}

/// Parse a JSON string and build every layer of it.
///
/// # Errors
///
/// Returns [`ModelError::Json`] for malformed JSON and
/// [`ModelError::MalformedInput`] for a well-formed document with the wrong
/// shape.
pub fn build_networks_str(source: &str) -> Result<Vec<Network>, ModelError> {
    let document: Value = serde_json::from_str(source)?;
    build_networks(&document)
}
