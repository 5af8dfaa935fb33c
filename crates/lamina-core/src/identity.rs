//! Packed numeric identities for graph entities.
//!
//! Every network, node, and term point gets a single integer identity that
//! packs three ordinals: `layer * 10000 + node * 100 + tp`. Ordinals are
//! 1-based, so a tp ordinal of zero unambiguously marks a node-type entry
//! and a node ordinal of zero marks a network. The dependency view decodes
//! these ordinals with integer division for its grid math, which makes the
//! packing part of the public contract rather than an implementation detail.

use serde::{Deserialize, Serialize};

/// Packed numeric identity of a graph entity.
///
/// # Examples
///
/// ```
/// # use lamina_core::identity::GraphId;
/// let id = GraphId::network(2).node(3).term_point(1);
/// assert_eq!(id.value(), 20301);
/// assert_eq!(id.layer_ordinal(), 2);
/// assert_eq!(id.node_ordinal(), 3);
/// assert_eq!(id.tp_ordinal(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(u64);

/// Distance between consecutive layer ordinals in the packed value.
const LAYER_STRIDE: u64 = 10_000;

/// Distance between consecutive node ordinals in the packed value.
const NODE_STRIDE: u64 = 100;

impl GraphId {
    /// Identity of a network (layer), from its 1-based ordinal.
    pub fn network(layer_ordinal: u64) -> Self {
        GraphId(layer_ordinal * LAYER_STRIDE)
    }

    /// Identity of a node within this network, from its 1-based ordinal.
    ///
    /// # Panics
    /// Panics in debug mode when the ordinal overflows its two decimal
    /// digits; topologies that large are beyond the identity scheme.
    pub fn node(self, node_ordinal: u64) -> Self {
        debug_assert!(node_ordinal < LAYER_STRIDE / NODE_STRIDE);
        GraphId(self.0 + node_ordinal * NODE_STRIDE)
    }

    /// Identity of a term point on this node, from its 1-based ordinal.
    pub fn term_point(self, tp_ordinal: u64) -> Self {
        debug_assert!(tp_ordinal < NODE_STRIDE);
        GraphId(self.0 + tp_ordinal)
    }

    /// The raw packed value.
    pub fn value(self) -> u64 {
        self.0
    }

    /// 1-based ordinal of the layer this entity belongs to.
    pub fn layer_ordinal(self) -> u64 {
        self.0 / LAYER_STRIDE
    }

    /// 1-based ordinal of the node within its layer, zero for networks.
    pub fn node_ordinal(self) -> u64 {
        (self.0 % LAYER_STRIDE) / NODE_STRIDE
    }

    /// 1-based ordinal of the term point on its node, zero for node entries.
    pub fn tp_ordinal(self) -> u64 {
        self.0 % NODE_STRIDE
    }

    /// Whether this identity belongs to a node-type entry (tp ordinal zero).
    pub fn is_node(self) -> bool {
        self.tp_ordinal() == 0
    }
}

impl std::fmt::Display for GraphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn network_identity_is_layer_stride() {
        assert_eq!(GraphId::network(1).value(), 10_000);
        assert_eq!(GraphId::network(3).value(), 30_000);
    }

    #[test]
    fn node_entry_has_zero_tp_ordinal() {
        let id = GraphId::network(1).node(2);
        assert_eq!(id.value(), 10_200);
        assert!(id.is_node());
        assert_eq!(id.tp_ordinal(), 0);
    }

    #[test]
    fn tp_entry_is_not_a_node() {
        let id = GraphId::network(1).node(2).term_point(3);
        assert!(!id.is_node());
    }

    proptest! {
        #[test]
        fn packing_round_trips(layer in 1u64..50, node in 1u64..100, tp in 0u64..100) {
            let id = GraphId::network(layer).node(node).term_point(tp);
            prop_assert_eq!(id.layer_ordinal(), layer);
            prop_assert_eq!(id.node_ordinal(), node);
            prop_assert_eq!(id.tp_ordinal(), tp);
        }
    }
}
