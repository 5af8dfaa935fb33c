//! Supporting (cross-layer underlay) references.
//!
//! A supporting reference points from a higher-layer entity to the
//! lower-layer entity it is realized by. The model keeps them as typed
//! pass-through records; the assembler later turns their resolved paths
//! into downward `children` edges.

use serde::Serialize;
use serde_json::Value;

use lamina_core::path;

use crate::value::string_of;

/// Reference to a supporting network.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingNetwork {
    pub network_ref: String,
}

impl SupportingNetwork {
    pub fn new(value: &Value) -> Self {
        SupportingNetwork {
            network_ref: string_of(value, "network-ref"),
        }
    }

    /// Path of the referenced network.
    pub fn ref_path(&self) -> String {
        self.network_ref.clone()
    }
}

/// Reference to a supporting node in a lower layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingNode {
    pub network_ref: String,
    pub node_ref: String,
}

impl SupportingNode {
    pub fn new(value: &Value) -> Self {
        SupportingNode {
            network_ref: string_of(value, "network-ref"),
            node_ref: string_of(value, "node-ref"),
        }
    }

    /// Path of the referenced node.
    pub fn ref_path(&self) -> String {
        path::join(&self.network_ref, &self.node_ref)
    }
}

/// Reference to a supporting term point in a lower layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingTermPoint {
    pub network_ref: String,
    pub node_ref: String,
    pub tp_ref: String,
}

impl SupportingTermPoint {
    pub fn new(value: &Value) -> Self {
        SupportingTermPoint {
            network_ref: string_of(value, "network-ref"),
            node_ref: string_of(value, "node-ref"),
            tp_ref: string_of(value, "tp-ref"),
        }
    }

    /// Path of the referenced term point.
    pub fn ref_path(&self) -> String {
        path::join(&path::join(&self.network_ref, &self.node_ref), &self.tp_ref)
    }
}

/// Reference to a supporting link in a lower layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingLink {
    pub network_ref: String,
    pub link_ref: String,
}

impl SupportingLink {
    pub fn new(value: &Value) -> Self {
        SupportingLink {
            network_ref: string_of(value, "network-ref"),
            link_ref: string_of(value, "link-ref"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn ref_paths_join_segments() {
        let node = SupportingNode::new(&json!({
            "network-ref": "layer1",
            "node-ref": "host1"
        }));
        assert_eq!(node.ref_path(), "layer1/host1");

        let tp = SupportingTermPoint::new(&json!({
            "network-ref": "layer1",
            "node-ref": "host1",
            "tp-ref": "eth0"
        }));
        assert_eq!(tp.ref_path(), "layer1/host1/eth0");
    }
}
