//! Per-layer attribute value objects.
//!
//! Each entity kind carries a tagged attribute enum whose variant is chosen
//! once at construction from the layer's detected kind. Generic layers
//! carry no attribute payload (serialized as `null`). Every field that is
//! absent in the input falls back to a documented default; missing fields
//! are a normal condition here, not an error.

use serde::Serialize;
use serde_json::Value;

use crate::value::{string_of, string_or, strings_of, u64_or, items};

/// Default metric for an L3 prefix or link when the document omits one.
pub const DEFAULT_METRIC: u64 = 100;

/// Default maximum frame size for an L2 term point.
pub const DEFAULT_MAX_FRAME_SIZE: u64 = 1500;

/// Placeholder MAC address for an L2 term point without one.
pub const DEFAULT_MAC_ADDR: &str = "xx:xx:xx:xx:xx:xx";

const L3_NETWORK_ATTR_KEY: &str = "ietf-l3-unicast-topology:l3-topology-attributes";
const L3_NODE_ATTR_KEY: &str = "ietf-l3-unicast-topology:l3-node-attributes";
const L3_TP_ATTR_KEY: &str = "ietf-l3-unicast-topology:l3-termination-point-attributes";
const L3_LINK_ATTR_KEY: &str = "ietf-l3-unicast-topology:l3-link-attributes";
const L2_NETWORK_ATTR_KEY: &str = "ietf-l2-topology:l2-network-attributes";
const L2_NODE_ATTR_KEY: &str = "ietf-l2-topology:l2-node-attributes";
const L2_TP_ATTR_KEY: &str = "ietf-l2-topology:l2-termination-point-attributes";
const L2_LINK_ATTR_KEY: &str = "ietf-l2-topology:l2-link-attributes";

/// Attribute of a network (layer).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NetworkAttr {
    Generic,
    L2(L2NetworkAttr),
    L3(L3NetworkAttr),
}

/// Attribute of a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeAttr {
    Generic,
    L2(L2NodeAttr),
    L3(L3NodeAttr),
}

/// Attribute of a term point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TpAttr {
    Generic,
    L2(L2TpAttr),
    L3(L3TpAttr),
}

/// Attribute of a link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LinkAttr {
    Generic,
    L2(L2LinkAttr),
    L3(L3LinkAttr),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L2NetworkAttr {
    pub name: String,
    pub flag: Vec<String>,
}

impl L2NetworkAttr {
    pub fn new(network: &Value) -> Self {
        let attr = network.get(L2_NETWORK_ATTR_KEY).unwrap_or(&Value::Null);
        L2NetworkAttr {
            name: string_of(attr, "name"),
            flag: strings_of(attr, "flag"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L3NetworkAttr {
    pub name: String,
    pub flag: Vec<String>,
}

impl L3NetworkAttr {
    pub fn new(network: &Value) -> Self {
        let attr = network.get(L3_NETWORK_ATTR_KEY).unwrap_or(&Value::Null);
        L3NetworkAttr {
            name: string_of(attr, "name"),
            flag: strings_of(attr, "flag"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L2NodeAttr {
    pub name: String,
    pub description: String,
    pub mgmt_addrs: Vec<String>,
    pub mgmt_vid: u64,
    pub flag: Vec<String>,
}

impl L2NodeAttr {
    pub fn new(node: &Value) -> Self {
        let attr = node.get(L2_NODE_ATTR_KEY).unwrap_or(&Value::Null);
        L2NodeAttr {
            name: string_of(attr, "name"),
            description: string_of(attr, "description"),
            mgmt_addrs: strings_of(attr, "management-address"),
            mgmt_vid: u64_or(attr, "management-vid", 0),
            flag: strings_of(attr, "flag"),
        }
    }
}

/// One routed prefix owned by an L3 node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L3Prefix {
    pub prefix: String,
    pub metric: u64,
    pub flag: Vec<String>,
}

impl L3Prefix {
    pub fn new(prefix: &Value) -> Self {
        L3Prefix {
            prefix: string_of(prefix, "prefix"),
            metric: u64_or(prefix, "metric", DEFAULT_METRIC),
            flag: strings_of(prefix, "flag"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L3NodeAttr {
    pub name: String,
    pub flag: Vec<String>,
    pub router_id: Vec<String>,
    pub prefixes: Vec<L3Prefix>,
}

impl L3NodeAttr {
    pub fn new(node: &Value) -> Self {
        let attr = node.get(L3_NODE_ATTR_KEY).unwrap_or(&Value::Null);
        L3NodeAttr {
            name: string_of(attr, "name"),
            flag: strings_of(attr, "flag"),
            router_id: strings_of(attr, "router-id"),
            prefixes: items(attr, "prefix").map(L3Prefix::new).collect(),
        }
    }
}

/// VLAN id/name pair on an L2 term point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VlanIdName {
    pub vlan_id: u64,
    pub vlan_name: String,
}

impl VlanIdName {
    pub fn new(vlan: &Value) -> Self {
        VlanIdName {
            vlan_id: u64_or(vlan, "vlan-id", 0),
            vlan_name: string_of(vlan, "vlan-name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L2TpAttr {
    pub description: String,
    pub max_frame_size: u64,
    pub mac_addr: String,
    pub eth_encap: String,
    pub port_vlan_id: u64,
    pub vlan_id_names: Vec<VlanIdName>,
    pub tp_state: String,
}

impl L2TpAttr {
    pub fn new(tp: &Value) -> Self {
        let attr = tp.get(L2_TP_ATTR_KEY).unwrap_or(&Value::Null);
        L2TpAttr {
            description: string_of(attr, "description"),
            max_frame_size: u64_or(attr, "maximum-frame-size", DEFAULT_MAX_FRAME_SIZE),
            mac_addr: string_or(attr, "mac-address", DEFAULT_MAC_ADDR),
            eth_encap: string_of(attr, "eth-encapsulation"),
            port_vlan_id: u64_or(attr, "port-vlan-id", 0),
            vlan_id_names: items(attr, "vlan-id-name").map(VlanIdName::new).collect(),
            tp_state: string_or(attr, "tp-state", "in-use"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L3TpAttr {
    pub ip_addrs: Vec<String>,
}

impl L3TpAttr {
    pub fn new(tp: &Value) -> Self {
        let attr = tp.get(L3_TP_ATTR_KEY).unwrap_or(&Value::Null);
        L3TpAttr {
            ip_addrs: strings_of(attr, "ip-address"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L2LinkAttr {
    pub name: String,
    pub flag: Vec<String>,
    pub rate: u64,
    pub delay: u64,
}

impl L2LinkAttr {
    pub fn new(link: &Value) -> Self {
        let attr = link.get(L2_LINK_ATTR_KEY).unwrap_or(&Value::Null);
        L2LinkAttr {
            name: string_of(attr, "name"),
            flag: strings_of(attr, "flag"),
            rate: u64_or(attr, "rate", 0),
            delay: u64_or(attr, "delay", 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct L3LinkAttr {
    pub name: String,
    pub flag: Vec<String>,
    pub metric: u64,
}

impl L3LinkAttr {
    pub fn new(link: &Value) -> Self {
        let attr = link.get(L3_LINK_ATTR_KEY).unwrap_or(&Value::Null);
        L3LinkAttr {
            name: string_of(attr, "name"),
            flag: strings_of(attr, "flag"),
            metric: u64_or(attr, "metric", DEFAULT_METRIC),
        }
    }
}
