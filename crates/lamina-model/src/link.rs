//! A directed topology edge between two term points.

use serde_json::Value;

use lamina_core::{DiffState, path};

use crate::{
    attribute::{L2LinkAttr, L3LinkAttr, LinkAttr},
    network::LayerKind,
    support::SupportingLink,
    value::{diff_state_of, items, string_of},
};

/// A directed edge between two term points, identified in the input by
/// name pairs and resolved to paths at construction time.
///
/// Path resolution is purely positional: the link is valid even when its
/// endpoint node appears later in the document than the link itself.
#[derive(Debug, Clone)]
pub struct Link {
    pub name: String,
    pub path: String,
    pub source_path: String,
    pub target_path: String,
    pub supports: Vec<SupportingLink>,
    pub attribute: LinkAttr,
    pub diff_state: DiffState,
}

impl Link {
    /// Build a link from its JSON value within `network_path`.
    pub fn new(value: &Value, network_path: &str, layer_kind: LayerKind) -> Self {
        let name = string_of(value, "link-id");
        let empty = Value::Null;

        let source = value.get("source").unwrap_or(&empty);
        let source_path = endpoint_path(
            network_path,
            &string_of(source, "source-node"),
            &string_of(source, "source-tp"),
        );

        let destination = value.get("destination").unwrap_or(&empty);
        let target_path = endpoint_path(
            network_path,
            &string_of(destination, "dest-node"),
            &string_of(destination, "dest-tp"),
        );

        let attribute = match layer_kind {
            LayerKind::Generic => LinkAttr::Generic,
            LayerKind::L2 => LinkAttr::L2(L2LinkAttr::new(value)),
            LayerKind::L3 => LinkAttr::L3(L3LinkAttr::new(value)),
        };

        let supports = items(value, "supporting-link")
            .map(SupportingLink::new)
            .collect();

        Link {
            path: path::join(network_path, &name),
            name,
            source_path,
            target_path,
            supports,
            attribute,
            diff_state: diff_state_of(value),
        }
    }
}

fn endpoint_path(network_path: &str, node: &str, tp: &str) -> String {
    path::join(&path::join(network_path, node), tp)
}
