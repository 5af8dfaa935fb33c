//! Uniform graph records shared by every view.
//!
//! The topology model's typed entities are flattened into [`GraphNode`] and
//! [`GraphLink`] records with a uniform shape: every node-like entity
//! (device or term point) becomes a `GraphNode`, every edge (declared link
//! or synthetic node-to-tp connection) becomes a `GraphLink`. The per-layer
//! attribute variants are carried as an opaque JSON value; the layout
//! engines never interpret them.
//!
//! `children` edges are established at construction from supporting
//! references and strictly point downward (same or lower layer). `parents`
//! is derived later by the assembler inverting `children`; it is never
//! hand-authored.

use serde::{Deserialize, Serialize};

use crate::{
    diff_state::DiffState,
    family::{FamilyRelation, Relatable},
    identity::GraphId,
    path,
};

/// Kind of a [`GraphNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A device within a layer.
    Node,
    /// A term point (interface) on a device.
    Tp,
}

/// Kind of a [`GraphLink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    /// A declared link between two term points.
    #[serde(rename = "tp-tp")]
    TpTp,
    /// A synthetic link connecting a node to one of its own term points.
    #[serde(rename = "node-tp")]
    NodeTp,
    /// A synthetic cross-layer link between a term point and a supporting
    /// term point, generated by the nested view.
    #[serde(rename = "support-tp")]
    SupportTp,
}

/// One node-like entity in the uniform graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub id: GraphId,
    pub path: String,
    pub children: Vec<String>,
    pub parents: Vec<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub attribute: serde_json::Value,
    #[serde(default)]
    pub diff_state: DiffState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilyRelation>,
}

impl GraphNode {
    /// Paths in `parents` that address nodes (not term points).
    pub fn parent_node_paths(&self) -> impl Iterator<Item = &str> {
        self.parents
            .iter()
            .map(String::as_str)
            .filter(|p| path::is_node(p))
    }

    /// Paths in `parents` that address term points.
    pub fn parent_tp_paths(&self) -> impl Iterator<Item = &str> {
        self.parents
            .iter()
            .map(String::as_str)
            .filter(|p| path::is_term_point(p))
    }

    /// Paths in `children` that address nodes (not term points).
    pub fn child_node_paths(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .map(String::as_str)
            .filter(|p| path::is_node(p))
    }

    /// Paths in `children` that address term points.
    pub fn child_tp_paths(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .map(String::as_str)
            .filter(|p| path::is_term_point(p))
    }

    /// Number of parent references that address nodes.
    ///
    /// Term-point-only parents do not make a node a non-root, and they do
    /// not count against the single-parent rule in the nested layout.
    pub fn parent_node_count(&self) -> usize {
        self.parent_node_paths().count()
    }
}

impl Relatable for GraphNode {
    fn path(&self) -> &str {
        &self.path
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[String] {
        &self.children
    }

    fn parents(&self) -> &[String] {
        &self.parents
    }

    fn set_family(&mut self, family: FamilyRelation) {
        self.family = Some(family);
    }
}

/// One edge in the uniform graph.
///
/// `source_path`/`target_path` are resolved at construction; the numeric
/// `source_id`/`target_id` are filled in by the assembler once every
/// [`GraphNode`] exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub name: String,
    pub path: String,
    pub source_path: String,
    pub target_path: String,
    pub source_id: GraphId,
    pub target_id: GraphId,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub attribute: serde_json::Value,
    #[serde(default)]
    pub diff_state: DiffState,
}
