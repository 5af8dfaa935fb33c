//! Lamina Core Types and Definitions
//!
//! This crate provides the foundational types for the Lamina multi-layer
//! topology viewer. It includes:
//!
//! - **Identity**: Packed numeric entity identities ([`identity::GraphId`])
//! - **Paths**: Topology path helpers ([`path`] module)
//! - **Diff state**: Per-entity diff tags ([`diff_state`] module)
//! - **Graph**: The uniform graph records shared by every view
//!   ([`graph::GraphNode`], [`graph::GraphLink`])
//! - **Family**: Ancestor/descendant relation tags and the [`family::Relatable`]
//!   trait consumed by the family marker

pub mod diff_state;
pub mod family;
pub mod graph;
pub mod identity;
pub mod path;

pub use diff_state::{DiffElement, DiffState};
pub use family::{FamilyRelation, Relatable, Relation};
pub use graph::{GraphLink, GraphNode, LinkKind, NodeKind};
pub use identity::GraphId;
