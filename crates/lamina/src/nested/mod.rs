//! Nested view: containment layout of the multi-layer topology.
//!
//! Instead of drawing support edges between layers, the nested view draws
//! supported entities *inside* their supporting entities. Roots are nodes
//! with no node-kind parents; each root claims a grid slot and its support
//! subtree is laid out recursively inside the root's box.
//!
//! Two depths are available. The shallow mode only descends into children
//! with a single parent, leaving multi-parent children unplaced. The deep
//! mode clones a multi-parent child once per parent, so every dependency is
//! rendered at the cost of duplicated boxes.

pub mod arena;
pub mod grid;
pub mod layout_file;

mod layout;

use std::collections::HashSet;

use serde::Serialize;

use lamina_core::{GraphLink, LinkKind};

use crate::{
    TargetSpec,
    assembler::TopologyGraph,
    config::NestedConfig,
    family::mark_family,
    nested::{
        arena::{Arena, NestedNode},
        grid::GridOperator,
        layout::LayoutEngine,
        layout_file::{GridPositions, LayoutEntry, LayoutFile},
    },
};

/// Knobs of one nested layout run.
#[derive(Debug, Clone, Default)]
pub struct NestedOptions {
    /// Swap the parent/child roles so the lowest layer forms the roots
    /// instead of the uppermost.
    pub reverse: bool,
    /// Clone multi-parent children per parent instead of dropping them.
    pub deep: bool,
    /// Persisted grid assignments to honor, keyed by mode.
    pub layout: Option<LayoutFile>,
    /// Entity whose family to mark after placement.
    pub target: Option<TargetSpec>,
}

/// The serialized output of a nested layout run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedViewData {
    /// Placed records, ordered by render depth (outermost first).
    pub nodes: Vec<NestedNode>,
    /// Records the layout run never placed.
    pub inoperative_nodes: Vec<NestedNode>,
    /// Links whose both endpoints were placed.
    pub links: Vec<GraphLink>,
    /// Pixel coordinates of every grid row and column.
    pub grid: GridPositions,
    /// Grid assignments after this run, for persistence. Not serialized
    /// with the view payload.
    #[serde(skip)]
    pub updated_layout: LayoutEntry,
}

/// Run the nested layout over an assembled topology graph.
pub fn build(
    graph: &TopologyGraph,
    config: &NestedConfig,
    options: &NestedOptions,
) -> NestedViewData {
    let entry = options
        .layout
        .as_ref()
        .map(|file| file.entry(options.deep, options.reverse));

    let mut arena = Arena::from_graph(graph, options.reverse);
    let mut grid = GridOperator::new(config, entry);
    LayoutEngine::new(config, options.deep).run(&mut arena, &mut grid);

    if let Some(target) = &options.target {
        // Deep-mode clones sit at the end of the arena, so the marker's
        // reverse scans (by name, or by split-insensitive path when a
        // layer is given) prefer an operative clone over its unplaced
        // original.
        mark_family(&mut arena.nodes, &target.name, target.layer.as_deref());
    }

    let links = materialize_links(graph, &arena);
    let grid_positions = grid.positions();
    let updated_layout = grid.to_layout_entry();

    let (mut nodes, inoperative_nodes): (Vec<_>, Vec<_>) =
        arena.nodes.into_iter().partition(NestedNode::operative);
    nodes.sort_by_key(|node| node.layer_order);

    NestedViewData {
        nodes,
        inoperative_nodes,
        links,
        grid: grid_positions,
        updated_layout,
    }
}

/// Keep tp-tp and node-tp links between placed endpoints, and synthesize a
/// support-tp link for every placed term point pair on a support edge.
fn materialize_links(graph: &TopologyGraph, arena: &Arena) -> Vec<GraphLink> {
    let operative: HashSet<&str> = arena
        .nodes
        .iter()
        .filter(|node| node.operative())
        .map(|node| node.node.path.as_str())
        .collect();

    let mut links: Vec<GraphLink> = graph
        .links()
        .filter(|link| {
            operative.contains(link.source_path.as_str())
                && operative.contains(link.target_path.as_str())
        })
        .cloned()
        .collect();

    for tp in arena.nodes.iter().filter(|node| node.is_tp()) {
        if !operative.contains(tp.node.path.as_str()) {
            continue;
        }
        for child_path in tp.node.child_tp_paths() {
            if !operative.contains(child_path) {
                continue;
            }
            let Some(child_index) = arena.index_of(child_path) else {
                continue;
            };
            let child = &arena.nodes[child_index];
            let name = format!("{}>{}", tp.node.path, child.node.path);
            links.push(GraphLink {
                kind: LinkKind::SupportTp,
                path: name.clone(),
                name,
                source_path: tp.node.path.clone(),
                target_path: child.node.path.clone(),
                source_id: tp.node.id,
                target_id: child.node.id,
                attribute: serde_json::Value::Null,
                diff_state: tp.node.diff_state.clone(),
            });
        }
    }

    links
}
