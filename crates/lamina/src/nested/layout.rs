//! Recursive nested-tree layout.
//!
//! Converts the (possibly non-tree) DAG into a layout tree and computes
//! non-overlapping bounding boxes. Each root gets a grid slot; its subtree
//! is then laid out depth first: term points in a single row at the top of
//! the node box, countable children left to right below them, the box
//! growing to contain both.
//!
//! The tree invariant is enforced by the countable-child rule: a child is
//! recursed into only while it has exactly one parent node. Multi-parent
//! children are cloned per parent in deep mode and left unplaced in
//! shallow mode. A visited set guards against cyclic children chains;
//! revisiting is a no-op.

use std::collections::HashSet;

use log::debug;

use crate::{
    config::NestedConfig,
    nested::{arena::Arena, grid::GridOperator},
};

pub(crate) struct LayoutEngine<'cfg> {
    config: &'cfg NestedConfig,
    deep: bool,
}

impl<'cfg> LayoutEngine<'cfg> {
    pub(crate) fn new(config: &'cfg NestedConfig, deep: bool) -> Self {
        LayoutEngine { config, deep }
    }

    /// Lay out every root subtree.
    pub(crate) fn run(&self, arena: &mut Arena, grid: &mut GridOperator) {
        let roots = arena.root_indices();
        debug!(roots_count = roots.len(), deep = self.deep; "Laying out nested roots");

        let mut visited = HashSet::new();
        for root in roots {
            let root_path = arena.nodes[root].node.path.clone();
            let (x, y) = grid.position_for(&root_path);
            self.layout_node(arena, root, x, y, 0, &mut visited);
        }
    }

    /// Lay out one node at `(base_x, base_y)`, returning its box size.
    fn layout_node(
        &self,
        arena: &mut Arena,
        index: usize,
        base_x: f64,
        base_y: f64,
        layer_order: u64,
        visited: &mut HashSet<usize>,
    ) -> (f64, f64) {
        visited.insert(index);

        // Term points sit one render layer above their node, children two.
        let tp_count = self.place_term_points(arena, index, base_x, base_y, layer_order + 1);
        let children = self.countable_children(arena, index, visited);

        if children.is_empty() {
            let width = self.config.tp_row_width(tp_count);
            let height = self.config.tp_row_height();
            arena.nodes[index].set_rect(base_x, base_y, width, height, layer_order);
            return (width, height);
        }

        let mut child_x = base_x + self.config.node_pad;
        let child_y = base_y + self.config.tp_row_height();
        let mut children_width = 0.0;
        let mut max_child_height: f64 = 0.0;

        for child in children {
            let (width, height) =
                self.layout_node(arena, child, child_x, child_y, layer_order + 2, visited);
            child_x += width + self.config.node_pad;
            children_width += width + self.config.node_pad;
            max_child_height = max_child_height.max(height);
        }

        let width = self
            .config
            .tp_row_width(tp_count)
            .max(children_width + self.config.node_pad);
        let height = self.config.tp_row_height() + max_child_height + self.config.node_pad;
        arena.nodes[index].set_rect(base_x, base_y, width, height, layer_order);
        (width, height)
    }

    /// Place the node's own term points along a single row.
    fn place_term_points(
        &self,
        arena: &mut Arena,
        node_index: usize,
        base_x: f64,
        base_y: f64,
        layer_order: u64,
    ) -> usize {
        let tps = arena.tp_indices_of(node_index);
        for (position, &tp) in tps.iter().enumerate() {
            let cx = base_x
                + self.config.node_pad
                + self.config.r
                + position as f64 * (2.0 * self.config.r + self.config.tp_interval);
            let cy = base_y + self.config.node_pad + self.config.r;
            arena.nodes[tp].set_circle(cx, cy, self.config.r, layer_order);
        }
        tps.len()
    }

    /// Children that count toward this node's subtree.
    ///
    /// A child counts as-is only while it has exactly one parent node and
    /// has never been split. Anything else is cloned for this parent in
    /// deep mode and excluded in shallow mode. Already-visited children
    /// (cyclic chains) are never re-entered.
    fn countable_children(
        &self,
        arena: &mut Arena,
        index: usize,
        visited: &HashSet<usize>,
    ) -> Vec<usize> {
        let child_paths: Vec<String> = arena.nodes[index]
            .node
            .child_node_paths()
            .map(str::to_string)
            .collect();

        let mut countable = Vec::new();
        for child_path in child_paths {
            let Some(child) = arena.index_of(&child_path) else {
                continue;
            };
            if visited.contains(&child) {
                continue;
            }

            let single_parent = arena.nodes[child].parent_node_count() == 1;
            if single_parent && arena.nodes[child].split == 0 {
                countable.push(child);
            } else if self.deep && arena.nodes[child].parent_node_count() >= 1 {
                countable.push(arena.split_by_parent(child, index));
            }
        }
        countable
    }
}
