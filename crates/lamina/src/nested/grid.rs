//! Root grid slot allocation.
//!
//! Every layout root asks the grid operator for an `(i, j)` slot. The
//! operator first consults the persisted slot map; on miss it allocates the
//! next free slot in row-major order over a fixed-size grid and advances a
//! cursor, wrapping rows. Absolute pixel coordinates come from precomputed
//! coordinate arrays, either persisted or synthesized from the configured
//! grid shape and interval.
//!
//! The allocation cursor is the only mutable state of a layout run; it is
//! scoped to one operator instance and never shared.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use crate::{
    config::NestedConfig,
    nested::layout_file::{GridPositions, GridSlot, LayoutEntry},
};

/// Allocates root grid slots and maps them to absolute coordinates.
#[derive(Debug)]
pub struct GridOperator {
    x_grids: Vec<f64>,
    y_grids: Vec<f64>,
    persisted: IndexMap<String, GridSlot>,
    assigned: IndexMap<String, GridSlot>,
    occupied: HashSet<(usize, usize)>,
    cursor: usize,
}

impl GridOperator {
    /// Build an operator from the config defaults, overridden by a
    /// persisted layout entry where present.
    pub fn new(config: &NestedConfig, persisted: Option<&LayoutEntry>) -> Self {
        let entry = persisted.cloned().unwrap_or_default();

        // a zero-sized configured grid still needs one slot
        let x_grids = if entry.grid.x.is_empty() {
            synthetic_coordinates(config.grid_columns.max(1), config.grid_interval)
        } else {
            entry.grid.x
        };
        let y_grids = if entry.grid.y.is_empty() {
            synthetic_coordinates(config.grid_rows.max(1), config.grid_interval)
        } else {
            entry.grid.y
        };

        GridOperator {
            x_grids,
            y_grids,
            persisted: entry.layout,
            assigned: IndexMap::new(),
            occupied: HashSet::new(),
            cursor: 0,
        }
    }

    /// Absolute coordinates for the root at `root_path`.
    pub fn position_for(&mut self, root_path: &str) -> (f64, f64) {
        let slot = self.slot_for(root_path);
        (self.x_grids[slot.i], self.y_grids[slot.j])
    }

    fn slot_for(&mut self, root_path: &str) -> GridSlot {
        let slot = match self.persisted.get(root_path) {
            Some(&slot) => GridSlot {
                i: slot.i.min(self.x_grids.len() - 1),
                j: slot.j.min(self.y_grids.len() - 1),
            },
            None => self.next_free_slot(),
        };
        self.occupied.insert((slot.i, slot.j));
        self.assigned.insert(root_path.to_string(), slot);
        debug!(root = root_path, i = slot.i, j = slot.j; "Grid slot assigned");
        slot
    }

    fn next_free_slot(&mut self) -> GridSlot {
        let columns = self.x_grids.len();
        let total = columns * self.y_grids.len();

        for _ in 0..total {
            let ordinal = self.cursor % total;
            self.cursor += 1;
            let slot = (ordinal % columns, ordinal / columns);
            if !self.occupied.contains(&slot) {
                return GridSlot {
                    i: slot.0,
                    j: slot.1,
                };
            }
        }

        // Grid exhausted: wrap and reuse slots round-robin.
        let ordinal = self.cursor % total;
        self.cursor += 1;
        GridSlot {
            i: ordinal % columns,
            j: ordinal / columns,
        }
    }

    /// The resolved coordinate arrays, for the view output.
    pub fn positions(&self) -> GridPositions {
        GridPositions {
            x: self.x_grids.clone(),
            y: self.y_grids.clone(),
        }
    }

    /// The updated slot assignments and grid, for persisting back.
    pub fn to_layout_entry(&self) -> LayoutEntry {
        LayoutEntry {
            layout: self.assigned.clone(),
            grid: self.positions(),
        }
    }
}

fn synthetic_coordinates(count: usize, interval: f64) -> Vec<f64> {
    (0..count).map(|i| (i + 1) as f64 * interval).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;

    #[test]
    fn default_grid_allocates_row_major() {
        let config = NestedConfig::default();
        let mut grid = GridOperator::new(&config, None);

        assert_eq!(grid.position_for("a"), (200.0, 200.0));
        assert_eq!(grid.position_for("b"), (400.0, 200.0));
        assert_eq!(grid.position_for("c"), (600.0, 200.0));
        assert_eq!(grid.position_for("d"), (800.0, 200.0));
        // first row is full, wrap to the next row
        assert_eq!(grid.position_for("e"), (200.0, 400.0));
    }

    #[test]
    fn persisted_slots_win_and_block_the_cursor() {
        let config = NestedConfig::default();
        let entry: LayoutEntry = serde_json::from_value(serde_json::json!({
            "layout": { "a": { "i": 0, "j": 0 } },
            "grid": {}
        }))
        .unwrap();
        let mut grid = GridOperator::new(&config, Some(&entry));

        assert_eq!(grid.position_for("a"), (200.0, 200.0));
        // the allocated slot (0, 0) is occupied, so "b" skips it
        assert_eq!(grid.position_for("b"), (400.0, 200.0));
    }

    #[test]
    fn persisted_grid_overrides_coordinates() {
        let config = NestedConfig::default();
        let entry: LayoutEntry = serde_json::from_value(serde_json::json!({
            "layout": {},
            "grid": { "x": [50.0, 100.0], "y": [10.0] }
        }))
        .unwrap();
        let mut grid = GridOperator::new(&config, Some(&entry));

        let (x, y) = grid.position_for("a");
        assert_approx_eq!(f64, x, 50.0);
        assert_approx_eq!(f64, y, 10.0);
    }

    #[test]
    fn zero_sized_grid_config_still_allocates() {
        let config = NestedConfig {
            grid_columns: 0,
            grid_rows: 0,
            ..NestedConfig::default()
        };
        let mut grid = GridOperator::new(&config, None);

        // the single synthesized slot is reused round-robin
        assert_eq!(grid.position_for("a"), (200.0, 200.0));
        assert_eq!(grid.position_for("b"), (200.0, 200.0));
    }

    #[test]
    fn layout_entry_round_trips_assignments() {
        let config = NestedConfig::default();
        let mut grid = GridOperator::new(&config, None);
        grid.position_for("layer1/a");
        grid.position_for("layer1/b");

        let entry = grid.to_layout_entry();
        assert_eq!(entry.layout.len(), 2);
        assert_eq!(entry.layout["layer1/a"], GridSlot { i: 0, j: 0 });
        assert_eq!(entry.layout["layer1/b"], GridSlot { i: 1, j: 0 });
        assert_eq!(entry.grid.x.len(), config.grid_columns);
    }
}
