//! Configuration types for the Lamina layout engines.
//!
//! All geometry constants are fixed design parameters, not computed values;
//! they live in serde-deserializable config structs so a caller (or the
//! CLI's TOML config) can override them while the defaults reproduce the
//! documented layout formulas.
//!
//! - [`AppConfig`] - Top-level configuration combining both view configs.
//! - [`DependencyConfig`] - Paddings and radii of the dependency view.
//! - [`NestedConfig`] - Paddings, radii, and grid shape of the nested view.

use serde::Deserialize;

/// Top-level configuration combining the per-view geometry settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Dependency view configuration section.
    #[serde(default)]
    dependency: DependencyConfig,

    /// Nested view configuration section.
    #[serde(default)]
    nested: NestedConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from the per-view configurations.
    pub fn new(dependency: DependencyConfig, nested: NestedConfig) -> Self {
        Self { dependency, nested }
    }

    /// Returns the dependency view configuration.
    pub fn dependency(&self) -> &DependencyConfig {
        &self.dependency
    }

    /// Returns the nested view configuration.
    pub fn nested(&self) -> &NestedConfig {
        &self.nested
    }
}

/// Geometry constants of the dependency view.
///
/// Node boxes are sized from their term point count, term point circles are
/// centered inside the box, layers stack vertically and nodes flow
/// horizontally within a layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Term point circle radius.
    pub tp_r: f64,
    /// Horizontal padding between the node border and the first/last circle.
    pub tp_x_pad1: f64,
    /// Horizontal padding between adjacent circles.
    pub tp_x_pad2: f64,
    /// Vertical padding between the node top and the circle row.
    pub tp_y_pad1: f64,
    /// Vertical padding below the circle row.
    pub tp_y_pad2: f64,
    /// Horizontal padding between adjacent node boxes.
    pub node_x_pad: f64,
    /// Left margin where the first node box of every layer starts.
    pub node_x_base: f64,
    /// Top margin above the first layer row.
    pub layer_y_pad1: f64,
    /// Vertical padding between layer rows.
    pub layer_y_pad2: f64,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            tp_r: 10.0,
            tp_x_pad1: 12.0,
            tp_x_pad2: 12.0,
            tp_y_pad1: 12.0,
            tp_y_pad2: 24.0,
            node_x_pad: 40.0,
            node_x_base: 100.0,
            layer_y_pad1: 50.0,
            layer_y_pad2: 30.0,
        }
    }
}

impl DependencyConfig {
    /// Width of a node box holding `tp_count` term points.
    ///
    /// A node with zero term points is clamped to a one-tp-equivalent box
    /// so it never collapses to zero size.
    pub fn node_width(&self, tp_count: usize) -> f64 {
        let count = tp_count.max(1) as f64;
        2.0 * self.tp_x_pad1 + 2.0 * self.tp_r * count + self.tp_x_pad2 * (count - 1.0)
    }

    /// Height of every node box (independent of term point count).
    pub fn node_height(&self) -> f64 {
        self.tp_y_pad1 + 2.0 * self.tp_r + self.tp_y_pad2
    }

    /// Height of a layer row (one node box).
    pub fn layer_height(&self) -> f64 {
        self.node_height()
    }
}

/// Geometry constants of the nested view.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NestedConfig {
    /// Term point circle radius.
    pub r: f64,
    /// Horizontal gap between adjacent term point circles.
    pub tp_interval: f64,
    /// Padding between a node border and its contents (circles, children).
    pub node_pad: f64,
    /// Number of root grid columns.
    pub grid_columns: usize,
    /// Number of root grid rows.
    pub grid_rows: usize,
    /// Distance between adjacent grid coordinates, in layout units.
    pub grid_interval: f64,
}

impl Default for NestedConfig {
    fn default() -> Self {
        Self {
            r: 10.0,
            tp_interval: 10.0,
            node_pad: 20.0,
            grid_columns: 4,
            grid_rows: 10,
            grid_interval: 200.0,
        }
    }
}

impl NestedConfig {
    /// Width of a node's term point row holding `tp_count` circles.
    ///
    /// Clamped to a one-tp-equivalent width for zero term points.
    pub fn tp_row_width(&self, tp_count: usize) -> f64 {
        let count = tp_count.max(1) as f64;
        2.0 * self.node_pad + 2.0 * self.r * count + self.tp_interval * (count - 1.0)
    }

    /// Height of a node's term point row.
    pub fn tp_row_height(&self) -> f64 {
        2.0 * self.node_pad + 2.0 * self.r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;

    #[test]
    fn zero_tp_node_width_is_clamped() {
        let config = DependencyConfig::default();
        assert_approx_eq!(f64, config.node_width(0), config.node_width(1));
        assert!(config.node_width(0) > 0.0);
    }

    #[test]
    fn node_width_grows_with_tp_count() {
        let config = DependencyConfig::default();
        for count in 1..10 {
            assert!(config.node_width(count + 1) > config.node_width(count));
        }
    }

    #[test]
    fn config_deserializes_partial_toml_shape() {
        let json = serde_json::json!({ "nested": { "grid_columns": 6 } });
        let config: AppConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.nested().grid_columns, 6);
        // untouched sections keep their defaults
        assert_approx_eq!(f64, config.dependency().tp_r, 10.0);
        assert_approx_eq!(f64, config.nested().grid_interval, 200.0);
    }
}
