//! Command-line argument definitions for the Lamina CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the view to compute, control nested
//! layout options, and configure logging verbosity.

use clap::{Parser, ValueEnum};

/// Which view payload to compute from the topology document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// The uniform per-layer graph.
    Topology,
    /// The dependency grid layout.
    Dependency,
    /// The nested containment layout.
    Nested,
}

/// Command-line arguments for the Lamina topology layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input RFC 8345 networks JSON file
    #[arg(help = "Path to the input topology JSON file")]
    pub input: String,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// View to compute
    #[arg(long, value_enum, default_value_t = View::Topology)]
    pub view: View,

    /// Nested view: recurse from the lowest layer upward
    #[arg(long)]
    pub reverse: bool,

    /// Nested view: clone multi-parent nodes instead of dropping them
    #[arg(long)]
    pub deep: bool,

    /// Path to a persisted layout JSON file for the nested view
    #[arg(long)]
    pub layout: Option<String>,

    /// Write the updated grid assignments back to the layout file
    #[arg(long)]
    pub save_layout: bool,

    /// Name of the node or term point whose family to mark
    #[arg(long)]
    pub target: Option<String>,

    /// Network layer to search for the target
    #[arg(long)]
    pub target_layer: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
