//! CLI logic for the Lamina topology layout tool.
//!
//! This module contains the core CLI logic for the Lamina topology layout
//! tool: it reads an RFC 8345 networks JSON document, computes the selected
//! view payload, and writes it to the output file as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, View};
pub use config::ConfigError;

use std::{fs, io, path::Path};

use log::info;
use thiserror::Error;

use lamina::{
    LaminaError, NestedOptions, TargetSpec, ViewBuilder,
    nested::layout_file::LayoutFile,
};

/// The error type of a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lamina(#[from] LaminaError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the Lamina CLI application
///
/// This function processes the input topology document through the view
/// pipeline selected by `--view` and writes the resulting JSON payload to
/// the output file.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Topology parsing or assembly errors
/// - Payload serialization errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        view:? = args.view;
        "Processing topology"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = ViewBuilder::new(app_config);
    let networks = builder.parse(&source)?;

    let target = args.target.as_ref().map(|name| TargetSpec {
        name: name.clone(),
        layer: args.target_layer.clone(),
    });

    let payload = match args.view {
        View::Topology | View::Dependency => {
            let graph = builder.topology_view(&networks, target.as_ref())?;
            match args.view {
                View::Topology => serde_json::to_string_pretty(&graph)?,
                _ => serde_json::to_string_pretty(&builder.dependency_view(&graph))?,
            }
        }
        View::Nested => {
            // The nested view marks family over its own arena, so the graph
            // is assembled unmarked.
            let graph = builder.topology_view(&networks, None)?;
            let options = NestedOptions {
                reverse: args.reverse,
                deep: args.deep,
                layout: load_layout(args.layout.as_deref())?,
                target,
            };
            let view = builder.nested_view(&graph, &options);

            if args.save_layout {
                if let Some(layout_path) = &args.layout {
                    save_layout(layout_path, args, &view)?;
                }
            }

            serde_json::to_string_pretty(&view)?
        }
    };

    fs::write(&args.output, payload)?;

    info!(output_file = args.output; "View payload written");

    Ok(())
}

/// Read the persisted layout file, if one is given and exists.
///
/// A missing file is not an error: the grid falls back to synthetic
/// coordinates and the file can be created later with `--save-layout`.
fn load_layout(layout_path: Option<&str>) -> Result<Option<LayoutFile>, CliError> {
    let Some(path) = layout_path else {
        return Ok(None);
    };
    if !Path::new(path).exists() {
        info!(path = path; "Layout file not found, using synthetic grid");
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Merge this run's grid assignments back into the layout file, preserving
/// the entries of the other mode combinations.
fn save_layout(
    layout_path: &str,
    args: &Args,
    view: &lamina::NestedViewData,
) -> Result<(), CliError> {
    let mut file = load_layout(Some(layout_path))?.unwrap_or_default();

    let modes = if args.deep {
        &mut file.deep
    } else {
        &mut file.shallow
    };
    if args.reverse {
        modes.reverse = view.updated_layout.clone();
    } else {
        modes.standard = view.updated_layout.clone();
    }

    fs::write(layout_path, serde_json::to_string_pretty(&file)?)?;
    info!(path = layout_path; "Layout file updated");
    Ok(())
}
