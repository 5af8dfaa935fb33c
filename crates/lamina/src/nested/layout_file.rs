//! Persisted layout file structures.
//!
//! A topology document may have a sibling `<model>-layout.json` recording
//! root grid assignments per mode combination: `{shallow, deep}` ×
//! `{standard, reverse}`. Each leaf holds a `path → {i, j}` slot map and
//! optional grid coordinate arrays. The engine only reads `layout` and
//! `grid`; everything absent falls back to synthetic defaults, so a missing
//! or partial file is never an error.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An (i, j) grid slot ordinal assigned to a root node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSlot {
    pub i: usize,
    pub j: usize,
}

/// Absolute grid coordinate arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPositions {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// One persisted layout leaf: slot map plus coordinate arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutEntry {
    pub layout: IndexMap<String, GridSlot>,
    pub grid: GridPositions,
}

/// Standard and reverse direction entries of one nesting mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutModes {
    pub standard: LayoutEntry,
    pub reverse: LayoutEntry,
}

/// The whole persisted layout file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutFile {
    pub shallow: LayoutModes,
    pub deep: LayoutModes,
}

impl LayoutFile {
    /// The entry for one mode combination.
    pub fn entry(&self, deep: bool, reverse: bool) -> &LayoutEntry {
        let modes = if deep { &self.deep } else { &self.shallow };
        if reverse { &modes.reverse } else { &modes.standard }
    }
}
