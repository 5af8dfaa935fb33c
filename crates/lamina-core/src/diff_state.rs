//! Per-entity diff tags.
//!
//! When a topology document is produced by diffing two snapshots, every
//! entity may carry a `_diff_state_` object recording what happened to it
//! in the forward and backward comparison. The core carries these tags
//! through unchanged; renderers use [`DiffState::detect`] to decide whether
//! an entity is currently active.

use serde::{Deserialize, Serialize};

/// The reduced diff classification of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffElement {
    Added,
    Deleted,
    Changed,
    #[default]
    Kept,
}

/// Raw diff tags as found on an entity.
///
/// An absent `_diff_state_` key deserializes to the default (everything
/// kept). `pair` references the counterpart entity in the other snapshot
/// and is uninterpreted pass-through data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffState {
    pub forward: String,
    pub backward: String,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub pair: serde_json::Value,
}

impl DiffState {
    /// Reduce the raw tags to a single [`DiffElement`].
    ///
    /// The forward comparison wins for additions and deletions; a change on
    /// either side reports as changed; anything else (including an empty
    /// diff state) is kept.
    pub fn detect(&self) -> DiffElement {
        match self.forward.as_str() {
            "added" => DiffElement::Added,
            "deleted" => DiffElement::Deleted,
            _ if self.forward == "changed" || self.backward == "changed" => DiffElement::Changed,
            _ => DiffElement::Kept,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(forward: &str, backward: &str) -> DiffState {
        DiffState {
            forward: forward.to_string(),
            backward: backward.to_string(),
            pair: serde_json::Value::Null,
        }
    }

    #[test]
    fn forward_added_wins() {
        assert_eq!(state("added", "changed").detect(), DiffElement::Added);
    }

    #[test]
    fn forward_deleted_wins() {
        assert_eq!(state("deleted", "").detect(), DiffElement::Deleted);
    }

    #[test]
    fn changed_on_either_side() {
        assert_eq!(state("changed", "").detect(), DiffElement::Changed);
        assert_eq!(state("kept", "changed").detect(), DiffElement::Changed);
    }

    #[test]
    fn empty_state_is_kept() {
        assert_eq!(DiffState::default().detect(), DiffElement::Kept);
    }

    #[test]
    fn missing_key_deserializes_to_default() {
        let state: DiffState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, DiffState::default());
    }
}
