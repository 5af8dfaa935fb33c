//! Small accessors over `serde_json::Value`.
//!
//! Vendor-augmented topology documents are irregular enough that typed
//! serde structs would need a deny-nothing schema per YANG module; instead
//! the builders navigate the raw value tree with these tolerant accessors.
//! Absent keys yield defaults, per the model's tolerate-missing policy.

use lamina_core::DiffState;
use serde_json::Value;

/// Key carrying per-entity diff tags.
const DIFF_STATE_KEY: &str = "_diff_state_";

/// String field, empty when absent or not a string.
pub(crate) fn string_of(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// String field with an explicit fallback.
pub(crate) fn string_or(value: &Value, key: &str, fallback: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

/// Unsigned integer field with an explicit fallback.
pub(crate) fn u64_or(value: &Value, key: &str, fallback: u64) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(fallback)
}

/// Iterate an array field, empty when absent.
pub(crate) fn items<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// A field that is either a single string or a list of strings.
///
/// YANG leaf-lists show up both ways in augmented documents.
pub(crate) fn strings_of(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(list)) => list
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Parse the `_diff_state_` tag of an entity, default when absent.
pub(crate) fn diff_state_of(value: &Value) -> DiffState {
    value
        .get(DIFF_STATE_KEY)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn absent_fields_fall_back() {
        let v = json!({});
        assert_eq!(string_of(&v, "name"), "");
        assert_eq!(string_or(&v, "name", "x"), "x");
        assert_eq!(u64_or(&v, "metric", 100), 100);
        assert_eq!(items(&v, "list").count(), 0);
        assert!(strings_of(&v, "flag").is_empty());
    }

    #[test]
    fn leaf_list_accepts_scalar_and_array() {
        let scalar = json!({ "router-id": "10.0.0.1" });
        let list = json!({ "router-id": ["10.0.0.1", "10.0.0.2"] });
        assert_eq!(strings_of(&scalar, "router-id"), vec!["10.0.0.1"]);
        assert_eq!(strings_of(&list, "router-id").len(), 2);
    }

    #[test]
    fn diff_state_parses_when_present() {
        let v = json!({ "_diff_state_": { "forward": "added" } });
        assert_eq!(diff_state_of(&v).forward, "added");
        assert_eq!(diff_state_of(&json!({})), DiffState::default());
    }
}
