//! Deep merge for JSON configuration values.
//!
//! Objects are merged key by key; everything else in the overlay replaces
//! the base. Arrays follow the [`ArrayMerge`] policy.

use serde_json::{Map, Value};

/// How arrays present in both values are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ArrayMerge {
    /// Base elements followed by overlay elements.
    #[default]
    Concat,
    /// Overlay array replaces the base array.
    Replace,
}

impl ArrayMerge {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "concat" => Some(ArrayMerge::Concat),
            "replace" => Some(ArrayMerge::Replace),
            _ => None,
        }
    }
}

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// # Example
/// ```
/// use serde_json::json;
/// use layered_configurator::config::{ArrayMerge, deep_merge};
///
/// let base = json!({
///     "server": { "port": 8080, "host": "localhost" },
///     "features": ["a", "b"]
/// });
/// let overlay = json!({
///     "server": { "port": 9000 },
///     "features": ["c"]
/// });
/// let result = deep_merge(base, overlay, ArrayMerge::Concat);
/// assert_eq!(result, json!({
///     "server": { "port": 9000, "host": "localhost" },
///     "features": ["a", "b", "c"]
/// }));
/// ```
pub fn deep_merge(base: Value, overlay: Value, arrays: ArrayMerge) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_maps(base_map, overlay_map, arrays))
        }
        (Value::Array(mut base_items), Value::Array(overlay_items))
            if arrays == ArrayMerge::Concat =>
        {
            base_items.extend(overlay_items);
            Value::Array(base_items)
        }
        (_, overlay) => overlay,
    }
}

/// Deep merge two objects key by key, with `overlay` taking precedence.
pub fn merge_maps(
    mut base: Map<String, Value>,
    overlay: Map<String, Value>,
    arrays: ArrayMerge,
) -> Map<String, Value> {
    for (key, overlay_value) in overlay {
        let merged_value = if let Some(base_value) = base.remove(&key) {
            deep_merge(base_value, overlay_value, arrays)
        } else {
            overlay_value
        };
        base.insert(key, merged_value);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_simple_objects() {
        let base = json!({"a": 1, "b": 2});
        let overlay = json!({"b": 3, "c": 4});
        let result = deep_merge(base, overlay, ArrayMerge::Concat);
        assert_eq!(result, json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_merge_nested_objects() {
        let base = json!({
            "a": {"a1": "one", "a2": "two"},
            "debug": true
        });
        let overlay = json!({
            "a": {"ab": "three"}
        });
        let result = deep_merge(base, overlay, ArrayMerge::Concat);
        assert_eq!(
            result,
            json!({
                "a": {"a1": "one", "a2": "two", "ab": "three"},
                "debug": true
            })
        );
    }

    #[test]
    fn test_arrays_concatenated() {
        let base = json!({"items": [1, 2, 3]});
        let overlay = json!({"items": [4, 5]});
        let result = deep_merge(base, overlay, ArrayMerge::Concat);
        assert_eq!(result, json!({"items": [1, 2, 3, 4, 5]}));
    }

    #[test]
    fn test_arrays_replaced_with_replace_policy() {
        let base = json!({"items": [1, 2, 3]});
        let overlay = json!({"items": [4, 5]});
        let result = deep_merge(base, overlay, ArrayMerge::Replace);
        assert_eq!(result, json!({"items": [4, 5]}));
    }

    #[test]
    fn test_null_overrides_base() {
        let base = json!({"a": 1, "b": {"c": 2}});
        let overlay = json!({"a": null, "b": {"c": null}});
        let result = deep_merge(base, overlay, ArrayMerge::Concat);
        assert_eq!(result, json!({"a": null, "b": {"c": null}}));
    }

    #[test]
    fn test_overlay_replaces_primitive_with_object() {
        let base = json!({"value": 42});
        let overlay = json!({"value": {"nested": true}});
        let result = deep_merge(base, overlay, ArrayMerge::Concat);
        assert_eq!(result, json!({"value": {"nested": true}}));
    }

    #[test]
    fn test_overlay_replaces_array_with_scalar() {
        let base = json!({"value": [1, 2]});
        let overlay = json!({"value": "flat"});
        let result = deep_merge(base, overlay, ArrayMerge::Concat);
        assert_eq!(result, json!({"value": "flat"}));
    }

    #[test]
    fn test_array_merge_from_str() {
        assert_eq!(ArrayMerge::from_str("Concat"), Some(ArrayMerge::Concat));
        assert_eq!(ArrayMerge::from_str("replace"), Some(ArrayMerge::Replace));
        assert_eq!(ArrayMerge::from_str("zip"), None);
    }
}
