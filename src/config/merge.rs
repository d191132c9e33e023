//! Layer merging for YAML configuration tiers.
//!
//! Tiers are parsed into `serde_json::Value` and merged key by key; a higher
//! tier only replaces the settings it actually names.

use serde_json::Value;

/// Merge `upper` over `lower`.
///
/// - Objects merge recursively
/// - Scalars and arrays in `upper` replace `lower`
/// - A null in `upper` leaves `lower` untouched (an empty YAML file is null)
pub fn merge_layers(lower: Value, upper: Value) -> Value {
    match (lower, upper) {
        (Value::Object(mut lower_map), Value::Object(upper_map)) => {
            for (key, upper_value) in upper_map {
                let merged = match lower_map.remove(&key) {
                    Some(lower_value) => merge_layers(lower_value, upper_value),
                    None => upper_value,
                };
                lower_map.insert(key, merged);
            }
            Value::Object(lower_map)
        }
        (lower, Value::Null) => lower,
        (_, upper) => upper,
    }
}

/// Merge tiers in order, later tiers winning.
pub fn merge_all(layers: impl IntoIterator<Item = Value>) -> Value {
    layers.into_iter().fold(Value::Null, merge_layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upper_tier_overrides_one_field() {
        let lower = json!({"diff": {"null_policy": "keep", "format": "json"}});
        let upper = json!({"diff": {"format": "flat"}});
        assert_eq!(
            merge_layers(lower, upper),
            json!({"diff": {"null_policy": "keep", "format": "flat"}})
        );
    }

    #[test]
    fn test_new_sections_are_added() {
        let lower = json!({"diff": {"format": "json"}});
        let upper = json!({"output": {"show_inputs": false}});
        assert_eq!(
            merge_layers(lower, upper),
            json!({"diff": {"format": "json"}, "output": {"show_inputs": false}})
        );
    }

    #[test]
    fn test_empty_tier_is_ignored() {
        let lower = json!({"keys": {"policy": "reject"}});
        assert_eq!(merge_layers(lower.clone(), Value::Null), lower);
    }

    #[test]
    fn test_null_field_keeps_lower() {
        let lower = json!({"keys": {"policy": "reject"}});
        let upper = json!({"keys": {"policy": null}});
        assert_eq!(merge_layers(lower, upper), json!({"keys": {"policy": "reject"}}));
    }

    #[test]
    fn test_merge_all_in_order() {
        let layers = vec![
            json!({"diff": {"format": "json"}}),
            json!({"keys": {"policy": "expand"}}),
            json!({"diff": {"format": "flat"}, "keys": {"policy": "reject"}}),
        ];
        assert_eq!(
            merge_all(layers),
            json!({"diff": {"format": "flat"}, "keys": {"policy": "reject"}})
        );
    }
}
