//! Shallow layer merging

use super::ConfigMap;

/// Merge `overlay` on top of `base`. Top-level keys of `overlay` win; nested
/// maps are replaced, never merged.
pub fn merge_over(mut base: ConfigMap, overlay: ConfigMap) -> ConfigMap {
    base.extend(overlay);
    base
}

/// Remove every key in `keys` from `config`.
pub fn strip_keys<'a>(config: &mut ConfigMap, keys: impl IntoIterator<Item = &'a String>) {
    for key in keys {
        config.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn map(entries: &[(&str, Value)]) -> ConfigMap {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_overlay_wins_on_collision() {
        let base = map(&[("region", Value::from("us-east-1")), ("user_type", Value::from("service"))]);
        let overlay = map(&[("region", Value::from("eu-west-1"))]);

        let merged = merge_over(base, overlay);
        assert_eq!(merged["region"], Value::from("eu-west-1"));
        assert_eq!(merged["user_type"], Value::from("service"));
    }

    #[test]
    fn test_nested_maps_are_replaced_not_merged() {
        let base: ConfigMap = serde_yaml::from_str("get_service:\n  service: a\n  extra: 1\n").expect("yaml");
        let overlay: ConfigMap = serde_yaml::from_str("get_service:\n  service: b\n").expect("yaml");

        let merged = merge_over(base, overlay);
        let block = merged["get_service"].as_mapping().expect("mapping");
        assert_eq!(block.len(), 1);
        assert_eq!(block.get("service"), Some(&Value::from("b")));
    }

    #[test]
    fn test_strip_keys() {
        let mut config = map(&[("profile", Value::from("default")), ("url", Value::from("https://x"))]);
        let controls = map(&[("profile", Value::Null), ("log_level", Value::Null)]);

        strip_keys(&mut config, controls.keys());
        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["url"]);
    }
}
