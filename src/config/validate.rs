//! Mandatory key validation.

use serde_yaml::Value;

use super::defaults::{command_scopes, mandatory_keys, GLOBAL_SCOPE};
use super::ConfigMap;
use crate::error::{ConfigError, ConfigResult};

/// Check `config` for every global mandatory key and for the mandatory keys
/// of `command`.
///
/// Without a command, every command scope that appears as a key of `config`
/// is checked instead. Command keys must live in a nested block under the
/// command's name.
///
/// # Errors
///
/// Returns [`ConfigError::MissingKeys`] listing all omissions: global keys
/// first in declaration order, then one `scope[key,...]` entry per scope.
pub fn validate(config: &ConfigMap, command: Option<&str>) -> ConfigResult<()> {
    let mut missing: Vec<String> = mandatory_keys(GLOBAL_SCOPE)
        .iter()
        .filter(|key| !config.contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    let scopes: Vec<&str> = match command {
        Some(command) => vec![command],
        None => command_scopes().filter(|scope| config.contains_key(*scope)).collect(),
    };

    for scope in scopes {
        let scope_missing = missing_keys_for_command(config, scope);
        if scope_missing.is_empty() {
            continue;
        }
        missing.push(format!("{}[{}]", scope, scope_missing.join(",")));
    }

    if missing.is_empty() {
        return Ok(());
    }
    Err(ConfigError::MissingKeys { missing })
}

fn missing_keys_for_command(config: &ConfigMap, command: &str) -> Vec<&'static str> {
    let mandatory = mandatory_keys(command);
    if mandatory.is_empty() {
        return Vec::new();
    }

    match config.get(command) {
        Some(Value::Mapping(block)) => mandatory.iter().copied().filter(|key| !block.contains_key(*key)).collect(),
        _ => mandatory.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> ConfigMap {
        serde_yaml::from_str(yaml).expect("yaml")
    }

    const GLOBAL_OK: &str = "url: https://x\nauth_key: alias/a\nfrom: svc-a\nto: confidant-prod\n";

    #[test]
    fn test_complete_global_config_passes() {
        assert!(validate(&config(GLOBAL_OK), None).is_ok());
    }

    #[test]
    fn test_missing_global_keys_in_declaration_order() {
        let err = validate(&config("from: svc-a\n"), None).expect_err("missing");
        assert_eq!(err.missing_keys(), Some(&["url".to_string(), "auth_key".to_string(), "to".to_string()][..]));
    }

    #[test]
    fn test_command_without_block_reports_scope() {
        let err = validate(&config(GLOBAL_OK), Some("get_service")).expect_err("missing");
        assert_eq!(err.to_string(), "Missing required config keys: get_service[service]");
    }

    #[test]
    fn test_command_block_that_is_not_a_map_reports_every_key() {
        let yaml = format!("{GLOBAL_OK}get_service: svc-a\n");
        let err = validate(&config(&yaml), Some("get_service")).expect_err("missing");
        assert_eq!(err.missing_keys(), Some(&["get_service[service]".to_string()][..]));
    }

    #[test]
    fn test_command_key_at_top_level_does_not_satisfy_scope() {
        let yaml = format!("{GLOBAL_OK}service: svc-a\n");
        assert!(validate(&config(&yaml), Some("get_service")).is_err());
    }

    #[test]
    fn test_present_command_block_is_validated_without_command() {
        let yaml = format!("{GLOBAL_OK}get_service:\n  other: 1\n");
        let err = validate(&config(&yaml), None).expect_err("missing");
        assert_eq!(err.missing_keys(), Some(&["get_service[service]".to_string()][..]));

        let yaml = format!("{GLOBAL_OK}get_service:\n  service: svc-a\n");
        assert!(validate(&config(&yaml), None).is_ok());
    }

    #[test]
    fn test_command_without_requirements_is_skipped() {
        assert!(validate(&config(GLOBAL_OK), Some("show_config")).is_ok());
    }

    #[test]
    fn test_global_and_scope_omissions_are_reported_together() {
        let err = validate(&config("url: https://x\nauth_key: a\nto: b\n"), Some("get_service")).expect_err("missing");
        assert_eq!(err.to_string(), "Missing required config keys: from, get_service[service]");
    }
}
