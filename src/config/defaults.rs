//! Built-in defaults and mandatory key sets

use once_cell::sync::Lazy;
use serde_yaml::Value;

use super::ConfigMap;

/// Candidate config files, first existing one wins.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["~/.confidant", "/etc/confidant/config"];
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Options that drive resolution itself. Stripped from the final config.
pub static DEFAULT_OPTS: Lazy<ConfigMap> = Lazy::new(|| {
    ConfigMap::from([
        (
            "config_files".to_string(),
            Value::Sequence(DEFAULT_CONFIG_FILES.iter().map(|path| Value::from(*path)).collect()),
        ),
        ("profile".to_string(), Value::from(DEFAULT_PROFILE)),
        ("log_level".to_string(), Value::from(DEFAULT_LOG_LEVEL)),
    ])
});

/// Backfill values for the client, the lowest-precedence layer.
pub static CLIENT_DEFAULTS: Lazy<ConfigMap> = Lazy::new(|| {
    ConfigMap::from([
        ("token_lifetime".to_string(), Value::from(10)),
        ("token_version".to_string(), Value::from(2)),
        ("user_type".to_string(), Value::from("service")),
        ("region".to_string(), Value::from("us-east-1")),
    ])
});

pub const GLOBAL_SCOPE: &str = "global";

/// Keys the client cannot work without, per scope, in declaration order.
pub const MANDATORY_KEYS: &[(&str, &[&str])] = &[
    (GLOBAL_SCOPE, &["url", "auth_key", "from", "to"]),
    ("get_service", &["service"]),
];

/// Mandatory keys for `scope`; empty for scopes with no requirements.
pub fn mandatory_keys(scope: &str) -> &'static [&'static str] {
    MANDATORY_KEYS
        .iter()
        .find(|(name, _)| *name == scope)
        .map(|(_, keys)| *keys)
        .unwrap_or(&[])
}

/// Command scopes with mandatory keys, excluding the global scope.
pub fn command_scopes() -> impl Iterator<Item = &'static str> {
    MANDATORY_KEYS.iter().map(|(name, _)| *name).filter(|name| *name != GLOBAL_SCOPE)
}
