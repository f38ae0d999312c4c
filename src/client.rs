//! Typed settings handed to the Confidant client

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::config::ConfigMap;
use crate::error::{ConfigError, ConfigResult};

/// What the client needs to authenticate against Confidant and fetch a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub url: String,
    pub auth_key: String,
    pub from: String,
    pub to: String,
    /// Token lifetime in minutes.
    pub token_lifetime: u32,
    pub token_version: u32,
    pub user_type: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl ClientSettings {
    /// Convert a validated configuration map into typed settings.
    ///
    /// `service` comes from the nested `get_service` block when present.
    pub fn from_config(config: &ConfigMap) -> ConfigResult<Self> {
        let mut flat: Mapping = config
            .iter()
            .filter(|(key, _)| key.as_str() != "get_service")
            .map(|(key, value)| (Value::String(key.clone()), value.clone()))
            .collect();

        if let Some(service) = config.get("get_service").and_then(|block| block.get("service")) {
            flat.insert(Value::from("service"), service.clone());
        }

        serde_yaml::from_value(Value::Mapping(flat)).map_err(|e| ConfigError::InvalidSettings(e.to_string()))
    }
}
