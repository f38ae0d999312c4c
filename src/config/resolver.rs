//! Layered configuration resolution

use serde_yaml::Value;

use super::defaults::{CLIENT_DEFAULTS, DEFAULT_OPTS};
use super::loader::profile_config;
use super::merge::{merge_over, strip_keys};
use super::validate::validate;
use super::ConfigMap;
use crate::error::{ConfigError, ConfigResult};
use crate::utils::split_csv;

/// Holds the most recently resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Configurator {
    config: Option<ConfigMap>,
}

impl Configurator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configurator and resolve `options` right away.
    pub fn with_options(options: ConfigMap, command: Option<&str>) -> ConfigResult<Self> {
        let mut configurator = Self::new();
        configurator.configure(options, command)?;
        Ok(configurator)
    }

    /// Resolve, validate and store the configuration for `options`.
    ///
    /// The stored configuration is only replaced when validation succeeds;
    /// on error the previous one is kept.
    pub fn configure(&mut self, options: ConfigMap, command: Option<&str>) -> ConfigResult<&ConfigMap> {
        let config = resolve(options, command)?;
        Ok(&*self.config.insert(config))
    }

    /// The last successfully resolved configuration.
    pub fn config(&self) -> Option<&ConfigMap> {
        self.config.as_ref()
    }

    /// Re-validate the stored configuration against `command`.
    pub fn validate(&self, command: Option<&str>) -> ConfigResult<()> {
        let empty = ConfigMap::new();
        validate(self.config.as_ref().unwrap_or(&empty), command)
    }
}

/// Resolve the final client configuration without storing it.
///
/// Precedence, lowest first: client defaults, the profile from the first
/// existing config file, then `options` merged over the resolution defaults.
/// Resolution-only keys (`config_files`, `profile`, `log_level`) are removed
/// before the client defaults are applied.
pub fn resolve(options: ConfigMap, command: Option<&str>) -> ConfigResult<ConfigMap> {
    let context = merge_over(DEFAULT_OPTS.clone(), options);
    tracing::debug!("Local config: {:?}", context);

    let config_files = config_files(&context)?;
    let profile = profile_name(&context)?;

    let mut config = merge_over(profile_config(&config_files, &profile)?, context);
    strip_keys(&mut config, DEFAULT_OPTS.keys());

    let config = merge_over(CLIENT_DEFAULTS.clone(), config);
    validate(&config, command)?;

    tracing::debug!("Authoritative config: {:?}", config);
    Ok(config)
}

fn config_files(context: &ConfigMap) -> ConfigResult<Vec<String>> {
    match context.get("config_files") {
        Some(Value::Sequence(paths)) => paths
            .iter()
            .map(|path| {
                path.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ConfigError::invalid_option("config_files", "paths must be strings"))
            })
            .collect(),
        Some(Value::String(paths)) => Ok(split_csv(paths)),
        _ => Err(ConfigError::invalid_option("config_files", "expected a list of paths")),
    }
}

fn profile_name(context: &ConfigMap) -> ConfigResult<String> {
    match context.get("profile") {
        Some(Value::String(name)) => Ok(name.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        _ => Err(ConfigError::invalid_option("profile", "expected a profile name")),
    }
}
