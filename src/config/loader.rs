//! Profile loading from config files

use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::ConfigMap;
use crate::error::{ConfigError, ConfigResult};
use crate::utils::expand_path;

/// Key inside a profile whose entries are promoted to the profile's top level.
pub const AUTH_CONTEXT_KEY: &str = "auth_context";

/// Load `profile` from the first existing file among `config_files`.
///
/// No existing file yields an empty profile layer. Only the first existing
/// file is consulted; later candidates are never merged in.
pub fn profile_config(config_files: &[String], profile: &str) -> ConfigResult<ConfigMap> {
    let Some(config_file) = discover_config(config_files) else {
        tracing::debug!("No config file found among {:?}", config_files);
        return Ok(ConfigMap::new());
    };

    tracing::debug!("Found config file: {}", config_file.display());
    let config = profile_from_file(&config_file, profile)?;
    tracing::debug!("Profile config: {:?}", config);
    Ok(config)
}

/// Parse a YAML or JSON `config_file` and return the contents of `profile`,
/// with `auth_context` flattened into it.
pub fn profile_from_file(config_file: &Path, profile: &str) -> ConfigResult<ConfigMap> {
    let content = fs::read(config_file)
        .map_err(|source| ConfigError::Read { path: config_file.to_path_buf(), source })?;

    let mut profiles = parse_profiles(&content, config_file)?;

    let Some(profile_value) = profiles.remove(profile) else {
        return Err(ConfigError::ProfileNotFound {
            profile: profile.to_string(),
            path: config_file.to_path_buf(),
        });
    };

    let mut profile_config = match profile_value {
        Value::Null => ConfigMap::new(),
        Value::Mapping(map) => into_config_map(map),
        _ => {
            return Err(ConfigError::Malformed {
                path: config_file.to_path_buf(),
                message: format!("profile '{}' is not a mapping", profile),
            })
        }
    };

    flatten_auth_context(&mut profile_config, config_file)?;
    Ok(profile_config)
}

/// Parse file content into its top-level profile mapping, keys normalized.
fn parse_profiles(content: &[u8], config_file: &Path) -> ConfigResult<Mapping> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Mapping::new());
    }

    let raw: Value = serde_yaml::from_slice(content)
        .map_err(|source| ConfigError::Parse { path: config_file.to_path_buf(), source })?;

    match normalize_keys(raw, config_file)? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map),
        _ => Err(ConfigError::Malformed {
            path: config_file.to_path_buf(),
            message: "top level is not a mapping of profiles".to_string(),
        }),
    }
}

/// Recursively rewrite every mapping key to its string form.
///
/// Sequences are walked so mappings inside them are normalized too; scalar
/// values are returned untouched.
pub fn normalize_keys(value: Value, config_file: &Path) -> ConfigResult<Value> {
    match value {
        Value::Mapping(map) => {
            let mut normalized = Mapping::with_capacity(map.len());
            for (key, child) in map {
                normalized.insert(Value::String(key_string(key, config_file)?), normalize_keys(child, config_file)?);
            }
            Ok(Value::Mapping(normalized))
        }
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| normalize_keys(item, config_file))
            .collect::<ConfigResult<Vec<_>>>()
            .map(Value::Sequence),
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            let value = normalize_keys(value, config_file)?;
            Ok(Value::Tagged(Box::new(TaggedValue { tag, value })))
        }
        scalar => Ok(scalar),
    }
}

fn key_string(key: Value, config_file: &Path) -> ConfigResult<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        other => Err(ConfigError::InvalidKey {
            path: config_file.to_path_buf(),
            key: format!("{:?}", other),
        }),
    }
}

/// Promote `auth_context` entries to the top level, overwriting same-named
/// keys, and drop the `auth_context` key itself.
fn flatten_auth_context(profile_config: &mut ConfigMap, config_file: &Path) -> ConfigResult<()> {
    match profile_config.remove(AUTH_CONTEXT_KEY) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Mapping(auth_context)) => {
            profile_config.extend(into_config_map(auth_context));
            Ok(())
        }
        Some(_) => Err(ConfigError::Malformed {
            path: config_file.to_path_buf(),
            message: format!("'{}' is not a mapping", AUTH_CONTEXT_KEY),
        }),
    }
}

/// Convert a key-normalized mapping into a config map.
fn into_config_map(map: Mapping) -> ConfigMap {
    map.into_iter()
        .filter_map(|(key, value)| match key {
            Value::String(key) => Some((key, value)),
            _ => None,
        })
        .collect()
}

fn discover_config(candidates: &[String]) -> Option<PathBuf> {
    for candidate in candidates {
        let Some(path) = expand_path(candidate) else {
            continue;
        };
        if path.exists() {
            return Some(path);
        }
    }

    None
}
