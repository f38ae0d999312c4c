//! Configuration error types.

use std::path::PathBuf;

/// Result alias used throughout the library.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while resolving or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Profile '{profile}' not found in '{}'", path.display())]
    ProfileNotFound { profile: String, path: PathBuf },

    /// Every omission, global keys first, then `scope[key,...]` entries.
    #[error("Missing required config keys: {}", missing.join(", "))]
    MissingKeys { missing: Vec<String> },

    #[error("Failed reading config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML/JSON in config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Malformed config file '{}': {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("Unsupported key {key} in config file '{}'", path.display())]
    InvalidKey { path: PathBuf, key: String },

    #[error("Invalid value for option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    #[error("Invalid client settings: {0}")]
    InvalidSettings(String),
}

impl ConfigError {
    pub fn invalid_option(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption { key: key.into(), message: message.into() }
    }

    /// Keys reported missing, when this is a validation failure.
    pub fn missing_keys(&self) -> Option<&[String]> {
        match self {
            Self::MissingKeys { missing } => Some(missing),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_message_lists_every_entry() {
        let err = ConfigError::MissingKeys {
            missing: vec!["from".to_string(), "get_service[service]".to_string()],
        };
        assert_eq!(err.to_string(), "Missing required config keys: from, get_service[service]");
        assert_eq!(err.missing_keys().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_profile_not_found_names_profile_and_file() {
        let err = ConfigError::ProfileNotFound {
            profile: "prod".to_string(),
            path: PathBuf::from("/etc/confidant/config"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'prod'"));
        assert!(msg.contains("/etc/confidant/config"));
        assert!(err.missing_keys().is_none());
    }
}
