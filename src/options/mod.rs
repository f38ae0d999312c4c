//! Option normalization
//!
//! Turns the loosely-typed options emitted by an argument parser into the
//! canonical [`ConfigMap`] consumed by the resolver: hyphens become
//! underscores, unset entries and short aliases disappear, and
//! `config_files` becomes a list of paths.

use serde_yaml::Value;

use crate::config::ConfigMap;
use crate::utils::split_csv;

/// Surface form of an option key as produced by an argument parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawKey {
    /// The flag name as typed on the command line (`auth-key`, `k`).
    Flag(String),
    /// A mirror entry the parser emits alongside the flag for the same option.
    Symbol(String),
}

impl RawKey {
    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag(name.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }
}

/// Options exactly as an argument parser hands them over, in parse order.
pub type RawOptions = Vec<(RawKey, Value)>;

/// Canonical names of every option the client understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    ConfigFiles,
    Profile,
    LogLevel,
    Url,
    AuthKey,
    TokenLifetime,
    TokenVersion,
    From,
    To,
    UserType,
    Region,
    Service,
    GetService,
    ShowConfig,
}

impl OptionName {
    pub const ALL: [OptionName; 14] = [
        OptionName::ConfigFiles,
        OptionName::Profile,
        OptionName::LogLevel,
        OptionName::Url,
        OptionName::AuthKey,
        OptionName::TokenLifetime,
        OptionName::TokenVersion,
        OptionName::From,
        OptionName::To,
        OptionName::UserType,
        OptionName::Region,
        OptionName::Service,
        OptionName::GetService,
        OptionName::ShowConfig,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionName::ConfigFiles => "config_files",
            OptionName::Profile => "profile",
            OptionName::LogLevel => "log_level",
            OptionName::Url => "url",
            OptionName::AuthKey => "auth_key",
            OptionName::TokenLifetime => "token_lifetime",
            OptionName::TokenVersion => "token_version",
            OptionName::From => "from",
            OptionName::To => "to",
            OptionName::UserType => "user_type",
            OptionName::Region => "region",
            OptionName::Service => "service",
            OptionName::GetService => "get_service",
            OptionName::ShowConfig => "show_config",
        }
    }

    /// Look up an already-canonical (underscored) name.
    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.as_str() == name)
    }
}

impl std::fmt::Display for OptionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical form of a flag name: hyphens replaced by underscores.
pub fn canonical_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Normalize raw parser output into canonical options.
///
/// Drops symbol mirrors, null values, `false` values (unset switches and the
/// parser's help/version sentinels) and single-character keys (short aliases
/// always accompanied by their long form). Unrecognized names are ignored.
pub fn normalize(raw: &[(RawKey, Value)]) -> ConfigMap {
    let mut opts = ConfigMap::new();

    for (key, value) in raw {
        let RawKey::Flag(name) = key else {
            continue;
        };
        let canonical = canonical_name(name);

        if value.is_null() || *value == Value::Bool(false) || canonical.chars().count() == 1 {
            continue;
        }

        let Some(option) = OptionName::from_canonical(&canonical) else {
            tracing::warn!("Ignoring unrecognized option '{}'", name);
            continue;
        };

        let value = match (option, value) {
            (OptionName::ConfigFiles, Value::String(list)) => config_files_value(list),
            _ => value.clone(),
        };
        opts.insert(option.to_string(), value);
    }

    opts
}

/// Nest a command's own normalized options under the command's name.
pub fn with_command_options(mut opts: ConfigMap, command: &str, command_opts: ConfigMap) -> ConfigMap {
    let block = command_opts.into_iter().map(|(k, v)| (Value::String(k), v)).collect();
    opts.insert(command.to_string(), Value::Mapping(block));
    opts
}

/// Re-express canonical options as parser output.
pub fn to_raw(opts: &ConfigMap) -> RawOptions {
    opts.iter().map(|(k, v)| (RawKey::flag(k.clone()), v.clone())).collect()
}

fn config_files_value(list: &str) -> Value {
    Value::Sequence(split_csv(list).into_iter().map(Value::String).collect())
}
