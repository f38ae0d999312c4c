//! Configuration loading, merging and validation
//!
//! Builds the client configuration from three layers with fixed precedence
//! (options > profile from file > client defaults) and checks it against the
//! mandatory keys of the global scope and of the command being run.

use std::collections::BTreeMap;

pub mod defaults;
pub mod loader;
pub mod merge;
pub mod resolver;
pub mod validate;

/// Canonical configuration map shared by every layer.
pub type ConfigMap = BTreeMap<String, serde_yaml::Value>;

pub use loader::{profile_config, profile_from_file};
pub use merge::{merge_over, strip_keys};
pub use resolver::{resolve, Configurator};
pub use validate::validate;
