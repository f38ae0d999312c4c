//! confidant-config: layered configuration for the Confidant client
//!
//! Resolves the effective client configuration from CLI options, a named
//! profile in the first existing config file, and built-in defaults, then
//! validates that every key required by the requested command is present.

pub mod client;
pub mod config;
pub mod error;
pub mod options;
pub mod utils;

pub use client::ClientSettings;
pub use config::{validate, ConfigMap, Configurator};
pub use error::{ConfigError, ConfigResult};
pub use options::{normalize, OptionName, RawKey, RawOptions};
