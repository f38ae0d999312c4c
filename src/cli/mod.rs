//! Command-line interface for the Confidant client
//!
//! Provides `get_service` and `show_config` subcommands. Every command runs
//! after the configuration has been resolved and validated for it.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_yaml::Value;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use confidant_config::config::defaults::{DEFAULT_CONFIG_FILES, DEFAULT_LOG_LEVEL, DEFAULT_PROFILE};
use confidant_config::options::with_command_options;
use confidant_config::{normalize, ConfigMap, Configurator, RawKey, RawOptions};

mod get_service;
mod show_config;

/// Client for Confidant, an open source secret management system
#[derive(Parser)]
#[command(name = "confidant")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Comma separated list of configuration files to use
    #[arg(long, global = true, value_name = "FILES", default_value_t = DEFAULT_CONFIG_FILES.join(","))]
    config_files: String,

    /// Configuration profile to use
    #[arg(long, global = true, value_name = "NAME", default_value = DEFAULT_PROFILE)]
    profile: String,

    /// Logging verbosity
    #[arg(long, global = true, value_name = "LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// URL of the confidant server
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    url: Option<String>,

    /// The KMS auth key to use, i.e. alias/authnz-production
    #[arg(short = 'k', long, global = true, value_name = "KEY")]
    auth_key: Option<String>,

    /// The token lifetime, in minutes
    #[arg(short = 'l', long, global = true, value_name = "MINUTES")]
    token_lifetime: Option<u32>,

    /// The version of the KMS auth token
    #[arg(long, global = true, value_name = "VERSION")]
    token_version: Option<u32>,

    /// The IAM role or user to authenticate with, i.e. myservice-production or myuser
    #[arg(long, global = true, value_name = "ROLE")]
    from: Option<String>,

    /// The IAM role name of confidant, i.e. confidant-production
    #[arg(long, global = true, value_name = "ROLE")]
    to: Option<String>,

    /// The confidant user-type to authenticate as, i.e. user or service
    #[arg(long, global = true, value_name = "TYPE")]
    user_type: Option<String>,

    /// Use the specified region for authentication
    #[arg(long, global = true, value_name = "REGION")]
    region: Option<String>,
}

impl GlobalArgs {
    /// Every option under each of its flag names, unset ones as null.
    fn raw_options(&self) -> RawOptions {
        let mut raw = RawOptions::new();
        push(&mut raw, &["config-files"], Some(self.config_files.clone()));
        push(&mut raw, &["profile"], Some(self.profile.clone()));
        push(&mut raw, &["log-level"], Some(self.log_level.clone()));
        push(&mut raw, &["u", "url"], self.url.clone());
        push(&mut raw, &["k", "auth-key"], self.auth_key.clone());
        push(&mut raw, &["l", "token-lifetime"], self.token_lifetime);
        push(&mut raw, &["token-version"], self.token_version);
        push(&mut raw, &["from"], self.from.clone());
        push(&mut raw, &["to"], self.to.clone());
        push(&mut raw, &["user-type"], self.user_type.clone());
        push(&mut raw, &["region"], self.region.clone());
        raw
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Get credentials for a service
    #[command(name = "get_service", alias = "get-service")]
    GetService(get_service::GetServiceArgs),

    /// Show the current config
    #[command(name = "show_config", alias = "show-config")]
    ShowConfig,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::GetService(_) => "get_service",
            Commands::ShowConfig => "show_config",
        }
    }

    fn raw_options(&self) -> RawOptions {
        match self {
            Commands::GetService(args) => args.raw_options(),
            Commands::ShowConfig => RawOptions::new(),
        }
    }
}

pub(crate) fn push<T: Into<Value>>(raw: &mut RawOptions, names: &[&str], value: Option<T>) {
    let value = value.map_or(Value::Null, Into::into);
    for name in names {
        raw.push((RawKey::flag(*name), value.clone()));
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = log_filter(&cli.global.log_level)?;
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config = configure(&cli)?;

    match cli.command {
        Commands::GetService(_) => get_service::run(&config),
        Commands::ShowConfig => show_config::run(&config),
    }
}

/// Build the log filter. RUST_LOG in the environment takes precedence over
/// --log-level, but the flag must always name a valid level.
fn log_filter(log_level: &str) -> Result<EnvFilter> {
    let level: LevelFilter =
        log_level.parse().with_context(|| format!("Invalid --log-level '{}'", log_level))?;
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::default().add_directive(level.into())))
}

/// Normalize the parsed options, nest the command's own options under its
/// name and resolve the configuration for that command.
fn configure(cli: &Cli) -> Result<ConfigMap> {
    let command = cli.command.name();
    let mut opts = normalize(&cli.global.raw_options());

    let command_opts = normalize(&cli.command.raw_options());
    if !command_opts.is_empty() {
        opts = with_command_options(opts, command, command_opts);
    }
    tracing::debug!("Parsed CLI options: {:?}", opts);

    let mut configurator = Configurator::new();
    let config = configurator
        .configure(opts, Some(command))
        .with_context(|| format!("Invalid configuration for '{}'", command))?;
    Ok(config.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_raw_options_normalize_to_long_names() {
        let cli = Cli::parse_from([
            "confidant",
            "-u",
            "https://confidant.example",
            "--token-lifetime",
            "30",
            "get_service",
            "--service",
            "svc-a",
        ]);

        let opts = normalize(&cli.global.raw_options());
        assert_eq!(opts["url"], Value::from("https://confidant.example"));
        assert_eq!(opts["token_lifetime"], Value::from(30u32));
        assert_eq!(opts["profile"], Value::from("default"));
        assert!(!opts.contains_key("u"));
        assert!(!opts.contains_key("auth_key"));

        let command_opts = normalize(&cli.command.raw_options());
        assert_eq!(command_opts["service"], Value::from("svc-a"));
    }

    #[test]
    fn test_help_describes_the_client() {
        use clap::CommandFactory;
        let about = Cli::command().get_about().map(ToString::to_string).unwrap_or_default();
        assert_eq!(about, "Client for Confidant, an open source secret management system");
    }

    #[test]
    fn test_log_filter_rejects_unknown_level() {
        assert!(log_filter("debug").is_ok());
        assert!(log_filter("bogus").is_err());
    }

    #[test]
    fn test_command_aliases() {
        let cli = Cli::parse_from(["confidant", "show-config"]);
        assert_eq!(cli.command.name(), "show_config");
    }
}
