//! get_service command implementation

use anyhow::{Context, Result};
use clap::Args;

use super::push;
use confidant_config::{ClientSettings, ConfigMap, RawOptions};

#[derive(Args)]
pub struct GetServiceArgs {
    /// The service to get
    #[arg(long, value_name = "SERVICE")]
    pub service: Option<String>,
}

impl GetServiceArgs {
    pub fn raw_options(&self) -> RawOptions {
        let mut raw = RawOptions::new();
        push(&mut raw, &["service"], self.service.clone());
        raw
    }
}

/// Print the request the Confidant client would issue for this service.
pub fn run(config: &ConfigMap) -> Result<()> {
    tracing::debug!("Running get_service command");
    let settings = ClientSettings::from_config(config).context("Cannot build client settings")?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
