//! show_config command implementation

use anyhow::Result;

use confidant_config::ConfigMap;

pub fn run(config: &ConfigMap) -> Result<()> {
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}
