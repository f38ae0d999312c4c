//! confidant: client for Confidant, an open source secret management system
//!
//! Resolves the client configuration from CLI options, a profile in the
//! user's config file and built-in defaults before running a command.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
