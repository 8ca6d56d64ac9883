//! Handlers for the `config` subcommands.

use anyhow::{Context, Result};
use wicket_core::config;

pub fn path() -> Result<()> {
    println!("{}", config::paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}
