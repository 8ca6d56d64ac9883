//! Login command handler.

use anyhow::{Context, Result};
use wicket_core::config::Config;

use crate::modes;

pub async fn run(config: Config) -> Result<()> {
    modes::run_login(config)
        .await
        .context("login screen failed")?;

    Ok(())
}
