//! Runtime execution modes.
//!
//! - `tui`: Full-screen interactive login screen (optional feature)

#[cfg(feature = "tui")]
pub use wicket_tui::run_login;

#[cfg(not(feature = "tui"))]
pub async fn run_login(_config: wicket_core::config::Config) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
