//! Full-screen TUI implementation for the Wicket login screen.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use features::form;
pub use runtime::TuiRuntime;
use wicket_core::config::Config;

/// Runs the interactive login screen.
pub async fn run_login(config: Config) -> Result<()> {
    // The login screen requires a terminal to render the TUI
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The login screen requires a terminal.\n\
             Run wicket from an interactive shell."
        );
    }

    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()?;

    // Drop first so the farewell prints after the alternate screen is gone
    drop(runtime);
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
