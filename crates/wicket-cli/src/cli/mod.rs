//! Command-line parsing and subcommand dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use wicket_core::config::{self, Theme};

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "wicket")]
#[command(version = "0.1")]
#[command(about = "Terminal login front-end")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the color theme for this session (light, dark)
    #[arg(long, value_name = "THEME")]
    theme: Option<String>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Write a default config file, failing if one exists
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // a single runtime serves every subcommand
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Keep the guard alive so buffered log lines flush on exit
    let _log_guard = logging::init(&cli.log_level);

    let mut config = config::Config::load().context("load config")?;

    if let Some(theme) = cli.theme.as_deref() {
        config.theme = parse_theme(theme)?;
    }

    // default to the login screen
    let Some(command) = cli.command else {
        return commands::login::run(config).await;
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

fn parse_theme(value: &str) -> Result<Theme> {
    Theme::all()
        .iter()
        .copied()
        .find(|theme| theme.display_name().eq_ignore_ascii_case(value))
        .with_context(|| {
            let options = Theme::all()
                .iter()
                .map(|theme| theme.display_name())
                .collect::<Vec<_>>()
                .join(", ");
            format!("unknown theme '{value}' (expected one of: {options})")
        })
}
