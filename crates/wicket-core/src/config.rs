//! Configuration management for wicket.
//!
//! Loads configuration from ${WICKET_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Color theme for the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light backgrounds, dark text (default)
    #[default]
    Light,
    /// Dark backgrounds, light text
    Dark,
}

impl Theme {
    /// Returns the opposite theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Returns the short display name for this theme.
    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Returns all themes for iteration.
    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark]
    }
}

/// Simulated authentication backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockAuthConfig {
    /// Round-trip delay in milliseconds.
    pub delay_ms: u64,
    /// Probability in [0.0, 1.0] that a sign-in attempt succeeds.
    pub success_rate: f64,
}

impl MockAuthConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for MockAuthConfig {
    fn default() -> Self {
        Self {
            delay_ms: Config::DEFAULT_MOCK_DELAY_MS,
            success_rate: Config::DEFAULT_MOCK_SUCCESS_RATE,
        }
    }
}

/// The commented config template, embedded at compile time from
/// default_config.toml.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Overlays a user's config onto the current template.
///
/// The template is the base, so its comments and any newly added sections
/// survive every save while the user's values win.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Copies each item of `source` into `target`, recursing into nested tables.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    // No counterpart in the template, take the table wholesale
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                // Arrays of tables replace rather than merge per entry
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for wicket configuration and data directories.
    //!
    //! WICKET_HOME resolution order:
    //! 1. WICKET_HOME environment variable (if set)
    //! 2. ~/.config/wicket (default)

    use std::path::PathBuf;

    /// Returns the wicket home directory.
    ///
    /// Checks WICKET_HOME env var first, falls back to ~/.config/wicket
    pub fn wicket_home() -> PathBuf {
        if let Ok(home) = std::env::var("WICKET_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("wicket"))
            .expect("Could not determine home directory")
    }

    /// Path of config.toml under the wicket home.
    pub fn config_path() -> PathBuf {
        wicket_home().join("config.toml")
    }

    /// Returns the directory where log files are written.
    pub fn logs_dir() -> PathBuf {
        wicket_home().join("logs")
    }
}

/// Application configuration, stored at ${WICKET_HOME}/config.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color theme applied at startup
    pub theme: Theme,

    /// Username pre-filled on the sign-in form
    pub saved_username: Option<String>,

    /// Whether the saved username is applied at startup
    pub remember_me: bool,

    /// Number of one-time-passcode entry cells
    pub otp_digits: usize,

    /// Simulated authentication backend
    #[serde(default)]
    pub mock: MockAuthConfig,
}

impl Config {
    pub const DEFAULT_OTP_DIGITS: usize = 6;
    const DEFAULT_MOCK_DELAY_MS: u64 = 1500;
    const DEFAULT_MOCK_SUCCESS_RATE: f64 = 0.5;

    /// Reads the config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Reads the config from `path`, or returns defaults when no file exists.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the username to pre-fill on the sign-in form.
    ///
    /// A saved username is honored only when remember_me is also set;
    /// a stale value left behind by a hand-edited config is ignored.
    pub fn remembered_username(&self) -> Option<&str> {
        if self.remember_me {
            self.saved_username.as_deref()
        } else {
            None
        }
    }

    /// Persists the theme field, leaving the rest of the file alone.
    pub fn save_theme(theme: Theme) -> Result<()> {
        Self::save_theme_to(&paths::config_path(), theme)
    }

    /// Persists the theme field to `path`.
    ///
    /// A missing file is created from the template; an existing one is
    /// re-merged with it, so other fields and comments survive the edit.
    pub fn save_theme_to(path: &Path, theme: Theme) -> Result<()> {
        use toml_edit::value;

        let mut doc = Self::editable_document(path)?;

        doc["theme"] = value(theme.display_name());

        Self::write_config(path, &doc.to_string())
    }

    /// Saves the remembered username to the config file.
    pub fn save_remembered_username(username: &str) -> Result<()> {
        Self::save_remembered_username_to(&paths::config_path(), username)
    }

    /// Saves the remembered username to a specific config file path.
    ///
    /// Writes saved_username and remember_me in the same atomic write so
    /// a saved username is never on disk without the flag.
    pub fn save_remembered_username_to(path: &Path, username: &str) -> Result<()> {
        use toml_edit::value;

        let mut doc = Self::editable_document(path)?;

        doc["saved_username"] = value(username);
        doc["remember_me"] = value(true);

        Self::write_config(path, &doc.to_string())
    }

    /// Removes the remembered username from the config file.
    pub fn clear_remembered_username() -> Result<()> {
        Self::clear_remembered_username_to(&paths::config_path())
    }

    /// Removes the remembered username from a specific config file path.
    ///
    /// Removes saved_username and remember_me in the same atomic write.
    pub fn clear_remembered_username_to(path: &Path) -> Result<()> {
        let mut doc = Self::editable_document(path)?;

        doc.as_table_mut().remove("saved_username");
        doc.as_table_mut().remove("remember_me");

        Self::write_config(path, &doc.to_string())
    }

    /// Writes a fresh config file from the template.
    /// Refuses to overwrite an existing file.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Loads the config file as an editable document for a field-targeted save.
    ///
    /// Starts from the template and merges user values when the file exists,
    /// so every save re-applies the latest template comments.
    fn editable_document(path: &Path) -> Result<toml_edit::DocumentMut> {
        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Writes `content` to `path` through a temp file and rename, creating
    /// parent directories first. A crash mid-write leaves the old file intact.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            saved_username: None,
            remember_me: false,
            otp_digits: Self::DEFAULT_OTP_DIGITS,
            mock: MockAuthConfig::default(),
        }
    }
}
