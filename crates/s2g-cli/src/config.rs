//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use s2g_core::{ConfigError, PipelineOptions};

use crate::Cli;

/// Application configuration.
///
/// Every field can also be given on the command line, which takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default Gource user name.
    #[serde(default)]
    pub user: Option<String>,

    /// Prefix stripped from every file path.
    #[serde(default)]
    pub strip_prefix: Option<String>,

    /// Strip each session's own project root.
    #[serde(default)]
    pub auto_strip: bool,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (S2G_*)
        figment = figment.merge(Env::prefixed("S2G_"));

        figment.extract()
    }

    /// Combine this configuration with command-line flags.
    ///
    /// A strip mode chosen on the command line replaces the configured one
    /// entirely; contradictory settings within one layer are rejected.
    pub fn pipeline_options(&self, cli: &Cli) -> Result<PipelineOptions, ConfigError> {
        let (strip_prefix, auto_strip) = if cli.sets_strip_mode() {
            (cli.strip_prefix.as_deref(), cli.auto_strip)
        } else {
            (self.strip_prefix.as_deref(), self.auto_strip)
        };
        let user = cli.user.as_deref().or(self.user.as_deref());

        PipelineOptions::new(strip_prefix, auto_strip, user)
    }
}

/// Returns the platform-specific config directory for session2gource.
///
/// On Linux: `~/.config/session2gource`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("session2gource"))
}
