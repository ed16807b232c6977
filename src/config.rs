//! Configuration management for pshelp.
//!
//! Handles loading configuration from TOML files and environment variables:
//! which shell answers help requests and how the result is displayed.

use crate::error::{PsHelpError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for pshelp.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Help backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Help viewer configuration.
    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Help backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// Shell executable used to run `Get-Help`.
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Arguments passed to the shell before `-Command`.
    #[serde(default = "default_shell_args")]
    pub args: Vec<String>,
}

fn default_shell() -> String {
    "pwsh".to_string()
}

fn default_shell_args() -> Vec<String> {
    vec!["-NoProfile".to_string(), "-NonInteractive".to_string()]
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            args: default_shell_args(),
        }
    }
}

/// Help viewer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Pager command line (e.g. "less -R"); help goes to stdout when unset.
    pub pager: Option<String>,

    /// Title shown above the help text.
    #[serde(default = "default_title")]
    pub title: String,

    /// Keep the temporary help file after viewing.
    #[serde(default)]
    pub keep_output: bool,
}

fn default_title() -> String {
    "Help".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            pager: None,
            title: default_title(),
            keep_output: false,
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pshelp")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| PsHelpError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            PsHelpError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Applies environment variables (PSHELP_SHELL, PAGER) as defaults.
    pub fn apply_env_defaults(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Applies environment defaults read through `lookup`.
    ///
    /// Only values still at their defaults are replaced.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.backend.shell == default_shell() {
            if let Some(shell) = lookup("PSHELP_SHELL").filter(|s| !s.is_empty()) {
                self.backend.shell = shell;
            }
        }
        if self.viewer.pager.is_none() {
            self.viewer.pager = lookup("PAGER").filter(|p| !p.is_empty());
        }
    }
}
