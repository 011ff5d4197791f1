//! Configuration file loading with precedence handling.

use crate::render::{RenderOptions, DEFAULT_BYTE_DUMP_WIDTH, DEFAULT_THEME};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "CURSORCHATS_CONFIG";

/// Environment variable overriding the syntax theme.
pub const ENV_THEME: &str = "CURSORCHATS_THEME";

/// Environment variable overriding the chats directory.
pub const ENV_CHATS_DIR: &str = "CURSORCHATS_CHATS_DIR";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Theme name is not one of the known themes.
    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),

    /// Byte dump width must be positive.
    #[error("Byte dump width must be at least 1")]
    ZeroWidth,
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/cursorchats/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory holding the chat stores.
    #[serde(default)]
    pub chats_dir: Option<PathBuf>,

    /// Colorize roles and expanded text.
    #[serde(default)]
    pub color: Option<bool>,

    /// Theme name (e.g., "monokai", "solarized-dark").
    #[serde(default)]
    pub theme: Option<String>,

    /// Bytes per byte-dump row.
    #[serde(default)]
    pub byte_dump_width: Option<usize>,

    /// Append the wire-format structure of binary blobs.
    #[serde(default)]
    pub wire_structure: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Directory holding the chat stores.
    pub chats_dir: PathBuf,
    /// Colorize output.
    pub color: bool,
    /// Theme name.
    pub theme: String,
    /// Bytes per byte-dump row. `None` until set by a file or the CLI, so
    /// the terminal width can fill in.
    pub byte_dump_width: Option<usize>,
    /// Append wire structure to binary blobs.
    pub wire_structure: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            chats_dir: default_chats_dir(),
            color: false,
            theme: DEFAULT_THEME.to_string(),
            byte_dump_width: None,
            wire_structure: false,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Check values that the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !crate::render::is_valid_theme(&self.theme) {
            return Err(ConfigError::UnknownTheme(self.theme.clone()));
        }
        if self.byte_dump_width == Some(0) {
            return Err(ConfigError::ZeroWidth);
        }
        Ok(())
    }

    /// Rendering options for this configuration.
    pub fn to_render_options(&self) -> RenderOptions {
        RenderOptions {
            color: self.color,
            byte_dump_width: self.byte_dump_width.unwrap_or(DEFAULT_BYTE_DUMP_WIDTH),
            wire_structure: self.wire_structure,
            theme: self.theme.clone(),
        }
    }
}

/// Resolve default chats directory: `~/.cursor/chats`.
///
/// Falls back to a relative `.cursor/chats` when the home directory is unknown.
pub fn default_chats_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".cursor")
        .join("chats")
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/cursorchats/cursorchats.log` on Linux,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("cursorchats").join("cursorchats.log")
    } else {
        PathBuf::from("cursorchats.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/cursorchats/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cursorchats").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CURSORCHATS_CONFIG` environment variable
/// 3. Default path `~/.config/cursorchats/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{} is empty", ENV_CONFIG)));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `CURSORCHATS_THEME` and `CURSORCHATS_CHATS_DIR`.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(theme) = std::env::var(ENV_THEME) {
        config.theme = theme;
    }

    if let Some(dir) = std::env::var_os(ENV_CHATS_DIR) {
        config.chats_dir = PathBuf::from(dir);
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        chats_dir: config.chats_dir.unwrap_or(defaults.chats_dir),
        color: config.color.unwrap_or(defaults.color),
        theme: config.theme.unwrap_or(defaults.theme),
        byte_dump_width: config.byte_dump_width.or(defaults.byte_dump_width),
        wire_structure: config.wire_structure.unwrap_or(defaults.wire_structure),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Flags the user set on the command line.
///
/// Boolean flags only ever switch a setting on; absent flags leave the
/// lower-precedence value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--chats-dir`
    pub chats_dir: Option<PathBuf>,
    /// `--color`
    pub color: bool,
    /// `--theme`
    pub theme: Option<String>,
    /// `--wire`
    pub wire_structure: bool,
    /// `--width`
    pub byte_dump_width: Option<usize>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(dir) = cli.chats_dir {
        config.chats_dir = dir;
    }

    if cli.color {
        config.color = true;
    }

    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    if cli.wire_structure {
        config.wire_structure = true;
    }

    if let Some(width) = cli.byte_dump_width {
        config.byte_dump_width = Some(width);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_cursorchats_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("cursorchats.log"),
            "Default log path should end with 'cursorchats.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(
            !config.log_file_path.as_os_str().is_empty(),
            "Default config should have non-empty log_file_path"
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(resolved.log_file_path, custom_path);
    }

    #[test]
    fn missing_config_file_log_path_uses_default() {
        let resolved = merge_config(Some(ConfigFile::default()));
        assert_eq!(resolved.log_file_path, default_log_path());
    }
}
