//! Configuration file support for exprtree.
//!
//! This module provides TOML-based configuration file loading with the following features:
//! - Forward-compatible: unknown fields are ignored
//! - Graceful degradation: errors in the default file are logged but don't prevent a run
//! - Layered configuration: defaults < config file < command-line arguments

use etcetera::BaseStrategy;
use std::path::{Path, PathBuf};

use crate::args::{CommandLineArgs, DiagnosticStyle, OutputFormat};

/// Root configuration structure for exprtree.
///
/// All fields are optional to support forward compatibility and partial configuration.
/// Unknown fields in the TOML file are silently ignored.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration options.
    pub output: OutputConfig,

    /// Error reporting configuration options.
    pub diagnostics: DiagnosticsConfig,
}

/// Output configuration options.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used to print parse results.
    pub format: Option<OutputFormat>,
}

/// Error reporting configuration options.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Style used to report lexical and syntax errors.
    pub style: Option<DiagnosticStyle>,

    /// Whether error reports may use color.
    pub color: Option<bool>,
}

/// Settings for a single run, after merging defaults, configuration and arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RunOptions {
    /// Format used to print the result.
    pub format: OutputFormat,
    /// Style used to report lexical and syntax errors.
    pub diagnostics: DiagnosticStyle,
    /// Whether error reports may use color.
    pub use_color: bool,
}

impl Config {
    /// Converts the configuration to [`RunOptions`], merging with CLI arguments.
    ///
    /// Settings are applied with the following priority (highest to lowest):
    /// 1. CLI arguments (if explicitly set)
    /// 2. Config file values
    /// 3. Default values
    ///
    /// # Arguments
    ///
    /// * `args` - The parsed command-line arguments
    #[must_use]
    pub fn to_run_options(&self, args: &CommandLineArgs) -> RunOptions {
        RunOptions {
            format: args.format.or(self.output.format).unwrap_or_default(),
            diagnostics: args
                .diagnostics
                .or(self.diagnostics.style)
                .unwrap_or_default(),
            use_color: merge_bool_setting(!args.disable_color, true, self.diagnostics.color),
        }
    }
}

/// Merges a boolean setting from CLI args, config file, and defaults.
///
/// Priority: CLI (if explicitly set) > config file > default.
///
/// Since boolean CLI flags can't distinguish between "explicitly set to the default" and
/// "not provided", a CLI value that differs from the default is taken as explicit.
const fn merge_bool_setting(
    cli_value: bool,
    cli_default: bool,
    config_value: Option<bool>,
) -> bool {
    if cli_value != cli_default {
        cli_value
    } else if let Some(config) = config_value {
        config
    } else {
        cli_default
    }
}

/// Result of attempting to load a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration, or default if loading failed.
    pub config: Config,

    /// Any error that occurred during loading.
    pub error: Option<ConfigLoadError>,

    /// Whether the path was explicitly provided by the user (via `--config`).
    /// If true and there's an error, the run should fail rather than continue.
    pub explicit_path: bool,
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigLoadError {
    /// Failed to read the configuration file.
    Io(PathBuf, std::io::Error),

    /// Failed to parse the TOML content.
    Parse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => {
                write!(f, "failed to read config file {}: {e}", path.display())
            }
            Self::Parse(path, e) => {
                write!(f, "failed to parse config file {}: {e}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, e) => Some(e),
            Self::Parse(_, e) => Some(e),
        }
    }
}

/// Returns the default configuration file path for the current platform.
///
/// Uses the XDG Base Directory specification on Linux/macOS and appropriate
/// platform conventions on other systems via the `etcetera` crate.
///
/// Returns `None` if the platform's config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("exprtree").join("config.toml"))
}

/// Loads configuration from the specified path.
///
/// Note: This function sets `explicit_path` to `false`. Use `load_config` for
/// proper handling of explicit vs. default paths.
pub fn load_from_path(path: &Path) -> ConfigLoadResult {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| ConfigLoadError::Io(path.to_path_buf(), e))
        .and_then(|content| {
            toml::from_str(&content).map_err(|e| ConfigLoadError::Parse(path.to_path_buf(), e))
        });

    let (config, error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    ConfigLoadResult {
        config,
        error,
        explicit_path: false,
    }
}

/// Loads configuration based on the provided options.
///
/// # Arguments
///
/// * `disabled` - If true, skip loading and return defaults
/// * `explicit_path` - If provided, use this path instead of the default
///
/// If `explicit_path` is provided and loading fails, the result will have
/// `explicit_path: true` to indicate that the error should be treated as fatal.
pub fn load_config(disabled: bool, explicit_path: Option<&Path>) -> ConfigLoadResult {
    let defaults = || ConfigLoadResult {
        config: Config::default(),
        error: None,
        explicit_path: false,
    };

    if disabled {
        return defaults();
    }

    let path = match explicit_path {
        Some(p) => p.to_path_buf(),
        // Can't determine config path; use defaults silently
        None => match default_config_path() {
            Some(p) => p,
            None => return defaults(),
        },
    };

    // If using default path and file doesn't exist, silently use defaults
    if explicit_path.is_none() && !path.exists() {
        return defaults();
    }

    tracing::debug!("loading configuration from {}", path.display());

    let mut result = load_from_path(&path);
    result.explicit_path = explicit_path.is_some();
    result
}
