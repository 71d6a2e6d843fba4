//! Run configuration: mode presets and the optional `config.toml`.
//!
//! A run's behavior is described by [`RunConfig`] — just two optional knobs,
//! resolved once before any file is touched:
//!
//! - `resize_limit`: bound both dimensions to this many pixels (never enlarging)
//! - `quality`: encoder quality level, 0–100
//!
//! The [`Mode`] preset decides which knobs are engaged:
//!
//! | Mode | resize_limit | quality |
//! |---|---|---|
//! | `plain` | unset | unset |
//! | `min` | default max size | unset |
//! | `comp` | unset | default quality |
//! | `mincomp` | default max size | default quality |
//!
//! Unset quality means JPEG output falls back to quality 90 and PNG to
//! compression effort 6 at encode time.
//!
//! ## Config File
//!
//! Defaults (and the input/output directories) can be overridden by a
//! `config.toml` in the working directory:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input = "image"    # Source directory
//! output = "dist"    # Destination directory
//!
//! [defaults]
//! max_size = 2000    # Max bounding dimension for resize modes (px)
//! quality = 80       # Quality for compress modes (0-100)
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Built-in default max bounding dimension for resize modes.
pub const DEFAULT_MAX_SIZE: u32 = 2000;
/// Built-in default quality for compress modes.
pub const DEFAULT_QUALITY: u8 = 80;

/// Run preset selecting which conversion knobs are engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// Convert formats only: no resize, no recompression
    #[default]
    Plain,
    /// Resize to the default max dimension
    Min,
    /// Recompress at the default quality
    Comp,
    /// Resize and recompress
    Mincomp,
}

/// Knobs for one run, resolved once before processing begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Max allowed pixel dimension after resizing; `None` disables resizing.
    pub resize_limit: Option<u32>,
    /// Encoder quality level; `None` means per-format fallbacks apply.
    pub quality: Option<u8>,
}

/// Resolve a mode preset into a run configuration.
pub fn resolve(mode: Mode, defaults: &DefaultsConfig) -> RunConfig {
    match mode {
        Mode::Plain => RunConfig::default(),
        Mode::Min => RunConfig {
            resize_limit: Some(defaults.max_size),
            quality: None,
        },
        Mode::Comp => RunConfig {
            resize_limit: None,
            quality: Some(defaults.quality),
        },
        Mode::Mincomp => RunConfig {
            resize_limit: Some(defaults.max_size),
            quality: Some(defaults.quality),
        },
    }
}

/// Tool configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Source directory, relative to the working directory.
    pub input: String,
    /// Destination directory, relative to the working directory.
    pub output: String,
    /// Default knob values used by the mode presets.
    pub defaults: DefaultsConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            input: "image".to_string(),
            output: "dist".to_string(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.quality > 100 {
            return Err(ConfigError::Validation(
                "defaults.quality must be 0-100".into(),
            ));
        }
        if self.defaults.max_size == 0 {
            return Err(ConfigError::Validation(
                "defaults.max_size must be non-zero".into(),
            ));
        }
        if self.input.is_empty() || self.output.is_empty() {
            return Err(ConfigError::Validation(
                "input and output directories must be non-empty".into(),
            ));
        }
        Ok(())
    }
}

/// Default knob values for the mode presets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Max bounding dimension applied by the resize modes (px).
    pub max_size: u32,
    /// Quality level applied by the compress modes (0-100).
    pub quality: u8,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Load `config.toml` from the given directory, falling back to the stock
/// config when the file does not exist. A malformed file is an error — a
/// silently ignored config is worse than a failed run.
pub fn load_config(dir: &Path) -> Result<ToolConfig, ConfigError> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(ToolConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config: ToolConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A documented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> String {
    format!(
        r#"# batchpix configuration
# All options are optional - the values below are the built-in defaults.

# Source directory, relative to where batchpix runs
input = "image"

# Destination directory, relative to where batchpix runs
output = "dist"

[defaults]
# Max bounding dimension for the resize modes (min, mincomp), in pixels.
# Images already inside the box are left at their original size.
max_size = {DEFAULT_MAX_SIZE}

# Quality for the compress modes (comp, mincomp), 0-100.
# Without a compress mode, JPEG output uses quality 90 and PNG output
# uses compression effort 6.
quality = {DEFAULT_QUALITY}
"#
    )
}
