//! Glide configuration system
//!
//! Loads transition defaults and demo settings from `glide.toml`, with
//! environment variables taking precedence for one-off overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "glide.toml";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlideConfig {
    /// Defaults applied to every transition
    pub transition: TransitionSettings,
    /// Terminal demo settings
    pub demo: DemoSettings,
}

/// Transition defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    /// Run length in milliseconds
    pub duration_ms: f64,
    /// Wait before the first frame, in milliseconds
    pub delay_ms: f64,
    /// Restart instead of ending
    pub looping: bool,
    /// Easing curve name (`cubic_out` or `cubicOut`)
    pub ease: String,
}

/// Demo binary settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Frames per second
    pub frame_rate: f64,
    /// Progress bar width in cells
    pub width: usize,
    /// Number of runs before exiting
    pub runs: u32,
    /// Cycles to show before stopping a looping transition
    pub loop_cycles: u32,
    /// Drive the reversed ("out") direction of the curve
    pub reverse: bool,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            duration_ms: 800.0,
            delay_ms: 0.0,
            looping: false,
            ease: "ease_in".to_string(),
        }
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            width: 40,
            runs: 1,
            loop_cycles: 3,
            reverse: false,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl GlideConfig {
    /// Load configuration from a TOML file
    ///
    /// Missing sections and keys fall back to their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `glide.toml` from the current directory, or the defaults if it
    /// is missing or malformed
    pub fn load_or_default() -> Self {
        match Self::load_from_file(DEFAULT_CONFIG_FILE) {
            Ok(config) => {
                debug!(file = DEFAULT_CONFIG_FILE, "loaded config");
                config
            }
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(err) => {
                warn!(file = DEFAULT_CONFIG_FILE, error = %err, "using default config");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over file values. Values that
    /// fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        // Transition settings
        if let Ok(val) = std::env::var("GLIDE_DURATION") {
            match val.parse::<f64>() {
                Ok(ms) => self.transition.duration_ms = ms,
                Err(_) => warn!(value = %val, "ignoring GLIDE_DURATION"),
            }
        }
        if let Ok(val) = std::env::var("GLIDE_DELAY") {
            match val.parse::<f64>() {
                Ok(ms) => self.transition.delay_ms = ms,
                Err(_) => warn!(value = %val, "ignoring GLIDE_DELAY"),
            }
        }
        if let Ok(val) = std::env::var("GLIDE_LOOP") {
            self.transition.looping = parse_flag(&val);
        }
        if let Ok(ease) = std::env::var("GLIDE_EASE") {
            self.transition.ease = ease;
        }

        // Demo settings
        if let Ok(val) = std::env::var("GLIDE_FPS") {
            match val.parse::<f64>() {
                Ok(fps) => self.demo.frame_rate = fps,
                Err(_) => warn!(value = %val, "ignoring GLIDE_FPS"),
            }
        }
        if let Ok(val) = std::env::var("GLIDE_REVERSE") {
            self.demo.reverse = parse_flag(&val);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from glide.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
