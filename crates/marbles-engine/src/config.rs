//! Configuration types for the marbles engine.
//!
//! This module defines the rolling window and layout constants a timeline
//! is built from. Sizes are in logical units; renderers scale them to the
//! area they draw into.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Cadence of the frame loop. Bound to display refresh, not configurable.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Delay between a terminal event and the automatic detach it triggers.
pub const AUTO_DETACH_DELAY: f64 = 0.5;

/// Main configuration for a timeline visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizerConfig {
    /// Rolling window in seconds: the visible span plus one second of margin.
    #[serde(default = "default_window_seconds")]
    pub window_seconds: f64,

    /// Width of one event box.
    #[serde(default = "default_box_width")]
    pub box_width: f64,

    /// Height of one event box.
    #[serde(default = "default_box_height")]
    pub box_height: f64,

    /// Width of the whole track.
    #[serde(default = "default_track_width")]
    pub track_width: f64,

    /// Height of the whole track.
    #[serde(default = "default_track_height")]
    pub track_height: f64,

    /// Vertical offset between boxes sharing a horizontal bucket.
    #[serde(default = "default_stack_step")]
    pub stack_step: f64,

    /// Keep the frame loop running after a completion.
    #[serde(default)]
    pub keep_running: bool,
}

fn default_window_seconds() -> f64 {
    11.0
}

fn default_box_width() -> f64 {
    40.0
}

fn default_box_height() -> f64 {
    20.0
}

fn default_track_width() -> f64 {
    440.0
}

fn default_track_height() -> f64 {
    80.0
}

fn default_stack_step() -> f64 {
    12.0
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            box_width: default_box_width(),
            box_height: default_box_height(),
            track_width: default_track_width(),
            track_height: default_track_height(),
            stack_step: default_stack_step(),
            keep_running: false,
        }
    }
}

impl VisualizerConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Check that the layout math is well defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_seconds.is_nan() || self.window_seconds <= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "window_seconds must be greater than 1, got {}",
                self.window_seconds
            )));
        }
        let sizes = [
            ("box_width", self.box_width),
            ("box_height", self.box_height),
            ("track_width", self.track_width),
            ("track_height", self.track_height),
        ];
        for (name, value) in sizes {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.box_width >= self.track_width {
            return Err(ConfigError::Invalid(format!(
                "box_width ({}) must be smaller than track_width ({})",
                self.box_width, self.track_width
            )));
        }
        if self.stack_step < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stack_step must not be negative, got {}",
                self.stack_step
            )));
        }
        Ok(())
    }

    /// Horizontal scroll speed in units per second.
    ///
    /// An event of age zero sits at the right edge; one of age
    /// `window_seconds - 1` sits at x = 0.
    pub fn increment(&self) -> f64 {
        (self.track_width - self.box_width) / (self.window_seconds - 1.0)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Values that make the layout undefined.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
