//! Application configuration.
//!
//! Defaults reproduce the tuning the character rig was authored against:
//! eyes respond after 100 ms of pointer rest, follow at 10% per frame
//! within ±0.3 units, and blink every 4 s ± 15% over 150 ms.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GazerigError, GazerigResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Eye-tracking filter tuning.
    pub gaze: GazeConfig,

    /// Blink cycle tuning.
    pub blink: BlinkConfig,

    /// Names of the rig nodes the animation drives.
    pub rig: RigBindingConfig,

    /// Defaults for the headless simulator.
    pub simulation: SimulationDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Pointer-following gaze filter parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    /// Pointer must rest this long before its position becomes the new target.
    pub delay_before_response_ms: f64,

    /// Fraction of the remaining distance covered per frame, in (0, 1].
    pub follow_speed: f64,

    /// Maximum offset magnitude per axis, in rig units.
    pub eye_range: f64,
}

/// Randomized blink schedule parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Peak eyelid closure, in [0, 1].
    pub close_percentage: f64,

    /// Nominal interval between blink starts.
    pub time_between_blinks_ms: f64,

    /// Jitter width as a fraction of the interval, in [0, 2).
    pub randomization: f64,

    /// Length of one close-and-reopen motion.
    pub blink_duration_ms: f64,

    /// Delay before the very first blink.
    pub first_blink_delay_ms: f64,
}

/// Rig node names bound by the compositor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigBindingConfig {
    pub left_eye_node: String,
    pub right_eye_node: String,
}

/// Default parameters for headless simulation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationDefaults {
    /// Frames rendered per second.
    pub fps: u32,

    /// Simulated run length.
    pub duration_secs: f64,

    /// Render surface size in pixels.
    pub surface_width: u32,
    pub surface_height: u32,

    /// Fixed RNG seed for reproducible blink schedules.
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "gazerig=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gaze: GazeConfig::default(),
            blink: BlinkConfig::default(),
            rig: RigBindingConfig::default(),
            simulation: SimulationDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            delay_before_response_ms: 100.0,
            follow_speed: 0.1,
            eye_range: 0.3,
        }
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            close_percentage: 0.8,
            time_between_blinks_ms: 4_000.0,
            randomization: 0.3,
            blink_duration_ms: 150.0,
            first_blink_delay_ms: 2_000.0,
        }
    }
}

impl Default for RigBindingConfig {
    fn default() -> Self {
        Self {
            left_eye_node: "LeftEye".to_string(),
            right_eye_node: "RightEye".to_string(),
        }
    }
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            fps: 60,
            duration_secs: 10.0,
            surface_width: 1280,
            surface_height: 720,
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl GazeConfig {
    /// Reject values that would make the filter diverge or stall.
    pub fn validate(&self) -> GazerigResult<()> {
        let d = self.delay_before_response_ms;
        if !d.is_finite() || d < 0.0 {
            return Err(GazerigError::invalid_field(
                "gaze.delay_before_response_ms",
                format!("must be a finite value >= 0, got {d}"),
            ));
        }
        let s = self.follow_speed;
        if !(s > 0.0 && s <= 1.0) {
            return Err(GazerigError::invalid_field(
                "gaze.follow_speed",
                format!("must be in (0, 1], got {s}"),
            ));
        }
        let r = self.eye_range;
        if !r.is_finite() || r < 0.0 {
            return Err(GazerigError::invalid_field(
                "gaze.eye_range",
                format!("must be a finite value >= 0, got {r}"),
            ));
        }
        Ok(())
    }
}

impl BlinkConfig {
    /// Reject values that would divide by zero or schedule into the past.
    pub fn validate(&self) -> GazerigResult<()> {
        let c = self.close_percentage;
        if !(0.0..=1.0).contains(&c) {
            return Err(GazerigError::invalid_field(
                "blink.close_percentage",
                format!("must be in [0, 1], got {c}"),
            ));
        }
        let t = self.time_between_blinks_ms;
        if !(t.is_finite() && t > 0.0) {
            return Err(GazerigError::invalid_field(
                "blink.time_between_blinks_ms",
                format!("must be a finite value > 0, got {t}"),
            ));
        }
        let r = self.randomization;
        if !(0.0..2.0).contains(&r) {
            return Err(GazerigError::invalid_field(
                "blink.randomization",
                format!("must be in [0, 2), got {r}"),
            ));
        }
        let b = self.blink_duration_ms;
        if !(b.is_finite() && b > 0.0) {
            return Err(GazerigError::invalid_field(
                "blink.blink_duration_ms",
                format!("must be a finite value > 0, got {b}"),
            ));
        }
        let f = self.first_blink_delay_ms;
        if !f.is_finite() || f < 0.0 {
            return Err(GazerigError::invalid_field(
                "blink.first_blink_delay_ms",
                format!("must be a finite value >= 0, got {f}"),
            ));
        }
        Ok(())
    }

    /// Shortest and longest interval the jitter can produce.
    pub fn interval_bounds_ms(&self) -> (f64, f64) {
        let half = self.randomization / 2.0;
        (
            self.time_between_blinks_ms * (1.0 - half),
            self.time_between_blinks_ms * (1.0 + half),
        )
    }
}

impl RigBindingConfig {
    pub fn validate(&self) -> GazerigResult<()> {
        if self.left_eye_node.trim().is_empty() {
            return Err(GazerigError::invalid_field(
                "rig.left_eye_node",
                "must not be empty",
            ));
        }
        if self.right_eye_node.trim().is_empty() {
            return Err(GazerigError::invalid_field(
                "rig.right_eye_node",
                "must not be empty",
            ));
        }
        if self.left_eye_node == self.right_eye_node {
            return Err(GazerigError::invalid_field(
                "rig.right_eye_node",
                format!("must differ from left eye node '{}'", self.left_eye_node),
            ));
        }
        Ok(())
    }
}

impl SimulationDefaults {
    pub fn validate(&self) -> GazerigResult<()> {
        if self.fps == 0 {
            return Err(GazerigError::invalid_field(
                "simulation.fps",
                "must be greater than 0",
            ));
        }
        if !(self.duration_secs.is_finite() && self.duration_secs >= 0.0) {
            return Err(GazerigError::invalid_field(
                "simulation.duration_secs",
                format!("must be a finite value >= 0, got {}", self.duration_secs),
            ));
        }
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(GazerigError::invalid_field(
                "simulation.surface_width",
                "surface dimensions must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::from_file(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Unlike [`AppConfig::load`], errors propagate.
    pub fn from_file(path: &Path) -> GazerigResult<Self> {
        if !path.exists() {
            return Err(GazerigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse config from a JSON string.
    pub fn from_json(content: &str) -> GazerigResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| GazerigError::config(format!("malformed config JSON: {e}")))
    }

    /// Validate every section.
    pub fn validate(&self) -> GazerigResult<()> {
        self.gaze.validate()?;
        self.blink.validate()?;
        self.rig.validate()?;
        self.simulation.validate()?;
        Ok(())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> GazerigResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> GazerigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("gazerig").join("config.json")
}
