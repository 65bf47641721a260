//=========================================================================
// Framework Configuration
//=========================================================================
//
// Startup settings read from a TOML file.
//
// Every section and field has a default, so an empty file (or no file at
// all) yields a runnable configuration. Values are only read while the
// GameManager is being built; nothing watches the file afterwards.
//
// ```toml
// [window]
// title = "Arcade"
// width = 800
// height = 600
//
// [frame]
// frame_rate = 60
// step_policy = "discard_excess"
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::graphics::{Color, RenderMode};

//=== Constants ===========================================================

/// Default simulation steps per second.
pub const FRAME_RATE: u32 = 60;

//=== ConfigError =========================================================

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its accepted range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

//=== FrameworkConfig =====================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameworkConfig {
    pub window: WindowConfig,
    pub frame: FrameConfig,
    pub graphics: GraphicsConfig,
    pub assets: AssetsConfig,
    pub audio: AudioConfig,
    pub camera: CameraConfig,
    pub logging: LoggingConfig,
}

impl FrameworkConfig {
    /// Reads, parses and validates `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the run loop cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame.frame_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "frame.frame_rate",
                reason: "must be greater than zero".into(),
            });
        }
        if self.frame.max_steps_per_iteration == 0 {
            return Err(ConfigError::Invalid {
                field: "frame.max_steps_per_iteration",
                reason: "must be greater than zero".into(),
            });
        }
        for (field, volume) in [
            ("audio.music_volume", self.audio.music_volume),
            ("audio.sfx_volume", self.audio.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{volume} is outside [0, 1]"),
                });
            }
        }
        if !(self.camera.follow_smoothing > 0.0 && self.camera.follow_smoothing <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "camera.follow_smoothing",
                reason: format!("{} is outside (0, 1]", self.camera.follow_smoothing),
            });
        }
        Ok(())
    }
}

//=== Sections ============================================================

/// Window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Arcade".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// What the run loop does with time left over after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicy {
    /// One step per gate crossing, leftover time dropped.
    #[default]
    DiscardExcess,

    /// Leftover time kept; several steps may run in one iteration.
    CarryOver,
}

/// Fixed-step timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameConfig {
    /// Simulation steps per second.
    pub frame_rate: u32,
    pub step_policy: StepPolicy,
    /// Step cap per loop iteration under `CarryOver`.
    pub max_steps_per_iteration: u32,
}

impl FrameConfig {
    /// Target duration of one step (`1 / frame_rate`).
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            step_policy: StepPolicy::DiscardExcess,
            max_steps_per_iteration: 5,
        }
    }
}

/// Graphics backend selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphicsConfig {
    pub mode: RenderMode,
    pub clear_color: Color,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Software,
            clear_color: Color::rgb(16, 16, 24),
        }
    }
}

/// Asset lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory asset paths are resolved against.
    pub root: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
        }
    }
}

/// Initial mixer volumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub music_volume: f32,
    pub sfx_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

/// Follow camera.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining distance covered per step; 1.0 snaps.
    pub follow_smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_smoothing: 1.0,
        }
    }
}

/// Log output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter string (e.g. `"info,physics=debug"`).
    /// Falls back to `RUST_LOG`, then `info`.
    pub filter: Option<String>,
}

//=========================================================================
// Unit Tests
//=========================================================================
