use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::core::Size;
use crate::domain::tap::StaleDoubleTap;

/// File name looked up next to the executable
pub const CONFIG_FILE_NAME: &str = "tactile-paths.toml";

/// Environment variable overriding the configuration path
pub const CONFIG_ENV_VAR: &str = "TACTILE_PATHS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Configuration value `{field}` = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },
}

/// Ruler grid overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerConfig {
    pub enabled: bool,
    /// Distance between two dots in pixels
    pub spacing: f32,
    pub dot_radius: f32,
    /// Label every n-th dot along the axes, 0 disables labels
    pub label_every: u32,
}

impl RulerConfig {
    pub const MIN_SPACING: f32 = 10.0;
    pub const MAX_SPACING: f32 = 500.0;
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spacing: 50.0,
            dot_radius: 2.0,
            label_every: 4,
        }
    }
}

/// Thresholds for synthesizing tap gestures from raw contacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    /// Longest contact still counted as a tap
    pub max_duration_ms: u64,
    /// Movement tolerance in pixels before a contact stops being a tap
    pub slop: f32,
}

impl TapConfig {
    pub fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_duration_ms)
    }
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            max_duration_ms: 300,
            slop: 8.0,
        }
    }
}

/// User-facing configuration for a drawing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Radius of touch spots, also used for anchor detection
    pub spot_radius: f32,
    pub double_tap_interval_ms: u64,
    /// Move the provisional spot while the finger is dragged
    pub follow_touch: bool,
    pub stale_double_tap: StaleDoubleTap,
    /// PNG shown behind the drawing
    pub background: Option<PathBuf>,
    /// TrueType/OpenType font used for labels
    pub font: Option<PathBuf>,
    pub ruler: RulerConfig,
    pub tap: TapConfig,
}

impl DrawingConfig {
    pub const MIN_CANVAS: u32 = 64;
    pub const MAX_CANVAS: u32 = 8192;
    pub const MIN_SPOT_RADIUS: f32 = 2.0;
    pub const MAX_SPOT_RADIUS: f32 = 200.0;
    pub const MIN_DOUBLE_TAP_MS: u64 = 100;
    pub const MAX_DOUBLE_TAP_MS: u64 = 5000;

    pub fn double_tap_interval(&self) -> Duration {
        Duration::from_millis(self.double_tap_interval_ms)
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width as f32, self.canvas_height as f32)
    }

    /// Checks every bounded value, naming the first offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "canvas_width",
            self.canvas_width,
            Self::MIN_CANVAS,
            Self::MAX_CANVAS,
        )?;
        check_range(
            "canvas_height",
            self.canvas_height,
            Self::MIN_CANVAS,
            Self::MAX_CANVAS,
        )?;
        check_range(
            "spot_radius",
            self.spot_radius,
            Self::MIN_SPOT_RADIUS,
            Self::MAX_SPOT_RADIUS,
        )?;
        check_range(
            "double_tap_interval_ms",
            self.double_tap_interval_ms,
            Self::MIN_DOUBLE_TAP_MS,
            Self::MAX_DOUBLE_TAP_MS,
        )?;
        check_range(
            "ruler.spacing",
            self.ruler.spacing,
            RulerConfig::MIN_SPACING,
            RulerConfig::MAX_SPACING,
        )?;
        check_range("ruler.dot_radius", self.ruler.dot_radius, 0.5, 20.0)?;
        check_range("tap.max_duration_ms", self.tap.max_duration_ms, 50, 2000)?;
        check_range("tap.slop", self.tap.slop, 0.0, 100.0)?;
        Ok(())
    }

    /// Parses and validates a TOML document
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: DrawingConfig =
            toml::from_str(content).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`
    ///
    /// A missing file yields the defaults; an unreadable, malformed or
    /// out-of-range file is an error.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content, path)?;
                log::info!("Configuration loaded from {}", path.display());
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "No configuration at {}, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Resolves the configuration path: the environment override first,
    /// then the file next to the executable
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }

        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE_NAME)
    }
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1024,
            canvas_height: 768,
            spot_radius: 20.0,
            double_tap_interval_ms: 800,
            follow_touch: false,
            stale_double_tap: StaleDoubleTap::Restart,
            background: None,
            font: None,
            ruler: RulerConfig::default(),
            tap: TapConfig::default(),
        }
    }
}

fn check_range<T>(field: &'static str, value: T, min: T, max: T) -> Result<(), ConfigError>
where
    T: PartialOrd + std::fmt::Display,
{
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        })
    }
}
