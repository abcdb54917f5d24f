use crate::animations::{Color, DEFAULT_DURATION, DEFAULT_THRESHOLD, Millis};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const DEFAULT_QUANTITY: usize = 3;
const DEFAULT_WIDTH: u16 = 9;
const DEFAULT_FPS: u32 = 60;
const CONFIG_FILE_NAME: &str = "config.yaml";

/// The full configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub ellipsis: EllipsisConfig,

    #[serde(default)]
    pub terminal: TerminalConfig,
}

/// How the ellipsis itself looks and moves.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EllipsisConfig {
    /// The number of dots in the ring.
    pub quantity: usize,

    /// The length of a single fade, in milliseconds.
    pub duration: Millis,

    /// How far into its fade a dot starts the next one.
    pub threshold: f32,

    /// The dot color. Its alpha is replaced by the animation on every frame.
    pub color: Color,
}

impl Default for EllipsisConfig {
    fn default() -> Self {
        Self { quantity: DEFAULT_QUANTITY, duration: DEFAULT_DURATION, threshold: DEFAULT_THRESHOLD, color: Color::BLACK }
    }
}

/// How the terminal host presents the ellipsis.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerminalConfig {
    /// The width of the strip the dots are laid out in, in columns.
    pub width: u16,

    /// The color the dots are blended against.
    pub background: Color,

    /// How many frames to draw per second.
    pub fps: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, background: Color::WHITE, fps: DEFAULT_FPS }
    }
}

impl Config {
    /// Load the configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_yaml(&contents)
    }

    /// Load the configuration from the default path, if there's a file in it.
    pub fn load_default() -> Result<Self, ConfigError> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_yaml(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Read(path, e)),
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The path the configuration is read from when none is given.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "progress-ellipsis")?;
        Some(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.ellipsis.threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        if self.terminal.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        Ok(())
    }
}

/// Errors that can occur when loading the configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),

    #[error("threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f32),

    #[error("fps must be greater than zero")]
    ZeroFps,
}
