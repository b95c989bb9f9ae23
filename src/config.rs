use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::graph::{InferenceOptions, DEFAULT_MAX_DEPTH};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub slices: SlicesConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    /// File the config was read from; `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Where slices live and how they are named
#[derive(Debug, Clone, Deserialize)]
pub struct SlicesConfig {
    #[serde(default = "default_slices_dir")]
    pub dir: PathBuf,
    /// Slice file extension, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SlicesConfig {
    fn default() -> Self {
        Self {
            dir: default_slices_dir(),
            extension: default_extension(),
            log_level: default_log_level(),
        }
    }
}

/// Inference tuning
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_slices_dir() -> PathBuf {
    PathBuf::from(".slices")
}

fn default_extension() -> String {
    "tt".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in SLICES_CONFIG environment variable (must exist)
    /// 2. ./config.toml in current directory (defaults are used when absent)
    ///
    /// SLICES_DIR, when set, overrides `slices.dir`. Nothing is logged here
    /// since the logger is configured from the result; see [`Config::source`].
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let mut config = match std::env::var("SLICES_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                let default_path = Path::new("config.toml");
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(dir) = std::env::var("SLICES_DIR") {
            if !dir.trim().is_empty() {
                config.slices.dir = PathBuf::from(dir);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.inference.max_depth == 0 {
            anyhow::bail!("inference.max_depth must be greater than 0");
        }

        let extension = self.slices.extension.trim();
        if extension.is_empty() || extension.starts_with('.') {
            anyhow::bail!(
                "slices.extension must be a non-empty extension without a leading dot, got {:?}",
                self.slices.extension
            );
        }

        if self.slices.dir.is_file() {
            anyhow::bail!(
                "slices.dir must be a directory, not a file: {}",
                self.slices.dir.display()
            );
        }

        Ok(())
    }

    /// Get the slices directory
    pub fn slices_dir(&self) -> &Path {
        &self.slices.dir
    }

    pub fn inference_options(&self) -> InferenceOptions {
        InferenceOptions {
            max_depth: self.inference.max_depth,
        }
    }
}
