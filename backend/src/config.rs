//! Configuration management for the Fruit Quality Analysis service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FQA__ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upload handling
    pub upload: UploadConfig,

    /// Image feature extraction
    pub image: ImageConfig,

    /// Fruit and quality detector
    #[serde(default)]
    pub detector: DetectorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Directory uploaded images are written to when `persist` is set
    pub dir: PathBuf,

    /// Keep a copy of every uploaded image
    pub persist: bool,

    /// Largest accepted image, in bytes
    pub max_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageConfig {
    /// Side length images are resized to before analysis
    pub target_size: u32,

    /// Histogram bins per HSV channel
    pub hist_bins: usize,

    /// Largest accepted width or height, checked before decoding
    pub max_dimension: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DetectorConfig {
    /// Fixed RNG seed for reproducible detections
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("FQA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("upload.dir", "data/raw")?
            .set_default("upload.persist", false)?
            .set_default("upload.max_bytes", DEFAULT_MAX_UPLOAD_BYTES as u64)?
            .set_default("image.target_size", 224)?
            .set_default("image.hist_bins", 256)?
            .set_default("image.max_dimension", i64::from(DEFAULT_MAX_IMAGE_DIMENSION))?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FQA__ prefix)
            .add_source(
                Environment::with_prefix("FQA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// 10 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_MAX_IMAGE_DIMENSION: u32 = 8192;

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            upload: UploadConfig::default(),
            image: ImageConfig::default(),
            detector: DetectorConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/raw"),
            persist: false,
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            target_size: 224,
            hist_bins: 256,
            max_dimension: DEFAULT_MAX_IMAGE_DIMENSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_loaded_defaults() {
        let config = Config::load().unwrap();
        let defaults = Config::default();

        assert_eq!(config.image.target_size, defaults.image.target_size);
        assert_eq!(config.image.hist_bins, defaults.image.hist_bins);
        assert_eq!(config.upload.max_bytes, defaults.upload.max_bytes);
        assert_eq!(config.image.max_dimension, defaults.image.max_dimension);
    }
}
