use crate::models::SpriteSpec;
use crate::rendering::OutputFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Default sprite size and bounds
    #[serde(default)]
    pub sprite: SpriteConfig,

    /// PNG output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Input size limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SpriteConfig {
    /// Target width when the request does not give one
    #[serde(default = "default_dimension")]
    pub width: u32,

    /// Target height when the request does not give one
    #[serde(default = "default_dimension")]
    pub height: u32,

    /// Largest accepted target width or height
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

fn default_dimension() -> u32 {
    SpriteSpec::DEFAULT.width
}

fn default_max_dimension() -> u32 {
    1024
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            max_dimension: default_max_dimension(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Re-compress output with oxipng
    #[serde(default = "default_optimize")]
    pub optimize: bool,
}

fn default_optimize() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            optimize: default_optimize(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LimitsConfig {
    /// Largest accepted request body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Largest accepted decoded source image, in pixels
    #[serde(default = "default_max_source_pixels")]
    pub max_source_pixels: u64,
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024 // 16 MiB
}

fn default_max_source_pixels() -> u64 {
    64 * 1024 * 1024 // 8192x8192
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            max_source_pixels: default_max_source_pixels(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load configuration from a YAML file, failing on any problem.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            width = config.sprite.width,
            height = config.sprite.height,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load configuration if a path is given, falling back to defaults on
    /// any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::load(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(%e, "Failed to load config, using defaults");
                    Self::default()
                }
            },
            None => {
                tracing::debug!("No config file given, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Check that the configured defaults are themselves usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sprite.max_dimension == 0 {
            return Err(ConfigError::Invalid(
                "sprite.max_dimension must be at least 1".to_string(),
            ));
        }
        SpriteSpec::new(
            self.sprite.width,
            self.sprite.height,
            self.sprite.max_dimension,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.limits.max_upload_bytes == 0 || self.limits.max_source_pixels == 0 {
            return Err(ConfigError::Invalid("limits must be positive".to_string()));
        }
        Ok(())
    }

    /// The configured default target size.
    pub fn default_spec(&self) -> SpriteSpec {
        SpriteSpec {
            width: self.sprite.width,
            height: self.sprite.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.sprite.width, 64);
        assert_eq!(config.sprite.height, 64);
        assert_eq!(config.sprite.max_dimension, 1024);
        assert_eq!(config.output.format, OutputFormat::Indexed);
        assert!(config.output.optimize);
        assert_eq!(config.limits.max_upload_bytes, 16 * 1024 * 1024);
        assert!(config.validate().is_ok());
        assert_eq!(config.default_spec(), SpriteSpec::DEFAULT);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
sprite:
  width: 16
  height: 32
  max_dimension: 256
output:
  format: rgba
  optimize: false
limits:
  max_upload_bytes: 1024
  max_source_pixels: 4096
"#;

        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.sprite.width, 16);
        assert_eq!(config.sprite.height, 32);
        assert_eq!(config.sprite.max_dimension, 256);
        assert_eq!(config.output.format, OutputFormat::Rgba);
        assert!(!config.output.optimize);
        assert_eq!(config.limits.max_upload_bytes, 1024);
        assert_eq!(config.limits.max_source_pixels, 4096);
    }

    #[test]
    fn test_deserialize_partial_config_uses_defaults() {
        let config = AppConfig::from_yaml("sprite:\n  width: 8\n").unwrap();

        assert_eq!(config.sprite.width, 8);
        assert_eq!(config.sprite.height, 64);
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.limits, LimitsConfig::default());
    }

    #[test]
    fn test_deserialize_rejects_unknown_format() {
        let result = AppConfig::from_yaml("output:\n  format: jpeg\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_default_above_max() {
        let mut config = AppConfig::default();
        config.sprite.width = 2048;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sprite:\n  width: 24\n  height: 12").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.default_spec(), SpriteSpec { width: 24, height: 12 });
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = AppConfig::load(Path::new("/nonexistent/msx-sprite.yaml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sprite: [not, a, map]").unwrap();

        let config = AppConfig::load_or_default(Some(file.path()));
        assert_eq!(config, AppConfig::default());
        assert_eq!(AppConfig::load_or_default(None), AppConfig::default());
    }
}
