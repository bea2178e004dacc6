//! Inspector configuration via `enginelens.toml`
//!
//! All settings have defaults, so an empty file is a valid configuration.
//! Values are validated eagerly when loaded.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use enginelens_config::{ParseLimits, DEFAULT_MAX_DEPTH};
use enginelens_core::StatKey;
use enginelens_metadata::VersionRange;
use enginelens_stats::FAST_STATISTICS;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "enginelens.toml";

/// Error loading, validating or writing an [`InspectorConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The config file could not be written
    #[error("failed to write config file '{path}': {source}")]
    Write {
        /// File that was written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The content is not valid TOML for this config
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// The config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(String),

    /// A value is out of range
    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Inspector settings loaded from `enginelens.toml`
///
/// # Example
///
/// ```toml
/// max_metadata_len = 1048576
/// max_nesting_depth = 64
/// statistics_cursor_config = "statistics=(fast)"
/// block_size_key = 2009
/// min_format_version = 1
/// max_format_version = 1
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InspectorConfig {
    /// Longest metadata string that will be parsed, in bytes
    #[serde(default = "default_max_metadata_len")]
    pub max_metadata_len: usize,
    /// Deepest struct nesting that will be parsed
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    /// Options passed when opening statistics cursors
    #[serde(default = "default_statistics_cursor_config")]
    pub statistics_cursor_config: String,
    /// Statistics key of the on-disk size counter
    #[serde(default = "default_block_size_key")]
    pub block_size_key: i32,
    /// Lowest format version accepted by default
    #[serde(default = "default_format_version")]
    pub min_format_version: i64,
    /// Highest format version accepted by default
    #[serde(default = "default_format_version")]
    pub max_format_version: i64,
}

fn default_max_metadata_len() -> usize {
    1024 * 1024
}

fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_statistics_cursor_config() -> String {
    FAST_STATISTICS.to_string()
}

fn default_block_size_key() -> i32 {
    2009
}

fn default_format_version() -> i64 {
    1
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            max_metadata_len: default_max_metadata_len(),
            max_nesting_depth: default_max_nesting_depth(),
            statistics_cursor_config: default_statistics_cursor_config(),
            block_size_key: default_block_size_key(),
            min_format_version: default_format_version(),
            max_format_version: default_format_version(),
        }
    }
}

impl InspectorConfig {
    /// Check every value is usable
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for a zero limit or an empty version range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_metadata_len == 0 {
            return Err(ConfigError::Invalid {
                field: "max_metadata_len",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.max_nesting_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "max_nesting_depth",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.min_format_version > self.max_format_version {
            return Err(ConfigError::Invalid {
                field: "min_format_version",
                reason: format!(
                    "{} is greater than max_format_version {}",
                    self.min_format_version, self.max_format_version
                ),
            });
        }
        Ok(())
    }

    /// Parser bounds for metadata strings
    pub fn parse_limits(&self) -> ParseLimits {
        ParseLimits::new(self.max_metadata_len, self.max_nesting_depth)
    }

    /// Format versions accepted by default
    pub fn version_range(&self) -> VersionRange {
        VersionRange::new(self.min_format_version, self.max_format_version)
    }

    /// Statistics key of the on-disk size counter
    pub fn block_size_stat(&self) -> StatKey {
        StatKey(self.block_size_key)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Enginelens inspector configuration
#
# Longest metadata string that will be parsed, in bytes (default: 1 MiB)
max_metadata_len = 1048576

# Deepest struct nesting that will be parsed (default: 64)
max_nesting_depth = 64

# Options passed when opening statistics cursors
statistics_cursor_config = "statistics=(fast)"

# Statistics key of the on-disk size counter
block_size_key = 2009

# Format versions accepted by check_default_format_version
min_format_version = 1
max_format_version = 1
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed TOML and `Invalid` for bad values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: InspectorConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded inspector config");
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), "wrote default inspector config");
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = InspectorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.parse_limits(), ParseLimits::new(1024 * 1024, 64));
        assert_eq!(config.block_size_stat(), StatKey(2009));
        assert_eq!(config.statistics_cursor_config, "statistics=(fast)");
    }

    #[test]
    fn default_toml_parses_correctly() {
        let config = InspectorConfig::from_toml_str(InspectorConfig::default_toml()).unwrap();
        assert_eq!(config, InspectorConfig::default());
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = InspectorConfig::from_toml_str("").unwrap();
        assert_eq!(config, InspectorConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let config = InspectorConfig::from_toml_str("max_nesting_depth = 4\nmax_format_version = 3")
            .unwrap();
        assert_eq!(config.max_nesting_depth, 4);
        assert_eq!(config.version_range(), VersionRange::new(1, 3));
        assert_eq!(config.max_metadata_len, 1024 * 1024);
    }

    #[test]
    fn zero_limits_rejected() {
        let err = InspectorConfig::from_toml_str("max_metadata_len = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_metadata_len", .. }));

        let err = InspectorConfig::from_toml_str("max_nesting_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_nesting_depth", .. }));
    }

    #[test]
    fn inverted_version_range_rejected() {
        let err =
            InspectorConfig::from_toml_str("min_format_version = 3\nmax_format_version = 2")
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "min_format_version", .. }));
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = InspectorConfig::from_toml_str("max_nesting_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn write_default_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(!path.exists());

        InspectorConfig::write_default_if_missing(&path).unwrap();
        assert!(path.exists());

        let config = InspectorConfig::from_file(&path).unwrap();
        assert_eq!(config, InspectorConfig::default());
    }

    #[test]
    fn write_default_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "block_size_key = 7\n").unwrap();

        InspectorConfig::write_default_if_missing(&path).unwrap();
        let config = InspectorConfig::from_file(&path).unwrap();
        assert_eq!(config.block_size_key, 7);
    }

    #[test]
    fn write_to_file_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = InspectorConfig {
            statistics_cursor_config: "statistics=(all)".to_string(),
            max_format_version: 5,
            ..InspectorConfig::default()
        };
        config.write_to_file(&path).unwrap();
        assert_eq!(InspectorConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = InspectorConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
