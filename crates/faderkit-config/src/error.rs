//! Errors from loading, validating and saving a faderkit config.

use std::path::PathBuf;
use thiserror::Error;

/// Why a config could not be loaded or saved.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be written.
    #[error("cannot write config '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid config TOML.
    #[error("invalid config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The config could not be turned into TOML.
    #[error("cannot serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The file parsed but holds unusable values.
    #[error("config rejected: {0}")]
    Validation(#[from] crate::validation::ValidationError),

    /// The config directory could not be created.
    #[error("cannot create config directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Reading `path` failed.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Writing `path` failed.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Creating the directory `path` failed.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Whether the error means the file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::ReadFile { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
