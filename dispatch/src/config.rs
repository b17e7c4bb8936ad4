//! Dispatcher configuration.
//!
//! Loaded from YAML; every key is optional.
//!
//! # Example YAML
//!
//! ```yaml
//! success_code: 0
//! error_code: 1
//! bundling: schema_aware
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use command_dispatch_core::Bundling;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::metadata::CommandMetaData;

/// How single-dash words with several letters are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundlingConfig {
    /// `-abc` is always `-a -b -c`.
    Always,
    /// `-abc` is always one flag named `abc`.
    Never,
    /// `-abc` stays whole when the target command declares `abc`.
    #[default]
    SchemaAware,
}

impl BundlingConfig {
    /// Bundling policy for arguments addressed to `command`.
    pub fn for_command(&self, command: &CommandMetaData) -> Bundling {
        match self {
            Self::Always => Bundling::Always,
            Self::Never => Bundling::Never,
            Self::SchemaAware => Bundling::unless_declared(command.long_names()),
        }
    }
}

/// Return codes and reading rules used by the
/// [`Dispatcher`](crate::Dispatcher).
///
/// # Examples
///
/// ```
/// use command_dispatch_engine::{BundlingConfig, DispatchConfig};
///
/// let config: DispatchConfig = serde_yaml::from_str("error_code: 70").unwrap();
/// assert_eq!(config.success_code, 0);
/// assert_eq!(config.error_code, 70);
/// assert_eq!(config.bundling, BundlingConfig::SchemaAware);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Returned when a command completes.
    pub success_code: i32,
    /// Returned when a command fails and no error handler matches.
    pub error_code: i32,
    pub bundling: BundlingConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            success_code: 0,
            error_code: 1,
            bundling: BundlingConfig::default(),
        }
    }
}

impl DispatchConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// or [`YamlError`](ConfigError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
