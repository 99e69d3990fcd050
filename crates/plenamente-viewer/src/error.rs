use std::path::PathBuf;

use plenamente_core::ColorParseError;

/// Errors raised while reading or writing viewer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the config directory")]
    NoConfigDir,

    #[error("I/O error on '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid color for '{field}': {source}")]
    InvalidColor {
        field: &'static str,
        #[source]
        source: ColorParseError,
    },
}
