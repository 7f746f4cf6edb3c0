use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration.
///
/// Conversion itself never fails; only reading and decoding a user supplied
/// config file can.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
