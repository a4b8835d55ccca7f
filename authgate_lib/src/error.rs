use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthgateError {

    /// config file path, io error
    #[error("failed to read config file '{0}': {1}")]
    ConfigFileUnreadable(String, io::Error),

    /// config file path, toml error
    #[error("failed to parse config file '{0}': {1}")]
    ConfigFileUnparsable(String, toml::de::Error),

    #[error("failed to load TLS certificate or key: {0}")]
    TlsConfigUnloadable(#[from] io::Error),

    #[error("failed to set up authentication backend client: {0}")]
    AuthClientSetup(String),
}
