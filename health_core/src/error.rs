//! Error types for probes and the hosting application

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures raised from inside a probe's evaluation.
///
/// The registry never lets these escape `run_all`; they surface as a `DOWN`
/// outcome for the probe that produced them.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Unsupported driver: {0}")]
    UnsupportedDriver(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ProbeError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(e) => ProbeError::Configuration(e.to_string()),
            _ => ProbeError::Connection(err.to_string()),
        }
    }
}
