use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PickerError {
    #[error("invalid data version: {0}")]
    InvalidVersion(String),

    #[error("invalid champion id: {0}")]
    InvalidChampionId(String),

    #[error("invalid locale: {0}")]
    InvalidLocale(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("Data Dragon request failed: {0}")]
    Network(String),

    #[error("Data Dragon returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected Data Dragon payload: {0}")]
    DataFormat(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("filesystem error: {0}")]
    LocalIo(String),

    #[error("not ready: {0}")]
    NotReady(String),

    #[error("roster is already initialized")]
    AlreadyInitialized,

    #[error("champion not found: {0}")]
    ChampionNotFound(String),
}

impl PickerError {
    pub fn is_network(&self) -> bool {
        matches!(self, PickerError::Network(_) | PickerError::Status { .. })
    }
}
