// lib/src/errors.rs

use thiserror::Error;

use bincode::error::{DecodeError, EncodeError};
use models::ValidationError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database operation failed: {0}")]
    DatabaseError(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// A foreign key pointed at a row that does not exist.
    #[error("Missing reference: {table} {id}")]
    MissingReference { table: &'static str, id: u64 },

    #[error("Invalid input or data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Bincode decode error: {0}")]
    BincodeDecode(#[from] DecodeError),
    #[error("Bincode encode error: {0}")]
    BincodeEncode(#[from] EncodeError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

impl From<config::ConfigError> for StoreError {
    fn from(err: config::ConfigError) -> Self {
        StoreError::ConfigurationError(err.to_string())
    }
}
