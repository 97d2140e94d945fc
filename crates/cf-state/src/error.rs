//! Error types for the persistence layer

use thiserror::Error;

/// Store error
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Profile creation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Name must contain at least one letter or digit")]
    EmptyName,

    #[error("Invalid age: {0}")]
    InvalidAge(u32),
}

/// Result type alias
pub type StoreResult<T> = Result<T, StoreError>;
