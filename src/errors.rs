//! Error types for the gravity engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid {field}: {value:?} is not a valid number")]
    Parse { field: String, value: String },

    #[error("a body already occupies the position requested for {name:?}")]
    DuplicatePosition { name: String },

    #[error("mass must be positive, got {value}")]
    NonPositiveMass { value: f64 },

    #[error("zero separation encountered in a force evaluation")]
    NumericDomain,

    #[error("no body at index {0}")]
    BadIndex(usize),

    #[error("no body named {0:?}")]
    UnknownBody(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed system file: {0}")]
    Format(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
