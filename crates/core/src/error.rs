use thiserror::Error;

pub type CoreResult<T> = Result<T, ComandaError>;

#[derive(Error, Debug)]
pub enum ComandaError {
    /// Malformed tier table or settings value supplied by the surrounding system.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Out-of-range numeric input (negative distance, negative points, NaN).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComandaError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, ComandaError::Configuration(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ComandaError::InvalidInput(_))
    }
}
