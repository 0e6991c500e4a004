use thiserror::Error;

pub type RevlensResult<T> = Result<T, RevlensError>;

#[derive(Error, Debug)]
pub enum RevlensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
