use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Catalog read failed: {0}")]
    Catalog(String),

    #[error("History read failed: {0}")]
    History(String),

    #[error("Data file not found: {0}")]
    DataFileNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
