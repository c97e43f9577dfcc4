use thiserror::Error;
use vidshelf_model::{MediaItemId, ModelError};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid model data: {0}")]
    Model(#[from] ModelError),

    #[error("Duplicate media item id: {0}")]
    DuplicateItem(MediaItemId),

    #[error("Invalid section: {0}")]
    InvalidSection(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
