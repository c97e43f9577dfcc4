use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug)]
pub enum ModelError {
    InvalidPrice(String),
    InvalidUrl(url::ParseError),
    InvalidMedia(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidPrice(msg) => write!(f, "invalid price: {msg}"),
            ModelError::InvalidUrl(err) => write!(f, "invalid url: {err}"),
            ModelError::InvalidMedia(msg) => write!(f, "invalid media: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::InvalidUrl(err) => Some(err),
            ModelError::InvalidPrice(_) | ModelError::InvalidMedia(_) => None,
        }
    }
}

impl From<url::ParseError> for ModelError {
    fn from(err: url::ParseError) -> Self {
        ModelError::InvalidUrl(err)
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
