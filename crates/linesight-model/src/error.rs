use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid {kind}: {value:?} must not be empty")]
    InvalidId { kind: &'static str, value: String },
    #[error("unknown match tier: {0}")]
    UnknownTier(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
