use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid user: {0}")]
    InvalidUser(String),

    #[error("invalid group: {0}")]
    InvalidGroup(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
