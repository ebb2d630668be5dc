use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Failure reported by an external collaborator (fetching, generation).
    #[error("collaborator error: {0}")]
    Collaborator(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
