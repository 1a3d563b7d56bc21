use thiserror::Error;

use rebound_model::ModelError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid backoff options: {0}")]
    InvalidOptions(#[from] ModelError),
}

pub type CoreResult<T> = Result<T, CoreError>;
