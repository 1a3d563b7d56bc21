use thiserror::Error;

use crate::domain::DelayMs;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("initial delay must be positive")]
    ZeroInitial,

    #[error("max delay must be positive")]
    ZeroMax,

    #[error("max delay {max}ms is below initial delay {initial}ms")]
    MaxBelowInitial { initial: DelayMs, max: DelayMs },

    #[error("jitter bound must be a finite non-negative number: {0}")]
    InvalidRandom(f64),
}

pub type ModelResult<T> = Result<T, ModelError>;
