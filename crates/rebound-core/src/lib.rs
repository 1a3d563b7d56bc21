pub mod error;
pub mod jitter;
pub mod strategy;

pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::jitter::{FixedJitter, JitterSource, SeededJitter, ThreadJitter};
    pub use crate::strategy::{BackoffStrategy, Delays, ExponentialBackoff};
}
