use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::{
    domain::DelayMs,
    error::{ModelError, ModelResult},
};

/// Configuration of an exponential backoff schedule.
///
/// The delay for step `n` is `min(max, initial * 2^max(n - j, 0))`, where `j` is
/// a jitter sample drawn from `[0, random]` and rounded to the nearest integer.
///
/// All three fields are required; no defaults are provided here.
/// Values are not checked when deserialized, call [`ExponentialOptions::validate`]
/// (or construct the strategy with `try_new`) to reject nonsensical input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExponentialOptions {
    /// Base delay in milliseconds, returned as-is at step zero.
    pub initial: DelayMs,
    /// Upper bound of the jitter subtracted from the step count.
    ///
    /// Expressed in steps, not milliseconds: a value of `2.0` may lower the
    /// growth exponent by up to two.
    pub random: f64,
    /// Hard ceiling on the returned delay in milliseconds.
    pub max: DelayMs,
}

impl ExponentialOptions {
    pub const fn new(initial: DelayMs, random: f64, max: DelayMs) -> Self {
        Self {
            initial,
            random,
            max,
        }
    }

    /// Options without jitter: every step produces a deterministic delay.
    pub const fn deterministic(initial: DelayMs, max: DelayMs) -> Self {
        Self::new(initial, 0.0, max)
    }

    /// Checks that the configuration describes a meaningful schedule.
    ///
    /// # Examples
    /// ```
    /// use rebound_model::{ExponentialOptions, ModelError};
    ///
    /// assert!(ExponentialOptions::new(100, 1.0, 10_000).validate().is_ok());
    /// assert_eq!(
    ///     ExponentialOptions::new(500, 0.0, 100).validate(),
    ///     Err(ModelError::MaxBelowInitial { initial: 500, max: 100 }),
    /// );
    /// ```
    pub fn validate(&self) -> ModelResult<()> {
        if self.initial == 0 {
            return Err(ModelError::ZeroInitial);
        }
        if self.max == 0 {
            return Err(ModelError::ZeroMax);
        }
        if self.max < self.initial {
            return Err(ModelError::MaxBelowInitial {
                initial: self.initial,
                max: self.max,
            });
        }
        if !self.random.is_finite() || self.random < 0.0 {
            return Err(ModelError::InvalidRandom(self.random));
        }
        Ok(())
    }

    /// Returns `true` when the configuration draws no jitter.
    pub fn is_deterministic(&self) -> bool {
        self.random == 0.0
    }
}
