use std::time::Duration;

use tracing::{debug, trace};

use rebound_model::{DelayMs, ExponentialOptions, Step};

use crate::{
    error::CoreResult,
    jitter::{JitterSource, ThreadJitter},
    strategy::BackoffStrategy,
};

/// Capped exponential backoff with jitter subtracted from the exponent.
///
/// At step `n` the delay is `min(max, initial * 2^max(n - j, 0))` where `j` is
/// `random * u` rounded half away from zero and `u` is a fresh sample from the
/// jitter source. Jitter only ever lowers the exponent, so no draw can exceed
/// the un-jittered delay for the current step or the configured `max`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use rebound_core::prelude::*;
/// use rebound_model::ExponentialOptions;
///
/// let first = ExponentialBackoff::new(ExponentialOptions::new(100, 0.0, 10_000));
/// let third = first.next().next();
///
/// assert_eq!(first.delay(), Duration::from_millis(100));
/// assert_eq!(third.delay(), Duration::from_millis(400));
/// assert_eq!(third.reset(), first);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBackoff<J = ThreadJitter> {
    options: ExponentialOptions,
    step: Step,
    jitter: J,
}

impl ExponentialBackoff {
    /// Creates a strategy at step zero drawing jitter from [`ThreadJitter`].
    ///
    /// The options are taken as-is; nonsensical values produce nonsensical
    /// (but still clamped to `max`) delays. Use [`try_new`](Self::try_new) to
    /// reject them up front.
    pub fn new(options: ExponentialOptions) -> Self {
        Self {
            options,
            step: 0,
            jitter: ThreadJitter,
        }
    }

    /// Like [`new`](Self::new), but validates the options first.
    pub fn try_new(options: ExponentialOptions) -> CoreResult<Self> {
        options.validate()?;
        Ok(Self::new(options))
    }
}

impl From<ExponentialOptions> for ExponentialBackoff {
    fn from(options: ExponentialOptions) -> Self {
        Self::new(options)
    }
}

impl<J: JitterSource> ExponentialBackoff<J> {
    /// Replaces the jitter source, keeping configuration and step.
    pub fn with_jitter<K: JitterSource>(self, jitter: K) -> ExponentialBackoff<K> {
        ExponentialBackoff {
            options: self.options,
            step: self.step,
            jitter,
        }
    }

    pub fn options(&self) -> &ExponentialOptions {
        &self.options
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn jitter(&self) -> &J {
        &self.jitter
    }

    /// Delay in milliseconds for the current step, with a fresh jitter draw.
    pub fn delay_ms(&self) -> DelayMs {
        let jitter = self.jitter_steps();
        let effective = self.step.saturating_sub(jitter);
        let delay = self.delay_at(effective);

        trace!(
            step = self.step,
            jitter,
            effective_step = effective,
            delay_ms = delay,
            "backoff delay computed"
        );
        delay
    }

    /// Highest delay the current step can produce: the value without jitter.
    pub fn ceiling_ms(&self) -> DelayMs {
        self.delay_at(self.step)
    }

    /// `min(max, initial * 2^exponent)`; overflow counts as exceeding `max`.
    fn delay_at(&self, exponent: Step) -> DelayMs {
        let ExponentialOptions { initial, max, .. } = self.options;
        1u64.checked_shl(exponent)
            .and_then(|factor| initial.checked_mul(factor))
            .map_or(max, |delay| delay.min(max))
    }

    /// Draws `random * u` and rounds half away from zero.
    ///
    /// Negative, `NaN` and zero bounds draw nothing; `as` saturates huge values.
    fn jitter_steps(&self) -> Step {
        let bound = self.options.random;
        if bound.is_nan() || bound <= 0.0 {
            return 0;
        }
        (self.jitter.sample() * bound).round() as Step
    }
}

impl<J: JitterSource + Clone> BackoffStrategy for ExponentialBackoff<J> {
    fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms())
    }

    fn next(&self) -> Self {
        Self {
            step: self.step.saturating_add(1),
            ..self.clone()
        }
    }

    fn reset(&self) -> Self {
        debug!(step = self.step, "backoff reset");
        Self {
            step: 0,
            ..self.clone()
        }
    }
}
