use std::time::Duration;

mod exponential;
pub use exponential::ExponentialBackoff;

/// A schedule of delays between attempts of a failing operation.
///
/// Implementations are immutable values: [`next`](BackoffStrategy::next) and
/// [`reset`](BackoffStrategy::reset) return a new strategy and leave the
/// receiver untouched, so a caller may keep an older value around for logging
/// or comparison.
///
/// Retry loops stay generic over `S: BackoffStrategy` and pick the concrete
/// family at construction time.
pub trait BackoffStrategy: Sized {
    /// Delay to wait before the next attempt at the current step.
    ///
    /// Drawing jitter is the only effect; the strategy itself is not changed.
    fn delay(&self) -> Duration;

    /// Strategy for the step after this one.
    fn next(&self) -> Self;

    /// Strategy equivalent to a freshly constructed one with the same configuration.
    fn reset(&self) -> Self;

    /// Infinite iterator over successive delays, starting at the current step.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use rebound_core::prelude::*;
    /// use rebound_model::ExponentialOptions;
    ///
    /// let backoff = ExponentialBackoff::new(ExponentialOptions::deterministic(100, 1_000));
    /// let delays: Vec<Duration> = backoff.delays().take(5).collect();
    ///
    /// assert_eq!(delays.last(), Some(&Duration::from_millis(1_000)));
    /// ```
    fn delays(self) -> Delays<Self> {
        Delays { current: self }
    }
}

/// Iterator returned by [`BackoffStrategy::delays`].
///
/// Yields the delay of the current step, then advances. It never ends; bound it
/// with `take` or stop pulling once the caller gives up retrying.
#[derive(Debug, Clone)]
pub struct Delays<S> {
    current: S,
}

impl<S> Delays<S> {
    /// Strategy whose delay will be yielded next.
    pub fn strategy(&self) -> &S {
        &self.current
    }

    pub fn into_strategy(self) -> S {
        self.current
    }
}

impl<S: BackoffStrategy> Iterator for Delays<S> {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let delay = self.current.delay();
        self.current = BackoffStrategy::next(&self.current);
        Some(delay)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal second family, used to check the loop stays family-agnostic.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Constant {
        every: Duration,
        attempts: u32,
    }

    impl BackoffStrategy for Constant {
        fn delay(&self) -> Duration {
            self.every
        }

        fn next(&self) -> Self {
            Self {
                attempts: self.attempts + 1,
                ..*self
            }
        }

        fn reset(&self) -> Self {
            Self {
                attempts: 0,
                ..*self
            }
        }
    }

    fn total_wait<S: BackoffStrategy>(strategy: S, attempts: usize) -> Duration {
        strategy.delays().take(attempts).sum()
    }

    #[test]
    fn delays_are_family_agnostic() {
        let constant = Constant {
            every: Duration::from_millis(250),
            attempts: 0,
        };
        assert_eq!(total_wait(constant, 4), Duration::from_secs(1));
    }

    #[test]
    fn delays_advance_the_inner_strategy() {
        let constant = Constant {
            every: Duration::from_millis(10),
            attempts: 0,
        };

        let mut it = constant.delays();
        it.by_ref().take(3).for_each(drop);

        assert_eq!(it.strategy().attempts, 3);
        assert_eq!(it.into_strategy().reset().attempts, 0);
    }
}
