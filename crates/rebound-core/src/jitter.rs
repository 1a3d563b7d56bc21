//! Sources of uniform randomness consumed by backoff strategies.
//!
//! A strategy draws exactly one sample per delay computation. Sources must be
//! usable from several threads at once: a strategy value may be shared and
//! queried concurrently.

use std::sync::{Arc, Mutex};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Largest `f64` strictly below `1.0`.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Uniform random number source over `[0, 1)`.
pub trait JitterSource: Send + Sync {
    /// Draws one sample in `[0, 1)`.
    fn sample(&self) -> f64;
}

/// Draws from the calling thread's generator (`rand::thread_rng`).
///
/// Each thread owns its generator, so concurrent draws never contend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ThreadJitter;

impl JitterSource for ThreadJitter {
    #[inline]
    fn sample(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..1.0)
    }
}

/// Always yields the same sample.
///
/// Values outside `[0, 1)` are clamped into range, `NaN` becomes `0.0`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FixedJitter(f64);

impl FixedJitter {
    pub fn new(sample: f64) -> Self {
        if sample.is_nan() {
            return Self(0.0);
        }
        Self(sample.clamp(0.0, BELOW_ONE))
    }

    /// The lowest possible draw; jitter never reduces the exponent.
    pub fn min() -> Self {
        Self(0.0)
    }

    /// The highest possible draw; jitter takes its full configured bound.
    pub fn max() -> Self {
        Self(BELOW_ONE)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl JitterSource for FixedJitter {
    #[inline]
    fn sample(&self) -> f64 {
        self.0
    }
}

/// Reproducible sample stream from a seeded [`StdRng`].
///
/// Clones share the same stream: strategies derived through `next`/`reset`
/// keep drawing from where their ancestor left off.
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: Arc<Mutex<StdRng>>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&self) -> f64 {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0.0..1.0),
            Err(poisoned) => poisoned.into_inner().gen_range(0.0..1.0),
        }
    }
}

impl<J: JitterSource + ?Sized> JitterSource for Arc<J> {
    #[inline]
    fn sample(&self) -> f64 {
        (**self).sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range(v: f64) -> bool {
        (0.0..1.0).contains(&v)
    }

    #[test]
    fn thread_jitter_stays_in_unit_interval() {
        let src = ThreadJitter;
        for _ in 0..1_000 {
            let v = src.sample();
            assert!(in_range(v), "sample out of range: {v}");
        }
    }

    #[test]
    fn fixed_jitter_clamps_input() {
        assert_eq!(FixedJitter::new(0.25).sample(), 0.25);
        assert_eq!(FixedJitter::new(-3.0).sample(), 0.0);
        assert_eq!(FixedJitter::new(f64::NAN).sample(), 0.0);

        let high = FixedJitter::new(1.0).sample();
        assert!(in_range(high), "1.0 must be clamped below one, got {high}");
        assert_eq!(high, FixedJitter::max().value());
    }

    #[test]
    fn seeded_jitter_is_reproducible() {
        let a = SeededJitter::new(42);
        let b = SeededJitter::new(42);

        let xs: Vec<f64> = (0..16).map(|_| a.sample()).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.sample()).collect();

        assert_eq!(xs, ys);
        assert!(xs.iter().copied().all(in_range));
    }

    #[test]
    fn seeded_jitter_clones_share_stream() {
        let a = SeededJitter::new(7);
        let b = a.clone();
        let reference = SeededJitter::new(7);

        let first = a.sample();
        let second = b.sample();

        assert_eq!(first, reference.sample());
        assert_eq!(second, reference.sample());
    }

    #[test]
    fn arc_forwards_to_inner_source() {
        let shared: Arc<dyn JitterSource> = Arc::new(FixedJitter::new(0.5));
        assert_eq!(shared.sample(), 0.5);
    }
}
