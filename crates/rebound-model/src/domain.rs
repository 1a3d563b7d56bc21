/// Delay value in milliseconds.
///
/// Used for the base delay and the upper clamp of a backoff configuration.
pub type DelayMs = u64;

/// Number of `next` applications since a strategy was created or last reset.
pub type Step = u32;
