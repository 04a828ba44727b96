//! Simulated "bot is composing" pause before a reply is shown.

use std::time::Duration;

use rand::Rng;

/// Default lower bound of the reply pause.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(500);

/// Default upper bound of the reply pause.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(1500);

/// Uniform random pause between `min` and `max`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyDelay {
    min: Duration,
    max: Duration,
}

impl ReplyDelay {
    /// Create a delay range. Bounds given in the wrong order are swapped.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A range that always yields zero; replies are shown as soon as they arrive.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draw one pause from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min = u64::try_from(self.min.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(rng.gen_range(min..=max))
    }
}

impl Default for ReplyDelay {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DELAY, DEFAULT_MAX_DELAY)
    }
}
