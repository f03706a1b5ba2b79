//! Inclusive value ranges drawn at random during scene construction.

use rand::distr::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An inclusive `[min, max]` range.
///
/// Bounds may be given in either order; sampling always draws from the
/// range between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + PartialOrd> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// A range containing a single value.
    pub const fn fixed(value: T) -> Self {
        Self { min: value, max: value }
    }

    /// Returns `(low, high)` with `low <= high`.
    pub fn ordered(&self) -> (T, T) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }

    /// Returns true if `value` lies between the bounds.
    pub fn contains(&self, value: T) -> bool {
        let (low, high) = self.ordered();
        low <= value && value <= high
    }
}

impl<T: Copy + PartialOrd + SampleUniform> Span<T> {
    /// Draws a value uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        let (low, high) = self.ordered();
        if low == high {
            return low;
        }
        rng.random_range(low..=high)
    }
}
