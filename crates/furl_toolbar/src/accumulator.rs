//! Fractional scroll accumulation
//!
//! Scroll deltas arrive as floats but the header offset is an integer pixel
//! value. The accumulator carries the fractional part of every delta forward
//! so a long run of sub-pixel deltas still moves the offset by the right
//! number of whole pixels.

/// Converts fractional deltas into whole-pixel offset changes without drift
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OffsetAccumulator {
    /// Always strictly within (-1, 1)
    remainder: f32,
}

impl OffsetAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Motion not yet large enough to move the offset by a whole pixel
    pub fn remainder(&self) -> f32 {
        self.remainder
    }

    /// Add `delta` to `offset`, carrying the fractional leftover.
    ///
    /// Returns the whole number of pixels applied.
    pub fn apply(&mut self, offset: &mut i32, delta: f32) -> i32 {
        let total = self.remainder + delta;
        let whole = total.trunc();
        self.remainder = total - whole;
        *offset += whole as i32;
        whole as i32
    }

    /// Like [`apply`](Self::apply), but lands exactly on `min` or `max` when
    /// `offset + delta` reaches either bound, discarding the remainder.
    ///
    /// Consumption is computed against the integer offset, so a delta that
    /// covers the full distance to a bound must leave the offset on it.
    pub fn apply_within(&mut self, offset: &mut i32, delta: f32, min: i32, max: i32) -> i32 {
        let before = *offset;
        let target = before as f32 + delta;

        if target >= max as f32 {
            *offset = max;
            self.remainder = 0.0;
        } else if target <= min as f32 {
            *offset = min;
            self.remainder = 0.0;
        } else {
            self.apply(offset, delta);
            *offset = (*offset).clamp(min, max);
        }

        *offset - before
    }

    /// Drop any carried fraction
    pub fn reset(&mut self) {
        self.remainder = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_deltas_apply_directly() {
        let mut acc = OffsetAccumulator::new();
        let mut offset = 0;

        assert_eq!(acc.apply(&mut offset, -20.0), -20);
        assert_eq!(offset, -20);
        assert_eq!(acc.remainder(), 0.0);
    }

    #[test]
    fn test_fraction_is_carried() {
        let mut acc = OffsetAccumulator::new();
        let mut offset = 0;

        acc.apply(&mut offset, -0.6);
        assert_eq!(offset, 0);
        acc.apply(&mut offset, -0.6);
        assert_eq!(offset, -1);
        assert!((acc.remainder() + 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_thousand_small_deltas_do_not_drift() {
        let mut acc = OffsetAccumulator::new();
        let mut offset = 0;

        for i in 1..=1000 {
            acc.apply(&mut offset, 0.3);
            let exact = 0.3 * i as f64;
            assert!((offset as f64 - exact).abs() <= 1.0, "drifted at step {}", i);
            assert!(acc.remainder().abs() < 1.0);
        }

        assert!((299..=301).contains(&offset));
    }

    #[test]
    fn test_truncates_toward_zero() {
        let mut acc = OffsetAccumulator::new();
        let mut offset = 0;

        assert_eq!(acc.apply(&mut offset, -2.7), -2);
        assert!((acc.remainder() + 0.7).abs() < 1e-5);
        // Reversing direction cancels against the carried fraction
        assert_eq!(acc.apply(&mut offset, 0.9), 0);
        assert!((acc.remainder() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_apply_within_lands_on_bounds() {
        let mut acc = OffsetAccumulator::new();
        let mut offset = -5;
        acc.apply(&mut offset, -0.4); // carries -0.4

        // Covering the full distance back to zero must reach zero exactly
        assert_eq!(acc.apply_within(&mut offset, 5.0, -56, 0), 5);
        assert_eq!(offset, 0);
        assert_eq!(acc.remainder(), 0.0);

        assert_eq!(acc.apply_within(&mut offset, -80.0, -56, 0), -56);
        assert_eq!(offset, -56);
    }

    #[test]
    fn test_reset_drops_fraction() {
        let mut acc = OffsetAccumulator::new();
        let mut offset = 0;
        acc.apply(&mut offset, 0.75);
        acc.reset();
        acc.apply(&mut offset, 0.5);
        assert_eq!(offset, 0);
    }
}
