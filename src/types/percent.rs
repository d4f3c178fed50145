// ABOUTME: Progress percentage confined to 0..=100.
// ABOUTME: Out-of-range engine values are clamped, never rejected.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const FULL: Percent = Percent(100);

    /// Clamp an arbitrary integer into 0..=100.
    pub fn clamped(value: i64) -> Self {
        Percent(value.clamp(0, 100) as u8)
    }

    /// Percentage of `done` out of `total`, rounded down. Zero when total is zero.
    pub fn of(done: u64, total: u64) -> Self {
        if total == 0 {
            return Percent::ZERO;
        }
        let ratio = (u128::from(done) * 100) / u128::from(total);
        Percent(ratio.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_both_ends() {
        assert_eq!(Percent::clamped(-5), Percent::ZERO);
        assert_eq!(Percent::clamped(250), Percent::FULL);
        assert_eq!(Percent::clamped(42).value(), 42);
    }

    #[test]
    fn of_handles_zero_total_and_overshoot() {
        assert_eq!(Percent::of(10, 0), Percent::ZERO);
        assert_eq!(Percent::of(3, 4).value(), 75);
        assert_eq!(Percent::of(9, 4), Percent::FULL);
    }
}
