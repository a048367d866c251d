//! Day search order for lab placement.
//!
//! The lab scheduler tries candidate days in a randomized order so that
//! lab blocks spread across the week. The ordering is injected, which
//! keeps the rest of the engine deterministic and lets tests force a
//! fixed order.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Day;

/// Source of day search orders.
pub trait DayOrder {
    /// Returns `days` in the order they should be tried.
    fn next_day_order(&mut self, days: &[Day]) -> Vec<Day>;
}

/// Shuffles the days with any [`Rng`].
///
/// Seed the generator (e.g., `StdRng::seed_from_u64`) for reproducible runs.
#[derive(Debug, Clone)]
pub struct ShuffledDays<R> {
    rng: R,
}

impl<R: Rng> ShuffledDays<R> {
    /// Wraps a random generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DayOrder for ShuffledDays<R> {
    fn next_day_order(&mut self, days: &[Day]) -> Vec<Day> {
        let mut order = days.to_vec();
        order.shuffle(&mut self.rng);
        order
    }
}

/// Keeps days in their given (canonical) order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalDays;

impl DayOrder for CanonicalDays {
    fn next_day_order(&mut self, days: &[Day]) -> Vec<Day> {
        days.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_canonical_keeps_order() {
        let mut order = CanonicalDays;
        assert_eq!(order.next_day_order(&Day::ALL), Day::ALL.to_vec());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut order = ShuffledDays::new(SmallRng::seed_from_u64(42));
        let mut days = order.next_day_order(&Day::ALL);
        days.sort();
        assert_eq!(days, Day::ALL.to_vec());
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = ShuffledDays::new(SmallRng::seed_from_u64(7));
        let mut b = ShuffledDays::new(SmallRng::seed_from_u64(7));
        for _ in 0..5 {
            assert_eq!(a.next_day_order(&Day::ALL), b.next_day_order(&Day::ALL));
        }
    }
}
