//! Named random-choice helpers.
//!
//! Every random decision in the engine goes through here, drawing from the
//! injected [`RngCore`] so that a seeded generator reproduces a story exactly.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// A "one in N" chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Odds {
    /// Number of equally likely outcomes, exactly one of which hits.
    pub one_in: u32,
}

impl Odds {
    /// A one-in-`n` chance.
    #[must_use]
    pub const fn one_in(n: u32) -> Self {
        Self { one_in: n }
    }

    /// Roll the odds. An `Odds` of one in one always hits.
    pub fn hits(self, rng: &mut dyn RngCore) -> bool {
        roll(rng, self.one_in) == 0
    }
}

/// Roll a die with `sides` faces numbered from zero.
///
/// `sides` is validated to be non-zero when configuration is loaded; a zero
/// here is treated as a one-sided die.
pub fn roll(rng: &mut dyn RngCore, sides: u32) -> u32 {
    rng.gen_range(0..sides.max(1))
}

/// Pick uniformly from a slice.
pub fn pick<'a, T>(rng: &mut dyn RngCore, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn one_in_one_always_hits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(Odds::one_in(1).hits(&mut rng));
        }
    }

    #[test]
    fn roll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(roll(&mut rng, 26) < 26);
        }
        assert_eq!(roll(&mut rng, 0), 0);
    }

    #[test]
    fn pick_from_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: [u8; 0] = [];
        assert!(pick(&mut rng, &empty).is_none());
        assert_eq!(pick(&mut rng, &[3]), Some(&3));
    }

    #[test]
    fn same_seed_same_rolls() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let xs: Vec<u32> = (0..20).map(|_| roll(&mut a, 100)).collect();
        let ys: Vec<u32> = (0..20).map(|_| roll(&mut b, 100)).collect();
        assert_eq!(xs, ys);
    }
}
