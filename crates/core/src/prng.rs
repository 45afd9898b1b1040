//! Deterministic PRNG based on the Xorshift32 algorithm.
//!
//! Every shape, color and animation timing in a shard scene is a draw from
//! one [`Xorshift32`] stream. The algorithm (shift triple 13, 17, 5 and the
//! `2^32 - 1` divisor) is fixed: changing either alters every generated
//! piece, including ones that have already been minted.

use serde::{Deserialize, Serialize};

/// Divisor mapping the 32-bit state onto the unit interval.
const STATE_SCALE: f64 = 4_294_967_295.0;

/// Xorshift32 PRNG. Same seed always produces the same sequence.
///
/// Seed 0 is a fixed point of xorshift and is replaced by 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Fallback seed used when the caller provides 0.
    const FALLBACK_SEED: u32 = 1;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Current internal state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns it.
    ///
    /// Implements xorshift32 with shifts (13, 17, 5). Shifts are logical and
    /// bits shifted past the top are discarded.
    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// One draw: the next state divided by `2^32 - 1`.
    ///
    /// The result lies in `[0, 1]`; exactly `1.0` only for state `0xFFFF_FFFF`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / STATE_SCALE
    }

    /// `min + next_f64() * (max - min)`, consuming exactly one draw.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Integer in `[min, max]` (inclusive), consuming exactly one draw.
    ///
    /// Computed as `floor(range(min, max + 1))`, clamped to `max` for the single
    /// state where the draw is exactly `1.0`.
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        let v = self.range(min as f64, (max + 1) as f64).floor() as i64;
        v.min(max)
    }

    /// `next_f64() > threshold`, consuming exactly one draw.
    pub fn chance_above(&mut self, threshold: f64) -> bool {
        self.next_f64() > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u32_produces_known_golden_values_for_seed_42() {
        // If this test breaks, the PRNG algorithm changed and every shard
        // ever generated would render differently.
        let mut rng = Xorshift32::new(42);
        assert_eq!(rng.next_u32(), 11_355_432);
        assert_eq!(rng.next_u32(), 2_836_018_348);
        assert_eq!(rng.next_u32(), 476_557_059);
    }

    #[test]
    fn next_u32_matches_reference_sequence_for_seed_1() {
        let mut rng = Xorshift32::new(1);
        assert_eq!(rng.next_u32(), 270_369);
        assert_eq!(rng.next_u32(), 67_634_689);
        assert_eq!(rng.next_u32(), 2_647_435_461);
    }

    #[test]
    fn next_f64_divides_by_u32_max() {
        let mut rng = Xorshift32::new(42);
        let v = rng.next_f64();
        assert_eq!(v, 11_355_432.0 / 4_294_967_295.0);
    }

    #[test]
    fn seed_zero_is_normalized_to_one() {
        let mut zero = Xorshift32::new(0);
        let mut one = Xorshift32::new(1);
        assert_eq!(zero.state(), 1);
        for _ in 0..10 {
            assert_eq!(zero.next_u32(), one.next_u32());
        }
    }

    #[test]
    fn seed_zero_does_not_stall() {
        let mut rng = Xorshift32::new(0);
        let draws: Vec<f64> = (0..10).map(|_| rng.next_f64()).collect();
        let repeats = draws.windows(2).filter(|w| w[0] == w[1]).count();
        assert!(repeats <= 2, "generator stalled: {draws:?}");
        assert!(draws.iter().any(|&d| d != draws[0]));
    }

    #[test]
    fn two_instances_with_same_seed_produce_identical_sequences() {
        let mut a = Xorshift32::new(0xE6BE_6597);
        let mut b = Xorshift32::new(0xE6BE_6597);
        for i in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32(), "diverged at index {i}");
        }
    }

    #[test]
    fn draw_of_exactly_one_keeps_int_range_inclusive() {
        let mut rng = Xorshift32 {
            state: invert(0xFFFF_FFFF),
        };
        assert_eq!(rng.clone().next_u32(), 0xFFFF_FFFF);
        assert_eq!(rng.clone().next_f64(), 1.0);
        assert_eq!(rng.int_range(0, 6), 6);
    }

    /// Predecessor of `y` under one xorshift32 step.
    fn invert(mut y: u32) -> u32 {
        // Undo `s ^= s << 5`.
        let mut x = y;
        for _ in 0..7 {
            x = y ^ (x << 5);
        }
        y = x;
        // Undo `s ^= s >> 17`.
        y ^= y >> 17;
        // Undo `s ^= s << 13`.
        let mut x = y;
        for _ in 0..3 {
            x = y ^ (x << 13);
        }
        x
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift32::new(42);
        for _ in 0..50 {
            rng.next_u32();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift32 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(rng.next_u32(), restored.next_u32(), "diverged at {i}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_closed_unit_interval(seed: u32) {
                let mut rng = Xorshift32::new(seed);
                for _ in 0..200 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..=1.0).contains(&v), "next_f64() = {v}");
                }
            }

            #[test]
            fn state_never_becomes_zero(seed: u32) {
                let mut rng = Xorshift32::new(seed);
                for _ in 0..200 {
                    prop_assert_ne!(rng.next_u32(), 0);
                }
            }

            #[test]
            fn range_stays_within_bounds(
                seed: u32,
                min in -1e4_f64..1e4,
                span in 0.001_f64..1e4,
            ) {
                let max = min + span;
                let mut rng = Xorshift32::new(seed);
                for _ in 0..100 {
                    let v = rng.range(min, max);
                    prop_assert!(v >= min && v <= max + 1e-9, "range({min}, {max}) = {v}");
                }
            }

            #[test]
            fn int_range_is_inclusive_and_bounded(
                seed: u32,
                min in -100_i64..100,
                span in 0_i64..100,
            ) {
                let max = min + span;
                let mut rng = Xorshift32::new(seed);
                for _ in 0..100 {
                    let v = rng.int_range(min, max);
                    prop_assert!(v >= min && v <= max, "int_range({min}, {max}) = {v}");
                }
            }

            #[test]
            fn every_helper_consumes_exactly_one_draw(seed: u32) {
                let mut a = Xorshift32::new(seed);
                let mut b = Xorshift32::new(seed);
                a.range(3.0, 9.0);
                a.int_range(0, 6);
                a.chance_above(0.5);
                b.next_u32();
                b.next_u32();
                b.next_u32();
                prop_assert_eq!(a.state(), b.state());
            }
        }
    }
}
