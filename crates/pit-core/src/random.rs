//! Random sources for initial point placement.

use uuid::Uuid;

/// Source of uniformly distributed random numbers.
///
/// Passed into the view instead of living in a global so layouts can be
/// reproduced in tests.
pub trait RandomSource {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform float in `[min, max)`. Returns `min` for an empty range.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.next_f64() * (max - min) + min
    }
}

/// Seeded xorshift32 generator.
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Create a generator from a seed. A zero seed is bumped to one.
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    /// Create a generator seeded from a fresh v4 UUID.
    pub fn from_entropy() -> Self {
        let bits = Uuid::new_v4().as_u128();
        let folded = (bits as u32) ^ ((bits >> 32) as u32) ^ ((bits >> 64) as u32) ^ ((bits >> 96) as u32);
        Self::new(folded)
    }
}

impl Default for XorShiftRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed sequence of values.
    struct Sequence(Vec<u32>, usize);

    impl RandomSource for Sequence {
        fn next_u32(&mut self) -> u32 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = XorShiftRng::new(42);
        let mut b = XorShiftRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = XorShiftRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = XorShiftRng::new(7);
        for _ in 0..1000 {
            let v = rng.range(16.0, 484.0);
            assert!((16.0..484.0).contains(&v));
        }
    }

    #[test]
    fn test_range_empty() {
        let mut rng = XorShiftRng::new(7);
        assert_eq!(rng.range(16.0, 16.0), 16.0);
        assert_eq!(rng.range(20.0, 10.0), 20.0);
    }

    #[test]
    fn test_next_f64_extremes() {
        let mut seq = Sequence(vec![0, u32::MAX], 0);
        assert_eq!(seq.next_f64(), 0.0);
        assert!(seq.next_f64() < 1.0);
    }
}
