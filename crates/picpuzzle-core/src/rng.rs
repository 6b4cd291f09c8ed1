/// Small seedable PRNG, seeded from `getrandom` so it also works on WASM.
pub(crate) struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub(crate) fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        if getrandom::getrandom(&mut seed_bytes).is_err() {
            // No entropy source: fall back to a process-wide counter
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        }
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    pub(crate) fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u32(&mut self) -> u32 {
        // PCG-like PRNG
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 32) | self.next_u32() as u64
    }

    /// Uniform value in `0..bound`. Rejection sampling avoids modulo bias.
    pub(crate) fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        let bound = bound as u64;
        let zone = u64::MAX - u64::MAX % bound;
        loop {
            let value = self.next_u64();
            if value < zone {
                return (value % bound) as usize;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub(crate) fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.below(i + 1);
            slice.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SimpleRng::with_seed(7);
        let mut b = SimpleRng::with_seed(7);
        for _ in 0..32 {
            assert_eq!(a.below(1000), b.below(1000));
        }
    }

    #[test]
    fn test_below_stays_in_range() {
        let mut rng = SimpleRng::with_seed(42);
        for bound in 1..50 {
            for _ in 0..20 {
                assert!(rng.below(bound) < bound);
            }
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SimpleRng::with_seed(3);
        let mut values: Vec<usize> = (0..25).collect();
        rng.shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_covers_all_permutations_of_three() {
        let mut rng = SimpleRng::with_seed(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            let mut values = [0, 1, 2];
            rng.shuffle(&mut values);
            seen.insert(values);
        }
        assert_eq!(seen.len(), 6);
    }
}
