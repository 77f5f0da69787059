use std::collections::HashSet;

use rand::{rngs::OsRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Reproducible generator of key sets and value streams.
///
/// Uses the xoshiro256** PRNG, so a failing randomized run can be replayed
/// from its printed seed.
///
/// # Examples
///
/// ```
/// use balance_forest_util::Fuzzer;
///
/// let mut fuzzer = Fuzzer::from_u64(7);
/// let keys = fuzzer.distinct_keys(50, -100, 100);
/// assert_eq!(keys.len(), 50);
///
/// let mut again = Fuzzer::from_u64(7);
/// assert_eq!(again.distinct_keys(50, -100, 100), keys);
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Create a fuzzer from a short numeric seed.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        for chunk in bytes.chunks_mut(8) {
            chunk.copy_from_slice(&seed.to_le_bytes());
        }
        Self::new(Some(bytes))
    }

    /// Random integer in `[min, max]`.
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Random boolean that is true with the given probability.
    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Pick a random element from a non-empty slice.
    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.gen_range(0..elements.len());
        &elements[idx]
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, elements: &mut [T]) {
        elements.shuffle(&mut self.rng);
    }

    /// `count` distinct integers from `[min, max]`, in generation order.
    ///
    /// # Panics
    ///
    /// If the range holds fewer than `count` values.
    pub fn distinct_keys(&mut self, count: usize, min: i64, max: i64) -> Vec<i64> {
        let span = (max - min + 1) as usize;
        assert!(span >= count, "range [{min}, {max}] cannot hold {count} distinct keys");
        let mut seen = HashSet::with_capacity(count);
        let mut out = Vec::with_capacity(count);
        while out.len() < count {
            let k = self.random_int(min, max);
            if seen.insert(k) {
                out.push(k);
            }
        }
        out
    }

    /// `count` integers from `[min, max]`; repeats are allowed.
    pub fn stream(&mut self, count: usize, min: i64, max: i64) -> Vec<i64> {
        (0..count).map(|_| self.random_int(min, max)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fuzzer_reproducible() {
        let mut fuzzer1 = Fuzzer::from_u64(42);
        let mut fuzzer2 = Fuzzer::from_u64(42);
        assert_eq!(fuzzer1.seed, fuzzer2.seed);

        for _ in 0..10 {
            assert_eq!(fuzzer1.random_int(0, 1000), fuzzer2.random_int(0, 1000));
        }
    }

    #[test]
    fn test_fuzzer_pick() {
        let mut fuzzer = Fuzzer::new(None);
        let choices = vec!["a", "b", "c"];

        for _ in 0..100 {
            let picked = fuzzer.pick(&choices);
            assert!(choices.contains(picked));
        }
    }

    #[test]
    fn test_fuzzer_shuffle_keeps_elements() {
        let mut fuzzer = Fuzzer::from_u64(3);
        let mut v: Vec<i32> = (0..50).collect();
        fuzzer.shuffle(&mut v);
        v.sort_unstable();
        assert_eq!(v, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_fuzzer_distinct_keys_fill_whole_range() {
        let mut fuzzer = Fuzzer::from_u64(9);
        let mut keys = fuzzer.distinct_keys(11, -5, 5);
        keys.sort_unstable();
        assert_eq!(keys, (-5..=5).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic]
    fn test_fuzzer_distinct_keys_rejects_small_range() {
        Fuzzer::from_u64(1).distinct_keys(5, 0, 2);
    }

    #[test]
    fn test_fuzzer_random_bool() {
        let mut fuzzer = Fuzzer::new(None);
        let mut has_true = false;
        let mut has_false = false;

        for _ in 0..100 {
            if fuzzer.random_bool(0.5) {
                has_true = true;
            } else {
                has_false = true;
            }
        }

        assert!(has_true && has_false);
    }

    proptest! {
        #[test]
        fn stream_stays_in_range(seed in any::<u64>(), min in -1000i64..0, width in 0i64..1000) {
            let mut fuzzer = Fuzzer::from_u64(seed);
            let max = min + width;
            for v in fuzzer.stream(64, min, max) {
                prop_assert!(v >= min && v <= max);
            }
        }
    }
}
