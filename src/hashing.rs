//! Polynomial string hashing and the double-hashing probe sequence.

/// Hashes `key` as a polynomial in `multiplier`, reduced modulo `modulus`.
///
/// Evaluates `Σ multiplier^(len-i-1) * key[i]` with Horner's rule, reducing
/// after every byte so intermediate values stay below
/// `modulus * multiplier + 255`.
///
/// Returns 0 when `modulus` is 0.
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub fn polynomial_hash(key: &str, multiplier: usize, modulus: usize) -> usize {
    if modulus == 0 {
        return 0;
    }
    let multiplier = multiplier as u128;
    let modulus = modulus as u128;

    let hash = key
        .bytes()
        .fold(0_u128, |hash, byte| (hash * multiplier + u128::from(byte)) % modulus);

    // hash < modulus, which came from a usize
    hash as usize
}

/// The two hash values that define the probe sequence of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSequence {
    /// Slot tried first
    start: usize,
    /// Distance between consecutive attempts, always in `1..modulus`
    step: usize,
    /// Number of buckets the sequence runs over
    modulus: usize,
}

impl ProbeSequence {
    /// Builds the probe sequence of `key` over `modulus` buckets.
    ///
    /// The step is `hash_b + 1`. When that equals `modulus` it would be 0
    /// modulo the bucket count and the sequence would never move, so it
    /// falls back to 1.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn new(key: &str, prime_a: usize, prime_b: usize, modulus: usize) -> Self {
        let start = polynomial_hash(key, prime_a, modulus);
        let hash_b = polynomial_hash(key, prime_b, modulus);
        let step = if modulus == 0 || hash_b + 1 >= modulus { 1 } else { hash_b + 1 };
        Self { start, step, modulus }
    }

    /// Slot index for the given attempt: `(start + attempt * step) mod modulus`.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn index(&self, attempt: usize) -> usize {
        if self.modulus == 0 {
            return 0;
        }
        let offset = (attempt as u128 * self.step as u128) % self.modulus as u128;
        ((self.start as u128 + offset) % self.modulus as u128) as usize
    }

    /// Iterates over the first `modulus` slot indices of the sequence.
    ///
    /// With a prime modulus this visits every slot exactly once.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..self.modulus).map(move |attempt| self.index(attempt))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Reference evaluation with explicit powers, for short keys only
    fn naive_hash(key: &str, multiplier: u128, modulus: u128) -> u128 {
        let len = key.len();
        let total: u128 = key
            .bytes()
            .enumerate()
            .map(|(i, byte)| multiplier.pow((len - i - 1) as u32) * u128::from(byte))
            .sum();
        total % modulus
    }

    #[test]
    fn test_matches_power_form() {
        for key in ["a", "ab", "cat", "some-key", "hash!"] {
            assert_eq!(
                polynomial_hash(key, 163, 53) as u128,
                naive_hash(key, 163, 53),
                "key {key}"
            );
            assert_eq!(
                polynomial_hash(key, 199, 151) as u128,
                naive_hash(key, 199, 151),
                "key {key}"
            );
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(polynomial_hash("", 163, 53), 0);
        // 'a' = 97
        assert_eq!(polynomial_hash("a", 163, 53), 97 % 53);
        // 97 * 163 + 98 = 15909 = 53 * 300 + 9
        assert_eq!(polynomial_hash("ab", 163, 53), 9);
    }

    #[test]
    fn test_long_key_does_not_overflow() {
        let key = "x".repeat(10_000);
        let hash = polynomial_hash(&key, 199, 1_000_003);
        assert!(hash < 1_000_003);
    }

    #[test]
    fn test_zero_modulus() {
        assert_eq!(polynomial_hash("abc", 163, 0), 0);
        let sequence = ProbeSequence::new("abc", 163, 199, 0);
        assert_eq!(sequence.index(3), 0);
    }

    #[test]
    fn test_first_attempt_is_primary_hash() {
        let sequence = ProbeSequence::new("some-key", 163, 199, 59);
        assert_eq!(sequence.index(0), polynomial_hash("some-key", 163, 59));
    }

    #[test]
    fn test_sequence_visits_every_slot() {
        for key in ["a", "some-key", "another", "z9", "the quick brown fox"] {
            for modulus in [53, 59, 127, 229] {
                let sequence = ProbeSequence::new(key, 163, 199, modulus);
                let visited: HashSet<usize> = sequence.indices().collect();
                assert_eq!(visited.len(), modulus, "key {key} modulus {modulus}");
            }
        }
    }

    #[test]
    fn test_step_never_zero() {
        // Find a key whose secondary hash is modulus - 1 and check it still moves
        let modulus = 53;
        let key = (0..10_000)
            .map(|i| format!("k{i}"))
            .find(|k| polynomial_hash(k, 199, modulus) == modulus - 1)
            .unwrap();
        let sequence = ProbeSequence::new(&key, 163, 199, modulus);
        assert_ne!(sequence.index(0), sequence.index(1));
    }
}
