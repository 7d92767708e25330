//! Tunables of the hash table.

use crate::TableError;

/// Multiplier of the primary hash function
pub const DEFAULT_PRIME_A: usize = 163;
/// Multiplier of the secondary (step) hash function
pub const DEFAULT_PRIME_B: usize = 199;
/// Smallest base size the table is ever created with or shrunk to
pub const DEFAULT_MIN_BASE_SIZE: usize = 57;
/// Load percentage above which an insert grows the table first
pub const DEFAULT_GROW_THRESHOLD: usize = 70;
/// Load percentage below which a delete shrinks the table first
pub const DEFAULT_SHRINK_THRESHOLD: usize = 10;
/// Highest accepted grow threshold
const MAX_GROW_THRESHOLD: usize = 95;

/// Hashing and resize parameters of a [`HashTable`](crate::HashTable).
///
/// Thresholds are integer percentages compared against `count * 100 / size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Multiplier of the primary hash
    pub prime_a: usize,
    /// Multiplier of the secondary hash
    pub prime_b: usize,
    /// Floor for the base size
    pub min_base_size: usize,
    /// Grow when the load is strictly above this percentage
    pub grow_threshold: usize,
    /// Shrink when the load is strictly below this percentage
    pub shrink_threshold: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            prime_a: DEFAULT_PRIME_A,
            prime_b: DEFAULT_PRIME_B,
            min_base_size: DEFAULT_MIN_BASE_SIZE,
            grow_threshold: DEFAULT_GROW_THRESHOLD,
            shrink_threshold: DEFAULT_SHRINK_THRESHOLD,
        }
    }
}

impl TableConfig {
    /// Sets the two hash multipliers
    #[must_use]
    pub fn with_primes(mut self, prime_a: usize, prime_b: usize) -> Self {
        self.prime_a = prime_a;
        self.prime_b = prime_b;
        self
    }

    /// Sets the minimum base size
    #[must_use]
    pub fn with_min_base_size(mut self, min_base_size: usize) -> Self {
        self.min_base_size = min_base_size;
        self
    }

    /// Sets the grow and shrink thresholds, in percent
    #[must_use]
    pub fn with_thresholds(mut self, grow: usize, shrink: usize) -> Self {
        self.grow_threshold = grow;
        self.shrink_threshold = shrink;
        self
    }

    /// Checks that the parameters describe a usable table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidArgument`] if a multiplier is below 2, the
    /// multipliers are equal, the minimum base size is below 2, or the
    /// thresholds are not `shrink < grow <= 95`.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.prime_a < 2 || self.prime_b < 2 {
            return Err(TableError::InvalidArgument("hash multipliers must be at least 2"));
        }
        if self.prime_a == self.prime_b {
            return Err(TableError::InvalidArgument("hash multipliers must differ"));
        }
        if self.min_base_size < 2 {
            return Err(TableError::InvalidArgument("minimum base size must be at least 2"));
        }
        if self.grow_threshold > MAX_GROW_THRESHOLD || self.shrink_threshold >= self.grow_threshold
        {
            return Err(TableError::InvalidArgument("thresholds must satisfy shrink < grow <= 95"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TableConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.prime_a, 163);
        assert_eq!(config.prime_b, 199);
        assert_eq!(config.min_base_size, 57);
    }

    #[test]
    fn test_rejects_equal_primes() {
        let config = TableConfig::default().with_primes(163, 163);
        assert!(matches!(config.validate(), Err(TableError::InvalidArgument(_))));
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        assert!(TableConfig::default().with_thresholds(96, 10).validate().is_err());
        assert!(TableConfig::default().with_thresholds(50, 50).validate().is_err());
        assert!(TableConfig::default().with_thresholds(90, 5).validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_minimum() {
        assert!(TableConfig::default().with_min_base_size(1).validate().is_err());
        assert!(TableConfig::default().with_min_base_size(2).validate().is_ok());
    }
}
