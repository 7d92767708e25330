use std::mem;

use log::{debug, trace};

use crate::{
    TableConfig, TableError,
    config::DEFAULT_MIN_BASE_SIZE,
    hashing::ProbeSequence,
    prime::next_prime,
};

/// A key-value pair owned by the table
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: String,
}

/// State of one bucket
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    /// Never used since the array was allocated; ends every probe sequence
    Empty,
    /// Held an entry that was deleted; probing continues past it
    Tombstone,
    /// Holds a live entry
    Occupied(Entry),
}

/// A string-to-string hash table using open addressing with double hashing.
///
/// The bucket count is always prime, so the step of every probe sequence is
/// coprime to it and a sequence reaches every slot. The table doubles its base
/// size when the load climbs above the grow threshold (70% by default) and
/// halves it when the load falls under the shrink threshold (10%), never going
/// below the minimum base size.
///
/// Note: This implementation is not thread-safe. Wrap it in a `Mutex` to share it.
#[derive(Debug, Clone)]
pub struct HashTable {
    /// The buckets; their number is the table size
    buckets: Vec<Slot>,
    /// Size requested by the last create or resize, before rounding up to a prime
    base_size: usize,
    /// Number of occupied buckets
    count: usize,
    /// Hashing and resize parameters
    config: TableConfig,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocates `len` empty buckets, reporting allocation failure instead of aborting.
fn allocate_buckets(len: usize) -> Result<Vec<Slot>, TableError> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(len)
        .map_err(|_| TableError::AllocationFailure { requested: len })?;
    buckets.resize_with(len, || Slot::Empty);
    Ok(buckets)
}

impl HashTable {
    /// Creates an empty table with the default configuration and minimum base size
    #[must_use]
    pub fn new() -> Self {
        let size = next_prime(DEFAULT_MIN_BASE_SIZE).unwrap_or(DEFAULT_MIN_BASE_SIZE);
        Self {
            buckets: vec![Slot::Empty; size],
            base_size: DEFAULT_MIN_BASE_SIZE,
            count: 0,
            config: TableConfig::default(),
        }
    }

    /// Creates an empty table with the default configuration.
    ///
    /// `base_size` is raised to the minimum base size and rounded up to the
    /// next prime to get the bucket count.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::AllocationFailure`] if the buckets cannot be allocated.
    pub fn with_base_size(base_size: usize) -> Result<Self, TableError> {
        Self::with_config(base_size, TableConfig::default())
    }

    /// Creates an empty table with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidArgument`] if the configuration does not
    /// validate or no prime bucket count exists above `base_size`, and
    /// [`TableError::AllocationFailure`] if the buckets cannot be allocated.
    pub fn with_config(base_size: usize, config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let base_size = base_size.max(config.min_base_size);
        let size = next_prime(base_size)
            .ok_or(TableError::InvalidArgument("no prime bucket count above base size"))?;

        Ok(Self { buckets: allocate_buckets(size)?, base_size, count: 0, config })
    }

    /// Probe sequence of `key` over the current buckets
    fn probe(&self, key: &str) -> ProbeSequence {
        ProbeSequence::new(key, self.config.prime_a, self.config.prime_b, self.buckets.len())
    }

    /// Index of the bucket holding `key`, if any
    fn find_index(&self, key: &str) -> Option<usize> {
        for index in self.probe(key).indices() {
            match self.buckets.get(index)? {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key == key => return Some(index),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        None
    }

    /// Puts `entry` in the first free bucket of its probe sequence, or overwrites
    /// the value of an entry with the same key.
    ///
    /// Tombstones are remembered but not taken right away: the key may still
    /// live further down the sequence, and taking the tombstone would leave
    /// two copies of it.
    fn place(&mut self, entry: Entry) -> Result<Option<String>, TableError> {
        let mut first_tombstone = None;
        let mut free = None;

        for index in self.probe(&entry.key).indices() {
            match self.buckets.get_mut(index) {
                None => break,
                Some(Slot::Empty) => {
                    free = Some(index);
                    break;
                }
                Some(Slot::Tombstone) => {
                    first_tombstone = first_tombstone.or(Some(index));
                }
                Some(Slot::Occupied(existing)) if existing.key == entry.key => {
                    return Ok(Some(mem::replace(&mut existing.value, entry.value)));
                }
                Some(Slot::Occupied(_)) => {}
            }
        }

        let index = first_tombstone.or(free).ok_or(TableError::Full)?;
        if first_tombstone.is_some() {
            trace!("reusing tombstone at bucket {index}");
        }
        let slot = self.buckets.get_mut(index).ok_or(TableError::Full)?;
        *slot = Slot::Occupied(entry);
        self.count = self.count.saturating_add(1);
        Ok(None)
    }

    /// Inserts a key-value pair, returning the previous value of the key.
    ///
    /// If the load is above the grow threshold before the insert, the table
    /// doubles its base size first.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidArgument`] for an empty key,
    /// [`TableError::AllocationFailure`] if growing fails (the table is left
    /// as it was), and [`TableError::Full`] if no slot could be found.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, TableError> {
        let key = key.into();
        if key.is_empty() {
            return Err(TableError::InvalidArgument("key must not be empty"));
        }

        if self.load_factor() > self.config.grow_threshold {
            self.resize(self.base_size.saturating_mul(2))?;
        }

        self.place(Entry { key, value: value.into() })
    }

    /// Returns the value stored for `key`.
    ///
    /// Never resizes. An empty key is never stored, so it is reported as absent.
    #[must_use]
    pub fn search(&self, key: &str) -> Option<&str> {
        if key.is_empty() {
            return None;
        }
        match self.buckets.get(self.find_index(key)?)? {
            Slot::Occupied(entry) => Some(entry.value.as_str()),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Removes `key`, returning its value.
    ///
    /// Deleting an absent key changes nothing. Otherwise, if the load is below
    /// the shrink threshold, the table halves its base size first (unless that
    /// would go under the minimum), then the bucket becomes a tombstone.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidArgument`] for an empty key and
    /// [`TableError::AllocationFailure`] if shrinking fails (nothing is
    /// removed in that case).
    #[allow(clippy::arithmetic_side_effects)]
    pub fn delete(&mut self, key: &str) -> Result<Option<String>, TableError> {
        if key.is_empty() {
            return Err(TableError::InvalidArgument("key must not be empty"));
        }
        if self.find_index(key).is_none() {
            return Ok(None);
        }

        if self.load_factor() < self.config.shrink_threshold {
            self.resize(self.base_size / 2)?;
        }

        let Some(index) = self.find_index(key) else {
            return Ok(None);
        };
        let Some(slot) = self.buckets.get_mut(index) else {
            return Ok(None);
        };
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.count = self.count.saturating_sub(1);
                Ok(Some(entry.value))
            }
            other => {
                *slot = other;
                Ok(None)
            }
        }
    }

    /// Rebuilds the table over `next_prime(new_base_size)` buckets.
    ///
    /// Does nothing below the minimum base size. Entries are moved into the
    /// new array and tombstones are dropped; the live table is only replaced
    /// once the new one is complete.
    fn resize(&mut self, new_base_size: usize) -> Result<(), TableError> {
        if new_base_size < self.config.min_base_size {
            return Ok(());
        }
        let new_size = next_prime(new_base_size)
            .ok_or(TableError::InvalidArgument("no prime bucket count above base size"))?;
        if new_size < self.count {
            return Err(TableError::Full);
        }

        let old_size = self.buckets.len();
        let mut resized = Self {
            buckets: allocate_buckets(new_size)?,
            base_size: new_base_size,
            count: 0,
            config: self.config,
        };
        for slot in mem::take(&mut self.buckets) {
            if let Slot::Occupied(entry) = slot {
                resized.place(entry)?;
            }
        }

        debug!(
            "resized table from {} to {} buckets ({} entries)",
            old_size,
            resized.capacity(),
            resized.count
        );
        *self = resized;
        Ok(())
    }

    /// Removes every entry, keeping the current size
    pub fn clear(&mut self) {
        for slot in &mut self.buckets {
            *slot = Slot::Empty;
        }
        self.count = 0;
    }

    /// Number of buckets inspected by a lookup of `key`, counting the one that
    /// ends the search
    #[must_use]
    pub fn probe_len(&self, key: &str) -> usize {
        let mut inspected: usize = 0;
        for index in self.probe(key).indices() {
            inspected = inspected.saturating_add(1);
            match self.buckets.get(index) {
                None | Some(Slot::Empty) => break,
                Some(Slot::Occupied(entry)) if entry.key == key => break,
                Some(Slot::Occupied(_) | Slot::Tombstone) => {}
            }
        }
        inspected
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of buckets, always a prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the base size requested by the last create or resize
    #[must_use]
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Returns the load as an integer percentage, `len * 100 / capacity`
    #[must_use]
    pub fn load_factor(&self) -> usize {
        self.count.saturating_mul(100).checked_div(self.buckets.len()).unwrap_or(0)
    }

    /// Returns the configuration the table was created with
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns an iterator over the key-value pairs, in bucket order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { slots: self.buckets.iter() }
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key-value pairs of a [`HashTable`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Remaining buckets
    slots: std::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied(entry) => Some((entry.key.as_str(), entry.value.as_str())),
            Slot::Empty | Slot::Tombstone => None,
        })
    }
}
