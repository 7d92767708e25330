//! # Prime Hash
//!
//! A string-to-string hash table built on open addressing with double hashing.
//!
//! Every key has two polynomial hashes over the bucket count: the first picks
//! the slot tried first, the second the distance between attempts. The bucket
//! count is always prime, which keeps that distance coprime to it, so a probe
//! sequence reaches every slot before repeating.
//!
//! Deleted entries leave tombstones so later lookups keep probing past them.
//! The table grows when it is more than 70% full and shrinks when it is less
//! than 10% full; both rebuild the bucket array and drop the tombstones.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primehash::HashTable;
//!
//! # fn main() -> Result<(), primehash::TableError> {
//! // Create a new table with base size 57 (59 buckets)
//! let mut table = HashTable::with_base_size(57)?;
//!
//! // Insert values
//! table.insert("some-key", "some-value")?;
//! assert_eq!(table.search("some-key"), Some("some-value"));
//!
//! // Update values
//! table.insert("some-key", "second-value")?;
//! assert_eq!(table.search("some-key"), Some("second-value"));
//! assert_eq!(table.len(), 1);
//!
//! // Remove values
//! table.delete("some-key")?;
//! assert_eq!(table.search("some-key"), None);
//! assert!(table.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use primehash::{HashTable, TableConfig};
//!
//! # fn main() -> Result<(), primehash::TableError> {
//! let config = TableConfig::default().with_min_base_size(11).with_thresholds(60, 5);
//! let table = HashTable::with_config(11, config)?;
//! assert_eq!(table.capacity(), 11);
//! # Ok(())
//! # }
//! ```

/// Tunables: hash multipliers, minimum size and resize thresholds
pub mod config;
/// Error type shared by all table operations
mod errors;
/// The hash table itself
mod hash_table;
/// Polynomial string hashing and probe sequences
pub mod hashing;
/// Primality test and next-prime search
pub mod prime;
/// Utility functions and traits for the hash table
mod utils;

pub use config::TableConfig;
pub use errors::TableError;
pub use hash_table::{HashTable, Iter};
pub use utils::{HashTableExtensions, from_pairs};
