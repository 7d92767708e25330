use thiserror::Error;

/// Errors reported by [`HashTable`](crate::HashTable) operations.
///
/// A key that is not present is not an error: lookups and deletions report it
/// as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The bucket array could not be allocated. The table keeps its previous state.
    #[error("could not allocate {requested} buckets")]
    AllocationFailure {
        /// Number of buckets that was requested
        requested: usize,
    },
    /// Empty key or unusable configuration
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// A full probe cycle found neither a free slot nor a tombstone
    #[error("no free slot left in a full probe cycle")]
    Full,
}
