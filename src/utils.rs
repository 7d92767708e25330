//! Utility functions and traits for `HashTable`

use crate::{HashTable, TableError};

/// Extension trait for string tables that provides additional utility methods
pub trait HashTableExtensions {
    /// Returns the keys of the table as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the table as a Vec
    fn values(&self) -> Vec<String>;

    /// Returns true if the table contains the given key
    fn contains_key(&self, key: &str) -> bool;
}

impl HashTableExtensions for HashTable {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    fn values(&self) -> Vec<String> {
        self.iter().map(|(_, v)| v.to_owned()).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.search(key).is_some()
    }
}

/// Creates a `HashTable` from an iterator of key-value pairs.
///
/// Later pairs overwrite earlier ones with the same key.
///
/// # Errors
///
/// Stops at the first pair the table rejects, such as one with an empty key.
pub fn from_pairs<K, V, I>(iter: I) -> Result<HashTable, TableError>
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = HashTable::new();

    for (key, value) in iter {
        table.insert(key, value)?;
    }

    Ok(table)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let data = vec![("a", "1"), ("b", "2"), ("c", "3"), ("a", "4")];

        let table = from_pairs(data).unwrap();

        assert_eq!(table.search("a"), Some("4"));
        assert_eq!(table.search("b"), Some("2"));
        assert_eq!(table.search("c"), Some("3"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_from_pairs_rejects_empty_key() {
        let result = from_pairs([("a", "1"), ("", "2")]);
        assert!(matches!(result, Err(TableError::InvalidArgument(_))));
    }

    #[test]
    fn test_keys_and_values() {
        let mut table = HashTable::new();
        table.insert("a", "1").unwrap();
        table.insert("b", "2").unwrap();
        table.insert("c", "3").unwrap();

        let mut keys = table.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = table.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec!["1".to_string(), "2".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_contains_key() {
        let mut table = HashTable::new();
        table.insert("a", "1").unwrap();

        assert!(table.contains_key("a"));
        assert!(!table.contains_key("b"));
    }
}
