//! Ordered map type for RVN records.
//!
//! This module provides [`RvnMap`], a wrapper around [`IndexMap`] that keeps
//! record fields in insertion order. Field order is significant to the
//! encoder — a record serializes its fields in exactly the order the caller
//! supplied them — so a hash map with unstable iteration would make output
//! nondeterministic.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rvn::{RvnMap, Value};
//!
//! let mut map = RvnMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of record keys to RVN values.
///
/// # Examples
///
/// ```rust
/// use serde_rvn::{RvnMap, Value};
///
/// let mut map = RvnMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RvnMap(IndexMap<String, crate::Value>);

impl RvnMap {
    /// Creates an empty `RvnMap`.
    #[must_use]
    pub fn new() -> Self {
        RvnMap(IndexMap::new())
    }

    /// Creates an empty `RvnMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RvnMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for RvnMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        RvnMap(map.into_iter().collect())
    }
}

impl From<RvnMap> for HashMap<String, crate::Value> {
    fn from(map: RvnMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for RvnMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RvnMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for RvnMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        RvnMap(IndexMap::from_iter(iter))
    }
}
