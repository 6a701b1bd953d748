//! Insertion-ordered mapping.
//!
//! The wire format splits several objects into a map plus a parallel order
//! array (`snaks` / `snaks-order`, `qualifiers` / `qualifiers-order`). Both
//! halves are derived from one [`OrderedMapping`] so they cannot drift apart.

use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxBuildHasher;

/// A key → value container that remembers first-insertion order.
///
/// Re-inserting an existing key replaces its value in place; the key keeps
/// its original position.
#[derive(Debug, Clone)]
pub struct OrderedMapping<K, V> {
    entries: IndexMap<K, V, FxBuildHasher>,
}

impl<K: Hash + Eq, V> Default for OrderedMapping<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> OrderedMapping<K, V> {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::with_hasher(FxBuildHasher),
        }
    }

    /// Creates an empty mapping with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Inserts a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Returns the value for `key`, inserting `default()` at the end first if
    /// the key is new.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        match self.entries.entry(key) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(default()),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.entries.keys()
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.entries.values()
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl ExactSizeIterator<Item = (&K, &mut V)> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for OrderedMapping<K, V> {
    /// Two mappings are equal when they hold the same pairs in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for OrderedMapping<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMapping<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_insert_preserves_first_position() {
        let mut map = OrderedMapping::new();
        map.insert("b", 1);
        map.insert("a", 2);
        map.insert("c", 3);
        assert_eq!(map.insert("b", 10), Some(1));

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(map.get(&"b"), Some(&10));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut map: OrderedMapping<u32, Vec<u32>> = OrderedMapping::new();
        map.get_or_insert_with(7, Vec::new).push(1);
        map.get_or_insert_with(3, Vec::new).push(2);
        map.get_or_insert_with(7, Vec::new).push(3);

        assert_eq!(map.get(&7), Some(&vec![1, 3]));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![7, 3]);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a: OrderedMapping<_, _> = [(1, "x"), (2, "y")].into_iter().collect();
        let b: OrderedMapping<_, _> = [(2, "y"), (1, "x")].into_iter().collect();
        let c: OrderedMapping<_, _> = [(1, "x"), (2, "y")].into_iter().collect();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    proptest! {
        #[test]
        fn prop_keys_follow_first_insertion(keys in proptest::collection::vec(0u8..32, 0..64)) {
            let mut map = OrderedMapping::new();
            let mut expected = Vec::new();
            for (i, k) in keys.iter().enumerate() {
                if !expected.contains(k) {
                    expected.push(*k);
                }
                map.insert(*k, i);
            }
            let actual: Vec<u8> = map.keys().copied().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
