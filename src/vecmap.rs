//! An insertion-ordered association list used to represent maps.
//!
//! Entries keep the order they were pushed or decoded in. Nothing is sorted or
//! deduplicated: two entries with equal keys are both retained, in position, and encode
//! back out in the same order.
//!
//! # Example
//!
//! ```
//! use mpack::prelude::*;
//!
//! let mut vmap = VecMap::new();
//! vmap.push(Value::from("b"), Value::from(2));
//! vmap.push(Value::from("a"), Value::from(1));
//!
//! // order is preserved
//! let keys: Vec<&Value> = vmap.keys().collect();
//! assert_eq!(keys, vec![&Value::from("b"), &Value::from("a")]);
//!
//! assert_eq!(vmap.get(&Value::from("a")), Some(&Value::from(1)));
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    hash::*,
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug, Default)]
/// A map implemented as a [`Vec`] of pairs in insertion order.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K, V>(Vec<(K, V)>);

impl<K, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(Vec::new()) }

    /// Creates an empty [`VecMap`] with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self { VecMap(Vec::with_capacity(cap)) }

    /// Returns length.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![("foo", "bar"), ("foo", "baz")]);
    ///
    /// // duplicate keys are kept
    /// assert_eq!(vmap.len(), 2);
    /// ```
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Appends an entry, after any existing entries.
    pub fn push(&mut self, k: K, v: V) { self.0.push((k, v)) }

    /// Returns an [`Iter`] of the key value pairs, in order.
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }

    /// Iterates over the keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> { self.0.iter().map(|(k, _)| k) }

    /// Iterates over the values, in order.
    pub fn values(&self) -> impl Iterator<Item = &V> { self.0.iter().map(|(_, v)| v) }

    /// The entries as a slice.
    pub fn as_slice(&self) -> &[(K, V)] { &self.0 }

    /// Consumes the map, returning the entries.
    pub fn into_vec(self) -> Vec<(K, V)> { self.0 }
}

impl<K: PartialEq, V> VecMap<K, V> {
    /// Returns the value of the first entry whose key equals `k`.
    pub fn get(&self, k: &K) -> Option<&V> {
        self.0.iter().find(|(key, _)| key == k).map(|(_, v)| v)
    }

    /// Returns every value whose key equals `k`, in order.
    pub fn get_all<'a>(&'a self, k: &'a K) -> impl Iterator<Item = &'a V> + 'a {
        self.0
            .iter()
            .filter(move |(key, _)| key == k)
            .map(|(_, v)| v)
    }

    /// Indicates whether some entry has key `k`.
    pub fn contains_key(&self, k: &K) -> bool { self.get(k).is_some() }
}

impl<K: Eq + Hash, V> VecMap<K, V> {
    /// Consumes a [`VecMap`], producing a [`HashMap`] from the entries.
    ///
    /// When keys repeat, the last entry wins.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use mpack::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![(1, "foo"), (2, "bar"), (1, "baz")]);
    ///
    /// let hmap: HashMap<u8, &str> = vmap.into_hashmap();
    /// assert_eq!(hmap[&1], "baz");
    /// ```
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<K, V, S> {
        self.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { VecMap(v) }
}

impl<K: Eq + Hash, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self { hm.into_iter().collect() }
}

impl<K, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { Self::from_iter(bt) }
}

impl<K, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.0.iter() }
}

impl<K, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        VecMap(Vec::from_iter(iter))
    }
}

impl<K, V> Extend<(K, V)> for VecMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) { self.0.extend(iter) }
}
