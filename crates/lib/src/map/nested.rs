//! Recursive copies of plain nested mappings.
//!
//! [`Plain`] describes an ordinary, unsynchronized tree of mappings. Copying it with
//! [`ConcurrentMap::recursive_copy_from`] yields a tree of [`Nested`] values in which
//! every inner mapping is its own [`ConcurrentMap`] with its own lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use super::ConcurrentMap;

/// A value inside a plain nested mapping: either a leaf or another mapping.
#[derive(Debug, Clone)]
pub enum Plain<K, V> {
    Value(V),
    Map(HashMap<K, Plain<K, V>>),
}

/// A value inside a recursively copied [`ConcurrentMap`].
///
/// Inner maps are shared by `Arc`, so reading one out of its parent returns the same
/// instance (and the same lock) rather than a copy.
#[derive(Debug, Clone)]
pub enum Nested<K, V> {
    Value(V),
    Map(Arc<ConcurrentMap<K, Nested<K, V>>>),
}

impl<K, V> Nested<K, V> {
    /// Returns the leaf value, if this is one.
    pub fn as_value(&self) -> Option<&V> {
        match self {
            Nested::Value(value) => Some(value),
            Nested::Map(_) => None,
        }
    }

    /// Returns the inner map, if this is one.
    pub fn as_map(&self) -> Option<&Arc<ConcurrentMap<K, Nested<K, V>>>> {
        match self {
            Nested::Map(map) => Some(map),
            Nested::Value(_) => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Nested::Map(_))
    }
}

impl<K, V> ConcurrentMap<K, Nested<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Makes a concurrent copy of `map`, converting every inner mapping into a
    /// [`ConcurrentMap`] as well, however deep.
    ///
    /// Leaf values are cloned as they are. Each inner mapping becomes a fresh map, never
    /// shared with another parent.
    pub fn recursive_copy_from(map: &HashMap<K, Plain<K, V>>) -> Self {
        map.iter()
            .map(|(key, value)| (key.clone(), Nested::from(value)))
            .collect()
    }
}

impl<K, V> From<&Plain<K, V>> for Nested<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn from(value: &Plain<K, V>) -> Self {
        match value {
            Plain::Value(value) => Nested::Value(value.clone()),
            Plain::Map(map) => Nested::Map(Arc::new(ConcurrentMap::recursive_copy_from(map))),
        }
    }
}

impl<K, V> From<HashMap<K, Plain<K, V>>> for Plain<K, V> {
    fn from(map: HashMap<K, Plain<K, V>>) -> Self {
        Plain::Map(map)
    }
}

impl<K, V> PartialEq for Plain<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Plain::Value(a), Plain::Value(b)) => a == b,
            (Plain::Map(a), Plain::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<K, V> PartialEq for Nested<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Nested::Value(a), Nested::Value(b)) => a == b,
            (Nested::Map(a), Nested::Map(b)) => a == b,
            _ => false,
        }
    }
}
