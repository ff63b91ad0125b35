//! A key-value map guarded by a single reader/writer lock.
//!
//! [`ConcurrentMap`] behaves like a `HashMap` that can be shared between threads
//! (typically behind an `Arc`). All operations take `&self`:
//!
//! - Reads ([`get`](ConcurrentMap::get), [`items`](ConcurrentMap::items), ...) take the
//!   shared lock and may run concurrently with each other.
//! - Mutators ([`set`](ConcurrentMap::set), [`set_if_not_exists`](ConcurrentMap::set_if_not_exists),
//!   [`remove`](ConcurrentMap::remove), ...) take the exclusive lock.
//!
//! Values handed out by reads are clones taken under the shared lock. Nested maps
//! should therefore be stored behind an `Arc` so that reads return them by identity
//! rather than as deep copies (see [`Nested`]).

mod nested;

pub use nested::{Nested, Plain};

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use crate::constants::LAZY_ALLOC_CAPACITY;

/// Backing store of a [`ConcurrentMap`]. `None` until the first mutation of a
/// default-constructed map.
type Store<K, V> = Option<HashMap<K, V>>;

/// A thread-safe map with a single reader/writer lock.
///
/// # Examples
///
/// ```
/// # use concurrent_map::ConcurrentMap;
/// let map = ConcurrentMap::new();
/// map.set("answer", 42);
///
/// assert_eq!(map.get("answer"), Some(42));
/// assert!(!map.set_if_not_exists("answer", 0));
///
/// map.remove("answer");
/// assert!(map.is_empty());
/// ```
///
/// A default-constructed map starts without a backing store. Reads treat it as empty
/// and the first mutator allocates it.
pub struct ConcurrentMap<K, V> {
    items: RwLock<Store<K, V>>,
}

impl<K, V> ConcurrentMap<K, V> {
    fn from_store(store: Store<K, V>) -> Self {
        Self {
            items: RwLock::new(store),
        }
    }

    // Every critical section is a single HashMap call, so a poisoned lock still
    // guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, Store<K, V>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store<K, V>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.read().as_ref().map_or(0, HashMap::len)
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry, keeping the allocated store.
    pub fn clear(&self) {
        if let Some(store) = self.write().as_mut() {
            store.clear();
        }
    }

    /// Consumes the map and returns its entries as a plain `HashMap`.
    pub fn into_inner(self) -> HashMap<K, V> {
        self.items
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .unwrap_or_default()
    }
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates a new, empty map.
    pub fn new() -> Self {
        Self::from_store(Some(HashMap::new()))
    }

    /// Creates a new, empty map with room for at least `capacity` entries.
    ///
    /// The capacity is only a hint; zero is fine.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_store(Some(HashMap::with_capacity(capacity)))
    }

    /// Makes a concurrent copy of a plain map.
    ///
    /// Values are cloned as they are, nothing is converted. Values held behind an
    /// `Arc` are therefore shared with the source.
    pub fn copy_from(map: &HashMap<K, V>) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self::from_store(Some(map.clone()))
    }

    fn allocated(store: &mut Store<K, V>) -> &mut HashMap<K, V> {
        store.get_or_insert_with(|| {
            trace!(capacity = LAZY_ALLOC_CAPACITY, "Allocating map store");
            HashMap::with_capacity(LAZY_ALLOC_CAPACITY)
        })
    }

    /// Returns a clone of the value stored under `key`, or `None` if the key is absent.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.read().as_ref()?.get(key).cloned()
    }

    /// Returns true if an entry exists under `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read()
            .as_ref()
            .is_some_and(|store| store.contains_key(key))
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn set(&self, key: K, value: V) {
        let mut store = self.write();
        Self::allocated(&mut store).insert(key, value);
    }

    /// Stores `value` under `key` only if the key is absent.
    ///
    /// Returns true if the value was inserted. If the key already exists the map is
    /// left untouched and false is returned. The check and the insert happen under a
    /// single exclusive lock, so exactly one of several racing callers wins.
    pub fn set_if_not_exists(&self, key: K, value: V) -> bool {
        let mut store = self.write();
        match Self::allocated(&mut store).entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Returns the value stored under `key`, inserting `value` first if the key is absent.
    pub fn get_or_insert(&self, key: K, value: V) -> V
    where
        V: Clone,
    {
        let mut store = self.write();
        Self::allocated(&mut store)
            .entry(key)
            .or_insert(value)
            .clone()
    }

    /// Removes the entry under `key`. Removing an absent key is a no-op.
    pub fn remove<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(key);
    }

    /// Removes the entry under `key` and returns its value, if there was one.
    pub fn take<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.write().as_mut()?.remove(key)
    }

    /// Inserts every pair from `entries` under one exclusive lock.
    ///
    /// Readers observe either none or all of the batch.
    pub fn extend<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut store = self.write();
        Self::allocated(&mut store).extend(entries);
    }

    /// Returns a snapshot of all entries as a plain `HashMap`.
    ///
    /// The snapshot is a shallow copy: later mutation of this map does not affect it,
    /// but values that share state (such as `Arc`'d nested maps) are shared.
    pub fn items(&self) -> HashMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.read().as_ref().cloned().unwrap_or_default()
    }

    /// Returns a snapshot of all keys.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.read()
            .as_ref()
            .map(|store| store.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl<K, V> Default for ConcurrentMap<K, V> {
    /// Creates a map without a backing store; it is allocated on first mutation.
    fn default() -> Self {
        Self::from_store(None)
    }
}

impl<K: Clone, V: Clone> Clone for ConcurrentMap<K, V> {
    /// Creates an independent map, with its own lock, from a snapshot of this one.
    fn clone(&self) -> Self {
        Self::from_store(self.read().as_ref().cloned())
    }
}

impl<K, V> PartialEq for ConcurrentMap<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
{
    // Compares snapshots so that at most one lock is held at a time.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.items() == other.items()
    }
}

impl<K, V> Eq for ConcurrentMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Clone,
{
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ConcurrentMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.read().as_ref() {
            Some(store) => f.debug_map().entries(store.iter()).finish(),
            None => f.write_str("{}"),
        }
    }
}

impl<K: Eq + Hash, V> From<HashMap<K, V>> for ConcurrentMap<K, V> {
    fn from(map: HashMap<K, V>) -> Self {
        Self::from_store(Some(map))
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for ConcurrentMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashMap<K, V>>())
    }
}
