use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::error::Result;
use crate::recency_list::{NodeId, RecencyList};
use crate::Capacity;

#[cfg(feature = "stats")]
use crate::CacheStats;

/// Unsynchronized bounded LRU cache.
///
/// Combines a hash index (`key -> NodeId`) with a [`RecencyList`] ordered from
/// least to most recently used. Every mutating operation takes `&mut self`, so
/// the borrow checker guarantees the two structures are never observed
/// half-updated. Wrap it in a [`BoundedLruCache`](crate::BoundedLruCache) to
/// share it between threads.
///
/// # Type Parameters
///
/// * `K` - Key type. Cloned once per insert because both the index and the
///   recency node hold a copy.
/// * `V` - Value type. No bounds; any value, including `V::default()` or
///   `Option::None`, can be stored and is distinguishable from a miss.
/// * `S` - Hasher for the index (defaults to `RandomState`).
///
/// # Semantics
///
/// - `get` promotes the entry to most recently used.
/// - `add` is *insert if absent*: adding an existing key leaves the stored
///   value and its recency position untouched.
/// - When a new key would exceed the capacity, the least recently used entry
///   is evicted first.
///
/// # Performance
///
/// | Operation  | Cost          |
/// |------------|---------------|
/// | `get`      | O(1) average  |
/// | `add`      | O(1) average  |
/// | `contains` | O(1) average  |
/// | `remove`   | O(1) average  |
///
/// # Examples
///
/// ```
/// use boundlru_core::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
/// cache.add("a", 1);
/// cache.add("b", 2);
///
/// // Reading "a" makes "b" the eviction candidate
/// assert_eq!(cache.get("a"), Some(&1));
/// cache.add("c", 3);
///
/// assert!(cache.contains("a"));
/// assert!(!cache.contains("b"));
/// assert!(cache.contains("c"));
/// ```
pub struct LruCache<K, V, S = RandomState> {
    index: HashMap<K, NodeId, S>,
    list: RecencyList<K, V>,
    capacity: Capacity,
    name: Option<String>,
    #[cfg(feature = "stats")]
    stats: CacheStats,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`](crate::CacheError::InvalidArgument)
    /// if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::with_capacity(Capacity::try_from(capacity)?))
    }

    /// Creates an empty cache from an already validated capacity.
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Creates an empty cache that hashes keys with `hasher`.
    pub fn with_capacity_and_hasher(capacity: Capacity, hasher: S) -> Self {
        Self::from_parts(capacity, None, hasher)
    }

    pub(crate) fn from_parts(capacity: Capacity, name: Option<String>, hasher: S) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity.get(), hasher),
            list: RecencyList::with_capacity(capacity.get()),
            capacity,
            name,
            #[cfg(feature = "stats")]
            stats: CacheStats::new(),
        }
    }

    /// Looks up `key` and marks it as most recently used.
    ///
    /// Returns `None` on a miss. Recency order is the only thing a hit
    /// changes; membership and capacity are untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "stats")]
                self.stats.record_miss();
                return None;
            }
        };

        #[cfg(feature = "stats")]
        self.stats.record_hit();

        self.list.move_to_back(id);
        self.list.value(id)
    }

    /// Returns the value for `key` without touching its recency position.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).and_then(|&id| self.list.value(id))
    }

    /// Returns whether `key` is cached. Does not alter recency order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Inserts `key` if it is not already cached.
    ///
    /// If the key is present the call is a no-op: `value` is dropped and the
    /// existing entry keeps both its value and its recency position. This is
    /// not an upsert.
    ///
    /// Otherwise least recently used entries are evicted until there is room,
    /// and the new entry becomes the most recently used.
    ///
    /// Returns `true` if the entry was inserted.
    pub fn add(&mut self, key: K, value: V) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        while self.list.len() >= self.capacity.get() {
            // Unindex before unlinking: a panicking `Hash`/`Eq` must not leave
            // the index pointing at a freed slot.
            let Some(oldest) = self.list.front_key() else {
                break;
            };
            self.index.remove(oldest);
            self.list.pop_front();

            #[cfg(feature = "stats")]
            self.stats.record_eviction();

            tracing::trace!(
                cache = self.display_name(),
                capacity = self.capacity.get(),
                "evicted least recently used entry"
            );
        }

        let id = self.list.push_back(key.clone(), value);
        self.index.insert(key, id);
        true
    }

    /// Removes `key` from the cache, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|(_, value)| value)
    }

    /// Drops every entry. Capacity and statistics are kept.
    pub fn clear(&mut self) {
        let dropped = self.list.len();
        self.index.clear();
        self.list.clear();
        tracing::debug!(cache = self.display_name(), dropped, "cache cleared");
    }
}

impl<K, V, S> LruCache<K, V, S> {
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// Returns the fixed maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the name given to this cache through the builder, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns a reference to the cache statistics.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("capacity", &self.capacity.get())
            .finish()
    }
}

#[cfg(test)]
impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Keys from least to most recently used.
    pub(crate) fn keys_by_recency(&self) -> Vec<K> {
        self.list.iter().map(|(k, _)| k.clone()).collect()
    }

    pub(crate) fn validate_invariants(&self) {
        self.list.validate_invariants();
        assert_eq!(self.index.len(), self.list.len());
        assert!(self.list.len() <= self.capacity.get());
        for (key, _) in self.list.iter() {
            let id = self.index.get(key).expect("listed key missing from index");
            assert!(self.list.key(*id) == Some(key), "index points at wrong node");
        }
    }
}
