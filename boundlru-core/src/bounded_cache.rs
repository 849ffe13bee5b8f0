use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use parking_lot::Mutex;

use crate::error::Result;
use crate::{Capacity, LruCache};

#[cfg(feature = "stats")]
use crate::CacheStats;

/// A thread-safe bounded LRU cache that can be shared across threads.
///
/// `BoundedLruCache` owns a single [`LruCache`] behind one `parking_lot::Mutex`.
/// The hash index and the recency list live together inside that mutex and
/// every operation (`get`, `add`, `contains`, ...) holds the lock for its
/// whole duration, so no caller ever sees a node spliced out of the list
/// while its index entry still points at it.
///
/// # Type Parameters
///
/// * `K` - Key type (`Hash + Eq + Clone`).
/// * `V` - Value type. [`get`](Self::get) needs `V: Clone`; use
///   [`get_with`](Self::get_with) to read non-`Clone` values under the lock.
/// * `S` - Hasher for the index (defaults to `RandomState`).
///
/// # Thread Safety
///
/// - **One lock, both structures**: index and recency list are never
///   synchronized separately.
/// - **No lock poisoning**: a panic in another thread does not make the cache
///   unusable.
/// - **No suspension**: operations never block on I/O; the only wait is
///   contention with other callers.
///
/// Racing operations from different threads are mutually exclusive; their
/// relative recency order is unspecified.
///
/// # Examples
///
/// ```
/// use boundlru_core::BoundedLruCache;
/// use std::sync::Arc;
/// use std::thread;
///
/// let cache = Arc::new(BoundedLruCache::new(100).unwrap());
///
/// let handles: Vec<_> = (0..4u32)
///     .map(|t| {
///         let cache = Arc::clone(&cache);
///         thread::spawn(move || {
///             for i in 0..50 {
///                 cache.add(t * 1000 + i, i);
///                 let _ = cache.get(&(t * 1000 + i));
///             }
///         })
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(cache.len(), 100);
/// ```
pub struct BoundedLruCache<K, V, S = RandomState> {
    inner: Mutex<LruCache<K, V, S>>,
}

impl<K: Hash + Eq + Clone, V> BoundedLruCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`](crate::CacheError::InvalidArgument)
    /// if `capacity` is zero. No cache is created in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundlru_core::BoundedLruCache;
    ///
    /// let cache: BoundedLruCache<u64, String> = BoundedLruCache::new(3).unwrap();
    /// assert_eq!(cache.capacity(), 3);
    ///
    /// assert!(BoundedLruCache::<u64, String>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::with_capacity(Capacity::try_from(capacity)?))
    }

    /// Creates an empty cache from an already validated capacity.
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self::from_unsync(LruCache::with_capacity(capacity))
    }
}

impl<K, V, S> BoundedLruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Creates an empty cache that hashes keys with `hasher`.
    pub fn with_capacity_and_hasher(capacity: Capacity, hasher: S) -> Self {
        Self::from_unsync(LruCache::with_capacity_and_hasher(capacity, hasher))
    }

    /// Looks up `key`, marks it as most recently used and returns a clone of
    /// its value.
    ///
    /// Returns `None` on a miss, which is distinct from any stored value.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundlru_core::BoundedLruCache;
    ///
    /// let cache = BoundedLruCache::new(3).unwrap();
    /// cache.add(1, "a");
    /// cache.add(2, "b");
    /// cache.add(3, "c");
    ///
    /// assert_eq!(cache.get(&1), Some("a"));
    /// cache.add(4, "d");
    ///
    /// // 2 was least recently used once 1 had been read
    /// assert!(!cache.contains(&2));
    /// assert!(cache.contains(&1));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Looks up `key`, marks it as most recently used and returns `f(&value)`.
    ///
    /// `f` runs while the lock is held; keep it short and do not call back
    /// into the same cache from it.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundlru_core::BoundedLruCache;
    ///
    /// let cache = BoundedLruCache::new(2).unwrap();
    /// cache.add("doc", vec![1u8, 2, 3]);
    ///
    /// assert_eq!(cache.get_with("doc", |bytes| bytes.len()), Some(3));
    /// assert_eq!(cache.get_with("missing", |bytes| bytes.len()), None);
    /// ```
    pub fn get_with<Q, R, F>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Returns a clone of the value for `key` without promoting it.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Returns whether `key` is cached. Does not alter recency order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    /// Inserts `key` if it is not already cached, evicting the least recently
    /// used entry when the cache is full.
    ///
    /// Adding a key that is already present is a no-op; the stored value and
    /// its recency position are kept. Returns `true` if the entry was inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundlru_core::BoundedLruCache;
    ///
    /// let cache = BoundedLruCache::new(2).unwrap();
    /// assert!(cache.add("k", 1));
    /// assert!(!cache.add("k", 2));
    /// assert_eq!(cache.get(&"k"), Some(1));
    /// ```
    pub fn add(&self, key: K, value: V) -> bool {
        self.inner.lock().add(key, value)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    /// Drops every entry. Capacity and statistics are kept.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl<K, V, S> BoundedLruCache<K, V, S> {
    /// Wraps an unsynchronized cache, keeping its entries and recency order.
    pub fn from_unsync(cache: LruCache<K, V, S>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// Consumes the shared cache and returns the unsynchronized one.
    pub fn into_unsync(self) -> LruCache<K, V, S> {
        self.inner.into_inner()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns the name given to this cache through the builder, if any.
    pub fn name(&self) -> Option<String> {
        self.inner.lock().name().map(str::to_owned)
    }

    /// Returns a snapshot of the cache statistics.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundlru_core::BoundedLruCache;
    ///
    /// let cache = BoundedLruCache::new(1).unwrap();
    /// cache.add(1, "a");
    /// let _ = cache.get(&1);
    /// let _ = cache.get(&2);
    /// cache.add(2, "b");
    ///
    /// let stats = cache.stats();
    /// assert_eq!(stats.hits(), 1);
    /// assert_eq!(stats.misses(), 1);
    /// assert_eq!(stats.evictions(), 1);
    /// ```
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats().clone()
    }

    /// Resets the hit, miss and eviction counters.
    #[cfg(feature = "stats")]
    pub fn reset_stats(&self) {
        self.inner.lock().stats().reset();
    }
}

impl<K, V, S> From<LruCache<K, V, S>> for BoundedLruCache<K, V, S> {
    fn from(cache: LruCache<K, V, S>) -> Self {
        Self::from_unsync(cache)
    }
}

impl<K, V, S> fmt::Debug for BoundedLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f
                .debug_struct("BoundedLruCache")
                .field("name", &cache.name())
                .field("len", &cache.len())
                .field("capacity", &cache.capacity())
                .finish(),
            None => f
                .debug_struct("BoundedLruCache")
                .field("inner", &format_args!("<locked>"))
                .finish(),
        }
    }
}
