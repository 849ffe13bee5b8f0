//! Builder for configuring caches before construction.
//!
//! ```
//! use boundlru_core::LruCacheBuilder;
//!
//! let cache = LruCacheBuilder::new()
//!     .capacity(256)
//!     .name("search-results")
//!     .build::<String, Vec<u32>>()
//!     .unwrap();
//!
//! assert_eq!(cache.capacity(), 256);
//! assert_eq!(cache.name().as_deref(), Some("search-results"));
//! ```

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use crate::error::{CacheError, Result};
use crate::{BoundedLruCache, Capacity, LruCache};

/// Collects cache settings and validates them on `build`.
///
/// The capacity is mandatory. It can be given as a raw `usize` through
/// [`capacity`](Self::capacity) (validated at build time) or as an already
/// validated [`Capacity`] through [`with_capacity`](Self::with_capacity).
#[derive(Debug, Clone)]
pub struct LruCacheBuilder<S = RandomState> {
    capacity: Option<usize>,
    name: Option<String>,
    hasher: S,
}

impl LruCacheBuilder {
    pub fn new() -> Self {
        Self {
            capacity: None,
            name: None,
            hasher: RandomState::new(),
        }
    }
}

impl Default for LruCacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> LruCacheBuilder<S> {
    /// Sets the maximum number of entries. Zero is rejected by `build`.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = Some(capacity.get());
        self
    }

    /// Names the cache. The name tags the cache's `tracing` events.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the hasher used by the key index.
    pub fn hasher<S2>(self, hasher: S2) -> LruCacheBuilder<S2> {
        LruCacheBuilder {
            capacity: self.capacity,
            name: self.name,
            hasher,
        }
    }

    fn validated_capacity(&self) -> Result<Capacity> {
        let raw = self
            .capacity
            .ok_or_else(|| CacheError::InvalidArgument("capacity was not set".to_string()))?;
        Capacity::try_from(raw)
    }
}

impl<S: BuildHasher> LruCacheBuilder<S> {
    /// Builds a thread-safe [`BoundedLruCache`].
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidArgument`] if the capacity is missing or zero.
    pub fn build<K, V>(self) -> Result<BoundedLruCache<K, V, S>>
    where
        K: Hash + Eq + Clone,
    {
        self.build_unsync().map(BoundedLruCache::from_unsync)
    }

    /// Builds an unsynchronized [`LruCache`].
    pub fn build_unsync<K, V>(self) -> Result<LruCache<K, V, S>>
    where
        K: Hash + Eq + Clone,
    {
        let capacity = self.validated_capacity()?;
        Ok(LruCache::from_parts(capacity, self.name, self.hasher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::BuildHasherDefault;

    #[test]
    fn test_missing_capacity() {
        let err = LruCacheBuilder::new().build::<u32, u32>().unwrap_err();
        assert_eq!(
            err,
            CacheError::InvalidArgument("capacity was not set".to_string())
        );
    }

    #[test]
    fn test_zero_capacity() {
        let result = LruCacheBuilder::new().capacity(0).build_unsync::<u32, u32>();
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[test]
    fn test_name_and_capacity_carried_through() {
        let cache = LruCacheBuilder::new()
            .with_capacity(Capacity::MIN)
            .name("tiny")
            .build_unsync::<u32, u32>()
            .unwrap();

        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.name(), Some("tiny"));
    }

    #[test]
    fn test_custom_hasher() {
        let cache = LruCacheBuilder::new()
            .capacity(4)
            .hasher(BuildHasherDefault::<DefaultHasher>::default())
            .build::<&str, i32>()
            .unwrap();

        cache.add("x", 1);
        assert_eq!(cache.get(&"x"), Some(1));
        assert_eq!(cache.name(), None);
    }
}
