//! # Boundlru Core
//!
//! Data structures behind the `boundlru` bounded LRU cache.
//!
//! ## Features
//!
//! - **Bounded size**: a cache never holds more than its fixed capacity
//! - **LRU eviction**: the least recently used entry is evicted to make room
//! - **O(1) operations**: hash index plus an arena-backed doubly linked list
//! - **Insert if absent**: `add` never overwrites an existing entry
//! - **Explicit misses**: lookups return `Option`, so any value can be stored
//! - **Single-lock sharing**: one `parking_lot::Mutex` covers index and list
//! - **Statistics**: optional hit/miss/eviction counters (`stats` feature)
//!
//! ## Module Organization
//!
//! - [`LruCache`] - unsynchronized cache, mutated through `&mut self`
//! - [`BoundedLruCache`] - thread-safe cache sharing one `LruCache`
//! - [`Capacity`] - validated non-zero capacity
//! - [`LruCacheBuilder`] - capacity, name and hasher configuration
//! - [`CacheError`] - construction errors
//!
mod bounded_cache;
mod builder;
mod capacity;
mod error;
mod lru_cache;
mod recency_list;

#[cfg(feature = "stats")]
mod stats;

pub use bounded_cache::BoundedLruCache;
pub use builder::LruCacheBuilder;
pub use capacity::Capacity;
pub use error::{CacheError, Result};
pub use lru_cache::LruCache;

#[cfg(feature = "stats")]
pub use stats::CacheStats;
