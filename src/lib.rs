//! # Boundlru
//!
//! A bounded least-recently-used cache for memoizing expensive lookups.
//!
//! ## Features
//!
//! - **Bounded**: never holds more than its fixed capacity
//! - **LRU eviction**: the entry unused for the longest time goes first
//! - **Insert if absent**: `add` keeps the first value stored for a key
//! - **Thread-safe**: `BoundedLruCache` guards all state with a single lock
//! - **Explicit misses**: `get` returns `Option`, never a sentinel value
//!
//! ## Quick Start
//!
//! ```rust
//! use boundlru::BoundedLruCache;
//!
//! let cache = BoundedLruCache::new(3).unwrap();
//! cache.add(1, "a");
//! cache.add(2, "b");
//! cache.add(3, "c");
//!
//! // Reading 1 promotes it, so 2 becomes the eviction candidate
//! assert_eq!(cache.get(&1), Some("a"));
//! cache.add(4, "d");
//!
//! assert!(!cache.contains(&2));
//! assert!(cache.contains(&1));
//! assert!(cache.contains(&3));
//! assert!(cache.contains(&4));
//! ```
//!
//! ## Process-Wide Caches
//!
//! [`static_lru_cache!`] declares a lazily initialized `static` cache. A zero
//! capacity is a compile error.
//!
//! ```rust
//! use boundlru::static_lru_cache;
//!
//! static_lru_cache! {
//!     /// Rendered pages keyed by path.
//!     static PAGES: String => String = 64;
//! }
//!
//! PAGES.add("/".to_string(), "<html></html>".to_string());
//! assert!(PAGES.contains("/"));
//! ```
//!
//! ## Error Handling
//!
//! Only construction can fail. A capacity below 1 yields
//! [`CacheError::InvalidArgument`]:
//!
//! ```rust
//! use boundlru::{BoundedLruCache, CacheError, Capacity};
//!
//! assert!(matches!(
//!     BoundedLruCache::<u32, u32>::new(0),
//!     Err(CacheError::InvalidArgument(_))
//! ));
//!
//! // Signed configuration values go through `Capacity`
//! assert!(Capacity::try_from(-1i64).is_err());
//! ```

pub use boundlru_core::*;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}

/// Declares one or more process-wide `static` LRU caches.
///
/// Each static is a `Lazy<BoundedLruCache<K, V>>` built on first use. The
/// capacity must be a constant expression; zero fails to compile.
///
/// # Examples
///
/// ```rust
/// use boundlru::static_lru_cache;
///
/// static_lru_cache! {
///     static USER_NAMES: u64 => String = 1000;
///     pub(crate) static SCORES: &'static str => f64 = 16;
/// }
///
/// USER_NAMES.add(7, "ada".to_string());
/// assert_eq!(USER_NAMES.get(&7), Some("ada".to_string()));
/// assert_eq!(SCORES.capacity(), 16);
/// ```
///
/// ```compile_fail
/// use boundlru::static_lru_cache;
///
/// static_lru_cache! {
///     static EMPTY: u8 => u8 = 0;
/// }
///
/// EMPTY.add(1, 1);
/// ```
#[macro_export]
macro_rules! static_lru_cache {
    ($($(#[$attr:meta])* $vis:vis static $name:ident: $key:ty => $value:ty = $capacity:expr;)+) => {
        $(
            $(#[$attr])*
            $vis static $name: $crate::__private::Lazy<$crate::BoundedLruCache<$key, $value>> =
                $crate::__private::Lazy::new(|| {
                    const CAPACITY: $crate::Capacity = match $crate::Capacity::new($capacity) {
                        ::core::option::Option::Some(capacity) => capacity,
                        ::core::option::Option::None => {
                            panic!("static LRU cache capacity must be at least 1")
                        }
                    };
                    $crate::BoundedLruCache::with_capacity(CAPACITY)
                });
        )+
    };
}
