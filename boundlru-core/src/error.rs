use thiserror::Error;

/// Convenience alias used by every fallible constructor in this crate.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors raised while configuring or constructing a cache.
///
/// Lookups and inserts never fail: a miss is `None` and a duplicate `add`
/// is a no-op. The only failure point is building a cache from an invalid
/// configuration, which is reported here and never retried internally.
///
/// # Examples
///
/// ```
/// use boundlru_core::{BoundedLruCache, CacheError};
///
/// let err = BoundedLruCache::<u32, String>::new(0).unwrap_err();
/// assert!(matches!(err, CacheError::InvalidArgument(_)));
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CacheError {
    pub(crate) fn invalid_capacity(detail: impl std::fmt::Display) -> Self {
        CacheError::InvalidArgument(format!("capacity must be at least 1, got {}", detail))
    }

    pub(crate) fn capacity_out_of_range(detail: impl std::fmt::Display) -> Self {
        CacheError::InvalidArgument(format!(
            "capacity out of range: {} exceeds {}",
            detail,
            usize::MAX
        ))
    }
}
