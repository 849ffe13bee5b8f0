use std::fmt;
use std::num::{IntErrorKind, NonZeroUsize, ParseIntError};
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Maximum number of entries a cache may hold.
///
/// A `Capacity` is always at least 1, so once a value of this type exists the
/// cache built from it cannot fail. Raw integers and configuration strings are
/// validated through `TryFrom` and `FromStr`; zero, negative and unparsable
/// values all produce [`CacheError::InvalidArgument`].
///
/// # Examples
///
/// ```
/// use boundlru_core::Capacity;
///
/// let cap = Capacity::try_from(128usize).unwrap();
/// assert_eq!(cap.get(), 128);
///
/// // Signed configuration values are checked too
/// assert!(Capacity::try_from(-5i64).is_err());
///
/// // As are strings read from config files or environment variables
/// let parsed: Capacity = " 64 ".parse().unwrap();
/// assert_eq!(parsed.get(), 64);
/// assert!("zero".parse::<Capacity>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(NonZeroUsize);

impl Capacity {
    /// Smallest capacity a cache can have.
    pub const MIN: Capacity = Capacity(NonZeroUsize::MIN);

    /// Creates a capacity, returning `None` for zero.
    ///
    /// This is a `const fn` so capacities for `static` caches can be checked
    /// at compile time.
    pub const fn new(capacity: usize) -> Option<Self> {
        match NonZeroUsize::new(capacity) {
            Some(n) => Some(Capacity(n)),
            None => None,
        }
    }

    /// Returns the capacity as a plain `usize`.
    #[inline]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl From<NonZeroUsize> for Capacity {
    fn from(n: NonZeroUsize) -> Self {
        Capacity(n)
    }
}

impl From<Capacity> for usize {
    fn from(c: Capacity) -> Self {
        c.get()
    }
}

impl TryFrom<usize> for Capacity {
    type Error = CacheError;

    fn try_from(value: usize) -> Result<Self> {
        Capacity::new(value).ok_or_else(|| CacheError::invalid_capacity(value))
    }
}

impl TryFrom<i64> for Capacity {
    type Error = CacheError;

    fn try_from(value: i64) -> Result<Self> {
        if value < 1 {
            return Err(CacheError::invalid_capacity(value));
        }
        let value =
            usize::try_from(value).map_err(|_| CacheError::capacity_out_of_range(value))?;
        Capacity::try_from(value)
    }
}

impl TryFrom<i32> for Capacity {
    type Error = CacheError;

    fn try_from(value: i32) -> Result<Self> {
        Capacity::try_from(i64::from(value))
    }
}

impl FromStr for Capacity {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value: i128 = trimmed.parse().map_err(|e: ParseIntError| match e.kind() {
            IntErrorKind::PosOverflow => CacheError::capacity_out_of_range(trimmed),
            IntErrorKind::NegOverflow => CacheError::invalid_capacity(trimmed),
            _ => {
                CacheError::InvalidArgument(format!("capacity is not an integer: {:?}", trimmed))
            }
        })?;
        if value < 1 {
            return Err(CacheError::invalid_capacity(value));
        }
        let value =
            usize::try_from(value).map_err(|_| CacheError::capacity_out_of_range(value))?;
        Capacity::try_from(value)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
