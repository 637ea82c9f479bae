use crate::error::Result;

/// A cached value and the epoch second it was recorded at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub timestamp: i64,
    pub value: String,
}

impl Entry {
    pub fn new(timestamp: i64, value: impl Into<String>) -> Self {
        Self { timestamp, value: value.into() }
    }

    /// Age of the entry relative to `now`, in seconds.
    ///
    /// Negative when the timestamp lies in the future. Timestamps are never
    /// checked for monotonicity, so such an entry simply counts as very fresh.
    pub fn age(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }

    /// `true` while the entry is younger than `max_age` seconds.
    pub fn is_fresh(&self, now: i64, max_age: u64) -> bool {
        let max_age = i64::try_from(max_age).unwrap_or(i64::MAX);
        self.age(now) < max_age
    }
}

/// Key-value storage for cache entries.
///
/// Entries are only ever overwritten, never deleted.
pub trait VersionStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written or the stored
    /// entry cannot be understood.
    fn get(&self, key: &str) -> Result<Option<Entry>>;

    /// Replaces whatever is stored under `key`.
    fn put(&self, key: &str, timestamp: i64, value: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1_000, 1_000, 42_600, true)]
    #[case(1_000, 43_599, 42_600, true)]
    #[case(1_000, 43_600, 42_600, false)]
    #[case(1_000, 100_000, 42_600, false)]
    // Future timestamps are honoured as fresh.
    #[case(9_000_000, 1_000, 42_600, true)]
    #[case(1_000, 1_000, 0, false)]
    #[case(i64::MIN, i64::MAX, u64::MAX, false)]
    fn test_freshness(#[case] timestamp: i64, #[case] now: i64, #[case] max_age: u64, #[case] fresh: bool) {
        assert_eq!(Entry::new(timestamp, "5.2.0").is_fresh(now, max_age), fresh);
    }
}
