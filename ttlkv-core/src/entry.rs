use std::sync::Arc;
use std::time::{Duration, Instant};

/// A stored value together with the instant it stops being visible
#[derive(Debug, Clone)]
pub struct Entry {
    value: Arc<str>,
    expires_at: Instant,
}

impl Entry {
    /// Creates an entry that expires `ttl` from now
    pub fn new(value: Arc<str>, ttl: Duration) -> Self {
        Self::with_deadline(value, Instant::now() + ttl)
    }

    /// Creates an entry with an explicit expiration instant
    pub fn with_deadline(value: Arc<str>, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    /// Returns the stored value as a string slice
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns a shared reference to the stored value (zero-cost clone)
    pub fn value_shared(&self) -> Arc<str> {
        Arc::clone(&self.value)
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// An entry is expired once `now` reaches its deadline
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, clamped to zero
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_not_expired() {
        let entry = Entry::new(Arc::from("test_value"), Duration::from_secs(60));

        assert_eq!(entry.value(), "test_value");
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expired() {
        let entry = Entry::with_deadline(
            Arc::from("test_value"),
            Instant::now() - Duration::from_secs(1),
        );

        assert!(entry.is_expired());
        assert_eq!(entry.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_expired_exactly_at_deadline() {
        let deadline = Instant::now() + Duration::from_millis(500);
        let entry = Entry::with_deadline(Arc::from("v"), deadline);

        assert!(!entry.is_expired_at(deadline - Duration::from_millis(1)));
        assert!(entry.is_expired_at(deadline));
    }

    #[test]
    fn test_remaining_counts_down() {
        let entry = Entry::new(Arc::from("v"), Duration::from_secs(100));
        let remaining = entry.remaining();

        assert!(remaining <= Duration::from_secs(100));
        assert!(remaining > Duration::from_secs(99));
    }

    #[test]
    fn test_value_shared_returns_arc() {
        let entry = Entry::new(Arc::from("shared_value"), Duration::from_secs(60));

        let shared1 = entry.value_shared();
        let shared2 = entry.value_shared();
        assert!(Arc::ptr_eq(&shared1, &shared2));
        assert_eq!(&*shared1, "shared_value");
    }
}
