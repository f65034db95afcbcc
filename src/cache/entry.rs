//! Cache Entry Module
//!
//! A stored value plus its expiry deadline.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cache entry. Every entry carries a TTL.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Instant at which the entry stops being visible, None when the TTL
    /// reaches past what the clock can represent
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl_seconds` from now.
    pub fn new(value: String, ttl_seconds: u64) -> Self {
        Self {
            value,
            expires_at: Instant::now().checked_add(Duration::from_secs(ttl_seconds)),
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired and `Duration::MAX` when unbounded.
    pub fn ttl_remaining(&self) -> Duration {
        match self.expires_at {
            Some(expires) => expires.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_not_expired_before_ttl() {
        let entry = CacheEntry::new("value".to_string(), 60);

        assert_eq!(entry.value, "value");
        assert!(!entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiration() {
        let entry = CacheEntry::new("value".to_string(), 1);

        tokio::time::advance(Duration::from_millis(1100)).await;

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_ttl_never_expires() {
        let entry = CacheEntry::new("value".to_string(), u64::MAX);

        tokio::time::advance(Duration::from_secs(365 * 24 * 3600)).await;

        assert!(!entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new("value".to_string(), 0);
        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
