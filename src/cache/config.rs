//! Cache configuration.

use std::time::Duration;

/// Configuration for a cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    pub max_capacity: u64,

    /// Time-to-live for cache entries.
    pub ttl: Option<Duration>,

    /// Time-to-idle for cache entries.
    pub tti: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Some(Duration::from_secs(300)), // 5 minutes
            tti: None,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with the given max capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            ..Default::default()
        }
    }

    /// Set time-to-live for cache entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = Some(duration);
        self
    }

    /// Set time-to-idle for cache entries.
    #[must_use]
    pub fn tti(mut self, duration: Duration) -> Self {
        self.tti = Some(duration);
        self
    }

    /// Settings keys read on every message.
    /// Nine keys per chat, so capacity is sized for a few thousand chats.
    pub fn chat_settings() -> Self {
        Self::with_capacity(50_000).ttl(Duration::from_secs(300))
    }

    /// Member status lookups for admin-gated commands.
    pub fn admin_status() -> Self {
        Self::with_capacity(10_000)
            .ttl(Duration::from_secs(300)) // 5 minutes
            .tti(Duration::from_secs(120)) // 2 minutes idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_status_expires_when_idle() {
        let config = CacheConfig::admin_status();
        assert_eq!(config.ttl, Some(Duration::from_secs(300)));
        assert_eq!(config.tti, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_builder_keeps_capacity() {
        let config = CacheConfig::with_capacity(7).ttl(Duration::from_secs(1));
        assert_eq!(config.max_capacity, 7);
        assert_eq!(config.tti, None);
    }
}
