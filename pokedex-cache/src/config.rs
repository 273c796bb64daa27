//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use pokedex_core::constants::DEFAULT_CACHE_TTL;

/// Smallest sweep interval the sweeper will run with.
pub(crate) const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Cache configuration.
///
/// Both durations are fixed for the lifetime of the cache they build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long an entry stays visible after its last write
    pub ttl: Duration,
    /// How often the sweeper reclaims expired entries
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Config whose sweeper wakes once per TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sweep_interval: ttl,
        }
    }

    /// Config from a TTL in whole seconds.
    pub fn from_secs(ttl_secs: u64) -> Self {
        Self::new(Duration::from_secs(ttl_secs))
    }

    /// Overrides the sweep interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Sweep interval as the sweeper will actually use it.
    pub(crate) fn effective_sweep_interval(&self) -> Duration {
        self.sweep_interval.max(MIN_SWEEP_INTERVAL)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sweeps_once_per_ttl() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.sweep_interval, config.ttl);
    }

    #[test]
    fn test_builder() {
        let config = CacheConfig::from_secs(10).with_sweep_interval(Duration::from_secs(2));
        assert_eq!(config.ttl, Duration::from_secs(10));
        assert_eq!(config.sweep_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_zero_interval_clamped() {
        let config = CacheConfig::new(Duration::ZERO);
        assert_eq!(config.effective_sweep_interval(), MIN_SWEEP_INTERVAL);
    }
}
