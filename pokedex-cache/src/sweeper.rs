//! Background reclamation of expired entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::cache::Store;

/// Spawns the sweep loop on the current runtime.
///
/// Wakes every `interval`, purges expired entries, and exits as soon as
/// `shutdown` is cancelled. The task holds the store alive until it exits.
pub(crate) fn spawn_sweeper(
    store: Arc<Store>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await; // skip first immediate tick

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!("Cache sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = store.purge_expired();
                    if removed > 0 {
                        debug!(removed, remaining = store.len(), "Swept expired cache entries");
                    } else {
                        trace!("Cache sweep found nothing to remove");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CacheConfig, ExpiringCache};

    #[tokio::test]
    async fn test_cancelled_before_first_tick() {
        let config = CacheConfig::new(Duration::from_secs(60));
        let cache = ExpiringCache::with_config(config);
        cache.shutdown();

        let stopped = tokio::time::timeout(Duration::from_secs(1), async {
            while cache.is_sweeper_running() {
                tokio::task::yield_now().await;
            }
        })
        .await;
        assert!(stopped.is_ok(), "sweeper should exit without waiting for a tick");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeps_on_interval() {
        let config = CacheConfig::new(Duration::ZERO).with_sweep_interval(Duration::from_secs(10));
        let cache = ExpiringCache::with_config(config);
        cache.add("k", &b"v"[..]);
        assert_eq!(cache.len(), 1);

        // Auto-advancing paused time drives the ticker without real sleeping.
        tokio::time::sleep(Duration::from_secs(11)).await;
        tokio::task::yield_now().await;

        assert_eq!(cache.len(), 0);
    }
}
