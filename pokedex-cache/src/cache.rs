//! In-memory TTL cache for response bodies.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use pokedex_core::traits::ResponseCache;

use crate::config::CacheConfig;
use crate::sweeper::spawn_sweeper;

/// Cache entry stamped at insertion.
#[derive(Clone)]
struct CacheEntry {
    value: Bytes,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

/// Shared entry store, owned by the cache and borrowed by its sweeper.
pub(crate) struct Store {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Store {
    fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn insert(&self, key: String, value: Bytes) {
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
        };
        self.entries.write().insert(key, entry);
    }

    fn get(&self, key: &str) -> Option<Bytes> {
        let now = Instant::now();
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|e| !e.is_expired(now, self.ttl))
            .map(|e| e.value.clone())
    }

    /// Removes every expired entry and returns how many were dropped.
    pub(crate) fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now, self.ttl));
        before - entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.read();
        let expired = entries
            .values()
            .filter(|e| e.is_expired(now, self.ttl))
            .count();

        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len() - expired,
            ttl: self.ttl,
        }
    }
}

/// Time-expiring cache from URL keys to raw response bodies.
///
/// Thread-safe. Every entry is visible to [`get`](Self::get) for exactly the
/// configured TTL after its latest [`add`](Self::add); the TTL is checked on
/// every read. A background sweeper reclaims expired entries every sweep
/// interval so they do not accumulate.
///
/// # Sweeper lifecycle
///
/// The sweeper is spawned on the current Tokio runtime at construction and is
/// cancelled by [`shutdown`](Self::shutdown), by dropping the cache, or by
/// cancelling the parent token given to
/// [`with_cancellation`](Self::with_cancellation). Built outside a runtime the
/// cache still expires entries on read, it just never reclaims them in the
/// background.
///
/// Share one cache between tasks with `Arc<ExpiringCache>`.
pub struct ExpiringCache {
    store: Arc<Store>,
    config: CacheConfig,
    shutdown: CancellationToken,
    sweeper: Option<JoinHandle<()>>,
}

impl ExpiringCache {
    /// Creates a cache whose sweeper wakes once per `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self::with_config(CacheConfig::new(ttl))
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_cancellation(config, CancellationToken::new())
    }

    /// Creates a cache whose sweeper also stops when `parent` is cancelled.
    pub fn with_cancellation(config: CacheConfig, parent: CancellationToken) -> Self {
        let store = Arc::new(Store::new(config.ttl));
        let shutdown = parent.child_token();

        let sweeper = match tokio::runtime::Handle::try_current() {
            Ok(_) => Some(spawn_sweeper(
                Arc::clone(&store),
                config.effective_sweep_interval(),
                shutdown.clone(),
            )),
            Err(_) => {
                warn!("No Tokio runtime, expired entries are only hidden on read");
                None
            }
        };

        debug!(ttl = ?config.ttl, sweep_interval = ?config.sweep_interval, "Created response cache");

        Self {
            store,
            config,
            shutdown,
            sweeper,
        }
    }

    /// Inserts or replaces the entry for `key`, resetting its age.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        self.store.insert(key.into(), value.into());
    }

    /// Gets the payload for `key`.
    ///
    /// Returns None if no entry exists or the entry is at least one TTL old.
    /// The returned `Bytes` is an immutable shared handle; later writes to the
    /// same key do not affect it.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.store.get(key)
    }

    /// Removes all expired entries now and returns how many were removed.
    ///
    /// This is what the sweeper runs on every tick.
    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired()
    }

    /// Returns the number of stored entries, including expired ones the
    /// sweeper has not reclaimed yet.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Time-to-live of every entry.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// How often the sweeper runs.
    pub fn sweep_interval(&self) -> Duration {
        self.config.sweep_interval
    }

    /// Returns true while the background sweeper task is alive.
    pub fn is_sweeper_running(&self) -> bool {
        self.sweeper.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the background sweeper. Reads keep enforcing the TTL.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for ExpiringCache {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl ResponseCache for ExpiringCache {
    fn add(&self, key: &str, value: Bytes) {
        ExpiringCache::add(self, key, value);
    }

    fn get(&self, key: &str) -> Option<Bytes> {
        ExpiringCache::get(self, key)
    }
}

impl std::fmt::Debug for ExpiringCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("config", &self.config)
            .field("entries", &self.len())
            .field("sweeper_running", &self.is_sweeper_running())
            .finish()
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Total entries (including expired)
    pub total_entries: usize,
    /// Expired entries not yet swept
    pub expired_entries: usize,
    /// Valid (non-expired) entries
    pub valid_entries: usize,
    /// Configured TTL
    pub ttl: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const URL: &str = "https://example.com";

    async fn wait_until(mut done: impl FnMut() -> bool) -> bool {
        for _ in 0..200 {
            if done() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        done()
    }

    #[test]
    fn test_add_get() {
        let cache = ExpiringCache::new(Duration::from_secs(5));
        cache.add("test-key", &b"test-data"[..]);

        let result = cache.get("test-key").unwrap();
        assert_eq!(&result[..], b"test-data");
    }

    #[test]
    fn test_miss_on_unknown_key() {
        let cache = ExpiringCache::new(Duration::from_secs(5));
        assert!(cache.get("never-added").is_none());

        cache.add("other", Bytes::from_static(b"x"));
        assert!(cache.get("never-added").is_none());
    }

    #[test]
    fn test_overwrite_wins_and_resets_age() {
        let cache = ExpiringCache::new(Duration::from_millis(200));
        cache.add(URL, &b"v1"[..]);
        std::thread::sleep(Duration::from_millis(120));
        cache.add(URL, &b"v2"[..]);
        std::thread::sleep(Duration::from_millis(120));

        // 240ms after the first write, 120ms after the second.
        assert_eq!(cache.get(URL).as_deref(), Some(&b"v2"[..]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_returned_value_is_detached() {
        let cache = ExpiringCache::new(Duration::from_secs(5));
        cache.add(URL, &b"first"[..]);
        let held = cache.get(URL).unwrap();

        cache.add(URL, &b"second"[..]);

        assert_eq!(&held[..], b"first");
        assert_eq!(cache.get(URL).as_deref(), Some(&b"second"[..]));
    }

    #[test]
    fn test_zero_ttl_is_never_visible() {
        let cache = ExpiringCache::new(Duration::ZERO);
        cache.add(URL, &b"x"[..]);
        assert!(cache.get(URL).is_none());
    }

    #[test]
    fn test_without_runtime_has_no_sweeper() {
        let cache = ExpiringCache::new(Duration::from_millis(5));
        assert!(!cache.is_sweeper_running());

        cache.add(URL, &b"x"[..]);
        std::thread::sleep(Duration::from_millis(15));
        assert!(cache.get(URL).is_none());
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_sweeper_spawned_inside_runtime() {
        tokio_test::block_on(async {
            let cache = ExpiringCache::new(Duration::from_secs(1));
            assert!(cache.is_sweeper_running());
        });
    }

    #[tokio::test]
    async fn test_reap_loop() {
        let base = Duration::from_millis(5);
        let cache = ExpiringCache::new(base);
        cache.add(URL, &b"testdata"[..]);

        assert!(cache.get(URL).is_some());

        tokio::time::sleep(base + Duration::from_millis(5)).await;

        assert!(cache.get(URL).is_none());
    }

    #[tokio::test]
    async fn test_ttl_scenario() {
        let cache = ExpiringCache::new(Duration::from_millis(50));
        cache.add("u1", &b"x"[..]);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.get("u1").as_deref(), Some(&b"x"[..]));

        tokio::time::sleep(Duration::from_millis(110)).await;
        assert!(cache.get("u1").is_none());
    }

    #[tokio::test]
    async fn test_read_checks_ttl_before_sweep() {
        let config = CacheConfig::new(Duration::from_millis(20))
            .with_sweep_interval(Duration::from_secs(3600));
        let cache = ExpiringCache::with_config(config);
        cache.add(URL, &b"stale"[..]);

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(cache.get(URL).is_none());
        // Still physically present: the sweeper has not run.
        assert_eq!(cache.len(), 1);
        let stats = cache.stats();
        assert_eq!(stats.expired_entries, 1);
        assert_eq!(stats.valid_entries, 0);
    }

    #[tokio::test]
    async fn test_sweeper_reclaims_entries() {
        let cache = ExpiringCache::new(Duration::from_millis(20));
        cache.add("a", &b"1"[..]);
        cache.add("b", &b"2"[..]);
        assert_eq!(cache.len(), 2);

        assert!(wait_until(|| cache.is_empty()).await);
    }

    #[tokio::test]
    async fn test_sweeper_keeps_live_entries() {
        let config = CacheConfig::new(Duration::from_secs(60))
            .with_sweep_interval(Duration::from_millis(5));
        let cache = ExpiringCache::with_config(config);
        cache.add(URL, &b"fresh"[..]);

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.len(), 1);
        assert!(cache.get(URL).is_some());
    }

    #[tokio::test]
    async fn test_shutdown_stops_sweeper() {
        let cache = ExpiringCache::new(Duration::from_millis(10));
        assert!(cache.is_sweeper_running());

        cache.shutdown();

        assert!(wait_until(|| !cache.is_sweeper_running()).await);
        // Reads still expire entries.
        cache.add(URL, &b"x"[..]);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get(URL).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_parent_token_stops_sweeper() {
        let parent = CancellationToken::new();
        let cache =
            ExpiringCache::with_cancellation(CacheConfig::new(Duration::from_millis(10)), parent.clone());
        assert!(cache.is_sweeper_running());

        parent.cancel();

        assert!(wait_until(|| !cache.is_sweeper_running()).await);
    }

    #[tokio::test]
    async fn test_drop_releases_store() {
        let cache = ExpiringCache::new(Duration::from_secs(3600));
        let store = Arc::downgrade(&cache.store);

        drop(cache);

        assert!(wait_until(|| store.upgrade().is_none()).await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_add_get() {
        let cache = Arc::new(ExpiringCache::with_config(
            CacheConfig::new(Duration::from_secs(60)).with_sweep_interval(Duration::from_millis(1)),
        ));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..500 {
                        let own = format!("thread-{t}/{i}");
                        cache.add(own.clone(), own.clone().into_bytes());
                        assert_eq!(cache.get(&own).as_deref(), Some(own.as_bytes()));

                        let shared = format!("shared/{}", i % 16);
                        cache.add(shared.clone(), vec![t as u8]);
                        assert!(cache.get(&shared).is_some());
                    }
                })
            })
            .collect();

        let tasks: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move {
                    for i in 0..500 {
                        cache.add(format!("task-{t}/{i}"), vec![1u8; 8]);
                        let _ = cache.get(&format!("shared/{}", i % 16));
                        if i % 50 == 0 {
                            tokio::task::yield_now().await;
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        for task in tasks {
            task.await.unwrap();
        }

        for t in 0..8 {
            for i in 0..500 {
                assert!(cache.get(&format!("thread-{t}/{i}")).is_some());
                assert!(cache.get(&format!("task-{t}/{i}")).is_some());
            }
        }
        for i in 0..16 {
            let value = cache.get(&format!("shared/{i}")).unwrap();
            assert_eq!(value.len(), 1);
            assert!(value[0] < 8);
        }
        assert_eq!(cache.len(), 8 * 500 * 2 + 16);
    }

    #[test]
    fn test_stats() {
        let cache = ExpiringCache::new(Duration::from_secs(60));
        cache.add("a", &b"1"[..]);
        cache.add("b", &b"2"[..]);

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 2);
        assert_eq!(stats.expired_entries, 0);
        assert_eq!(stats.ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let cache: Arc<dyn ResponseCache> = Arc::new(ExpiringCache::new(Duration::from_secs(60)));
        cache.add(URL, Bytes::from_static(b"body"));
        assert_eq!(cache.get(URL).as_deref(), Some(&b"body"[..]));
    }

    proptest! {
        #[test]
        fn prop_write_then_read(key in ".{0,64}", value in proptest::collection::vec(any::<u8>(), 0..512)) {
            let cache = ExpiringCache::new(Duration::from_secs(60));
            cache.add(key.clone(), value.clone());
            let got = cache.get(&key);
            prop_assert_eq!(got.as_deref(), Some(&value[..]));
        }
    }
}
