//! # Pokedex Cache
//!
//! Time-expiring, concurrency-safe cache for raw HTTP response bodies.
//!
//! Entries become invisible once they are older than the configured TTL and
//! are reclaimed by a background sweeper task. Reads enforce the TTL on their
//! own, so the sweeper only bounds memory, never correctness.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use pokedex_cache::ExpiringCache;
//!
//! # #[tokio::main] async fn main() {
//! let cache = ExpiringCache::new(Duration::from_secs(300));
//! cache.add("https://pokeapi.co/api/v2/location-area/", &b"{}"[..]);
//! assert!(cache.get("https://pokeapi.co/api/v2/location-area/").is_some());
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod config;
mod sweeper;

pub use cache::{CacheStats, ExpiringCache};
pub use config::CacheConfig;
pub use tokio_util::sync::CancellationToken;
