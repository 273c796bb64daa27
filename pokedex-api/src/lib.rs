//! # Pokedex API
//!
//! PokeAPI client that consults a [`ResponseCache`](pokedex_core::ResponseCache)
//! before every request.
//!
//! The cache key is the exact request URL. On a hit the cached body is
//! decoded and the network is skipped; on a miss the body of any successful
//! response is cached raw before decoding.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pokedex_api::{ClientConfig, PokeApiClient};
//! use pokedex_cache::ExpiringCache;
//!
//! let cache = Arc::new(ExpiringCache::new(Duration::from_secs(300)));
//! let client = PokeApiClient::with_config(ClientConfig::default(), Some(cache))?;
//! let page = client.location_areas(None).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod config;

pub use client::{Fetched, PokeApiClient};
pub use config::ClientConfig;
