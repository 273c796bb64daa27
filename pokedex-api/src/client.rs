//! PokeAPI client implementation.
//!
//! Every request goes through [`PokeApiClient::fetch_json`]: cache lookup by
//! exact URL, network on miss, raw body cached on success.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use pokedex_core::constants::{LOCATION_AREA_PATH, POKEMON_PATH};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::ResponseCache;
use pokedex_core::types::{LocationArea, LocationAreasPage, Pokemon};

use crate::config::ClientConfig;

/// A decoded response plus where it came from.
#[derive(Clone, Debug)]
pub struct Fetched<T> {
    /// The decoded body
    pub value: T,
    /// URL the body belongs to (also the cache key)
    pub url: String,
    /// Whether the body was served from the cache
    pub from_cache: bool,
}

/// Cache-first PokeAPI client.
pub struct PokeApiClient {
    config: ClientConfig,
    http_client: reqwest::Client,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl PokeApiClient {
    /// Creates a client with default configuration.
    pub fn new(cache: Option<Arc<dyn ResponseCache>>) -> Result<Self> {
        Self::with_config(ClientConfig::default(), cache)
    }

    /// Creates a client with custom configuration.
    ///
    /// Passing `None` disables caching: every call goes to the network.
    pub fn with_config(config: ClientConfig, cache: Option<Arc<dyn ResponseCache>>) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PokedexError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            cache,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// URL of the first location-area page.
    pub fn first_location_page_url(&self) -> String {
        format!("{}/{}/", self.config.base(), LOCATION_AREA_PATH)
    }

    /// URL of a single location area.
    pub fn location_area_url(&self, name: &str) -> Result<String> {
        validate_name(name)?;
        Ok(format!("{}/{}/{}/", self.config.base(), LOCATION_AREA_PATH, name))
    }

    /// URL of a single Pokémon.
    pub fn pokemon_url(&self, name: &str) -> Result<String> {
        validate_name(name)?;
        Ok(format!("{}/{}/{}/", self.config.base(), POKEMON_PATH, name))
    }

    /// Fetches a page of location areas.
    ///
    /// `page_url` is a `next`/`previous` link from an earlier page, used
    /// verbatim; `None` fetches the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<Fetched<LocationAreasPage>> {
        let url = match page_url {
            Some(url) => url.to_string(),
            None => self.first_location_page_url(),
        };
        self.fetch_json(&url).await
    }

    /// Fetches one location area with its encounters.
    pub async fn location_area(&self, name: &str) -> Result<Fetched<LocationArea>> {
        let url = self.location_area_url(name)?;
        self.fetch_json(&url).await
    }

    /// Fetches one Pokémon.
    pub async fn pokemon(&self, name: &str) -> Result<Fetched<Pokemon>> {
        let url = self.pokemon_url(name)?;
        self.fetch_json(&url).await
    }

    /// Looks `url` up in the cache, fetching and caching it on a miss, then decodes it.
    #[instrument(skip(self))]
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<Fetched<T>> {
        if let Some(body) = self.cache.as_ref().and_then(|c| c.get(url)) {
            debug!(url, bytes = body.len(), "Cache hit");
            let value = serde_json::from_slice(&body).map_err(PokedexError::CachedJsonError)?;
            return Ok(Fetched {
                value,
                url: url.to_string(),
                from_cache: true,
            });
        }

        debug!(url, "Cache miss, fetching");
        let body = self.fetch_body(url).await?;

        if let Some(cache) = &self.cache {
            cache.add(url, body.clone());
        }

        let value = serde_json::from_slice(&body)?;
        Ok(Fetched {
            value,
            url: url.to_string(),
            from_cache: false,
        })
    }

    async fn fetch_body(&self, url: &str) -> Result<Bytes> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| PokedexError::HttpError(e.to_string()))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(PokedexError::BadResponse {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PokedexError::HttpError(format!("error reading response: {}", e)))?;

        debug!(url, status = status.as_u16(), bytes = body.len(), "Fetched from PokeAPI");
        Ok(body)
    }
}

/// Names are interpolated into URL paths, so only PokeAPI's own alphabet is allowed.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PokedexError::ValidationError("name cannot be empty".into()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(PokedexError::ValidationError(format!(
            "'{}' is not a valid name (use lowercase letters, digits and '-')",
            name
        )));
    }
    Ok(())
}
