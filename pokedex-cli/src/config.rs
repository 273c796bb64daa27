//! Command-line flags and the runtime configuration built from them.

use std::time::Duration;

use clap::Parser;

use pokedex_api::ClientConfig;
use pokedex_cache::CacheConfig;
use pokedex_core::constants::DEFAULT_CACHE_TTL_SECS;

/// Pokedex - explore the Pokemon world from your terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Seconds a cached API response stays fresh
    #[arg(long, env = "POKEDEX_CACHE_TTL_SECS", default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl_secs: u64,

    /// Seconds between background cache sweeps (defaults to the TTL)
    #[arg(long, env = "POKEDEX_CACHE_SWEEP_SECS")]
    pub cache_sweep_secs: Option<u64>,

    /// Disable the response cache entirely
    #[arg(long)]
    pub no_cache: bool,

    /// PokeAPI root URL (overrides POKEAPI_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// HTTP timeout in seconds (overrides POKEAPI_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Seed for catch rolls, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Everything `main` needs to build a session.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// `None` when caching is disabled
    pub cache: Option<CacheConfig>,
    pub client: ClientConfig,
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Layers CLI flags over `base` (normally [`ClientConfig::from_env`]).
    pub fn from_cli(cli: &Cli, base: ClientConfig) -> Self {
        let cache = (!cli.no_cache).then(|| {
            let config = CacheConfig::from_secs(cli.cache_ttl_secs);
            match cli.cache_sweep_secs {
                Some(secs) => config.with_sweep_interval(Duration::from_secs(secs)),
                None => config,
            }
        });

        let mut client = base;
        if let Some(url) = &cli.base_url {
            client.base_url = url.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            client = client.with_timeout(secs);
        }

        Self {
            cache,
            client,
            seed: cli.seed,
        }
    }
}
