//! Constants for the Pokedex client.
//!
//! Endpoint paths follow PokeAPI v2. Catch-rate numbers are percentages.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// POKEAPI ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default PokeAPI base URL (no trailing slash).
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Path segment for location areas.
pub const LOCATION_AREA_PATH: &str = "location-area";

/// Path segment for Pokémon.
pub const POKEMON_PATH: &str = "pokemon";

/// Default HTTP timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default response cache TTL in seconds (5 minutes).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Default response cache TTL.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(DEFAULT_CACHE_TTL_SECS);

// ═══════════════════════════════════════════════════════════════════════════════
// CATCH TUNING
// ═══════════════════════════════════════════════════════════════════════════════

/// Catch chance when the Pokémon reports no base experience.
pub const BASE_CATCH_CHANCE: u32 = 50;

/// Starting catch chance before the base-experience penalty.
pub const MAX_CATCH_CHANCE: u32 = 70;

/// Floor for the catch chance, however experienced the Pokémon.
pub const MIN_CATCH_CHANCE: u32 = 10;

/// One percentage point of catch chance is lost per this much base experience.
pub const EXPERIENCE_PER_CHANCE_POINT: u32 = 5;
