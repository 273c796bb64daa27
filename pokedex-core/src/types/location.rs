//! Location-area types.
//!
//! The listing endpoint is paginated: each page carries absolute `next` and
//! `previous` URLs which the client follows verbatim.

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// One page of `GET /location-area/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAreasPage {
    /// Total number of location areas
    pub count: u32,
    /// URL of the next page, if any
    pub next: Option<String>,
    /// URL of the previous page, if any
    pub previous: Option<String>,
    /// Location areas on this page
    pub results: Vec<NamedResource>,
}

impl LocationAreasPage {
    /// Names of the areas on this page, in API order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.name.as_str())
    }
}

/// `GET /location-area/{name}/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArea {
    /// Numeric identifier
    pub id: u32,
    /// Area name
    pub name: String,
    /// Pokémon that can be encountered here
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Names of the Pokémon encountered in this area.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters.iter().map(|e| e.pokemon.name.as_str())
    }
}

/// A single encounter entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    /// The Pokémon that can be met
    pub pokemon: NamedResource,
}
