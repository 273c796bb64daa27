//! Pokémon detail types and catch-rate arithmetic.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_CATCH_CHANCE, EXPERIENCE_PER_CHANCE_POINT, MAX_CATCH_CHANCE, MIN_CATCH_CHANCE,
};

/// `GET /pokemon/{name}/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// National dex number
    pub id: u32,
    /// Pokémon name
    pub name: String,
    /// Experience gained for defeating it; `null` for some forms
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    /// Base stats
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Elemental types
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

impl Pokemon {
    /// Percentage chance (1..=100) that a single throw catches this Pokémon.
    pub fn catch_chance(&self) -> u32 {
        catch_chance(self.base_experience.unwrap_or(0))
    }
}

/// Catch chance for a given base experience.
///
/// Zero experience gets the flat base chance. Otherwise the chance starts at
/// [`MAX_CATCH_CHANCE`] and drops one point per
/// [`EXPERIENCE_PER_CHANCE_POINT`] experience, never below [`MIN_CATCH_CHANCE`].
pub fn catch_chance(base_experience: u32) -> u32 {
    if base_experience == 0 {
        return BASE_CATCH_CHANCE;
    }
    MAX_CATCH_CHANCE
        .saturating_sub(base_experience / EXPERIENCE_PER_CHANCE_POINT)
        .max(MIN_CATCH_CHANCE)
}

/// A single base stat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    /// Base value
    pub base_stat: u32,
    /// Which stat this is
    pub stat: StatName,
}

/// Name wrapper for stats and types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatName {
    /// e.g. `"hp"`, `"attack"`, `"electric"`
    pub name: String,
}

/// A type slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    /// The type
    #[serde(rename = "type")]
    pub kind: StatName,
}
