//! Domain types for Pokedex.
//!
//! These mirror the subset of PokeAPI v2 responses the client reads:
//!
//! - [`LocationAreasPage`]: One page of the location-area listing
//! - [`LocationArea`]: A single area and the Pokémon encountered there
//! - [`Pokemon`]: Full details for one Pokémon, including its catch chance

mod location;
mod pokemon;

pub use location::*;
pub use pokemon::*;

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference, PokeAPI's standard link shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Resource name (e.g. `"canalave-city-area"`)
    pub name: String,
    /// Absolute URL of the resource
    #[serde(default)]
    pub url: String,
}
