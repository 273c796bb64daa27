//! # Pokedex Core
//!
//! Core types, errors, and traits shared by the Pokedex crates.
//!
//! This crate provides the foundational building blocks used by all other Pokedex crates:
//!
//! - **Types**: PokeAPI response models for location areas and Pokémon
//! - **Errors**: A single error enum with classification helpers
//! - **Constants**: API endpoints, cache defaults and catch-rate tuning
//! - **Traits**: The [`ResponseCache`] seam between the fetch layer and the cache
//!
//! ## Example
//!
//! ```rust
//! use pokedex_core::LocationAreasPage;
//!
//! let page: LocationAreasPage = serde_json::from_str(
//!     r#"{"count":0,"next":null,"previous":null,"results":[]}"#,
//! ).unwrap();
//! assert!(page.results.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PokedexError, Result};
pub use traits::*;
pub use types::*;
