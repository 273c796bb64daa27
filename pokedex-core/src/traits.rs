//! Common traits for Pokedex.
//!
//! These traits define the seams between crates so the fetch layer can be
//! exercised against any cache implementation.

use bytes::Bytes;

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSE CACHE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for a response cache keyed by request URL.
///
/// Implementations are content-agnostic: the value is the raw response body
/// and is returned untouched. Neither operation can fail; a miss is the
/// normal `None` result.
pub trait ResponseCache: Send + Sync {
    /// Inserts or replaces the payload stored under `key`.
    fn add(&self, key: &str, value: Bytes);

    /// Returns the payload stored under `key`, if it is still live.
    fn get(&self, key: &str) -> Option<Bytes>;
}
