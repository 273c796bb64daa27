//! Error types for Pokedex.
//!
//! This module provides the error hierarchy using `thiserror`.
//! The response cache itself never fails; everything here belongs to the
//! fetch layer and the command surface around it.

use thiserror::Error;

/// Result type alias using `PokedexError`.
pub type Result<T> = std::result::Result<T, PokedexError>;

/// Main error type for all Pokedex operations.
#[derive(Debug, Error)]
pub enum PokedexError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The server answered with a status of 400 or above.
    #[error("bad response: {status}")]
    BadResponse {
        /// HTTP status code
        status: u16,
        /// URL that was requested
        url: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A freshly fetched body was not the expected JSON.
    #[error("error parsing JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A body served from the cache was not the expected JSON.
    #[error("error parsing cached JSON: {0}")]
    CachedJsonError(#[source] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // COMMAND ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A command was invoked without its required argument.
    #[error("{command} requires a {argument}")]
    MissingArgument {
        /// Command name as typed
        command: String,
        /// Human description of the missing argument
        argument: String,
    },

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PokedexError {
    /// Shorthand for [`PokedexError::MissingArgument`].
    pub fn missing_argument(command: impl Into<String>, argument: impl Into<String>) -> Self {
        PokedexError::MissingArgument {
            command: command.into(),
            argument: argument.into(),
        }
    }

    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        match self {
            PokedexError::HttpError(_) => true,
            PokedexError::BadResponse { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if the user can fix this by changing their input.
    pub fn is_user_error(&self) -> bool {
        match self {
            PokedexError::MissingArgument { .. } | PokedexError::ValidationError(_) => true,
            PokedexError::BadResponse { status, .. } => *status == 404,
            _ => false,
        }
    }
}
