//! Error types for the feeds API client and its configuration.
//!
//! # Design
//! Non-2xx responses collapse into a single `Network` variant with a fixed
//! message; the status code and body are not retained. Transport and decoder
//! failures are carried through untouched (`#[error(transparent)]`) so callers
//! see exactly what ureq or serde_json reported.

/// Fixed message of [`ApiError::Network`].
pub const NETWORK_ERROR_MESSAGE: &str = "Network response was not ok";

/// Errors returned by `FeedsClient` parsers and by `Api` calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a status outside 200-299.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network,

    /// No response was obtained (DNS, refused connection, broken stream...).
    #[error(transparent)]
    Transport(#[from] ureq::Error),

    /// A 2xx response body was not valid JSON for the expected shape.
    #[error(transparent)]
    Decode(serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("request payload could not be serialized: {0}")]
    Encode(serde_json::Error),
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A `.env` file exists but could not be read or parsed.
    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}
