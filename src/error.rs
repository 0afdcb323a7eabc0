//! Error types for the Spotify client, the token store and configuration.
//!
//! Every fallible operation of [`crate::spotify::SpotifyClient`] returns a
//! [`ClientError`]. Precondition violations (`InvalidQuery`, `InvalidSeed`,
//! `InvalidPosition`) are raised before any request is sent, so callers can
//! rely on them never touching the network.

use thiserror::Error;

use crate::spotify::MAX_SEED_TRACKS;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not authenticated, run `spotlink auth` first")]
    NotAuthenticated,

    #[error("authorization code exchange failed: {0}")]
    AuthExchange(String),

    #[error("no refresh token available")]
    MissingRefreshToken,

    #[error("token refresh rejected: {0}")]
    RefreshFailed(String),

    #[error("failed to load tokens from storage: {0}")]
    TokenLoad(#[source] StoreError),

    #[error("failed to persist tokens to storage: {0}")]
    TokenPersist(#[source] StoreError),

    #[error("request failed with status {status}: {message}")]
    ApiRequest { status: u16, message: String },

    #[error("search query must not be empty")]
    InvalidQuery,

    #[error("expected between 1 and {max} seed tracks, got {count}", max = MAX_SEED_TRACKS)]
    InvalidSeed { count: usize },

    #[error("seek position must not be negative, got {0}")]
    InvalidPosition(i64),

    #[error("no active device found")]
    NoActiveDevice,

    #[error("nothing is loaded for playback")]
    NoActivePlayback,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status reported by the service, if the error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ApiRequest { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("cannot load environment file: {0}")]
    Env(String),
}
