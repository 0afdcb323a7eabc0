//! # Spotify Integration Module
//!
//! This module provides the client for the Spotify Web API. [`SpotifyClient`]
//! owns the OAuth token pair, sends authenticated requests and maps raw
//! responses into the entities of [`crate::types`].
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!     ↓
//! SpotifyClient
//!     ├── Authentication (authorization code flow, refresh, token store)
//!     ├── Request protocol (bearer auth, refresh-and-retry once on 401)
//!     ├── Tracks (currently playing, search, recommendations)
//!     ├── Playlists (paginated listing)
//!     └── Player (devices, playback state, playback control)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Token lifecycle
//!
//! The client keeps no expiry timestamp. An access token is used until the
//! service answers 401, then the refresh token is exchanged for a new access
//! token, both tokens are written to the [`TokenStore`] and the request is
//! sent again exactly once. A second 401 is returned to the caller.
//!
//! ## Usage
//!
//! ```rust
//! let config = SpotifyConfig::from_env()?;
//! let mut client = SpotifyClient::connect(config, FileTokenStore::default()).await?;
//!
//! for playlist in client.get_user_playlists().await? {
//!     println!("{} ({} tracks)", playlist.name, playlist.tracks.total);
//! }
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - code exchange and token refresh
//! - `GET /me` - user profile
//! - `GET /me/player/currently-playing` - currently playing track
//! - `GET /me/playlists` - user's playlists, paginated
//! - `GET /search` - track search
//! - `GET /recommendations` - recommendations for seed tracks
//! - `GET /me/player/devices`, `GET /me/player` - devices and playback state
//! - `PUT /me/player/play|pause|seek`, `POST /me/player/next|previous` - playback control

pub mod auth;
pub mod player;
pub mod playlists;
mod request;
pub mod tracks;
mod wire;

use reqwest::Client;

use crate::{
    config::SpotifyConfig,
    error::ClientError,
    management::TokenStore,
    types::{Credentials, User},
};

/// Number of tracks returned by a search.
pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Number of tracks returned by a recommendation request.
pub const RECOMMENDATION_LIMIT: u32 = 20;

/// Upper bound on seed tracks the service accepts for recommendations.
pub const MAX_SEED_TRACKS: usize = 5;

/// Page size used when listing playlists.
pub const PLAYLIST_PAGE_LIMIT: u32 = 50;

/// Client for the Spotify Web API.
///
/// Methods that may replace the token pair take `&mut self`.
pub struct SpotifyClient<S: TokenStore> {
    http: Client,
    config: SpotifyConfig,
    store: S,
    credentials: Credentials,
    user: Option<User>,
    pending_state: Option<String>,
}

impl<S: TokenStore> SpotifyClient<S> {
    /// Creates a client without credentials. Call [`Self::load_tokens`] or
    /// complete the authorization flow before issuing requests.
    pub fn new(config: SpotifyConfig, store: S) -> Self {
        Self {
            http: Client::new(),
            config,
            store,
            credentials: Credentials::default(),
            user: None,
            pending_state: None,
        }
    }

    /// Creates a client and loads the stored token pair.
    pub async fn connect(config: SpotifyConfig, store: S) -> Result<Self, ClientError> {
        let mut client = Self::new(config, store);
        client.load_tokens().await?;
        Ok(client)
    }

    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.access_token.is_some()
    }

    /// Profile cached by the last successful authorization or profile fetch.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// `state` value of the last authorization URL, until the code is exchanged.
    pub fn pending_state(&self) -> Option<&str> {
        self.pending_state.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }
}
