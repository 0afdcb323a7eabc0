//! Configuration management for the Spotify remote.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, endpoints and the address of
//! the local callback server.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (endpoints, scope and server address only)

use std::{env, path::PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-read-playback-state user-modify-playback-state user-read-currently-playing playlist-read-private playlist-read-collaborative";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up under `spotlink/.env` in the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/spotlink/.env`
/// - macOS: `~/Library/Application Support/spotlink/.env`
/// - Windows: `%LOCALAPPDATA%/spotlink/.env`
///
/// The directory is created when missing. A missing `.env` file is not an
/// error, the values may come from the process environment instead.
///
/// # Errors
///
/// Returns [`ConfigError::Env`] if the directory cannot be created or the
/// file exists but cannot be parsed.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::Env(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| ConfigError::Env(e.to_string()))?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotlink/.env");
    path
}

/// Returns the address for the local OAuth callback server.
///
/// Reads `SERVER_ADDRESS` and falls back to [`DEFAULT_SERVER_ADDRESS`]. The
/// address must match the host and port of the registered redirect URI.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Everything the client needs to talk to Spotify.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    /// Client id of the registered Spotify application.
    pub client_id: String,
    /// Client secret, sent as HTTP Basic credentials to the token endpoint.
    pub client_secret: String,
    /// Must match a redirect URI registered in the Spotify application settings.
    pub redirect_uri: String,
    /// Space separated list of requested scopes.
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    /// Versioned base path of the Web API, without trailing slash.
    pub api_url: String,
}

impl SpotifyConfig {
    /// Builds a configuration with the public Spotify endpoints and the default scope.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// Required:
    /// - `SPOTIFY_API_AUTH_CLIENT_ID`
    /// - `SPOTIFY_API_AUTH_CLIENT_SECRET`
    /// - `SPOTIFY_API_REDIRECT_URI`
    ///
    /// Optional, defaulted:
    /// - `SPOTIFY_API_AUTH_SCOPE`
    /// - `SPOTIFY_API_AUTH_URL`
    /// - `SPOTIFY_API_TOKEN_URL`
    /// - `SPOTIFY_API_URL`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] naming the first required variable
    /// that is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(
            required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            required("SPOTIFY_API_REDIRECT_URI")?,
        );

        if let Ok(scope) = env::var("SPOTIFY_API_AUTH_SCOPE") {
            config.scope = scope;
        }
        if let Ok(url) = env::var("SPOTIFY_API_AUTH_URL") {
            config.auth_url = url;
        }
        if let Ok(url) = env::var("SPOTIFY_API_TOKEN_URL") {
            config.token_url = url;
        }
        if let Ok(url) = env::var("SPOTIFY_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
