//! # CLI Module
//!
//! Command implementations of the `spotlink` binary. Each command builds a
//! [`SpotifyClient`] backed by the file token store, runs one client
//! operation and renders the outcome.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the authorization code flow through the local callback server
//! - [`now_playing`], [`playlists`], [`search`], [`recommend`] - Read the user's library
//! - [`devices`], [`status`] - Inspect available devices and the playback state
//! - [`play`], [`pause`], [`toggle`], [`next`], [`previous`], [`seek`] - Control playback
//!
//! ## Error Handling
//!
//! Client errors are reported with the `error!` macro, which terminates the
//! process with exit code 1. A missing login points the user at `spotlink auth`.

mod auth;
mod library;
mod player;

pub use auth::auth;
pub use library::now_playing;
pub use library::playlists;
pub use library::recommend;
pub use library::search;
pub use player::devices;
pub use player::next;
pub use player::pause;
pub use player::play;
pub use player::previous;
pub use player::seek;
pub use player::status;
pub use player::toggle;

use crate::{
    config::SpotifyConfig, error, error::ClientError, management::FileTokenStore,
    spotify::SpotifyClient,
};

/// Builds a client with the tokens of the last login.
async fn connect() -> SpotifyClient<FileTokenStore> {
    let config = match SpotifyConfig::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    let client = match SpotifyClient::connect(config, FileTokenStore::default()).await {
        Ok(client) => client,
        Err(e) => error!("Failed to load token. Err: {}", e),
    };

    if !client.is_authenticated() {
        error!("Not logged in. Please run spotlink auth");
    }
    client
}

fn report(e: ClientError) -> ! {
    match e {
        ClientError::RefreshFailed(_) | ClientError::MissingRefreshToken => {
            error!("Session expired. Please run spotlink auth\n Error: {}", e)
        }
        e => error!("{}", e),
    }
}
