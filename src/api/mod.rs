//! # API Module
//!
//! HTTP endpoints of the local server that receives the OAuth redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization server.
//!   It checks the `state` parameter against the pending authorization and
//!   hands the authorization `code` to the waiting `auth` command. The code
//!   exchange itself is done by [`crate::spotify::SpotifyClient`].
//! - [`health`] - Returns application name, status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotlink::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
