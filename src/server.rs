use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, types::PendingAuthorization};

/// Shared between the `auth` command and the `/callback` handler.
pub type SharedAuthorization = Arc<Mutex<Option<PendingAuthorization>>>;

pub fn router(state: SharedAuthorization) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Serves the callback endpoints on `addr` until the process exits.
pub async fn start_api_server(addr: &str, state: SharedAuthorization) -> std::io::Result<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await
}
