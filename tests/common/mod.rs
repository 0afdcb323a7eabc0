#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Router, http::HeaderMap};
use serde_json::{Value, json};
use spotlink::{config::SpotifyConfig, management::MemoryTokenStore, spotify::SpotifyClient};
use tokio::net::TcpListener;

/// Counts requests that reached a mock handler.
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Binds a listener on a free port and returns it with its base url.
pub async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

pub fn serve(listener: TcpListener, router: Router) {
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
}

/// Binds, serves `router` and returns the base url.
pub async fn start(router: Router) -> String {
    let (listener, base) = bind().await;
    serve(listener, router);
    base
}

pub fn config(base: &str) -> SpotifyConfig {
    let mut config = SpotifyConfig::new(
        "client-id",
        "client-secret",
        "http://127.0.0.1:8888/callback",
    );
    config.auth_url = format!("{base}/authorize");
    config.token_url = format!("{base}/api/token");
    config.api_url = format!("{base}/v1");
    config
}

pub async fn client_with_tokens(
    base: &str,
    access_token: &str,
    refresh_token: &str,
) -> SpotifyClient<MemoryTokenStore> {
    let store = MemoryTokenStore::with_tokens(access_token, refresh_token);
    SpotifyClient::connect(config(base), store).await.unwrap()
}

pub fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

pub fn track_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": [{"id": "a1", "name": "Artist"}],
        "album": {
            "id": "al1",
            "name": "Album",
            "images": [{"url": "https://i.scdn.co/image/al1", "width": 300, "height": 300}],
            "release_date": "2021-05-01"
        },
        "duration_ms": 200000,
        "preview_url": null
    })
}

pub fn playlist_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Playlist {id}"),
        "description": "",
        "images": [],
        "tracks": {"href": format!("https://api.spotify.com/v1/playlists/{id}/tracks"), "total": 3},
        "owner": {"id": "u1", "display_name": "User"}
    })
}

pub fn api_error(status: u16, message: &str) -> Value {
    json!({"error": {"status": status, "message": message}})
}
