mod common;

use std::{collections::HashMap, sync::Arc};

use axum::{
    Form, Json, Router,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::json;
use spotlink::{
    error::{ClientError, StoreError},
    management::{ACCESS_TOKEN_KEY, MemoryTokenStore, REFRESH_TOKEN_KEY, TokenStore},
    spotify::SpotifyClient,
    types::{Album, Artist, Credentials, Image, Track},
};
use tokio::sync::Mutex;

use common::{Counter, api_error, bearer, client_with_tokens, config, start, track_json};

fn basic_auth_header() -> String {
    format!("Basic {}", STANDARD.encode("client-id:client-secret"))
}

/// Token endpoint that hands out `new_access_token` for any refresh request.
fn token_route(hits: Counter) -> axum::routing::MethodRouter {
    post(
        move |headers: HeaderMap, Form(form): Form<HashMap<String, String>>| async move {
            hits.hit();
            assert_eq!(
                headers.get("authorization").and_then(|v| v.to_str().ok()),
                Some(basic_auth_header().as_str())
            );
            assert_eq!(form.get("grant_type").map(String::as_str), Some("refresh_token"));
            assert_eq!(form.get("refresh_token").map(String::as_str), Some("r1"));
            Json(json!({
                "access_token": "new_access_token",
                "token_type": "Bearer",
                "expires_in": 3600
            }))
        },
    )
}

struct FailingStore;

impl TokenStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Io(std::io::Error::other("keychain locked")))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("keychain locked")))
    }
}

#[tokio::test]
async fn test_load_tokens_round_trip() {
    let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let router = Router::new().route(
        "/v1/me/player/devices",
        get({
            let seen = Arc::clone(&seen);
            move |headers: HeaderMap| async move {
                *seen.lock().await = bearer(&headers);
                Json(json!({"devices": []}))
            }
        }),
    );
    let base = start(router).await;

    let mut client = client_with_tokens(&base, "stored-access", "stored-refresh").await;
    assert_eq!(
        client.credentials(),
        &Credentials::new("stored-access", "stored-refresh")
    );

    client.get_devices().await.unwrap();
    assert_eq!(seen.lock().await.as_deref(), Some("stored-access"));
}

#[tokio::test]
async fn test_load_tokens_missing_keys_is_not_an_error() {
    let base = start(Router::new()).await;
    let mut client = SpotifyClient::connect(config(&base), MemoryTokenStore::new())
        .await
        .unwrap();

    assert_eq!(client.credentials(), &Credentials::default());
    assert!(matches!(
        client.get_currently_playing().await,
        Err(ClientError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_load_tokens_storage_failure() {
    let base = start(Router::new()).await;
    let mut client = SpotifyClient::new(config(&base), FailingStore);

    assert!(matches!(
        client.load_tokens().await,
        Err(ClientError::TokenLoad(_))
    ));
}

#[tokio::test]
async fn test_refresh_without_refresh_token_sends_nothing() {
    let token_hits = Counter::default();
    let router = Router::new().route("/api/token", token_route(token_hits.clone()));
    let base = start(router).await;

    let store = MemoryTokenStore::new();
    store.set(ACCESS_TOKEN_KEY, "old").await.unwrap();
    let mut client = SpotifyClient::connect(config(&base), store).await.unwrap();

    assert!(matches!(
        client.refresh_access_token().await,
        Err(ClientError::MissingRefreshToken)
    ));
    assert_eq!(token_hits.get(), 0);
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_retried_once() {
    let token_hits = Counter::default();
    let playing_hits = Counter::default();
    let router = Router::new()
        .route("/api/token", token_route(token_hits.clone()))
        .route(
            "/v1/me/player/currently-playing",
            get({
                let playing_hits = playing_hits.clone();
                move |headers: HeaderMap| async move {
                    playing_hits.hit();
                    match bearer(&headers).as_deref() {
                        Some("new_access_token") => Json(json!({
                            "is_playing": true,
                            "progress_ms": 1000,
                            "item": track_json("t1", "Song")
                        }))
                        .into_response(),
                        _ => (
                            StatusCode::UNAUTHORIZED,
                            Json(api_error(401, "The access token expired")),
                        )
                            .into_response(),
                    }
                }
            }),
        );
    let base = start(router).await;

    let store = MemoryTokenStore::with_tokens("old", "r1");
    let mut client = SpotifyClient::connect(config(&base), store.clone())
        .await
        .unwrap();

    let track = client.get_currently_playing().await.unwrap();

    assert_eq!(
        track,
        Some(Track {
            id: "t1".into(),
            name: "Song".into(),
            artists: vec![Artist {
                id: "a1".into(),
                name: "Artist".into()
            }],
            album: Album {
                id: "al1".into(),
                name: "Album".into(),
                images: vec![Image {
                    url: "https://i.scdn.co/image/al1".into(),
                    width: Some(300),
                    height: Some(300)
                }],
                release_date: Some("2021-05-01".into()),
            },
            duration_ms: 200000,
            preview_url: None,
        })
    );
    assert_eq!(token_hits.get(), 1);
    assert_eq!(playing_hits.get(), 2);
    assert_eq!(
        client.credentials(),
        &Credentials::new("new_access_token", "r1")
    );
    assert_eq!(
        store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
        Some("new_access_token")
    );
    assert_eq!(
        store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(),
        Some("r1")
    );
}

#[tokio::test]
async fn test_second_unauthorized_is_not_retried() {
    let token_hits = Counter::default();
    let playlists_hits = Counter::default();
    let router = Router::new()
        .route("/api/token", token_route(token_hits.clone()))
        .route(
            "/v1/me/playlists",
            get({
                let playlists_hits = playlists_hits.clone();
                move || async move {
                    playlists_hits.hit();
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(api_error(401, "Invalid access token")),
                    )
                }
            }),
        );
    let base = start(router).await;

    let mut client = client_with_tokens(&base, "old", "r1").await;
    let err = client.get_user_playlists().await.unwrap_err();

    match err {
        ClientError::ApiRequest { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid access token");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(token_hits.get(), 1);
    assert_eq!(playlists_hits.get(), 2);
}

#[tokio::test]
async fn test_refresh_keeps_rotated_refresh_token() {
    let router = Router::new().route(
        "/api/token",
        post(|| async {
            Json(json!({
                "access_token": "a2",
                "refresh_token": "r2",
                "token_type": "Bearer",
                "expires_in": 3600
            }))
        }),
    );
    let base = start(router).await;

    let store = MemoryTokenStore::with_tokens("a1", "r1");
    let mut client = SpotifyClient::connect(config(&base), store.clone())
        .await
        .unwrap();
    client.refresh_access_token().await.unwrap();

    assert_eq!(client.credentials(), &Credentials::new("a2", "r2"));
    assert_eq!(
        store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(),
        Some("r2")
    );
}

#[tokio::test]
async fn test_refresh_rejected_carries_description() {
    let router = Router::new().route(
        "/api/token",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_grant",
                    "error_description": "Refresh token revoked"
                })),
            )
        }),
    );
    let base = start(router).await;

    let mut client = client_with_tokens(&base, "a1", "r1").await;
    match client.refresh_access_token().await {
        Err(ClientError::RefreshFailed(description)) => {
            assert_eq!(description, "Refresh token revoked")
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(client.credentials(), &Credentials::new("a1", "r1"));
}

#[tokio::test]
async fn test_handle_auth_callback_exchanges_code_and_fetches_profile() {
    let router = Router::new()
        .route(
            "/api/token",
            post(
                |headers: HeaderMap, Form(form): Form<HashMap<String, String>>| async move {
                    assert_eq!(
                        headers.get("authorization").and_then(|v| v.to_str().ok()),
                        Some(basic_auth_header().as_str())
                    );
                    assert_eq!(
                        form.get("grant_type").map(String::as_str),
                        Some("authorization_code")
                    );
                    assert_eq!(form.get("code").map(String::as_str), Some("auth-code"));
                    assert_eq!(
                        form.get("redirect_uri").map(String::as_str),
                        Some("http://127.0.0.1:8888/callback")
                    );
                    Json(json!({
                        "access_token": "a1",
                        "refresh_token": "r1",
                        "token_type": "Bearer",
                        "scope": "user-read-private",
                        "expires_in": 3600
                    }))
                },
            ),
        )
        .route(
            "/v1/me",
            get(|headers: HeaderMap| async move {
                assert_eq!(bearer(&headers).as_deref(), Some("a1"));
                Json(json!({
                    "id": "u1",
                    "display_name": "User One",
                    "email": "user@example.com",
                    "country": "DE",
                    "images": [{"url": "https://i.scdn.co/image/u1", "width": 64, "height": 64}]
                }))
            }),
        );
    let base = start(router).await;

    let store = MemoryTokenStore::new();
    let mut client = SpotifyClient::new(config(&base), store.clone());
    client.authenticate();

    let user = client.handle_auth_callback("auth-code").await.unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.display_name.as_deref(), Some("User One"));
    assert_eq!(user.email.as_deref(), Some("user@example.com"));
    assert_eq!(user.images.len(), 1);
    assert_eq!(client.current_user(), Some(&user));
    assert_eq!(client.credentials(), &Credentials::new("a1", "r1"));
    assert_eq!(client.pending_state(), None);
    assert_eq!(
        store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
        Some("a1")
    );
}

#[tokio::test]
async fn test_handle_auth_callback_rejected_code() {
    let router = Router::new().route(
        "/api/token",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid authorization code"
                })),
            )
        }),
    );
    let base = start(router).await;

    let mut client = SpotifyClient::new(config(&base), MemoryTokenStore::new());
    match client.handle_auth_callback("stale").await {
        Err(ClientError::AuthExchange(detail)) => {
            assert!(detail.contains("Invalid authorization code"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(client.current_user().is_none());
}

#[tokio::test]
async fn test_handle_auth_callback_profile_failure() {
    let router = Router::new()
        .route(
            "/api/token",
            post(|| async { Json(json!({"access_token": "a1", "refresh_token": "r1"})) }),
        )
        .route(
            "/v1/me",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(api_error(403, "User not registered in the Developer Dashboard")),
                )
            }),
        );
    let base = start(router).await;

    let mut client = SpotifyClient::new(config(&base), MemoryTokenStore::new());
    match client.handle_auth_callback("code").await {
        Err(ClientError::AuthExchange(detail)) => {
            assert!(detail.contains("User not registered"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_logout_keeps_stored_tokens() {
    let base = start(Router::new()).await;
    let store = MemoryTokenStore::with_tokens("a1", "r1");
    let mut client = SpotifyClient::connect(config(&base), store.clone())
        .await
        .unwrap();

    client.logout();

    assert_eq!(client.credentials(), &Credentials::default());
    assert!(client.current_user().is_none());
    assert!(matches!(
        client.get_devices().await,
        Err(ClientError::NotAuthenticated)
    ));
    assert_eq!(
        store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
        Some("a1")
    );

    client.load_tokens().await.unwrap();
    assert_eq!(client.credentials(), &Credentials::new("a1", "r1"));
}

#[tokio::test]
async fn test_authenticate_builds_authorization_url() {
    let mut client = SpotifyClient::new(config("http://accounts.test"), MemoryTokenStore::new());

    let url = client.authenticate();
    let state = client.pending_state().unwrap().to_string();

    assert!(url.starts_with("http://accounts.test/authorize?"));
    assert!(url.contains("client_id=client-id"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    assert!(url.contains(&format!("state={state}")));
    assert!(url.contains("scope=user-read-private%20user-read-email"));

    client.authenticate();
    assert_ne!(client.pending_state().unwrap(), state);
}
