use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    config::{self, SpotifyConfig},
    error, info,
    management::FileTokenStore,
    server::{SharedAuthorization, start_api_server},
    spotify::SpotifyClient,
    success,
    types::PendingAuthorization,
    warning,
};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the authorization code flow.
///
/// 1. Builds the authorization URL, which carries a fresh `state`
/// 2. Starts the local callback server
/// 3. Opens the URL in the default browser
/// 4. Waits for the callback to deliver the authorization code
/// 5. Exchanges the code, stores the tokens and greets the user
pub async fn auth() {
    let config = match SpotifyConfig::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    let mut client = SpotifyClient::new(config, FileTokenStore::default());
    // start from a clean session, stored tokens are overwritten on success
    client.logout();

    let auth_url = client.authenticate();
    let Some(state) = client.pending_state().map(str::to_string) else {
        error!("Failed to prepare authorization request");
    };

    let shared_state: SharedAuthorization = Arc::new(Mutex::new(Some(PendingAuthorization {
        state,
        code: None,
    })));

    let server_state = Arc::clone(&shared_state);
    let addr = config::server_addr();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(&addr, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    info!("Waiting for the authorization callback...");
    let Some(code) = wait_for_code(shared_state).await else {
        error!("Authentication failed or timed out.");
    };

    match client.handle_auth_callback(&code).await {
        Ok(user) => success!(
            "Authenticated as {}",
            user.display_name.as_deref().unwrap_or(&user.id)
        ),
        Err(e) => error!("Authentication failed: {}", e),
    }
}

/// Polls the shared state until the callback stored a code or the timeout hits.
async fn wait_for_code(shared_state: SharedAuthorization) -> Option<String> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(code) = lock.as_ref().and_then(|p| p.code.clone()) {
            return Some(code);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
