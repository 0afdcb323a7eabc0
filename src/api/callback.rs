use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{server::SharedAuthorization, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<SharedAuthorization>,
) -> Html<&'static str> {
    if let Some(error) = params.get("error") {
        warning!("Authorization was denied: {}", error);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(pending) = state.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if params.get("state") != Some(&pending.state) {
        warning!("Ignoring callback with mismatching state");
        return Html("<h4>State mismatch, login aborted.</h4>");
    }

    pending.code = Some(code.clone());
    Html("<h2>Authorization received.</h2><p>Close browser window.</p>")
}
