use reqwest::{Method, RequestBuilder, Response, StatusCode, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::ClientError,
    info,
    management::TokenStore,
    spotify::{SpotifyClient, wire},
};

/// How many times a request is re-sent after refreshing an expired token.
pub(crate) const MAX_AUTH_RETRIES: u32 = 1;

/// A request against the Web API that can be sent more than once.
#[derive(Debug, Clone)]
pub(crate) struct ApiCall {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiCall {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl<S: TokenStore> SpotifyClient<S> {
    /// Sends `call` with the current access token.
    ///
    /// On 401 the token is refreshed and the call is sent again, at most
    /// [`MAX_AUTH_RETRIES`] times. Returns `None` for 204 and for successful
    /// responses without a JSON body.
    pub(crate) async fn send(&mut self, call: &ApiCall) -> Result<Option<Value>, ClientError> {
        let mut retries = 0;

        loop {
            let token = self
                .credentials
                .access_token
                .clone()
                .ok_or(ClientError::NotAuthenticated)?;

            let response = self.build(call).bearer_auth(token).send().await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED && retries < MAX_AUTH_RETRIES {
                retries += 1;
                info!("Access token expired, refreshing...");
                self.refresh_access_token().await?;
                continue;
            }

            if status == StatusCode::NO_CONTENT {
                return Ok(None);
            }

            if !status.is_success() {
                return Err(api_error(response).await);
            }

            return read_json(response).await;
        }
    }

    /// Like [`Self::send`], deserializing the body into `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &mut self,
        call: &ApiCall,
    ) -> Result<Option<T>, ClientError> {
        match self.send(call).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn build(&self, call: &ApiCall) -> RequestBuilder {
        let mut request = self.http.request(call.method.clone(), &call.url);
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        match &call.body {
            Some(body) => request.json(body),
            None => request,
        }
    }
}

async fn read_json(response: Response) -> Result<Option<Value>, ClientError> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    if !is_json {
        return Ok(None);
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(&bytes)?))
}

pub(crate) async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ClientError::ApiRequest {
        status: status.as_u16(),
        message: wire::describe_error(&body).unwrap_or_else(|| reason(status)),
    }
}

pub(crate) fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}
