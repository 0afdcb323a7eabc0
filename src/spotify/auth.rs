use crate::{
    error::ClientError,
    management::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStore},
    spotify::{
        SpotifyClient,
        request::{ApiCall, reason},
        wire::{self, TokenResponse, UserObject},
    },
    types::{Credentials, User},
    utils,
};

impl<S: TokenStore> SpotifyClient<S> {
    /// Builds the authorization URL for the authorization code flow.
    ///
    /// A fresh anti-CSRF `state` is generated for every call and remembered
    /// until the code is exchanged, see [`Self::pending_state`]. No network
    /// call is made.
    ///
    /// # Example
    ///
    /// ```
    /// let url = client.authenticate();
    /// webbrowser::open(&url)?;
    /// ```
    pub fn authenticate(&mut self) -> String {
        let state = utils::generate_state();

        let auth_url = format!(
            "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&state={state}&scope={scope}",
            auth_url = self.config.auth_url,
            client_id = urlencoding::encode(&self.config.client_id),
            redirect_uri = urlencoding::encode(&self.config.redirect_uri),
            state = urlencoding::encode(&state),
            scope = urlencoding::encode(&self.config.scope),
        );

        self.pending_state = Some(state);
        auth_url
    }

    /// Exchanges an authorization code for a token pair and fetches the profile.
    ///
    /// The code is sent to the token endpoint with the client credentials as
    /// HTTP Basic auth. On success both tokens are held in memory and written
    /// to the token store, and the profile is cached.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthExchange`] if the token endpoint or the profile
    ///   endpoint answers with a non-success status; carries the service's
    ///   error description
    /// - [`ClientError::TokenPersist`] if the tokens cannot be stored
    /// - [`ClientError::Http`] on transport failures
    pub async fn handle_auth_callback(&mut self, code: &str) -> Result<User, ClientError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = wire::describe_error(&body).unwrap_or_else(|| reason(status));
            return Err(ClientError::AuthExchange(format!("{status}: {detail}")));
        }

        let token: TokenResponse = response.json().await?;
        self.credentials = Credentials {
            access_token: Some(token.access_token),
            refresh_token: token.refresh_token,
        };
        self.pending_state = None;

        let response = self
            .http
            .get(self.endpoint("/me"))
            .bearer_auth(self.credentials.access_token.as_deref().unwrap_or_default())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = wire::describe_error(&body).unwrap_or_else(|| reason(status));
            return Err(ClientError::AuthExchange(format!(
                "profile request failed with {status}: {detail}"
            )));
        }

        let user = User::from(response.json::<UserObject>().await?);
        self.user = Some(user.clone());
        self.persist_credentials().await?;

        Ok(user)
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// The service may rotate the refresh token; when the response carries
    /// none the current one is kept. Both tokens are written to the token
    /// store afterwards.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingRefreshToken`] if no refresh token is held, no
    ///   request is sent in that case
    /// - [`ClientError::RefreshFailed`] with the service's error description
    ///   on a non-success status
    /// - [`ClientError::TokenPersist`] if the new tokens cannot be stored
    pub async fn refresh_access_token(&mut self) -> Result<(), ClientError> {
        let refresh_token = self
            .credentials
            .refresh_token
            .clone()
            .ok_or(ClientError::MissingRefreshToken)?;

        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::RefreshFailed(
                wire::describe_error(&body).unwrap_or_else(|| reason(status)),
            ));
        }

        let token: TokenResponse = response.json().await?;
        self.credentials = Credentials {
            access_token: Some(token.access_token),
            refresh_token: Some(token.refresh_token.unwrap_or(refresh_token)),
        };

        self.persist_credentials().await
    }

    /// Reads the token pair from the token store.
    ///
    /// Missing keys leave the corresponding token unset.
    pub async fn load_tokens(&mut self) -> Result<(), ClientError> {
        let access_token = self
            .store
            .get(ACCESS_TOKEN_KEY)
            .await
            .map_err(ClientError::TokenLoad)?;
        let refresh_token = self
            .store
            .get(REFRESH_TOKEN_KEY)
            .await
            .map_err(ClientError::TokenLoad)?;

        self.credentials = Credentials {
            access_token,
            refresh_token,
        };
        Ok(())
    }

    /// Forgets the token pair and the cached profile.
    ///
    /// The token store is left untouched, a later [`Self::load_tokens`]
    /// restores the session.
    pub fn logout(&mut self) {
        self.credentials = Credentials::default();
        self.user = None;
        self.pending_state = None;
    }

    /// Fetches the profile of the authenticated user and caches it.
    pub async fn get_current_user(&mut self) -> Result<User, ClientError> {
        let call = ApiCall::get(self.endpoint("/me"));
        let raw: Option<UserObject> = self.fetch(&call).await?;
        let raw = raw.ok_or_else(|| ClientError::ApiRequest {
            status: 204,
            message: "empty profile response".to_string(),
        })?;

        let user = User::from(raw);
        self.user = Some(user.clone());
        Ok(user)
    }

    async fn persist_credentials(&self) -> Result<(), ClientError> {
        if let Some(access_token) = &self.credentials.access_token {
            self.store
                .set(ACCESS_TOKEN_KEY, access_token)
                .await
                .map_err(ClientError::TokenPersist)?;
        }
        if let Some(refresh_token) = &self.credentials.refresh_token {
            self.store
                .set(REFRESH_TOKEN_KEY, refresh_token)
                .await
                .map_err(ClientError::TokenPersist)?;
        }
        Ok(())
    }
}
