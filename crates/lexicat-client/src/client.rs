//! HTTP plumbing and the auth endpoints.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use lexicat_session::{CurrentUser, SessionSnapshot};

use crate::error::{check, ApiError};

/// What the auth endpoints return: a fresh access token and the user it
/// belongs to. The refresh token itself travels in an HTTP-only cookie and
/// never appears here.
#[derive(Debug, Clone, Deserialize)]
struct AuthResponse {
    access_token: String,
    user: CurrentUser,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the catalog backend.
///
/// Holds the access token and the signed-in user between calls. On a `401`
/// the failing request is retried exactly once after a token refresh;
/// timeout and retry policy beyond that lives in the backend contract, not
/// here.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    access_token: RwLock<Option<String>>,
    current_user: RwLock<Option<CurrentUser>>,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .cookie_store(true)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url,
            access_token: RwLock::new(None),
            current_user: RwLock::new(None),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|_| ApiError::InvalidUrl(path.to_string()))
    }

    fn token(&self) -> Option<String> {
        self.access_token.read().ok().and_then(|t| t.clone())
    }

    fn store_auth(&self, auth: Option<AuthResponse>) {
        let (token, user) = match auth {
            Some(auth) => (Some(auth.access_token), Some(auth.user)),
            None => (None, None),
        };
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
        if let Ok(mut guard) = self.current_user.write() {
            *guard = user;
        }
    }

    /// The cached signed-in user, if any.
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.current_user.read().ok().and_then(|u| u.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Snapshot of the auth state, suitable for injecting into an edit
    /// session.
    pub fn session(&self) -> SessionSnapshot {
        match self.current_user() {
            Some(user) => SessionSnapshot::signed_in(user),
            None => SessionSnapshot::anonymous(),
        }
    }

    async fn send<F>(&self, build: &F) -> Result<Response, reqwest::Error>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut request = build(&self.http);
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        request.send().await
    }

    /// Send a request, refreshing the access token and retrying once on a
    /// `401`. The builder closure is invoked per attempt so the retry gets
    /// a fresh request.
    pub(crate) async fn execute<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let response = self.send(&build).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("access token rejected, refreshing and retrying once");
            self.refresh().await?;
            let retried = self.send(&build).await?;
            return check(retried).await;
        }
        check(response).await
    }

    /// Exchange the refresh-token cookie for a new access token. Does not
    /// go through [`execute`](Self::execute) — a refresh never retries.
    async fn refresh(&self) -> Result<(), ApiError> {
        let url = self.endpoint("auth/refresh")?;
        let response = self.http.get(url).send().await?;
        let auth: AuthResponse = check(response).await?.json().await?;
        self.store_auth(Some(auth));
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, ApiError> {
        let url = self.endpoint("auth/login")?;
        tracing::debug!(email, "logging in");
        let response = self
            .http
            .post(url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let auth: AuthResponse = check(response).await?.json().await?;
        let user = auth.user.clone();
        self.store_auth(Some(auth));
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint("auth/logout")?;
        let result = self.execute(|http| http.post(url.clone())).await;
        // Local credentials are dropped whether or not the server call
        // succeeded.
        self.store_auth(None);
        result.map(|_| ())
    }

    /// Restore a session from the refresh-token cookie, e.g. on startup.
    pub async fn check_auth(&self) -> Result<CurrentUser, ApiError> {
        self.refresh().await?;
        self.current_user().ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicat_session::Session;

    fn client() -> ApiClient {
        ApiClient::new(Url::parse("https://catalog.example.org/").unwrap())
    }

    #[test]
    fn endpoints_join_against_the_base_url() {
        let url = client().endpoint("api/articles/5/").unwrap();
        assert_eq!(url.as_str(), "https://catalog.example.org/api/articles/5/");
    }

    #[test]
    fn fresh_client_is_anonymous() {
        let client = client();
        assert!(!client.is_authenticated());
        assert!(client.session().current_user().is_none());
    }

    #[test]
    fn stored_auth_feeds_the_session_snapshot() {
        let client = client();
        client.store_auth(Some(AuthResponse {
            access_token: "tok".to_string(),
            user: CurrentUser {
                id: 42,
                email: "owner@example.org".to_string(),
            },
        }));
        assert!(client.is_authenticated());
        assert_eq!(client.session().current_user().unwrap().id, 42);

        client.store_auth(None);
        assert!(!client.is_authenticated());
    }
}
