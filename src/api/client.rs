use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::{ApiError, Result};
use crate::config::DashboardConfig;
use crate::router::{Navigator, Route};
use crate::session::SessionStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP wrapper for the admin API.
///
/// Every request carries the stored bearer token when there is one. A 401
/// from any endpoint clears the stored credentials and sends the shell to
/// the login route.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: DashboardConfig,
    session: SessionStore,
    navigator: Navigator,
}

impl ApiClient {
    pub fn new(config: &DashboardConfig, session: SessionStore, navigator: Navigator) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
            session,
            navigator,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn url(&self, endpoint: &str) -> String {
        self.config.api_url(endpoint)
    }

    /// A request without the stored token.
    pub(crate) fn bare_request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.http.request(method, self.url(endpoint))
    }

    pub(crate) fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let builder = self.bare_request(method, endpoint);
        match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request made with the stored session and returns the body of
    /// a successful response. A 401 invalidates that session.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<String> {
        self.dispatch(builder, true).await
    }

    /// Sends a sign-in request. A 401 rejects the credentials presented and
    /// leaves the stored session alone.
    pub(crate) async fn send_credentials(&self, builder: RequestBuilder) -> Result<String> {
        self.dispatch(builder, false).await
    }

    async fn dispatch(&self, builder: RequestBuilder, uses_session: bool) -> Result<String> {
        let resp = builder.send().await?;
        let status = resp.status();
        let url = resp.url().path().to_string();

        if status == StatusCode::UNAUTHORIZED {
            if !uses_session {
                let body = resp.text().await.unwrap_or_default();
                warn!(%url, "credentials rejected");
                return Err(ApiError::Rejected(error_message(&body)));
            }
            warn!(%url, "request rejected as unauthenticated, clearing session");
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        debug!(%url, status = status.as_u16(), "api response");
        Ok(resp.text().await?)
    }

    fn handle_unauthorized(&self) {
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "failed to clear session after 401");
        }
        if self.navigator.current() != Route::Login {
            self.navigator.navigate(Route::Login);
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let body = self.send(self.request(Method::GET, endpoint)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, endpoint: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(self.request(method, endpoint).json(payload))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Form-encoded sign-in post; see [`ApiClient::send_credentials`].
    pub(crate) async fn post_credentials<B, T>(&self, endpoint: &str, form: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send_credentials(self.bare_request(Method::POST, endpoint).form(form))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Pulls `detail` out of a JSON error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
