//! HTTP client for the CurateIt curation API.

use reqwest::Client;
use reqwest::header::HeaderValue;
use tracing::{debug, error};

use crate::error::{ApiError, ApiResult};
use crate::types::{AuthResponse, AuthSession, Collection, GemPayload, NewGem, SearchResults};

/// Client for the bearer-authenticated CurateIt REST API.
///
/// Holds a shared [`reqwest::Client`] and the API base URL. Tokens are
/// passed per call — the client itself is credential-free, so one instance
/// serves every chat.
pub struct CurateItClient {
    http: Client,
    base_url: String,
}

impl CurateItClient {
    /// Create a client for the given API base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// The underlying HTTP client, shared with Open Graph fetching.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Authenticate with email + password.
    ///
    /// `POST /api/auth/local`. HTTP 400 means the backend rejected the
    /// credentials; any other failure is a transport or server error.
    pub async fn login(&self, identifier: &str, password: &str) -> ApiResult<AuthSession> {
        let url = format!("{}/api/auth/local", self.base_url);
        debug!(identifier, "attempting login");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "identifier": identifier,
                "password": password,
            }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(ApiError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "login failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        Ok(AuthSession {
            jwt: auth.jwt,
            user_id: auth.user.id,
            username: auth.user.username,
        })
    }

    /// Fetch the id of the user's first collection, if any.
    ///
    /// `GET /api/get-user-collections`. Collection selection is implicit:
    /// the backend's first entry is treated as the default target.
    pub async fn first_collection_id(&self, token: &str) -> ApiResult<Option<i64>> {
        let url = format!("{}/api/get-user-collections", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", bearer(token)?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let collections: Vec<Collection> = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        Ok(collections.first().map(|c| c.id))
    }

    /// Create a gem from a captured link.
    ///
    /// `POST /api/gems?populate=tags` with the nested `data` payload the
    /// backend expects.
    pub async fn create_gem(&self, token: &str, gem: &NewGem) -> ApiResult<()> {
        let url = format!("{}/api/gems?populate=tags", self.base_url);
        debug!(link = %gem.url, "creating gem");

        let response = self
            .http
            .post(&url)
            .header("Authorization", bearer(token)?)
            .json(&GemPayload::from(gem))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, link = %gem.url, "gem creation failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    /// Search gems by title substring.
    ///
    /// `GET /api/filter-search?filterby=title&queryby={q}&termtype=contains&page=1&perPage=20`.
    pub async fn search_gems(&self, token: &str, query: &str) -> ApiResult<SearchResults> {
        let url = format!("{}/api/filter-search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("filterby", "title"),
                ("queryby", query),
                ("termtype", "contains"),
                ("page", "1"),
                ("perPage", "20"),
            ])
            .header("Authorization", bearer(token)?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

impl std::fmt::Debug for CurateItClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurateItClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Build a `Bearer` authorization header, marked sensitive so the token
/// never appears in logs.
fn bearer(token: &str) -> ApiResult<HeaderValue> {
    let mut value = HeaderValue::try_from(format!("Bearer {token}"))
        .map_err(|e| ApiError::InvalidToken(e.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}
