//! Remote Store client for Smartmark.
//!
//! Thin consumer of the managed backend's PostgREST-style rows endpoint.
//! Per-user access control is enforced server-side through the bearer token;
//! the client only ever asks for (and may only mutate) the owner's own rows.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;

use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::StoreError;

const BOOKMARKS_TABLE: &str = "bookmarks";

/// Trait defining the remote store contract consumed by the session view.
#[allow(async_fn_in_trait)]
pub trait RemoteStoreTrait {
    /// Insert a record; returns the authoritative row with the
    /// server-assigned id and timestamp.
    async fn create(&self, record: &NewBookmark) -> Result<Bookmark, StoreError>;
    /// Fetch the owner's rows, creation timestamp descending.
    async fn list(&self, owner_id: &str) -> Result<Vec<Bookmark>, StoreError>;
    /// Delete a row by id. Scoped server-side to the caller's own rows.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// HTTP client for the rows endpoint.
#[derive(Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl StoreClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token: None,
        }
    }

    /// A copy of this client carrying the session's access token, so the
    /// store can apply per-user row policies. The underlying connection pool
    /// is shared.
    pub fn with_access_token(&self, access_token: &str) -> Self {
        let mut client = self.clone();
        client.access_token = Some(access_token.to_string());
        client
    }

    /// URL of the bookmarks rows endpoint.
    pub fn rows_url(base_url: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            base_url.trim_end_matches('/'),
            BOOKMARKS_TABLE
        )
    }

    fn headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| StoreError::Network(format!("Bad API key header: {}", e)))?;
        headers.insert("apikey", api_key);
        // Row policies fall back to anonymous access without a session token
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        let auth = HeaderValue::from_str(&format!("Bearer {}", bearer))
            .map_err(|e| StoreError::Network(format!("Bad auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl RemoteStoreTrait for StoreClient {
    async fn create(&self, record: &NewBookmark) -> Result<Bookmark, StoreError> {
        let response = self
            .http
            .post(Self::rows_url(&self.base_url))
            .headers(self.headers()?)
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let mut rows: Vec<Bookmark> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        if rows.is_empty() {
            return Err(StoreError::MissingRecord);
        }
        Ok(rows.remove(0))
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        let response = self
            .http
            .get(Self::rows_url(&self.base_url))
            .headers(self.headers()?)
            .query(&[
                ("owner_id", format!("eq.{}", owner_id).as_str()),
                ("order", "created_at.desc"),
                ("select", "*"),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(Self::rows_url(&self.base_url))
            .headers(self.headers()?)
            .query(&[("id", format!("eq.{}", id).as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() || status == StatusCode::NO_CONTENT => Ok(()),
            _ => {
                Self::check_status(response).await?;
                Ok(())
            }
        }
    }
}
