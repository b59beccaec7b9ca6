//! Session Provider client for Smartmark.
//!
//! Redirect-based OAuth login: the login view sends the user to the provider's
//! authorize endpoint, the provider redirects back to `/auth/callback` with an
//! authorization code, and the callback exchanges the code for a session.
//! On exchange failure the user lands back on the login view with the error
//! message carried as a query parameter.

use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use crate::types::errors::AuthError;
use crate::types::session::AuthSession;

/// Where the callback sends the user next. Authentication failure is
/// non-fatal; the user may retry from the login view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackOutcome {
    pub session: Option<AuthSession>,
    pub redirect: String,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: TokenUser,
}

/// Client for the backend's auth endpoints.
pub struct AuthService {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    site_origin: String,
}

impl AuthService {
    pub fn new(base_url: &str, api_key: &str, site_origin: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            site_origin: site_origin.trim_end_matches('/').to_string(),
        }
    }

    /// The application's callback endpoint, registered with the provider.
    pub fn callback_url(&self) -> String {
        format!("{}/auth/callback", self.site_origin)
    }

    /// Authorize URL for the redirect-based login with the given provider.
    pub fn authorize_url(&self, provider: &str) -> Result<String, AuthError> {
        let mut url = Url::parse(&format!("{}/auth/v1/authorize", self.base_url))
            .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_to", &self.callback_url());
        Ok(url.into())
    }

    /// Exchange an authorization code for an authenticated session.
    pub async fn exchange_code(&self, code: &str) -> Result<AuthSession, AuthError> {
        let mut url = Url::parse(&format!("{}/auth/v1/token", self.base_url))
            .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("grant_type", "pkce");

        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .json(&json!({ "auth_code": code }))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::ExchangeFailed(format!("{}: {}", status, message)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        Ok(AuthSession {
            user_id: token.user.id,
            email: token.user.email,
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
        })
    }

    /// Handle the provider's redirect back to `/auth/callback`.
    ///
    /// A missing code falls through to the dashboard unauthenticated, mirroring
    /// the route's behavior for stray visits; an exchange failure redirects to
    /// the login view with the error message as a query parameter.
    pub async fn handle_callback(&self, query: &str) -> CallbackOutcome {
        let code = match parse_callback_code(query) {
            Some(code) => code,
            None => {
                return CallbackOutcome {
                    session: None,
                    redirect: "/dashboard".to_string(),
                }
            }
        };

        match self.exchange_code(&code).await {
            Ok(session) => CallbackOutcome {
                session: Some(session),
                redirect: "/dashboard".to_string(),
            },
            Err(e) => CallbackOutcome {
                session: None,
                redirect: login_error_path(&e.to_string()),
            },
        }
    }
}

/// Extract the `code` parameter from a callback query string.
pub fn parse_callback_code(query: &str) -> Option<String> {
    let url = Url::parse(&format!("http://callback.invalid/?{}", query)).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
}

/// Login path carrying a human-readable error message, percent-encoded.
pub fn login_error_path(message: &str) -> String {
    let mut url = match Url::parse("http://callback.invalid/login") {
        Ok(url) => url,
        Err(_) => return "/login".to_string(),
    };
    url.query_pairs_mut().append_pair("error", message);
    match url.query() {
        Some(query) => format!("/login?{}", query),
        None => "/login".to_string(),
    }
}
