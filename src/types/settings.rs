use serde::{Deserialize, Serialize};

/// Backend connection settings for the managed data/auth/feed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the managed backend (data API and auth endpoints).
    pub backend_url: String,
    /// Publishable API key sent with every request.
    pub api_key: String,
    /// OAuth provider used for the redirect-based login.
    pub oauth_provider: String,
    /// Origin of this application, used to build the auth callback URL.
    pub site_origin: String,
    /// Per-channel buffer size for the change feed. A slow session that falls
    /// more than this many events behind is reported as lagged.
    pub feed_capacity: usize,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            oauth_provider: "google".to_string(),
            site_origin: "http://localhost:3000".to_string(),
            feed_capacity: 64,
        }
    }
}
