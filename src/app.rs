//! App Core for Smartmark.
//!
//! Central struct holding the backend clients, constructed once at session
//! start and passed by reference into mounted views. Nothing in the crate
//! reaches for a shared global client handle.

use std::sync::Arc;

use crate::managers::view_session::ViewSession;
use crate::services::auth_service::AuthService;
use crate::services::change_feed::BroadcastFeed;
use crate::services::store_client::StoreClient;
use crate::types::errors::SessionError;
use crate::types::session::AuthSession;
use crate::types::settings::BackendSettings;

/// Central application struct holding the shared backend clients.
pub struct App {
    pub settings: BackendSettings,
    pub store: StoreClient,
    pub feed: Arc<BroadcastFeed>,
    pub auth: AuthService,
}

impl App {
    /// Creates a new App from backend settings, constructing each client once.
    pub fn new(settings: BackendSettings) -> Self {
        let store = StoreClient::new(&settings.backend_url, &settings.api_key);
        let feed = Arc::new(BroadcastFeed::new(settings.feed_capacity));
        let auth = AuthService::new(
            &settings.backend_url,
            &settings.api_key,
            &settings.site_origin,
        );

        Self {
            settings,
            store,
            feed,
            auth,
        }
    }

    /// Route decision based on authentication presence.
    pub fn route(session: Option<&AuthSession>) -> &'static str {
        match session {
            Some(_) => "/dashboard",
            None => "/login",
        }
    }

    /// Mounts a dashboard view for an authenticated session: the store client
    /// is scoped to the session's access token, the initial snapshot is
    /// fetched, and the owner's feed channel is subscribed.
    pub async fn mount_dashboard(
        &self,
        session: &AuthSession,
    ) -> Result<ViewSession<StoreClient, BroadcastFeed>, SessionError> {
        let store = self.store.with_access_token(&session.access_token);
        ViewSession::mount(store, self.feed.clone(), session).await
    }
}
