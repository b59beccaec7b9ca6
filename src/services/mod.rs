// Smartmark services
// Services wrap the external collaborators: auth, remote store, change feed,
// and the settings file.

pub mod auth_service;
pub mod change_feed;
pub mod settings_engine;
pub mod store_client;
