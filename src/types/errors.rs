use std::fmt;

use crate::types::bookmark::FormInput;

// === ReconcileError ===

/// Errors related to local list reconciliation.
#[derive(Debug)]
pub enum ReconcileError {
    /// The submitted title is empty after trimming whitespace.
    EmptyTitle,
    /// The submitted URL is empty after trimming whitespace.
    EmptyUrl,
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::EmptyTitle => write!(f, "Bookmark title must not be empty"),
            ReconcileError::EmptyUrl => write!(f, "Bookmark URL must not be empty"),
        }
    }
}

impl std::error::Error for ReconcileError {}

// === StoreError ===

/// Errors related to remote store operations.
#[derive(Debug)]
pub enum StoreError {
    /// A network error occurred while talking to the data API.
    Network(String),
    /// The data API rejected the request.
    Api { status: u16, message: String },
    /// The response body could not be decoded.
    Decode(String),
    /// The store confirmed a create but returned no record.
    MissingRecord,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Network(msg) => write!(f, "Store network error: {}", msg),
            StoreError::Api { status, message } => {
                write!(f, "Store API error ({}): {}", status, message)
            }
            StoreError::Decode(msg) => write!(f, "Store decode error: {}", msg),
            StoreError::MissingRecord => write!(f, "Store returned no record for create"),
        }
    }
}

impl std::error::Error for StoreError {}

// === AuthError ===

/// Errors related to the redirect-based login flow.
#[derive(Debug)]
pub enum AuthError {
    /// The callback query did not carry an authorization code.
    MissingCode,
    /// The Session Provider rejected the code exchange.
    ExchangeFailed(String),
    /// A network error occurred while talking to the Session Provider.
    Network(String),
    /// The token response could not be decoded.
    Decode(String),
    /// The configured backend or site URL is invalid.
    InvalidUrl(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCode => write!(f, "Auth callback missing authorization code"),
            AuthError::ExchangeFailed(msg) => write!(f, "Code exchange failed: {}", msg),
            AuthError::Network(msg) => write!(f, "Auth network error: {}", msg),
            AuthError::Decode(msg) => write!(f, "Auth decode error: {}", msg),
            AuthError::InvalidUrl(msg) => write!(f, "Invalid auth URL: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

// === FeedError ===

/// Errors related to the change feed.
#[derive(Debug)]
pub enum FeedError {
    /// An inbound message could not be decoded into a known event.
    Decode(String),
    /// The channel was closed underneath the subscription.
    ChannelClosed(String),
    /// The subscriber fell behind and missed this many events. The view is
    /// out of sync with the store until it remounts.
    Lagged(u64),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Decode(msg) => write!(f, "Feed decode error: {}", msg),
            FeedError::ChannelClosed(channel) => {
                write!(f, "Feed channel closed: {}", channel)
            }
            FeedError::Lagged(missed) => {
                write!(f, "Feed subscription lagged, missed {} events", missed)
            }
        }
    }
}

impl std::error::Error for FeedError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === SessionError ===

/// Errors surfaced by a mounted view session.
#[derive(Debug)]
pub enum SessionError {
    /// The submitted form input was rejected before any remote call.
    InvalidInput(String),
    /// The remote create failed; the optimistic entry was removed and the
    /// original form input is returned so the user can retry.
    CreateFailed { message: String, restored: FormInput },
    /// The remote delete failed; the optimistic removal was reverted.
    DeleteFailed(String),
    /// The bookmark is not present in the session list.
    UnknownBookmark(String),
    /// The initial snapshot fetch failed; the view cannot mount.
    StoreUnavailable(String),
    /// The feed subscription could not be established.
    FeedUnavailable(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            SessionError::CreateFailed { message, .. } => {
                write!(f, "Failed to add bookmark: {}", message)
            }
            SessionError::DeleteFailed(msg) => {
                write!(f, "Failed to delete bookmark: {}", msg)
            }
            SessionError::UnknownBookmark(id) => write!(f, "Bookmark not found: {}", id),
            SessionError::StoreUnavailable(msg) => {
                write!(f, "Store unavailable: {}", msg)
            }
            SessionError::FeedUnavailable(msg) => {
                write!(f, "Feed unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for SessionError {}
