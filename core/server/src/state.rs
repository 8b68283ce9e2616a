//! Shared application state.

use std::sync::Arc;
use url::Url;

use letterlock_notify::Notifier;
use letterlock_store::LetterStore;

/// State shared by all request handlers.
///
/// There is no mutable state here beyond what the store itself holds:
/// each submission or retrieval is one independent exchange.
#[derive(Clone)]
pub struct AppState {
    /// Persistence collaborator. Holds ciphertext and metadata only.
    pub store: Arc<dyn LetterStore>,
    /// Notification collaborator. Sees only an email address and a URL.
    pub notifier: Arc<dyn Notifier>,
    /// Public origin used to build recipient-facing letter URLs.
    pub origin: Url,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn LetterStore>, notifier: Arc<dyn Notifier>, origin: Url) -> Self {
        Self {
            store,
            notifier,
            origin,
        }
    }
}
