//! Notifier trait definition.

use async_trait::async_trait;
use url::Url;

use letterlock_common::Result;

/// What the recipient is told about a new letter.
///
/// Deliberately minimal: an email address and a URL. The letter content
/// never appears here, and the URL carries no key fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLetterNotice {
    /// Where to send the notification.
    pub recipient_email: String,
    /// The letter URL, `{origin}/letter/{id}` (no fragment).
    pub letter_url: Url,
}

/// Notification boundary for new letters.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Get the notifier name (e.g., "resend", "log").
    fn name(&self) -> &str;

    /// Send one notification for a freshly stored letter.
    ///
    /// # Errors
    /// - `Notification` on dispatch failure. The caller must not roll the
    ///   letter row back: an unnotified letter is a harmless encrypted
    ///   orphan.
    async fn notify(&self, notice: &NewLetterNotice) -> Result<()>;
}
