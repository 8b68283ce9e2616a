//! Log-only notifier for local development.

use async_trait::async_trait;
use tracing::info;

use crate::notifier::{NewLetterNotice, Notifier};
use letterlock_common::Result;

/// Notifier that logs the letter URL instead of emailing it.
///
/// Used when no email backend is configured. The logged URL carries no
/// key fragment, so nothing confidential reaches the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Create a new log notifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, notice: &NewLetterNotice) -> Result<()> {
        info!(
            to = %notice.recipient_email,
            url = %notice.letter_url,
            "New letter notification (no email backend configured)"
        );
        Ok(())
    }
}
