//! Recording notifier for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notifier::{NewLetterNotice, Notifier};
use letterlock_common::{Error, Result};

/// Notifier that records every notice instead of sending it.
///
/// Can be switched into a failing mode to exercise the
/// notification-failure path of the submission handler.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<NewLetterNotice>>>,
    fail: Arc<RwLock<bool>>,
}

impl RecordingNotifier {
    /// Create a notifier that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent notify call fail.
    pub fn fail_next(&self, fail: bool) {
        *self.fail.write().unwrap() = fail;
    }

    /// Notices recorded so far.
    pub fn sent(&self) -> Vec<NewLetterNotice> {
        self.sent.read().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, notice: &NewLetterNotice) -> Result<()> {
        if *self.fail.read().unwrap() {
            return Err(Error::Notification("Simulated dispatch failure".to_string()));
        }
        self.sent.write().unwrap().push(notice.clone());
        Ok(())
    }
}
