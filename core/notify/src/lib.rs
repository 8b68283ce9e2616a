//! Letter notification for Letterlock.
//!
//! One outbound email per successful submission, carrying only the letter
//! URL. The URL never includes the key fragment: the server cannot
//! construct it, so the notifier cannot leak it.

pub mod log;
pub mod notifier;
pub mod recording;
pub mod resend;

pub use log::LogNotifier;
pub use notifier::{NewLetterNotice, Notifier};
pub use recording::RecordingNotifier;
pub use resend::{ResendConfig, ResendMailer};
