//! The recipient path: import the key, decrypt, render or fail closed.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::debug;

use letterlock_crypto::{decrypt, LetterKey};

use crate::api::FetchedLetter;

/// A letter the viewer managed to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedLetter {
    /// Decrypted body.
    pub body: String,
    /// For the greeting line.
    pub recipient_name: String,
    /// For the signature block, if the sender gave a name.
    pub sender_name: Option<String>,
    /// When the letter was sent.
    pub sent_on: DateTime<Utc>,
    /// Composer URL for the reply affordance, if a return address exists.
    pub reply_path: Option<String>,
}

/// Terminal display state of a letter view.
///
/// `Unopenable` covers both a missing key fragment and a failed
/// decryption. The two are deliberately indistinguishable so the state
/// carries no signal about which part of the link was wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Opened(OpenedLetter),
    Unopenable,
}

impl ViewState {
    /// Whether the letter opened.
    pub fn is_opened(&self) -> bool {
        matches!(self, Self::Opened(_))
    }
}

/// Decide what a fetched letter looks like to the viewer.
///
/// Pure function over the fetched row and the URL fragment. Decryption
/// happens here, locally; nothing leaves the device.
pub fn open_letter(letter: &FetchedLetter, fragment: Option<&str>) -> ViewState {
    let Some(fragment) = fragment.filter(|f| !f.is_empty()) else {
        debug!("Share link carried no key fragment");
        return ViewState::Unopenable;
    };

    let key = match LetterKey::import(fragment) {
        Ok(key) => key,
        Err(_) => {
            debug!("Key fragment did not import");
            return ViewState::Unopenable;
        }
    };

    let body = match decrypt(&key, &letter.ciphertext, &letter.iv) {
        Ok(body) => body,
        Err(_) => {
            debug!("Letter did not decrypt");
            return ViewState::Unopenable;
        }
    };

    ViewState::Opened(OpenedLetter {
        body,
        recipient_name: letter.recipient_name.clone(),
        sender_name: letter.sender_name.clone(),
        sent_on: letter.created_at,
        reply_path: reply_path(letter),
    })
}

/// Build the composer URL prefilled for a reply.
///
/// `/?recipient={return_address}&recipient_name={sender_name}`, matching
/// what the composer reads from its query string.
fn reply_path(letter: &FetchedLetter) -> Option<String> {
    let return_address = letter.return_address.as_deref()?;

    let mut path = format!(
        "/?recipient={}",
        utf8_percent_encode(return_address, NON_ALPHANUMERIC)
    );
    if let Some(sender) = letter.sender_name.as_deref() {
        path.push_str(&format!(
            "&recipient_name={}",
            utf8_percent_encode(sender, NON_ALPHANUMERIC)
        ));
    }
    Some(path)
}
