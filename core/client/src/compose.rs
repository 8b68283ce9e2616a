//! The sender path: encrypt locally, submit ciphertext, build the link.

use tracing::debug;

use letterlock_common::{Error, Result};
use letterlock_crypto::{encrypt, LetterKey};

use crate::api::{LetterApi, SubmitLetter};
use crate::link::ShareLink;

/// What the sender typed into the composer.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    /// The letter body. Encrypted before it leaves this device.
    pub body: String,
    pub recipient_email: String,
    pub recipient_name: String,
    /// Blank means "Anonymous".
    pub sender_name: String,
    /// Blank means no reply affordance.
    pub return_address: String,
}

/// Encrypt a draft, submit it, and return the full share link.
///
/// A fresh key is generated for this one letter, used for exactly one
/// encryption, exported into the link fragment, and dropped. The server
/// receives ciphertext, IV, and metadata; it never receives the key.
///
/// # Errors
/// - `Validation` naming missing fields (body, recipient email or name
///   empty after trimming)
/// - `Network` if the server rejects the submission
pub async fn send_letter(api: &LetterApi, draft: Draft) -> Result<ShareLink> {
    let body = draft.body.trim();
    let recipient_email = draft.recipient_email.trim();
    let recipient_name = draft.recipient_name.trim();

    let mut missing = Vec::new();
    if body.is_empty() {
        missing.push("content");
    }
    if recipient_email.is_empty() {
        missing.push("recipientEmail");
    }
    if recipient_name.is_empty() {
        missing.push("recipientName");
    }
    if !missing.is_empty() {
        return Err(Error::missing_fields(missing));
    }

    let key = LetterKey::generate();
    let sealed = encrypt(&key, body)?;
    debug!("Letter sealed locally");

    let sender_name = draft.sender_name.trim();
    let return_address = draft.return_address.trim();

    let letter = SubmitLetter {
        ciphertext: sealed.ciphertext,
        iv: sealed.iv,
        recipient_email: recipient_email.to_string(),
        recipient_name: recipient_name.to_string(),
        sender_name: Some(if sender_name.is_empty() {
            "Anonymous".to_string()
        } else {
            sender_name.to_string()
        }),
        return_address: if return_address.is_empty() {
            None
        } else {
            Some(return_address.to_string())
        },
    };

    let id = api.submit(&letter).await?;
    ShareLink::build(api.origin(), &id, &key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[tokio::test]
    async fn test_empty_draft_fails_before_any_request() {
        // An unroutable origin: validation must reject the draft without
        // ever reaching the network.
        let api = LetterApi::new(Url::parse("http://invalid.localdomain").unwrap()).unwrap();

        let err = send_letter(&api, Draft::default()).await.unwrap_err();
        match err {
            Error::Validation { fields } => {
                assert_eq!(fields, vec!["content", "recipientEmail", "recipientName"]);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
