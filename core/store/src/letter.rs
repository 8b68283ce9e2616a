//! The persisted letter row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use letterlock_common::LetterId;

/// A stored letter.
///
/// Created once at submission, read on every view, never updated, never
/// deleted. The body exists only as ciphertext; the key that opens it is
/// carried by the share-link fragment and never reaches any store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    /// Opaque random identifier, assigned at insertion.
    pub id: LetterId,
    /// Base64 AEAD output (ciphertext || tag).
    pub ciphertext: String,
    /// Base64 12-byte nonce. Required for decryption, not secret.
    pub iv: String,
    /// Where the notification goes.
    pub recipient_email: String,
    /// Shown in the letter greeting.
    pub recipient_name: String,
    /// Shown in the signature block, if given.
    pub sender_name: Option<String>,
    /// Prefills the reply affordance, if given.
    pub return_address: Option<String>,
    /// Set at insertion, immutable.
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the submission handler; the store assigns the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLetter {
    pub ciphertext: String,
    pub iv: String,
    pub recipient_email: String,
    pub recipient_name: String,
    pub sender_name: Option<String>,
    pub return_address: Option<String>,
}

impl NewLetter {
    /// Materialize a full row with a fresh id and timestamp.
    pub(crate) fn into_letter(self) -> Letter {
        Letter {
            id: LetterId::generate(),
            ciphertext: self.ciphertext,
            iv: self.iv,
            recipient_email: self.recipient_email,
            recipient_name: self.recipient_name,
            sender_name: self.sender_name,
            return_address: self.return_address,
            created_at: Utc::now(),
        }
    }
}
