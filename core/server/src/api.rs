//! Wire types for the letter API.
//!
//! The API speaks camelCase JSON. Validation errors name fields by their
//! wire names (`recipientEmail`, not `recipient_email`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use letterlock_common::LetterId;
use letterlock_store::Letter;

/// Submission body.
///
/// Carries ciphertext and IV only. A key never appears in any request
/// field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLetterRequest {
    pub ciphertext: String,
    pub iv: String,
    pub recipient_email: String,
    pub recipient_name: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub return_address: Option<String>,
}

/// Successful submission response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLetterResponse {
    pub letter_id: LetterId,
}

/// Retrieval response: everything here is either ciphertext or non-secret
/// display metadata. The recipient email stays out; it exists for the
/// notification step only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterResponse {
    pub id: LetterId,
    pub ciphertext: String,
    pub iv: String,
    pub recipient_name: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub return_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Letter> for LetterResponse {
    fn from(letter: Letter) -> Self {
        Self {
            id: letter.id,
            ciphertext: letter.ciphertext,
            iv: letter.iv,
            recipient_name: letter.recipient_name,
            sender_name: letter.sender_name,
            return_address: letter.return_address,
            created_at: letter.created_at,
        }
    }
}
