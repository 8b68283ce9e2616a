//! HTTP client for the letter API.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use letterlock_common::{Error, LetterId, Result};

/// Submission body sent to the server.
///
/// Ciphertext and IV only; there is no field a key could travel in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLetter {
    pub ciphertext: String,
    pub iv: String,
    pub recipient_email: String,
    pub recipient_name: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub return_address: Option<String>,
}

/// A letter as returned by the retrieval endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedLetter {
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

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    letter_id: LetterId,
}

/// Client for one Letterlock server.
pub struct LetterApi {
    http: Client,
    base: Url,
}

impl LetterApi {
    /// Create a client for the given server origin.
    pub fn new(base: Url) -> Result<Self> {
        let http = Client::builder()
            .user_agent("Letterlock/0.1")
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, base })
    }

    /// The server origin this client talks to.
    pub fn origin(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, path))
            .map_err(|e| Error::Config(format!("Invalid endpoint URL: {}", e)))
    }

    /// Submit a sealed letter, returning the assigned identifier.
    pub async fn submit(&self, letter: &SubmitLetter) -> Result<LetterId> {
        let response = self
            .http
            .post(self.endpoint("/api/letters")?)
            .json(letter)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Submission failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Network(format!(
                "Server rejected submission ({}): {}",
                status, body
            )));
        }

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Invalid submit response: {}", e)))?;
        Ok(body.letter_id)
    }

    /// Fetch a letter by identifier.
    ///
    /// # Errors
    /// - `NotFound` if no letter matches
    pub async fn fetch(&self, id: &LetterId) -> Result<FetchedLetter> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/letters/{}", id))?)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Fetch failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("No letter with id {}", id)));
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Network(format!(
                "Fetch returned {}: {}",
                status, body
            )));
        }

        response
            .json::<FetchedLetter>()
            .await
            .map_err(|e| Error::Serialization(format!("Invalid letter response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_building() {
        let api = LetterApi::new(Url::parse("https://letters.example/").unwrap()).unwrap();
        assert_eq!(
            api.endpoint("/api/letters").unwrap().as_str(),
            "https://letters.example/api/letters"
        );
    }

    #[test]
    fn test_submit_letter_has_no_key_field() {
        let letter = SubmitLetter {
            ciphertext: "Y2lwaGVy".to_string(),
            iv: "bm9uY2U=".to_string(),
            recipient_email: "a@b.com".to_string(),
            recipient_name: "Sam".to_string(),
            sender_name: None,
            return_address: None,
        };

        let json = serde_json::to_value(&letter).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert!(!keys.iter().any(|k| k.to_lowercase().contains("key")));
    }
}
