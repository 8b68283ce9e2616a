//! Supabase REST client implementing the letter store.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::letter::{Letter, NewLetter};
use crate::store::LetterStore;
use letterlock_common::{Error, LetterId, Result};

/// Table holding letter rows.
const LETTERS_TABLE: &str = "letters";

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: Url,
    /// Anon API key. Grants insert/select on the letters table only.
    pub api_key: String,
}

impl SupabaseConfig {
    /// Read configuration from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// # Errors
    /// - `Config` if either variable is missing or the URL is invalid
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| Error::Config("SUPABASE_URL is not set".to_string()))?;
        let api_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| Error::Config("SUPABASE_ANON_KEY is not set".to_string()))?;

        let url = Url::parse(&url)
            .map_err(|e| Error::Config(format!("Invalid SUPABASE_URL: {}", e)))?;

        Ok(Self { url, api_key })
    }
}

/// Letter store backed by a hosted Supabase project.
pub struct SupabaseStore {
    http: Client,
    config: SupabaseConfig,
}

impl SupabaseStore {
    /// Create a new store client.
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent("Letterlock/0.1")
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    fn table_url(&self) -> Result<Url> {
        self.config
            .url
            .join(&format!("/rest/v1/{}", LETTERS_TABLE))
            .map_err(|e| Error::Config(format!("Invalid table URL: {}", e)))
    }

    async fn read_rows(&self, response: reqwest::Response) -> Result<Vec<Letter>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Storage(format!(
                "Supabase returned {}: {}",
                status, body
            )));
        }

        response
            .json::<Vec<Letter>>()
            .await
            .map_err(|e| Error::Serialization(format!("Invalid letter row: {}", e)))
    }
}

#[async_trait]
impl LetterStore for SupabaseStore {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn insert(&self, letter: NewLetter) -> Result<Letter> {
        let url = self.table_url()?;
        debug!("Inserting letter row via PostgREST");

        let response = self
            .http
            .post(url)
            .header("apikey", &self.config.api_key)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            // Ask PostgREST to echo the inserted row, including the
            // database-assigned id and created_at.
            .header("Prefer", "return=representation")
            .json(&[letter])
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Insert request failed: {}", e)))?;

        let rows = self.read_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::Storage("Insert returned no row".to_string()))
    }

    async fn fetch(&self, id: &LetterId) -> Result<Letter> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{}", id.as_str()))
            .append_pair("select", "*");

        let response = self
            .http
            .get(url)
            .header("apikey", &self.config.api_key)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Fetch request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("No letter with id {}", id)));
        }

        let rows = self.read_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("No letter with id {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SupabaseConfig {
        SupabaseConfig {
            url: Url::parse("https://example.supabase.co").unwrap(),
            api_key: "anon-key".to_string(),
        }
    }

    #[test]
    fn test_table_url() {
        let store = SupabaseStore::new(config()).unwrap();
        assert_eq!(
            store.table_url().unwrap().as_str(),
            "https://example.supabase.co/rest/v1/letters"
        );
    }

    #[test]
    fn test_store_name() {
        let store = SupabaseStore::new(config()).unwrap();
        assert_eq!(store.name(), "supabase");
    }
}
