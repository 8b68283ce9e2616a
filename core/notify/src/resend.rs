//! Email notifier backed by the Resend API.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use tracing::debug;

use crate::notifier::{NewLetterNotice, Notifier};
use letterlock_common::{Error, Result};

/// Resend email dispatch endpoint.
const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Connection settings for Resend.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API key with send permission.
    pub api_key: String,
    /// Verified from-address for outgoing notifications.
    pub from_address: String,
}

impl ResendConfig {
    /// Read configuration from `RESEND_API_KEY` and `LETTERLOCK_FROM_ADDRESS`.
    ///
    /// # Errors
    /// - `Config` if either variable is missing
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("RESEND_API_KEY")
            .map_err(|_| Error::Config("RESEND_API_KEY is not set".to_string()))?;
        let from_address = std::env::var("LETTERLOCK_FROM_ADDRESS")
            .map_err(|_| Error::Config("LETTERLOCK_FROM_ADDRESS is not set".to_string()))?;

        Ok(Self {
            api_key,
            from_address,
        })
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

/// Notifier that delivers letter links via Resend.
pub struct ResendMailer {
    http: Client,
    config: ResendConfig,
}

impl ResendMailer {
    /// Create a new mailer.
    pub fn new(config: ResendConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent("Letterlock/0.1")
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    fn render_body(notice: &NewLetterNotice) -> String {
        format!(
            concat!(
                r#"<div style="font-family: 'Courier New', monospace; color: #161616; padding: 20px;">"#,
                "<p>Someone sent you a letter.</p>",
                r#"<p>Open it at: <a href="{url}" style="color: #161616;">{url}</a></p>"#,
                "</div>"
            ),
            url = notice.letter_url
        )
    }
}

#[async_trait]
impl Notifier for ResendMailer {
    fn name(&self) -> &str {
        "resend"
    }

    async fn notify(&self, notice: &NewLetterNotice) -> Result<()> {
        debug!(to = %notice.recipient_email, "Dispatching letter notification");

        let request = SendEmailRequest {
            from: &self.config.from_address,
            to: [notice.recipient_email.as_str()],
            subject: "Someone sent you a letter",
            html: Self::render_body(notice),
        };

        let response = self
            .http
            .post(RESEND_API_URL)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Notification(format!("Email request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Notification(format!(
                "Resend returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
