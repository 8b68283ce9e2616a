//! Request handlers for the letter API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use url::Url;

use letterlock_common::{Error, LetterId, Result};
use letterlock_notify::NewLetterNotice;
use letterlock_store::NewLetter;

use crate::api::{LetterResponse, SubmitLetterRequest, SubmitLetterResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Validate a submission and normalize it into a storable row.
///
/// Required fields must be non-empty after trimming; the error names every
/// missing field by its wire name. Optional fields are trimmed, with empty
/// strings collapsed to absent.
fn validate(req: SubmitLetterRequest) -> Result<NewLetter> {
    let ciphertext = req.ciphertext.trim();
    let iv = req.iv.trim();
    let recipient_email = req.recipient_email.trim();
    let recipient_name = req.recipient_name.trim();

    let mut missing = Vec::new();
    if ciphertext.is_empty() {
        missing.push("ciphertext");
    }
    if iv.is_empty() {
        missing.push("iv");
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

    let optional = |field: Option<String>| {
        field
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    Ok(NewLetter {
        ciphertext: ciphertext.to_string(),
        iv: iv.to_string(),
        recipient_email: recipient_email.to_string(),
        recipient_name: recipient_name.to_string(),
        sender_name: optional(req.sender_name),
        return_address: optional(req.return_address),
    })
}

/// Build the recipient-facing letter URL.
///
/// No fragment is appended here: the key never reaches the server, so the
/// server cannot construct the full share link. The sender's client
/// appends `#{key}` locally.
fn letter_url(origin: &Url, id: &LetterId) -> Result<Url> {
    let base = origin.as_str().trim_end_matches('/');
    Url::parse(&format!("{}/letter/{}", base, id))
        .map_err(|e| Error::Config(format!("Invalid letter URL: {}", e)))
}

/// Accept a sealed letter: validate, persist, then notify.
///
/// Persistence and notification are sequential with no atomicity. A
/// notification failure surfaces as an error but leaves the stored row in
/// place; an orphaned letter is encrypted and harmless.
pub async fn submit_letter(
    State(state): State<AppState>,
    Json(req): Json<SubmitLetterRequest>,
) -> std::result::Result<(StatusCode, Json<SubmitLetterResponse>), ApiError> {
    let letter = validate(req)?;
    let stored = state.store.insert(letter).await?;
    tracing::info!(id = %stored.id, "Letter stored");

    let notice = NewLetterNotice {
        recipient_email: stored.recipient_email.clone(),
        letter_url: letter_url(&state.origin, &stored.id)?,
    };
    state.notifier.notify(&notice).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitLetterResponse {
            letter_id: stored.id,
        }),
    ))
}

/// Fetch a stored letter by identifier.
pub async fn get_letter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<LetterResponse>, ApiError> {
    let id = LetterId::new(id).map_err(|_| Error::NotFound("Invalid letter id".to_string()))?;
    let letter = state.store.fetch(&id).await?;
    Ok(Json(LetterResponse::from(letter)))
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "letterlock-server",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SubmitLetterRequest {
        SubmitLetterRequest {
            ciphertext: "Y2lwaGVy".to_string(),
            iv: "bm9uY2U=".to_string(),
            recipient_email: "a@b.com".to_string(),
            recipient_name: "Sam".to_string(),
            sender_name: Some("  Alex  ".to_string()),
            return_address: Some("".to_string()),
        }
    }

    #[test]
    fn test_validate_normalizes_optionals() {
        let letter = validate(request()).unwrap();
        assert_eq!(letter.sender_name.as_deref(), Some("Alex"));
        assert_eq!(letter.return_address, None);
    }

    #[test]
    fn test_validate_names_missing_fields() {
        let mut req = request();
        req.recipient_email = "   ".to_string();
        req.iv = String::new();

        let err = validate(req).unwrap_err();
        match err {
            Error::Validation { fields } => {
                assert_eq!(fields, vec!["iv", "recipientEmail"]);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_all_fields_missing() {
        let req = SubmitLetterRequest {
            ciphertext: String::new(),
            iv: String::new(),
            recipient_email: String::new(),
            recipient_name: String::new(),
            sender_name: None,
            return_address: None,
        };

        let err = validate(req).unwrap_err();
        match err {
            Error::Validation { fields } => {
                assert_eq!(
                    fields,
                    vec!["ciphertext", "iv", "recipientEmail", "recipientName"]
                );
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_letter_url_has_no_fragment() {
        let origin = Url::parse("https://letters.example/").unwrap();
        let id = LetterId::new("abc-123").unwrap();

        let url = letter_url(&origin, &id).unwrap();
        assert_eq!(url.as_str(), "https://letters.example/letter/abc-123");
        assert!(url.fragment().is_none());
    }
}
