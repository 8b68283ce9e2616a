//! Integration tests for the letter API over real HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use letterlock_common::{Error, LetterId, Result};
use letterlock_crypto::{decrypt, encrypt, LetterKey};
use letterlock_notify::RecordingNotifier;
use letterlock_server::{serve, AppState};
use letterlock_store::{Letter, LetterStore, MemoryStore, NewLetter};

/// Store whose writes always fail, for exercising the storage error path.
struct FailingStore;

#[async_trait]
impl LetterStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn insert(&self, _letter: NewLetter) -> Result<Letter> {
        Err(Error::Storage("backend unavailable".to_string()))
    }

    async fn fetch(&self, id: &LetterId) -> Result<Letter> {
        Err(Error::NotFound(format!("No letter with id {}", id)))
    }
}

/// Bind an ephemeral port, spawn the server, and return its base URL.
async fn spawn_server(store: Arc<dyn LetterStore>, notifier: RecordingNotifier) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let origin = Url::parse(&format!("http://{}", addr)).unwrap();

    let state = AppState::new(store, Arc::new(notifier), origin);
    tokio::spawn(serve(listener, state));

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_submit_retrieve_decrypt_end_to_end() {
    let notifier = RecordingNotifier::new();
    let base = spawn_server(Arc::new(MemoryStore::new()), notifier.clone()).await;
    let client = reqwest::Client::new();

    let key = LetterKey::generate();
    let plaintext = "dear sam,\n\nkeep shining.";
    let sealed = encrypt(&key, plaintext).unwrap();

    // Submit: ciphertext and iv only. The key stays on this side.
    let response = client
        .post(format!("{}/api/letters", base))
        .json(&json!({
            "ciphertext": sealed.ciphertext,
            "iv": sealed.iv,
            "recipientEmail": "a@b.com",
            "recipientName": "Sam",
            "senderName": "Alex",
            "returnAddress": "alex@b.com",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.unwrap();
    let letter_id = body["letterId"].as_str().unwrap().to_string();

    // Retrieve: the stored row comes back unchanged.
    let response = client
        .get(format!("{}/api/letters/{}", base, letter_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let fetched: Value = response.json().await.unwrap();
    assert_eq!(fetched["ciphertext"], sealed.ciphertext.as_str());
    assert_eq!(fetched["iv"], sealed.iv.as_str());
    assert_eq!(fetched["recipientName"], "Sam");
    assert_eq!(fetched["senderName"], "Alex");

    // The original key opens the letter; a different key does not.
    let decrypted = decrypt(
        &key,
        fetched["ciphertext"].as_str().unwrap(),
        fetched["iv"].as_str().unwrap(),
    )
    .unwrap();
    assert_eq!(decrypted, plaintext);

    let wrong = LetterKey::generate();
    assert!(decrypt(
        &wrong,
        fetched["ciphertext"].as_str().unwrap(),
        fetched["iv"].as_str().unwrap(),
    )
    .is_err());

    // One notification, pointing at the letter URL, with no key fragment.
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient_email, "a@b.com");
    assert!(sent[0]
        .letter_url
        .path()
        .ends_with(&format!("/letter/{}", letter_id)));
    assert!(sent[0].letter_url.fragment().is_none());
}

#[tokio::test]
async fn test_missing_fields_are_named() {
    let base = spawn_server(Arc::new(MemoryStore::new()), RecordingNotifier::new()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/letters", base))
        .json(&json!({
            "ciphertext": "Y2lwaGVy",
            "iv": "bm9uY2U=",
            "recipientEmail": "",
            "recipientName": "Sam",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["fields"], json!(["recipientEmail"]));
}

#[tokio::test]
async fn test_unknown_letter_is_404() {
    let base = spawn_server(Arc::new(MemoryStore::new()), RecordingNotifier::new()).await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/letters/no-such-letter", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_notification_failure_keeps_letter() {
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::new();
    notifier.fail_next(true);

    let base = spawn_server(Arc::new(store.clone()), notifier).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/letters", base))
        .json(&json!({
            "ciphertext": "Y2lwaGVy",
            "iv": "bm9uY2U=",
            "recipientEmail": "a@b.com",
            "recipientName": "Sam",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "notification_error");

    // No rollback: the encrypted row remains readable.
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_storage_failure_maps_to_500_without_notification() {
    let notifier = RecordingNotifier::new();
    let base = spawn_server(Arc::new(FailingStore), notifier.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/letters", base))
        .json(&json!({
            "ciphertext": "Y2lwaGVy",
            "iv": "bm9uY2U=",
            "recipientEmail": "a@b.com",
            "recipientName": "Sam",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "storage_error");

    // Nothing persisted means nothing to announce.
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_health() {
    let base = spawn_server(Arc::new(MemoryStore::new()), RecordingNotifier::new()).await;

    let response = reqwest::Client::new()
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}
