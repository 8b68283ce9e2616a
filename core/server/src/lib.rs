//! HTTP service for Letterlock.
//!
//! This module provides:
//! - Letter submission (validate, persist, notify) at `POST /api/letters`
//! - Read-only retrieval at `GET /api/letters/{id}`
//! - A health check at `GET /health`
//!
//! The server only ever handles ciphertext. Keys live in share-link
//! fragments, which browsers never transmit; the letter URL the server
//! builds for notification carries no fragment because the server cannot
//! construct one.

pub mod api;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use letterlock_common::Result;

pub use api::{LetterResponse, SubmitLetterRequest, SubmitLetterResponse};
pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/letters", post(handlers::submit_letter))
        .route("/api/letters/{id}", get(handlers::get_letter))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on an already-bound listener.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> Result<()> {
    tracing::info!(
        addr = %listener.local_addr().map(|a| a.to_string()).unwrap_or_default(),
        store = state.store.name(),
        notifier = state.notifier.name(),
        "Letterlock server running"
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
