use crate::functions::dispatch::{Outcome, Relay, SkipReason};
use crate::schema::{Event, WebhookRequest};
use axum::Router;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use std::sync::Arc;

// document events carry the full document text
const MAX_WEBHOOK_BODY: usize = 64 * 1024 * 1024;

pub fn router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route("/outline-webhook", post(outline_webhook))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_WEBHOOK_BODY))
        .with_state(relay)
}

async fn health() -> &'static str {
    "ok"
}

/// Acknowledges every event with 200 unless the Discord delivery fails.
async fn outline_webhook(State(relay): State<Arc<Relay>>, body: Bytes) -> StatusCode {
    let request: WebhookRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "webhook: ignoring malformed body");
            return StatusCode::OK;
        }
    };
    let event = Event::from(request);

    match relay.handle(&event).await {
        Outcome::Delivered => {
            tracing::info!(event = event.kind.as_str(), "webhook: notification delivered");
            StatusCode::OK
        }
        Outcome::Skipped(SkipReason::Unsupported(kind)) => {
            tracing::info!(event = %kind, payload = %event.model, "webhook: unsupported event");
            StatusCode::OK
        }
        Outcome::Skipped(SkipReason::CollectionExcluded { collection_id }) => {
            tracing::info!(
                event = event.kind.as_str(),
                collection_id = ?collection_id,
                "webhook: skipping event outside included collections"
            );
            StatusCode::OK
        }
        Outcome::Failed(e) => {
            tracing::error!(event = event.kind.as_str(), error = %e, "webhook: discord delivery failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
