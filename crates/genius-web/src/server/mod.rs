//! Axum side of the dashboard: relays `POST /api/code` to the upstream
//! completion service.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use genius_chat::{ChatMessage, CompletionRequest, HttpTransport};

/// Shared application state accessible from Axum routes.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<HttpTransport>,
}

/// API routes, mounted next to the Leptos routes.
pub fn api_router<S>(state: AppState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/code", post(relay_code))
        .with_state(state)
}

/// Forwards the conversation upstream and answers with the single reply.
///
/// Upstream failures are answered with `DispatchError::http_status` and the
/// error text, so the page classifies them like a direct failure.
pub async fn relay_code(
    State(state): State<AppState>,
    Json(body): Json<CompletionRequest<'static>>,
) -> Result<Json<ChatMessage>, (StatusCode, String)> {
    if body.messages.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Messages are required".into()));
    }

    tracing::info!(
        messages = body.messages.len(),
        upstream = state.upstream.url(),
        "relaying completion request"
    );

    match state.upstream.post_messages(&body.messages).await {
        Ok(reply) => Ok(Json(reply)),
        Err(err) => {
            tracing::warn!(error = %err, "upstream completion failed");
            let status =
                StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::BAD_GATEWAY);
            Err((status, err.to_string()))
        }
    }
}
