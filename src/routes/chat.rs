// src/routes/chat.rs
use axum::{
    Extension, Json,
    extract::{Path, State},
    response::sse::{KeepAlive, KeepAliveStream, Sse},
};

use crate::{
    error::AppError,
    message::{AuthSession, ChatRequest},
    services::responder::ChatStream,
    state::SharedState,
};

/// POST /api/embed/{embed_id}/chat
///
/// Validates the body, resolves the embed configuration and hands the
/// connection to the responder, which streams the reply as SSE. The
/// handler's job ends once delegation occurs.
pub async fn embed_chat_handler(
    State(state): State<SharedState>,
    Path(embed_id): Path<String>,
    Extension(session): Extension<AuthSession>,
    Json(payload): Json<ChatRequest>,
) -> Result<Sse<KeepAliveStream<ChatStream>>, AppError> {
    let message = match payload.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => {
            state.metrics.record_rejection().await;
            return Err(AppError::BadRequest("message is required".to_string()));
        }
    };

    let session_id = match payload.session_id.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            state.metrics.record_rejection().await;
            return Err(AppError::BadRequest("sessionId is required".to_string()));
        }
    };

    if embed_id.trim().is_empty() {
        state.metrics.record_rejection().await;
        return Err(AppError::BadRequest("embedId is required".to_string()));
    }

    let embed = match state.embeds.lookup(&embed_id).await {
        Some(embed) => embed,
        None => {
            state.metrics.record_rejection().await;
            return Err(AppError::EmbedNotFound(embed_id));
        }
    };

    // Absent or empty context becomes a concrete None; a non-empty value
    // is forwarded byte for byte.
    let context = payload.context.filter(|c| !c.is_empty());

    tracing::info!(
        embed = %embed.id,
        session = %session_id,
        has_context = context.is_some(),
        "embed chat turn"
    );
    state.metrics.record_chat(&embed.id).await;

    let stream = match state
        .responder
        .stream(embed, message, session_id, context, session.0)
        .await
    {
        Ok(stream) => stream,
        Err(err) => {
            state.metrics.record_responder_error().await;
            // Input was already validated; whatever the responder
            // reports is an upstream failure from the caller's view.
            return Err(match err {
                upstream @ AppError::Upstream(_) => upstream,
                other => AppError::Upstream(other.to_string()),
            });
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
