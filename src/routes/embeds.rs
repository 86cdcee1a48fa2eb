// src/routes/embeds.rs
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::AppError,
    services::{embed_store::EmbedConfig, metrics::MetricsData},
    state::SharedState,
};

pub async fn list_embeds_handler(State(state): State<SharedState>) -> Json<Vec<EmbedConfig>> {
    Json(state.embeds.list().await)
}

pub async fn create_embed_handler(
    State(state): State<SharedState>,
    Json(config): Json<EmbedConfig>,
) -> Result<(StatusCode, Json<EmbedConfig>), AppError> {
    if config.id.trim().is_empty() {
        return Err(AppError::BadRequest("embed id is required".to_string()));
    }

    let replaced = state.embeds.insert(config.clone()).await;
    tracing::info!(embed = %config.id, replaced, "embed config saved");
    Ok((StatusCode::CREATED, Json(config)))
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
