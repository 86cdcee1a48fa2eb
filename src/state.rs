// src/state.rs
use std::sync::Arc;

use crate::services::embed_store::EmbedStore;
use crate::services::metrics::MetricsManager;
use crate::services::responder::ChatResponder;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub embeds: EmbedStore,
    pub metrics: MetricsManager,
    pub responder: Arc<dyn ChatResponder>,
}

impl AppState {
    pub fn new(embeds: EmbedStore, responder: Arc<dyn ChatResponder>) -> Self {
        Self {
            embeds,
            metrics: MetricsManager::new(),
            responder,
        }
    }
}
