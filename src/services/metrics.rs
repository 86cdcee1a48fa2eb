// src/services/metrics.rs
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub chats_per_embed: HashMap<String, u64>,
    pub rejected_requests: u64,
    pub responder_errors: u64,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_chat(&self, embed_id: &str) {
        let mut data = self.inner.write().await;
        *data.chats_per_embed.entry(embed_id.to_string()).or_insert(0) += 1;
    }

    pub async fn record_rejection(&self) {
        let mut data = self.inner.write().await;
        data.rejected_requests += 1;
    }

    pub async fn record_responder_error(&self) {
        let mut data = self.inner.write().await;
        data.responder_errors += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
