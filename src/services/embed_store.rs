// src/services/embed_store.rs
use std::{collections::HashMap, fmt::Debug, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Configuration of one embeddable chat widget instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbedConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// In-memory store of embed configurations, keyed by embed id.
#[derive(Clone, Default)]
pub struct EmbedStore {
    inner: Arc<RwLock<HashMap<String, EmbedConfig>>>,
}

impl Debug for EmbedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbedStore").finish()
    }
}

impl EmbedStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Load configurations from a JSON file holding an array of embeds.
    pub async fn load_file(path: &str) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let configs: Vec<EmbedConfig> = serde_json::from_str(&content)?;

        let store = Self::new();
        {
            let mut guard = store.inner.write().await;
            for config in configs {
                guard.insert(config.id.clone(), config);
            }
        }
        Ok(store)
    }

    pub async fn lookup(&self, embed_id: &str) -> Option<EmbedConfig> {
        let guard = self.inner.read().await;
        guard.get(embed_id).cloned()
    }

    /// Insert or replace a configuration. Returns true if an existing
    /// embed with the same id was replaced.
    pub async fn insert(&self, config: EmbedConfig) -> bool {
        let mut guard = self.inner.write().await;
        guard.insert(config.id.clone(), config).is_some()
    }

    pub async fn remove(&self, embed_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(embed_id).is_some()
    }

    pub async fn list(&self) -> Vec<EmbedConfig> {
        let guard = self.inner.read().await;
        let mut configs: Vec<EmbedConfig> = guard.values().cloned().collect();
        configs.sort_by(|a, b| a.id.cmp(&b.id));
        configs
    }

    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }
}
