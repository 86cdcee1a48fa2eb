use std::{sync::Arc, time::Duration};

use tower_http::cors::CorsLayer;

use embed_chat_backend::routes;
use embed_chat_backend::services::{
    embed_store::EmbedStore, responder::LocalResponder, session_store::SessionStore,
};
use embed_chat_backend::state::AppState;

const SESSION_TTL: Duration = Duration::from_secs(30 * 60);
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let embeds_file = std::env::var("EMBEDS_FILE").unwrap_or_else(|_| "embeds.json".to_string());
    let embeds = match EmbedStore::load_file(&embeds_file).await {
        Ok(store) => {
            let count = store.len().await;
            tracing::info!(file = %embeds_file, count, "loaded embed configs");
            store
        }
        Err(err) => {
            tracing::warn!(file = %embeds_file, %err, "no embed configs loaded, starting empty");
            EmbedStore::new()
        }
    };

    let sessions = SessionStore::new(SESSION_TTL);
    {
        let sessions = sessions.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(PURGE_INTERVAL);
            loop {
                tick.tick().await;
                let purged = sessions.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "purged idle sessions");
                }
            }
        });
    }

    let state = Arc::new(AppState::new(
        embeds,
        Arc::new(LocalResponder::new(sessions)),
    ));

    let admin_key = std::env::var("ADMIN_KEY").ok();
    let app = routes::create_router(admin_key)
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "embed chat backend listening");
    axum::serve(listener, app).await?;
    Ok(())
}
