// src/routes/mod.rs
pub mod chat;
pub mod embeds;

use crate::message::{AuthSession, CallerMetadata};
use crate::state::SharedState;
use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use chat::embed_chat_handler;
use embeds::{create_embed_handler, get_metrics_handler, list_embeds_handler};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(admin_key: Option<String>) -> Router<SharedState> {
    let admin_routes = Router::new()
        .route("/embeds", get(list_embeds_handler).post(create_embed_handler))
        .route("/metrics", get(get_metrics_handler))
        .layer(middleware::from_fn(move |req: Request, next: Next| {
            let expected = admin_key.clone();
            async move { admin_auth(expected, req, next).await }
        }));

    Router::new()
        .route("/api/embed/{embed_id}/chat", post(embed_chat_handler))
        .nest("/admin", admin_routes)
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new("public"))
        .layer(middleware::from_fn(caller_identity))
        .layer(TraceLayer::new_for_http())
}

// API key check. No configured key means the admin surface rejects
// everything.
async fn admin_auth(
    expected: Option<String>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    match (expected, req.headers().get("x-admin-key")) {
        (Some(key), Some(val)) if !key.is_empty() && val.as_bytes() == key.as_bytes() => {
            Ok(next.run(req).await)
        }
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

// Derives the optional authenticated caller from the session header and
// makes it available to handlers as an extension. A real deployment
// would back this with its auth provider; the shape handlers see is the
// same either way.
async fn caller_identity(mut req: Request, next: Next) -> Response {
    let caller = req
        .headers()
        .get("x-auth-user")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| CallerMetadata {
            username: v.to_string(),
        });

    req.extensions_mut().insert(AuthSession(caller));
    next.run(req).await
}
