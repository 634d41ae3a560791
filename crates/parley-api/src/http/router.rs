//! Axum router configuration with middleware.
//!
//! Routes: `/ws` (chat upgrade) and `/health`. Middleware: CORS and
//! request tracing. When a static directory is configured (the bundled
//! chat client), it is served at `/` with `index.html` as the fallback
//! for unknown paths; `/ws` and `/health` take priority.

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.static_dir.clone();

    let mut router = Router::new()
        .route("/ws", get(handlers::ws::ws_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the chat client from disk if a directory is configured and
    // exists. Unknown paths fall through to its index.html.
    if let Some(dir) = static_dir {
        if std::path::Path::new(&dir).exists() {
            let index_path = format!("{dir}/index.html");
            let serve_dir = ServeDir::new(&dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %dir, "static file serving enabled");
        } else {
            tracing::warn!(path = %dir, "static directory not found, skipping");
        }
    }

    router
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
