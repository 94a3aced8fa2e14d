pub mod search;
pub mod server;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router / 构建路由
pub fn router(state: Arc<AppState>) -> Router {
    let ws_path = state.config.search.path.clone();

    let mut app = Router::new()
        .route("/api/health", get(server::health_check))
        .route(&ws_path, get(search::ws_search));

    // Accept the endpoint with and without the trailing slash
    let alternate = match ws_path.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => format!("{}/", ws_path),
    };
    if !alternate.is_empty() {
        app = app.route(&alternate, get(search::ws_search));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
    .with_state(state)
}
