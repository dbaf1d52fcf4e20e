//! API Routes
//!
//! Configures the Axum router with the storage endpoints and the static
//! frontend fallback.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, delete_handler, get_json_handler, get_string_handler, health_handler,
    list_keys_handler, migrate_handler, set_json_handler, set_string_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /storage` - List stored keys
/// - `GET|PUT|DELETE /storage/:key` - Raw string access
/// - `GET|PUT /storage/:key/json` - JSON access
/// - `POST /maintenance/migrate` - Run the migration pass
/// - `POST /maintenance/cleanup` - Run the cleanup pass
/// - `GET /stats` - Accessor statistics
/// - `GET /health` - Health check endpoint
///
/// Any other path is served from the state's static directory, if set.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/storage", get(list_keys_handler))
        .route(
            "/storage/:key",
            get(get_string_handler)
                .put(set_string_handler)
                .delete(delete_handler),
        )
        .route(
            "/storage/:key/json",
            get(get_json_handler).put(set_json_handler),
        )
        .route("/maintenance/migrate", post(migrate_handler))
        .route("/maintenance/cleanup", post(cleanup_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler));

    if let Some(dir) = state.static_dir.clone() {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
