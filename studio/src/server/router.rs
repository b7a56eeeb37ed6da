use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{api, assets, pages};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Generator view ---
        .route("/", get(pages::index))
        .route("/s/{id}", get(pages::show))
        .route("/s/{id}/content", post(pages::set_content))
        .route("/s/{id}/file-name", post(pages::set_file_name))
        .route("/s/{id}/language", post(pages::toggle_language))
        .route("/s/{id}/theme", post(pages::toggle_theme))
        .route("/s/{id}/export", post(pages::export))
        // --- Sessions ---
        .route("/api/sessions", post(api::sessions::create_session))
        .route(
            "/api/sessions/{id}",
            get(api::sessions::get_session)
                .put(api::sessions::update_session)
                .delete(api::sessions::delete_session),
        )
        .route("/api/sessions/{id}/language/toggle", post(api::sessions::toggle_language))
        .route("/api/sessions/{id}/theme/toggle", post(api::sessions::toggle_theme))
        .route("/api/sessions/{id}/exports", post(api::sessions::export))
        // --- Exports ---
        .route("/api/exports", get(api::exports::list_exports))
        .route("/api/exports/{id}", delete(api::exports::cancel_export))
        // --- Settings ---
        .route("/api/settings", get(api::settings::get_settings))
        // --- Static files ---
        .route("/assets/{*path}", get(assets::asset_handler))
        .fallback(assets::not_found)
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
