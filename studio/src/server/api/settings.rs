//! Effective configuration:
//!   GET /api/settings – current values with descriptions

use axum::Json;
use axum::extract::State;
use serde_json::json;

use crate::app::SharedState;

use super::ApiResult;

/// GET /api/settings
pub async fn get_settings(State(state): State<SharedState>) -> ApiResult {
    let settings = state.config().settings();
    let sessions = state.sessions().read().await.len();
    Ok(Json(json!({
        "settings": settings,
        "sessions": sessions,
    })))
}
