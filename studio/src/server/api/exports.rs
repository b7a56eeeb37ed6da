//! In-flight export API:
//!   GET    /api/exports      – running exports with their phase
//!   DELETE /api/exports/{id} – cancel one

use axum::Json;
use axum::extract::{Path, State};
use serde_json::json;
use uuid::Uuid;

use crate::app::SharedState;

use super::{ApiResult, err_json};

/// GET /api/exports
pub async fn list_exports(State(state): State<SharedState>) -> ApiResult {
    let exports = state.exports().read().await.list();
    let count = exports.len();
    Ok(Json(json!({ "exports": exports, "count": count })))
}

/// DELETE /api/exports/{id}
pub async fn cancel_export(State(state): State<SharedState>, Path(id): Path<Uuid>) -> ApiResult {
    if !state.exports().read().await.cancel(id) {
        return Err(err_json(404, &format!("Export not found: {id}")));
    }
    tracing::info!(export = %id, "Export cancellation requested");
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn idle_server_lists_no_exports() {
        let state = SharedState::new(AppConfig::default());
        let Json(body) = list_exports(State(state)).await.unwrap();
        assert_eq!(body["count"], 0);
        assert_eq!(body["exports"], json!([]));
    }

    #[tokio::test]
    async fn cancelling_unknown_export_is_404() {
        let state = SharedState::new(AppConfig::default());
        let err = cancel_export(State(state), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }
}
