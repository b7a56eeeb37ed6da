//! Session API:
//!   POST   /api/sessions                      – open a session
//!   GET    /api/sessions/{id}                 – snapshot incl. rendered SVG
//!   PUT    /api/sessions/{id}                 – set content / file name
//!   DELETE /api/sessions/{id}                 – close
//!   POST   /api/sessions/{id}/language/toggle – switch label language
//!   POST   /api/sessions/{id}/theme/toggle    – switch theme
//!   POST   /api/sessions/{id}/exports         – export as PNG data URI

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use qr_generator::{SessionState, StartupQuery};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::app::SharedState;
use crate::server::view::share_path;
use crate::services::ServiceError;
use crate::services::export::export_session;

use super::{ApiError, ApiResult, service_error};

/// Partial update of the editable fields.
#[derive(Debug, Default, Deserialize)]
pub struct SessionPatch {
    pub content: Option<String>,
    pub file_base_name: Option<String>,
}

fn not_found(id: Uuid) -> ApiError {
    service_error(ServiceError::SessionNotFound(id))
}

/// JSON view of a session, including what the page would display.
fn snapshot(id: Uuid, session: &SessionState) -> ApiResult {
    let graphic = session
        .graphic()
        .map_err(|e| service_error(ServiceError::Render(e)))?;
    let labels = session.language().labels();

    Ok(Json(json!({
        "id": id,
        "content": session.content(),
        "file_base_name": session.file_base_name(),
        "export_file_name": session.export_file_name(),
        "language": session.language(),
        "theme": session.theme(),
        "shows_graphic": session.shows_graphic(),
        "shows_export_control": session.shows_export_control(),
        "shows_file_name_input": session.shows_file_name_input(),
        "svg": graphic.as_ref().map(|g| g.svg()),
        "labels": labels,
        "footer": labels.footer(),
        "language_toggle": session.language().toggle_caption(),
        "share_path": share_path(session),
    })))
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<SharedState>,
    body: Option<Json<StartupQuery>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let query = body.map(|Json(q)| q).unwrap_or_default();
    let (id, session) = state.open_session(query).await;
    Ok((StatusCode::CREATED, snapshot(id, &session)?))
}

/// GET /api/sessions/{id}
pub async fn get_session(State(state): State<SharedState>, Path(id): Path<Uuid>) -> ApiResult {
    let session = state.session(id).await.ok_or_else(|| not_found(id))?;
    snapshot(id, &session)
}

/// PUT /api/sessions/{id}
pub async fn update_session(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<SessionPatch>,
) -> ApiResult {
    let session = state
        .update_session(id, |s| {
            if let Some(content) = patch.content {
                s.set_content(content);
            }
            if let Some(name) = patch.file_base_name {
                s.set_file_base_name(name);
            }
        })
        .await
        .ok_or_else(|| not_found(id))?;
    snapshot(id, &session)
}

/// DELETE /api/sessions/{id}
pub async fn delete_session(State(state): State<SharedState>, Path(id): Path<Uuid>) -> ApiResult {
    if !state.close_session(id).await {
        return Err(not_found(id));
    }
    Ok(Json(json!({ "success": true })))
}

/// POST /api/sessions/{id}/language/toggle
pub async fn toggle_language(State(state): State<SharedState>, Path(id): Path<Uuid>) -> ApiResult {
    let session = state
        .update_session(id, |s| {
            s.toggle_language();
        })
        .await
        .ok_or_else(|| not_found(id))?;
    snapshot(id, &session)
}

/// POST /api/sessions/{id}/theme/toggle
pub async fn toggle_theme(State(state): State<SharedState>, Path(id): Path<Uuid>) -> ApiResult {
    let session = state
        .update_session(id, |s| {
            s.toggle_theme();
        })
        .await
        .ok_or_else(|| not_found(id))?;
    snapshot(id, &session)
}

/// POST /api/sessions/{id}/exports
///
/// Returns the transient download link, or 204 when nothing is displayed.
pub async fn export(State(state): State<SharedState>, Path(id): Path<Uuid>) -> Response {
    match export_session(&state, id).await {
        Ok(Some(artifact)) => {
            let link = artifact.download_link();
            Json(json!({
                "file_name": link.download,
                "data_uri": link.href,
                "bytes": artifact.png().len(),
            }))
            .into_response()
        }
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => service_error(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::body::to_bytes;

    async fn open(state: &SharedState, content: &str) -> Uuid {
        let query = StartupQuery {
            content: Some(content.into()),
            file_name: Some("site".into()),
        };
        let (_, Json(body)) = create_session(State(state.clone()), Some(Json(query)))
            .await
            .unwrap();
        body["id"].as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn create_without_body_uses_defaults() {
        let state = SharedState::new(AppConfig::default());
        let (status, Json(body)) = create_session(State(state), None).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["content"], "");
        assert_eq!(body["file_base_name"], "qr-code");
        assert_eq!(body["shows_graphic"], false);
        assert!(body["svg"].is_null());
        assert_eq!(body["labels"]["title"], "QR Code Generator");
    }

    #[tokio::test]
    async fn patch_updates_fields_and_graphic() {
        let state = SharedState::new(AppConfig::default());
        let id = open(&state, "first").await;
        let patch = SessionPatch {
            content: Some(String::new()),
            file_base_name: None,
        };
        let Json(body) = update_session(State(state.clone()), Path(id), Json(patch))
            .await
            .unwrap();
        assert_eq!(body["shows_export_control"], false);
        assert_eq!(body["file_base_name"], "site");
        assert!(body["svg"].is_null());
    }

    #[tokio::test]
    async fn toggles_return_updated_snapshot() {
        let state = SharedState::new(AppConfig::default());
        let id = open(&state, "x").await;
        let Json(body) = toggle_theme(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(body["theme"], "dark");
        let Json(body) = toggle_language(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(body["language"], "fr");
        assert_eq!(body["language_toggle"], "EN");
        assert_eq!(body["labels"]["download_button"], "Télécharger le Code QR");
    }

    #[tokio::test]
    async fn export_returns_png_data_uri() {
        let state = SharedState::new(AppConfig::default());
        let id = open(&state, "https://example.com").await;
        let response = export(State(state), Path(id)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["file_name"], "site.png");
        assert!(
            body["data_uri"]
                .as_str()
                .unwrap()
                .starts_with("data:image/png;base64,")
        );
    }

    #[tokio::test]
    async fn missing_session_is_404() {
        let state = SharedState::new(AppConfig::default());
        let err = get_session(State(state.clone()), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);

        let response = export(State(state), Path(Uuid::new_v4())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_closes_session() {
        let state = SharedState::new(AppConfig::default());
        let id = open(&state, "bye").await;
        assert!(delete_session(State(state.clone()), Path(id)).await.is_ok());
        assert!(state.session(id).await.is_none());
    }
}
