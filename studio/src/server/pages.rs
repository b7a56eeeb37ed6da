//! HTML form handlers for the generator view.
//!
//! Every mutation is a POST followed by a redirect back to the session page.

use axum::Form;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use qr_generator::{ExportArtifact, StartupQuery};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::SharedState;
use crate::services::ServiceError;
use crate::services::export::export_session;

use super::api::service_error;
use super::view;

#[derive(Debug, Deserialize)]
pub struct ContentForm {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct FileNameForm {
    #[serde(default)]
    pub file_name: String,
}

fn session_page(id: Uuid) -> Redirect {
    Redirect::to(&format!("/s/{id}"))
}

/// GET / — open a session seeded from `?content=…&fn=…`.
pub async fn index(
    State(state): State<SharedState>,
    Query(query): Query<StartupQuery>,
) -> Redirect {
    let (id, _) = state.open_session(query).await;
    session_page(id)
}

/// GET /s/{id}
pub async fn show(State(state): State<SharedState>, Path(id): Path<Uuid>) -> Response {
    let Some(session) = state.session(id).await else {
        // Expired or unknown sessions start over with defaults.
        return Redirect::to("/").into_response();
    };
    match view::render_page(id, &session) {
        Ok(html) => Html(html).into_response(),
        Err(e) => service_error(ServiceError::Render(e)).into_response(),
    }
}

/// POST /s/{id}/content
pub async fn set_content(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Form(form): Form<ContentForm>,
) -> Redirect {
    state.update_session(id, |s| s.set_content(form.content)).await;
    session_page(id)
}

/// POST /s/{id}/file-name
pub async fn set_file_name(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Form(form): Form<FileNameForm>,
) -> Redirect {
    state
        .update_session(id, |s| s.set_file_base_name(form.file_name))
        .await;
    session_page(id)
}

/// POST /s/{id}/language
pub async fn toggle_language(State(state): State<SharedState>, Path(id): Path<Uuid>) -> Redirect {
    state
        .update_session(id, |s| {
            s.toggle_language();
        })
        .await;
    session_page(id)
}

/// POST /s/{id}/theme
pub async fn toggle_theme(State(state): State<SharedState>, Path(id): Path<Uuid>) -> Redirect {
    state
        .update_session(id, |s| {
            s.toggle_theme();
        })
        .await;
    session_page(id)
}

/// POST /s/{id}/export — PNG attachment, or 204 when there is nothing to export.
pub async fn export(State(state): State<SharedState>, Path(id): Path<Uuid>) -> Response {
    match export_session(&state, id).await {
        Ok(Some(artifact)) => attachment(artifact),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => service_error(e).into_response(),
    }
}

/// Deliver an artifact through the browser's save-file flow.
fn attachment(artifact: ExportArtifact) -> Response {
    let disposition = content_disposition(artifact.file_name());
    Response::builder()
        .header(header::CONTENT_TYPE, image_engine::PNG_MIME)
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(artifact.into_png()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let mut encoded = String::new();
    for b in file_name.bytes() {
        if b.is_ascii_alphanumeric() || b"-._~".contains(&b) {
            encoded.push(b as char);
        } else {
            encoded.push_str(&format!("%{b:02X}"));
        }
    }
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
