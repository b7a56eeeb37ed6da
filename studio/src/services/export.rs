//! Export orchestration for stored sessions.

use qr_generator::{ExportArtifact, ExportError, ExportRequest, start_export};
use uuid::Uuid;

use super::ServiceError;
use crate::app::SharedState;

/// Export the graphic currently shown by a session.
///
/// Returns `Ok(None)` when there is nothing to export (empty content or no
/// drawing surface); no artifact is produced in that case.
pub async fn export_session(
    state: &SharedState,
    session_id: Uuid,
) -> Result<Option<ExportArtifact>, ServiceError> {
    let session = state
        .session(session_id)
        .await
        .ok_or(ServiceError::SessionNotFound(session_id))?;

    let request = ExportRequest::from_session(&session)?;
    if !request.has_graphic() {
        tracing::debug!(session = %session_id, "Export requested with empty content");
        return Ok(None);
    }

    let timeout = state.config().export_timeout();
    let handle = start_export(request, timeout);
    let export_id = handle.id();
    state.exports().write().await.register(session_id, handle.control());
    tracing::info!(session = %session_id, export = %export_id, "Export started");

    // The entry must be removed even if this request future is dropped.
    let tracker = state.clone();
    let task = tokio::spawn(async move {
        let result = handle.wait().await;
        tracker.exports().write().await.finish(export_id);
        result
    });
    let artifact = task.await.map_err(ExportError::from)??;
    Ok(artifact)
}
