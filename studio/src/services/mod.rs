//! Session bookkeeping and export orchestration.

pub mod export;
pub mod exports;
pub mod sessions;

use image_engine::ImageEngineError;
use qr_generator::ExportError;
use uuid::Uuid;

/// Errors raised by session-level operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Failed to render QR code: {0}")]
    Render(#[from] ImageEngineError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
