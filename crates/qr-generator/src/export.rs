//! Vector-to-raster export.
//!
//! An export snapshots the rendered graphic and file name, then walks
//! `Serializing → Decoding → Compositing → Encoding → TriggeringSave` and
//! returns to `Idle`. Decoding runs on the blocking pool and is the only
//! suspension point. Each export owns its surface, so overlapping exports
//! share nothing; every one gets its own [`ExportHandle`] that can be
//! observed or cancelled.

use std::time::Duration;

use image_engine::image::RgbaImage;
use image_engine::{
    DataUri, ImageEngineError, PNG_MIME, RasterSurface, SVG_MIME, decode_svg, encode_png,
};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::render::RenderedGraphic;
use crate::session::SessionState;
use crate::theme::Theme;

/// Where an export currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    Idle,
    Serializing,
    Decoding,
    Compositing,
    Encoding,
    TriggeringSave,
}

/// Errors that end an export with a signal to the caller.
///
/// A missing graphic or an unavailable surface is not an error: the export
/// completes with `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to decode vector markup: {0}")]
    Decode(#[source] ImageEngineError),

    #[error("Failed to encode raster image: {0}")]
    Encode(#[source] ImageEngineError),

    #[error("Export cancelled")]
    Cancelled,

    #[error("Decode did not complete within {0:?}")]
    TimedOut(Duration),

    #[error("Decode task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Everything an export needs, captured at request time.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    graphic: Option<RenderedGraphic>,
    file_name: String,
    background: Theme,
}

impl ExportRequest {
    pub fn new(graphic: Option<RenderedGraphic>, file_name: impl Into<String>, theme: Theme) -> Self {
        Self {
            graphic,
            file_name: file_name.into(),
            background: theme,
        }
    }

    /// Snapshot the graphic currently shown by `session`.
    pub fn from_session(session: &SessionState) -> Result<Self, ImageEngineError> {
        Ok(Self::new(
            session.graphic()?,
            session.export_file_name(),
            session.theme(),
        ))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn has_graphic(&self) -> bool {
        self.graphic.is_some()
    }
}

/// A transient download link: target name plus `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub download: String,
    pub href: String,
}

/// The PNG produced by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    file_name: String,
    png: Vec<u8>,
}

impl ExportArtifact {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    pub fn data_uri(&self) -> DataUri {
        DataUri::new(PNG_MIME, self.png.clone())
    }

    /// Build the link handed to the save mechanism. Not retained anywhere.
    pub fn download_link(&self) -> DownloadLink {
        DownloadLink {
            download: self.file_name.clone(),
            href: self.data_uri().to_string(),
        }
    }
}

/// Observe or cancel an export without owning its result.
#[derive(Debug, Clone)]
pub struct ExportControl {
    id: Uuid,
    file_name: String,
    phase: watch::Receiver<ExportPhase>,
    cancel: CancellationToken,
}

impl ExportControl {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn phase(&self) -> ExportPhase {
        *self.phase.borrow()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Owning handle of a running export.
#[derive(Debug)]
pub struct ExportHandle {
    control: ExportControl,
    task: JoinHandle<Result<Option<ExportArtifact>, ExportError>>,
}

impl ExportHandle {
    pub fn id(&self) -> Uuid {
        self.control.id
    }

    pub fn phase(&self) -> ExportPhase {
        self.control.phase()
    }

    pub fn cancel(&self) {
        self.control.cancel();
    }

    pub fn control(&self) -> ExportControl {
        self.control.clone()
    }

    /// Wait for completion. `Ok(None)` means the export aborted silently.
    pub async fn wait(self) -> Result<Option<ExportArtifact>, ExportError> {
        self.task.await?
    }
}

/// Spawn an export on the current runtime.
pub fn start_export(request: ExportRequest, decode_timeout: Duration) -> ExportHandle {
    let id = Uuid::new_v4();
    let (phase_tx, phase_rx) = watch::channel(ExportPhase::Idle);
    let cancel = CancellationToken::new();
    let control = ExportControl {
        id,
        file_name: request.file_name.clone(),
        phase: phase_rx,
        cancel: cancel.clone(),
    };

    let task = tokio::spawn(async move {
        let result = run_export(request, &phase_tx, &cancel, decode_timeout).await;
        phase_tx.send_replace(ExportPhase::Idle);
        match &result {
            Ok(Some(artifact)) => {
                info!(export = %id, file = %artifact.file_name, bytes = artifact.png.len(), "Export completed")
            }
            Ok(None) => debug!(export = %id, "Export aborted without artifact"),
            Err(e) => warn!(export = %id, error = %e, "Export failed"),
        }
        result
    });

    ExportHandle { control, task }
}

async fn run_export(
    request: ExportRequest,
    phase: &watch::Sender<ExportPhase>,
    cancel: &CancellationToken,
    decode_timeout: Duration,
) -> Result<Option<ExportArtifact>, ExportError> {
    let Some(graphic) = request.graphic else {
        return Ok(None);
    };

    phase.send_replace(ExportPhase::Serializing);
    let markup = graphic.svg().to_owned();
    let mut surface = RasterSurface::new();
    let source = DataUri::new(SVG_MIME, markup.into_bytes()).to_string();

    phase.send_replace(ExportPhase::Decoding);
    let decode = tokio::task::spawn_blocking(move || decode_source(&source));
    let decoded = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ExportError::Cancelled),
        joined = tokio::time::timeout(decode_timeout, decode) => match joined {
            Err(_) => return Err(ExportError::TimedOut(decode_timeout)),
            Ok(res) => res?,
        },
    };
    let decoded = match decoded {
        Ok(img) => img,
        Err(ImageEngineError::SurfaceUnavailable { width, height }) => {
            debug!(width, height, "No drawing surface for decoded graphic");
            return Ok(None);
        }
        Err(e) => return Err(ExportError::Decode(e)),
    };

    if cancel.is_cancelled() {
        return Err(ExportError::Cancelled);
    }

    phase.send_replace(ExportPhase::Compositing);
    if let Err(e) = surface.resize(decoded.width(), decoded.height()) {
        debug!(error = %e, "Drawing surface unavailable");
        return Ok(None);
    }
    surface
        .fill(request.background.export_background())
        .and_then(|()| surface.draw(&decoded, 0, 0))
        .map_err(ExportError::Encode)?;

    phase.send_replace(ExportPhase::Encoding);
    let image = surface.into_image().map_err(ExportError::Encode)?;
    let png = encode_png(&image).map_err(ExportError::Encode)?;

    phase.send_replace(ExportPhase::TriggeringSave);
    Ok(Some(ExportArtifact {
        file_name: request.file_name,
        png,
    }))
}

/// Parse the `data:` source and decode it, as an image element would.
fn decode_source(source: &str) -> Result<RgbaImage, ImageEngineError> {
    let uri: DataUri = source.parse()?;
    decode_svg(&uri)
}
