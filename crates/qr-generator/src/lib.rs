//! Generator view core: session state, QR rendering and PNG export.
//!
//! The session is the single source of truth for what is on screen. The
//! rendered graphic is recomputed from `(content, theme)` on demand and an
//! export snapshots that graphic into an independently addressable task.

pub mod export;
pub mod language;
pub mod render;
pub mod session;
pub mod theme;

// Re-exports for convenience
pub use export::{
    DownloadLink, ExportArtifact, ExportControl, ExportError, ExportHandle, ExportPhase,
    ExportRequest, start_export,
};
pub use language::{Labels, Language};
pub use render::{RenderedGraphic, render_graphic};
pub use session::{SessionDefaults, SessionState, StartupQuery};
pub use theme::Theme;

/// File base name used when none is supplied.
pub const DEFAULT_FILE_BASE_NAME: &str = "qr-code";

/// Extension appended to the file base name on export.
pub const EXPORT_EXTENSION: &str = "png";
