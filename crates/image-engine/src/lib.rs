//! Image pipeline for QR code generation and raster export.
//!
//! Encodes text as QR module grids, renders them to SVG markup,
//! rasterizes SVG back to pixels, composites onto opaque backgrounds
//! and serializes the result as PNG / data URIs.

pub mod compose;
pub mod data_uri;
pub mod encode;
pub mod qr;
pub mod rasterize;

pub use image;

// Re-exports for convenience
pub use compose::{fill_surface, overlay};
pub use data_uri::DataUri;
pub use encode::{encode_png, encode_png_data_uri};
pub use qr::{QrColors, QrStyle, render_svg};
pub use rasterize::{RasterSurface, decode_svg};

/// Default rendered edge length of a QR code in pixels.
pub const QR_SIZE: u32 = 200;

/// Quiet zone width in modules when the margin is enabled.
pub const QR_MARGIN_MODULES: usize = 4;

/// Media type of serialized vector markup.
pub const SVG_MIME: &str = "image/svg+xml";

/// Media type of exported raster images.
pub const PNG_MIME: &str = "image/png";

/// Errors that can occur while rendering or converting images.
#[derive(Debug, thiserror::Error)]
pub enum ImageEngineError {
    #[error("QR encode error: {0}")]
    QrEncode(#[from] qrcode::types::QrError),

    #[error("SVG decode error: {0}")]
    SvgDecode(String),

    #[error("Drawing surface unavailable for {width}x{height}")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] image::ImageError),

    #[error("Malformed data URI: {0}")]
    MalformedDataUri(String),
}
