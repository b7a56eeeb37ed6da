//! SVG decoding and off-screen raster surfaces.

use image::{DynamicImage, Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::compose;
use crate::data_uri::DataUri;
use crate::{ImageEngineError, SVG_MIME};

/// Largest edge length a surface may be sized to.
pub const MAX_SURFACE_EDGE: u32 = 8192;

/// Decode an `image/svg+xml` data URI into RGBA pixels at its intrinsic size.
pub fn decode_svg(uri: &DataUri) -> Result<RgbaImage, ImageEngineError> {
    if uri.mime() != SVG_MIME {
        return Err(ImageEngineError::SvgDecode(format!(
            "unexpected media type {}",
            uri.mime()
        )));
    }

    let tree = usvg::Tree::from_data(uri.data(), &usvg::Options::default())
        .map_err(|e| ImageEngineError::SvgDecode(e.to_string()))?;
    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(ImageEngineError::SurfaceUnavailable { width, height })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    debug!(width, height, "Decoded SVG into pixmap");

    let mut img = RgbaImage::new(width, height);
    for (pixel, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *pixel = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(img)
}

/// Off-screen drawing surface. Starts without dimensions; sized once the
/// decoded source is known.
#[derive(Debug, Default)]
pub struct RasterSurface {
    canvas: Option<RgbaImage>,
}

impl RasterSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.canvas.as_ref().map(|c| c.dimensions())
    }

    /// Allocate pixel storage. Fails when the size is empty or too large.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ImageEngineError> {
        if width == 0 || height == 0 || width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE {
            return Err(ImageEngineError::SurfaceUnavailable { width, height });
        }
        self.canvas = Some(RgbaImage::new(width, height));
        Ok(())
    }

    fn canvas_mut(&mut self) -> Result<&mut RgbaImage, ImageEngineError> {
        self.canvas
            .as_mut()
            .ok_or(ImageEngineError::SurfaceUnavailable {
                width: 0,
                height: 0,
            })
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: Rgba<u8>) -> Result<(), ImageEngineError> {
        compose::fill_surface(self.canvas_mut()?, color);
        Ok(())
    }

    /// Alpha-composite `top` onto the surface at `(x, y)`.
    pub fn draw(&mut self, top: &RgbaImage, x: u32, y: u32) -> Result<(), ImageEngineError> {
        compose::overlay(self.canvas_mut()?, top, x, y);
        Ok(())
    }

    pub fn into_image(self) -> Result<DynamicImage, ImageEngineError> {
        self.canvas
            .map(DynamicImage::ImageRgba8)
            .ok_or(ImageEngineError::SurfaceUnavailable {
                width: 0,
                height: 0,
            })
    }
}
