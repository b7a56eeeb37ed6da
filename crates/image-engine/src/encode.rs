//! Raster serialization.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::data_uri::DataUri;
use crate::{ImageEngineError, PNG_MIME};

/// Encode an image as PNG bytes.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, ImageEngineError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    debug!(
        width = img.width(),
        height = img.height(),
        bytes = buf.len(),
        "Encoded PNG"
    );
    Ok(buf)
}

/// Encode an image as a `data:image/png;base64,…` URI.
pub fn encode_png_data_uri(img: &DynamicImage) -> Result<DataUri, ImageEngineError> {
    Ok(DataUri::new(PNG_MIME, encode_png(img)?))
}
