//! QR code generation as SVG markup.

use image::Rgba;
use qrcode::{Color, EcLevel, QrCode};

use crate::{ImageEngineError, QR_MARGIN_MODULES, QR_SIZE};

/// Foreground/background colors of a rendered QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrColors {
    pub foreground: Rgba<u8>,
    pub background: Rgba<u8>,
}

/// Fixed rendering parameters for a QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrStyle {
    /// Edge length of the SVG in pixels (margin included).
    pub size: u32,
    pub ec_level: EcLevel,
    /// Whether a quiet zone surrounds the modules.
    pub margin: bool,
    pub colors: QrColors,
}

impl QrStyle {
    /// Default size, highest error correction, margin on.
    pub fn with_colors(colors: QrColors) -> Self {
        Self {
            size: QR_SIZE,
            ec_level: EcLevel::H,
            margin: true,
            colors,
        }
    }

    fn margin_modules(&self) -> usize {
        if self.margin { QR_MARGIN_MODULES } else { 0 }
    }
}

/// Dark/light module matrix of an encoded QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    width: usize,
    dark: Vec<bool>,
}

impl ModuleGrid {
    /// Encode `data` at the given error correction level.
    ///
    /// Fails with the encoder's own error when `data` exceeds the capacity
    /// of the largest symbol version at that level.
    pub fn encode(data: &str, ec_level: EcLevel) -> Result<Self, ImageEngineError> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level)?;
        let dark = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        Ok(Self {
            width: code.width(),
            dark,
        })
    }

    /// Number of modules per side (without quiet zone).
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.dark[y * self.width + x]
    }

    /// Path data covering every dark module, one horizontal run per segment.
    fn dark_path(&self, offset: usize) -> String {
        let mut path = String::new();
        for y in 0..self.width {
            let mut x = 0;
            while x < self.width {
                if !self.is_dark(x, y) {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < self.width && self.is_dark(x, y) {
                    x += 1;
                }
                path.push_str(&format!(
                    "M{} {}h{}v1H{}z",
                    start + offset,
                    y + offset,
                    x - start,
                    start + offset
                ));
            }
        }
        path
    }

    /// Render the grid as standalone SVG markup.
    pub fn to_svg(&self, style: &QrStyle) -> String {
        let margin = style.margin_modules();
        let total = self.width + margin * 2;
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" "#,
                r#"viewBox="0 0 {total} {total}" shape-rendering="crispEdges">"#,
                r#"<path fill="{bg}" d="M0,0 h{total}v{total}H0z"/>"#,
                r#"<path fill="{fg}" d="{cells}"/>"#,
                "</svg>"
            ),
            size = style.size,
            total = total,
            bg = to_hex(style.colors.background),
            fg = to_hex(style.colors.foreground),
            cells = self.dark_path(margin),
        )
    }
}

/// Encode `data` and render it as SVG markup using `style`.
pub fn render_svg(data: &str, style: &QrStyle) -> Result<String, ImageEngineError> {
    let grid = ModuleGrid::encode(data, style.ec_level)?;
    tracing::debug!(
        modules = grid.width(),
        bytes = data.len(),
        "Rendered QR module grid"
    );
    Ok(grid.to_svg(style))
}

/// `#rrggbb` notation for an opaque color.
pub fn to_hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}
