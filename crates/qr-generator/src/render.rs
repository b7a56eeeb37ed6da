//! Rendered graphic: the on-screen vector encoding of the session content.

use image_engine::{ImageEngineError, QrStyle, render_svg};

use crate::theme::Theme;

/// SVG markup for a piece of content under a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGraphic {
    svg: String,
    theme: Theme,
}

impl RenderedGraphic {
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}

/// Render `content` for `theme`.
///
/// Pure in `(content, theme)`: size, error correction and margin are fixed.
/// Returns `None` for empty content, where nothing is displayed.
pub fn render_graphic(
    content: &str,
    theme: Theme,
) -> Result<Option<RenderedGraphic>, ImageEngineError> {
    if content.is_empty() {
        return Ok(None);
    }
    let style = QrStyle::with_colors(theme.qr_colors());
    let svg = render_svg(content, &style)?;
    Ok(Some(RenderedGraphic { svg, theme }))
}
