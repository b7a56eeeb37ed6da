//! Server-side rendering of the generator view.
//!
//! The theme is threaded into the markup per session: the root element
//! carries the `dark` class only for sessions in dark mode.

use image_engine::ImageEngineError;
use qr_generator::SessionState;
use uuid::Uuid;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Link that recreates the session's fields through the startup query.
pub fn share_path(session: &SessionState) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("content", session.content())
        .append_pair("fn", session.file_base_name())
        .finish();
    format!("/?{query}")
}

/// Render the full HTML page for a session.
pub fn render_page(id: Uuid, session: &SessionState) -> Result<String, ImageEngineError> {
    let labels = session.language().labels();
    let theme = session.theme();
    let graphic = session.graphic()?;

    let mut fields = format!(
        r#"<form method="post" action="/s/{id}/content" class="field">
          <label for="content">{label}</label>
          <input id="content" name="content" type="text" value="{value}" placeholder="{placeholder}" autofocus>
        </form>"#,
        label = escape_html(labels.content_label),
        value = escape_html(session.content()),
        placeholder = escape_html(labels.content_placeholder),
    );
    if session.shows_file_name_input() {
        fields.push_str(&format!(
            r#"
        <form method="post" action="/s/{id}/file-name" class="field">
          <label for="filename">{label}</label>
          <input id="filename" name="file_name" type="text" value="{value}" placeholder="{placeholder}">
        </form>"#,
            label = escape_html(labels.file_name_label),
            value = escape_html(session.file_base_name()),
            placeholder = escape_html(labels.file_name_placeholder),
        ));
    }

    let mut output = String::new();
    if let Some(graphic) = &graphic {
        output.push_str(&format!(
            r#"<div class="qr-frame">{}</div>"#,
            graphic.svg()
        ));
    }
    if session.shows_export_control() {
        output.push_str(&format!(
            r#"
        <form method="post" action="/s/{id}/export">
          <button type="submit" class="download">{}</button>
        </form>"#,
            escape_html(labels.download_button)
        ));
    }

    let root_class = if theme.is_dark() { r#" class="dark""# } else { "" };
    let theme_icon = if theme.is_dark() { "&#9728;" } else { "&#9790;" };

    Ok(format!(
        r#"<!doctype html>
<html lang="{lang}"{root_class}>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/assets/style.css">
</head>
<body>
  <div class="page">
    <div class="container">
      <div class="toolbar">
        <form method="post" action="/s/{id}/language">
          <button type="submit" class="chip">{caption}</button>
        </form>
        <form method="post" action="/s/{id}/theme">
          <button type="submit" class="chip" aria-label="{next_theme}">{theme_icon}</button>
        </form>
      </div>
      <main>
        <h1>{title}</h1>
        {fields}
        <div class="output">{output}</div>
      </main>
    </div>
    <footer>{footer}</footer>
  </div>
</body>
</html>
"#,
        lang = session.language().code(),
        title = escape_html(labels.title),
        caption = session.language().toggle_caption(),
        next_theme = theme.toggled(),
        footer = escape_html(&labels.footer()),
    ))
}
