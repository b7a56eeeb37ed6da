//! Session state controller.

use image_engine::ImageEngineError;
use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::render::{RenderedGraphic, render_graphic};
use crate::theme::Theme;
use crate::{DEFAULT_FILE_BASE_NAME, EXPORT_EXTENSION};

/// Values a fresh session starts from before query seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub file_base_name: String,
    pub language: Language,
    pub theme: Theme,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            file_base_name: DEFAULT_FILE_BASE_NAME.into(),
            language: Language::default(),
            theme: Theme::default(),
        }
    }
}

/// Query parameters read once when a session is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StartupQuery {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "fn")]
    pub file_name: Option<String>,
}

/// State of one generator view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    content: String,
    file_base_name: String,
    language: Language,
    theme: Theme,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&SessionDefaults::default())
    }
}

impl SessionState {
    pub fn new(defaults: &SessionDefaults) -> Self {
        Self {
            content: String::new(),
            file_base_name: defaults.file_base_name.clone(),
            language: defaults.language,
            theme: defaults.theme,
        }
    }

    /// Create a session and apply startup query parameters.
    ///
    /// Empty parameters count as absent. The query is consumed here and never
    /// consulted again.
    pub fn seeded(defaults: &SessionDefaults, query: StartupQuery) -> Self {
        let mut state = Self::new(defaults);
        if let Some(content) = query.content.filter(|c| !c.is_empty()) {
            state.content = content;
        }
        if let Some(name) = query.file_name.filter(|n| !n.is_empty()) {
            state.file_base_name = name;
        }
        state
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn file_base_name(&self) -> &str {
        &self.file_base_name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Replace the content. Any string is accepted, including empty.
    pub fn set_content(&mut self, value: impl Into<String>) {
        self.content = value.into();
    }

    /// Replace the export base name. `.png` is appended on export.
    pub fn set_file_base_name(&mut self, value: impl Into<String>) {
        self.file_base_name = value.into();
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        self.language
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn shows_graphic(&self) -> bool {
        self.has_content()
    }

    pub fn shows_export_control(&self) -> bool {
        self.has_content()
    }

    pub fn shows_file_name_input(&self) -> bool {
        self.has_content()
    }

    /// `<file_base_name>.png`
    pub fn export_file_name(&self) -> String {
        format!("{}.{}", self.file_base_name, EXPORT_EXTENSION)
    }

    /// The graphic currently on screen, if any.
    pub fn graphic(&self) -> Result<Option<RenderedGraphic>, ImageEngineError> {
        render_graphic(&self.content, self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_startup_values() {
        let state = SessionState::default();
        assert_eq!(state.content(), "");
        assert_eq!(state.file_base_name(), "qr-code");
        assert_eq!(state.language(), Language::En);
        assert_eq!(state.theme(), Theme::Light);
        assert!(!state.shows_graphic());
        assert!(!state.shows_file_name_input());
    }

    #[test]
    fn seeded_applies_both_parameters() {
        let query = StartupQuery {
            content: Some("HELLO".into()),
            file_name: Some("mycode".into()),
        };
        let state = SessionState::seeded(&SessionDefaults::default(), query);
        assert_eq!(state.content(), "HELLO");
        assert_eq!(state.file_base_name(), "mycode");
    }

    #[test]
    fn seeded_ignores_empty_parameters() {
        let query = StartupQuery {
            content: Some(String::new()),
            file_name: Some(String::new()),
        };
        let state = SessionState::seeded(&SessionDefaults::default(), query);
        assert_eq!(state.content(), "");
        assert_eq!(state.file_base_name(), "qr-code");
    }

    #[test]
    fn configured_defaults_are_used() {
        let defaults = SessionDefaults {
            file_base_name: "badge".into(),
            language: Language::Fr,
            theme: Theme::Dark,
        };
        let state = SessionState::new(&defaults);
        assert_eq!(state.file_base_name(), "badge");
        assert_eq!(state.language(), Language::Fr);
        assert!(state.theme().is_dark());
    }

    #[test]
    fn file_base_name_is_taken_verbatim() {
        let mut state = SessionState::default();
        state.set_file_base_name("my code.v2");
        assert_eq!(state.export_file_name(), "my code.v2.png");
    }

    #[test]
    fn visibility_follows_content() {
        let mut state = SessionState::default();
        state.set_content("x");
        assert!(state.shows_graphic());
        assert!(state.shows_export_control());
        assert!(state.graphic().unwrap().is_some());

        state.set_content("");
        assert!(!state.shows_export_control());
        assert!(state.graphic().unwrap().is_none());
    }
}
