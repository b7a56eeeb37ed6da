//! Runtime application configuration loaded from environment variables.

use std::time::Duration;

use qr_generator::{Language, SessionDefaults, Theme};

use super::SettingInfo;
use super::defaults::{DEFAULT_SETTINGS, get_default};
use super::validation::validate_setting;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub server_port: u16,
    pub default_file_name: String,
    pub default_language: Language,
    pub default_theme: Theme,
    pub max_sessions: usize,
    pub session_idle_minutes: u32,
    pub export_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            server_port: 8080,
            default_file_name: qr_generator::DEFAULT_FILE_BASE_NAME.into(),
            default_language: Language::En,
            default_theme: Theme::Light,
            max_sessions: 256,
            session_idle_minutes: 60,
            export_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing, empty or invalid values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String {
            match lookup(key).filter(|v| !v.is_empty()) {
                Some(v) => match validate_setting(key, &v) {
                    Ok(()) => v,
                    Err(e) => {
                        tracing::warn!("Ignoring invalid {key}={v:?}: {e}");
                        get_default(key).unwrap_or_default().to_string()
                    }
                },
                None => get_default(key).unwrap_or_default().to_string(),
            }
        };
        let defaults = Self::default();

        Self {
            host: g("QR_STUDIO_HOST"),
            server_port: g("QR_STUDIO_PORT").parse().unwrap_or(defaults.server_port),
            default_file_name: g("DEFAULT_FILE_NAME"),
            default_language: g("DEFAULT_LANGUAGE")
                .parse()
                .unwrap_or(defaults.default_language),
            default_theme: g("DEFAULT_THEME").parse().unwrap_or(defaults.default_theme),
            max_sessions: g("MAX_SESSIONS").parse().unwrap_or(defaults.max_sessions),
            session_idle_minutes: g("SESSION_IDLE_MINUTES")
                .parse()
                .unwrap_or(defaults.session_idle_minutes),
            export_timeout_secs: g("EXPORT_TIMEOUT_SECS")
                .parse()
                .unwrap_or(defaults.export_timeout_secs),
        }
    }

    pub fn session_defaults(&self) -> SessionDefaults {
        SessionDefaults {
            file_base_name: self.default_file_name.clone(),
            language: self.default_language,
            theme: self.default_theme,
        }
    }

    pub fn export_timeout(&self) -> Duration {
        Duration::from_secs(self.export_timeout_secs)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(u64::from(self.session_idle_minutes) * 60)
    }

    /// Effective settings, keyed and described like the defaults table.
    pub fn settings(&self) -> Vec<SettingInfo> {
        let values = [
            ("QR_STUDIO_HOST", self.host.clone()),
            ("QR_STUDIO_PORT", self.server_port.to_string()),
            ("DEFAULT_FILE_NAME", self.default_file_name.clone()),
            ("DEFAULT_LANGUAGE", self.default_language.to_string()),
            ("DEFAULT_THEME", self.default_theme.to_string()),
            ("MAX_SESSIONS", self.max_sessions.to_string()),
            ("SESSION_IDLE_MINUTES", self.session_idle_minutes.to_string()),
            ("EXPORT_TIMEOUT_SECS", self.export_timeout_secs.to_string()),
        ];
        values
            .into_iter()
            .map(|(key, value)| {
                let def = DEFAULT_SETTINGS.get(key);
                SettingInfo {
                    key: key.to_string(),
                    is_default: def.is_some_and(|d| d.default == value),
                    description: def.map_or(String::new(), |d| d.description.to_string()),
                    value,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = load_with(&[]);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.default_file_name, "qr-code");
        assert_eq!(config.default_language, Language::En);
        assert_eq!(config.export_timeout(), Duration::from_secs(10));
        assert!(config.settings().iter().all(|s| s.is_default));
    }

    #[test]
    fn valid_overrides_are_applied() {
        let config = load_with(&[
            ("QR_STUDIO_PORT", "9000"),
            ("DEFAULT_LANGUAGE", "fr"),
            ("DEFAULT_THEME", "dark"),
            ("MAX_SESSIONS", "3"),
        ]);
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.default_language, Language::Fr);
        assert_eq!(config.default_theme, Theme::Dark);
        assert_eq!(config.max_sessions, 3);

        let defaults = config.session_defaults();
        assert_eq!(defaults.theme, Theme::Dark);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = load_with(&[
            ("QR_STUDIO_PORT", "not-a-port"),
            ("DEFAULT_THEME", "neon"),
            ("DEFAULT_FILE_NAME", ""),
        ]);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.default_theme, Theme::Light);
        assert_eq!(config.default_file_name, "qr-code");
    }
}
