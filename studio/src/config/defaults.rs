//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    ("QR_STUDIO_HOST", "127.0.0.1", "Address the HTTP server binds to"),
    ("QR_STUDIO_PORT", "8080", "Port the HTTP server listens on"),
    ("DEFAULT_FILE_NAME", "qr-code", "Export base name for new sessions"),
    ("DEFAULT_LANGUAGE", "en", "Label language for new sessions (en, fr)"),
    ("DEFAULT_THEME", "light", "Theme for new sessions (light, dark)"),
    ("MAX_SESSIONS", "256", "Sessions kept in memory before the oldest is evicted"),
    ("SESSION_IDLE_MINUTES", "60", "Idle time after which a session is discarded"),
    ("EXPORT_TIMEOUT_SECS", "10", "Upper bound on decoding a graphic during export"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::validate_setting;

    #[test]
    fn every_default_passes_validation() {
        for def in DEFAULT_SETTINGS.values() {
            assert!(
                validate_setting(def.key, def.default).is_ok(),
                "default for {} should be valid",
                def.key
            );
        }
    }

    #[test]
    fn unknown_key_has_no_default() {
        assert_eq!(get_default("NOPE"), None);
        assert_eq!(get_default("QR_STUDIO_PORT"), Some("8080"));
    }
}
