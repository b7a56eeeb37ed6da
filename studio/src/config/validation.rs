//! Setting value validation.

use std::net::IpAddr;

use qr_generator::{Language, Theme};

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "QR_STUDIO_HOST" => {
            value
                .parse::<IpAddr>()
                .map_err(|_| "must be an IP address")?;
        }
        "QR_STUDIO_PORT" => validate_int_range(value, 1, 65535)?,
        "DEFAULT_FILE_NAME" => {
            if value.is_empty() || value.len() > 255 {
                return Err("file name must be 1-255 characters".into());
            }
        }
        "DEFAULT_LANGUAGE" => {
            value.parse::<Language>()?;
        }
        "DEFAULT_THEME" => {
            value.parse::<Theme>()?;
        }
        "MAX_SESSIONS" => validate_int_range(value, 1, 100_000)?,
        "SESSION_IDLE_MINUTES" => validate_int_range(value, 1, 10_080)?,
        "EXPORT_TIMEOUT_SECS" => validate_int_range(value, 1, 300)?,
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_setting;

    #[test]
    fn port_must_be_in_range() {
        assert!(validate_setting("QR_STUDIO_PORT", "8080").is_ok());
        assert!(validate_setting("QR_STUDIO_PORT", "0").is_err());
        assert!(validate_setting("QR_STUDIO_PORT", "70000").is_err());
        assert!(validate_setting("QR_STUDIO_PORT", "http").is_err());
    }

    #[test]
    fn host_must_be_an_ip() {
        assert!(validate_setting("QR_STUDIO_HOST", "0.0.0.0").is_ok());
        assert!(validate_setting("QR_STUDIO_HOST", "::1").is_ok());
        assert!(validate_setting("QR_STUDIO_HOST", "localhost").is_err());
    }

    #[test]
    fn language_and_theme_use_known_codes() {
        assert!(validate_setting("DEFAULT_LANGUAGE", "fr").is_ok());
        assert!(validate_setting("DEFAULT_LANGUAGE", "de").is_err());
        assert!(validate_setting("DEFAULT_THEME", "dark").is_ok());
        assert!(validate_setting("DEFAULT_THEME", "sepia").is_err());
    }

    #[test]
    fn empty_file_name_is_rejected() {
        assert!(validate_setting("DEFAULT_FILE_NAME", "").is_err());
        assert!(validate_setting("DEFAULT_FILE_NAME", "qr-code").is_ok());
    }
}
