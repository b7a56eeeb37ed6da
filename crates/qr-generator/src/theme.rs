//! Light/dark visual theme.

use std::fmt;
use std::str::FromStr;

use image_engine::QrColors;
use image_engine::image::Rgba;
use serde::{Deserialize, Serialize};

const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const BLACK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);
/// Dark neutral shade behind dark-theme graphics (#1f2937).
const SLATE: Rgba<u8> = Rgba([0x1f, 0x29, 0x37, 0xff]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// QR module colors: light on dark, or dark on light.
    pub fn qr_colors(self) -> QrColors {
        match self {
            Self::Light => QrColors {
                foreground: BLACK,
                background: WHITE,
            },
            Self::Dark => QrColors {
                foreground: WHITE,
                background: SLATE,
            },
        }
    }

    /// Opaque fill painted under exported rasters.
    pub fn export_background(self) -> Rgba<u8> {
        match self {
            Self::Light => WHITE,
            Self::Dark => SLATE,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}' (expected 'light' or 'dark')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_twice_is_identity() {
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn dark_theme_inverts_module_colors() {
        let dark = Theme::Dark.qr_colors();
        assert_eq!(dark.foreground, WHITE);
        assert_eq!(dark.background, SLATE);
        assert_eq!(Theme::Light.qr_colors().foreground, BLACK);
    }

    #[test]
    fn export_background_matches_theme() {
        assert_eq!(Theme::Light.export_background(), WHITE);
        assert_eq!(Theme::Dark.export_background(), Rgba([31, 41, 55, 255]));
    }

    #[test]
    fn parses_lowercase_names_only() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("Dark".parse::<Theme>().is_err());
    }
}
