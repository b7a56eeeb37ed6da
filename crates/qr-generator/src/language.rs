//! English/French label tables.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

/// Static UI strings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub title: &'static str,
    pub content_label: &'static str,
    pub content_placeholder: &'static str,
    pub file_name_label: &'static str,
    pub file_name_placeholder: &'static str,
    pub download_button: &'static str,
    pub rights_reserved: &'static str,
}

const OWNER: &str = "KS Services";

const EN: Labels = Labels {
    title: "QR Code Generator",
    content_label: "Content",
    content_placeholder: "Enter text or URL",
    file_name_label: "File Name",
    file_name_placeholder: "Enter file name",
    download_button: "Download QR Code",
    rights_reserved: "All rights reserved.",
};

const FR: Labels = Labels {
    title: "Générateur de Code QR",
    content_label: "Contenu",
    content_placeholder: "Entrez du texte ou une URL",
    file_name_label: "Nom du fichier",
    file_name_placeholder: "Entrez le nom du fichier",
    download_button: "Télécharger le Code QR",
    rights_reserved: "Tous droits réservés.",
};

impl Labels {
    /// Footer line for the given year.
    pub fn footer_for_year(&self, year: i32) -> String {
        format!("© {year} {OWNER}. {}", self.rights_reserved)
    }

    /// Footer line for the current year.
    pub fn footer(&self) -> String {
        self.footer_for_year(chrono::Local::now().year())
    }
}

impl Language {
    /// The other supported language.
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Fr,
            Self::Fr => Self::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Self::En => &EN,
            Self::Fr => &FR,
        }
    }

    /// Caption of the language switch: the code it switches *to*.
    pub fn toggle_caption(self) -> &'static str {
        match self.toggled() {
            Self::En => "EN",
            Self::Fr => "FR",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            other => Err(format!("unsupported language '{other}' (expected 'en' or 'fr')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        for lang in [Language::En, Language::Fr] {
            assert_eq!(lang.toggled().toggled(), lang);
            assert_ne!(lang.toggled(), lang);
        }
    }

    #[test]
    fn labels_differ_per_language() {
        assert_eq!(Language::En.labels().title, "QR Code Generator");
        assert_eq!(Language::Fr.labels().title, "Générateur de Code QR");
        assert_eq!(Language::Fr.labels().download_button, "Télécharger le Code QR");
    }

    #[test]
    fn toggle_caption_names_the_other_language() {
        assert_eq!(Language::En.toggle_caption(), "FR");
        assert_eq!(Language::Fr.toggle_caption(), "EN");
    }

    #[test]
    fn footer_includes_year_and_owner() {
        assert_eq!(
            Language::En.labels().footer_for_year(2025),
            "© 2025 KS Services. All rights reserved."
        );
        assert_eq!(
            Language::Fr.labels().footer_for_year(2025),
            "© 2025 KS Services. Tous droits réservés."
        );
    }
}
