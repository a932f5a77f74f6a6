//! Supported interface languages.

use serde::{Deserialize, Serialize};

/// An interface language, identified by its ISO 639-1 code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Pt,
    Fr,
}

impl Language {
    /// Every supported language in menu order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Es, Self::En, Self::Pt, Self::Fr]
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
            Self::Pt => "pt",
            Self::Fr => "fr",
        }
    }

    /// Parses a language code. Case and surrounding whitespace are ignored,
    /// as is a region suffix such as `-BR`.
    ///
    /// # Examples
    ///
    /// ```
    /// use companyplus::i18n::Language;
    ///
    /// assert_eq!(Language::from_code("pt-BR"), Some(Language::Pt));
    /// assert_eq!(Language::from_code("de"), None);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        Self::all().into_iter().find(|lang| lang.code() == primary)
    }

    /// The language's name written in that language.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Es => "Español",
            Self::En => "English",
            Self::Pt => "Português",
            Self::Fr => "Français",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in Language::all() {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn unknown_and_empty_codes_are_rejected() {
        assert_eq!(Language::from_code(""), None);
        assert_eq!(Language::from_code("zz"), None);
        assert_eq!(Language::from_code(" EN "), Some(Language::En));
    }
}
