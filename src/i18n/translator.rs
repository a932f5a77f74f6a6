//! Translation table with fallback lookup.
//!
//! Catalogs are flat TOML tables of `key = "text"` embedded at compile time.
//! Lookup goes active language, then fallback language, then the key itself,
//! so a missing entry degrades to a visible key instead of an error.

use crate::domain::error::{CompanyPlusError, Result};
use crate::i18n::Language;
use crate::storage::{keys, KeyValueStore};
use std::collections::{BTreeMap, HashMap};

const ES: &str = include_str!("../../locales/es.toml");
const EN: &str = include_str!("../../locales/en.toml");
const PT: &str = include_str!("../../locales/pt.toml");
const FR: &str = include_str!("../../locales/fr.toml");

type Catalog = HashMap<String, String>;

/// Parses a flat TOML catalog.
///
/// # Errors
///
/// Returns [`CompanyPlusError::Locale`] when the source is not valid TOML or
/// holds non-string values.
pub fn parse_catalog(source: &str) -> Result<Catalog> {
    toml::from_str(source).map_err(|e| CompanyPlusError::Locale(e.to_string()))
}

/// Bundled catalog source for `lang`.
const fn bundled(lang: Language) -> &'static str {
    match lang {
        Language::Es => ES,
        Language::En => EN,
        Language::Pt => PT,
        Language::Fr => FR,
    }
}

/// Active language plus every loaded catalog.
#[derive(Debug, Clone)]
pub struct Translator {
    catalogs: BTreeMap<Language, Catalog>,
    current: Language,
    fallback: Language,
}

impl Translator {
    /// Loads the bundled catalogs.
    ///
    /// A catalog that fails to parse is replaced by an empty one and logged;
    /// lookups then fall through to the fallback language or the key.
    #[must_use]
    pub fn new(current: Language, fallback: Language) -> Self {
        let catalogs = Language::all()
            .into_iter()
            .map(|lang| {
                let catalog = parse_catalog(bundled(lang)).unwrap_or_else(|e| {
                    tracing::warn!(language = %lang, error = %e, "failed to parse bundled catalog");
                    Catalog::new()
                });
                (lang, catalog)
            })
            .collect();

        Self {
            catalogs,
            current,
            fallback,
        }
    }

    /// Builds a translator whose language is read from `store`, falling back
    /// to `configured` when nothing valid is stored.
    #[must_use]
    pub fn restore(configured: Language, fallback: Language, store: &dyn KeyValueStore) -> Self {
        let stored = store.get(keys::LANGUAGE).and_then(|code| {
            let lang = Language::from_code(&code);
            if lang.is_none() {
                tracing::warn!(code = %code, "ignoring unsupported stored language");
            }
            lang
        });

        Self::new(stored.unwrap_or(configured), fallback)
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.current
    }

    /// Translates `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use companyplus::i18n::{Language, Translator};
    ///
    /// let tr = Translator::new(Language::En, Language::Es);
    /// assert_eq!(tr.t("nav_home"), "Home");
    /// assert_eq!(tr.t("no_such_key"), "no_such_key");
    /// ```
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.lookup(self.current, key)
            .or_else(|| self.lookup(self.fallback, key))
            .unwrap_or(key)
            .to_string()
    }

    /// Translates `key` and substitutes `{name}` placeholders.
    #[must_use]
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.t(key), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }

    fn lookup(&self, lang: Language, key: &str) -> Option<&str> {
        self.catalogs
            .get(&lang)
            .and_then(|catalog| catalog.get(key))
            .map(String::as_str)
    }

    /// Switches to the language named by `code` and persists the choice.
    ///
    /// Returns `false` without changing anything when the code is not
    /// supported. A storage failure is logged; the switch still applies.
    pub fn set_language(&mut self, code: &str, store: &mut dyn KeyValueStore) -> bool {
        let Some(lang) = Language::from_code(code) else {
            tracing::warn!(code = %code, "unsupported language, keeping current");
            return false;
        };

        tracing::debug!(from = %self.current, to = %lang, "switching language");
        self.current = lang;

        if let Err(e) = store.set(keys::LANGUAGE, lang.code()) {
            tracing::warn!(error = %e, "failed to persist language");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn bundled_catalogs_parse() {
        for lang in Language::all() {
            let catalog = parse_catalog(bundled(lang)).unwrap();
            assert!(!catalog.is_empty(), "{lang}");
        }
    }

    #[test]
    fn primary_catalog_covers_every_other_catalog() {
        let es = parse_catalog(ES).unwrap();
        for lang in [Language::En, Language::Pt, Language::Fr] {
            for key in parse_catalog(bundled(lang)).unwrap().keys() {
                assert!(es.contains_key(key), "{lang} has extra key {key}");
            }
        }
    }

    #[test]
    fn partial_catalog_falls_back() {
        let tr = Translator::new(Language::Fr, Language::Es);
        assert!(tr.lookup(Language::Fr, "terms_use").is_none());
        assert_eq!(tr.t("terms_use"), Translator::new(Language::Es, Language::Es).t("terms_use"));
    }

    #[test]
    fn placeholders_are_substituted() {
        let tr = Translator::new(Language::En, Language::Es);
        assert_eq!(
            tr.t_with("validation_min_length", &[("n", "8")]),
            "Must be at least 8 characters"
        );
    }

    #[test]
    fn unsupported_language_is_a_no_op() {
        let mut store = MemoryStore::default();
        let mut tr = Translator::new(Language::Es, Language::Es);

        assert!(!tr.set_language("de", &mut store));
        assert_eq!(tr.language(), Language::Es);
        assert!(store.get(keys::LANGUAGE).is_none());
    }

    #[test]
    fn switch_persists_and_restores() {
        let mut store = MemoryStore::default();
        let mut tr = Translator::new(Language::Es, Language::Es);

        assert!(tr.set_language("en", &mut store));

        let restored = Translator::restore(Language::Es, Language::Es, &store);
        assert_eq!(restored.language(), Language::En);
    }

    #[test]
    fn invalid_stored_language_uses_configured() {
        let mut store = MemoryStore::default();
        store.set(keys::LANGUAGE, "klingon").unwrap();

        let tr = Translator::restore(Language::Pt, Language::Es, &store);
        assert_eq!(tr.language(), Language::Pt);
    }
}
