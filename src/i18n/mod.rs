//! Internationalization: supported languages and the translation table.

pub mod language;
pub mod translator;

pub use language::Language;
pub use translator::{parse_catalog, Translator};
