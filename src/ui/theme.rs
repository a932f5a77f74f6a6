//! Theme preference store, colour palettes and ANSI escape generation.
//!
//! The [`ThemeStore`] owns the user's [`ThemePreference`] and resolves it to a
//! concrete [`ColorScheme`], consulting the host's scheme when the preference
//! is `Auto`. Every change is persisted and pushed synchronously to
//! subscribers before the setter returns.
//!
//! Palettes are TOML files, one per scheme:
//!
//! ```toml
//! name = "companyplus-dark"
//! scheme = "dark"
//!
//! [colors]
//! background = "#0b0f19"
//! surface = "#151b2b"
//! header_fg = "#f8fafc"
//! accent = "#0a97f7"
//! accent_fg = "#0b0f19"
//! text_normal = "#e2e8f0"
//! text_dim = "#64748b"
//! border = "#1e293b"
//! selection_fg = "#0b0f19"
//! selection_bg = "#0a97f7"
//! success = "#10b981"
//! error = "#ef4444"
//! warning = "#f59e0b"
//! info = "#38bdf8"
//! ```

use crate::domain::error::{CompanyPlusError, Result};
use crate::storage::{keys, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What the user asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    /// Follow the host's colour scheme.
    #[default]
    Auto,
}

impl ThemePreference {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    /// Next preference in the light → dark → auto cycle.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Auto,
            Self::Auto => Self::Light,
        }
    }
}

/// The scheme actually applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl ColorScheme {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Payload delivered to theme subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChange {
    pub preference: ThemePreference,
    pub scheme: ColorScheme,
}

/// Handle returned by [`ThemeStore::subscribe`].
pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&ThemeChange) + Send>;

/// Colour palette for one scheme.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Palette {
    pub name: String,
    pub scheme: ColorScheme,
    pub colors: PaletteColors,
}

/// Hex colours (e.g. `"#0a97f7"`) for every UI role.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaletteColors {
    pub background: String,
    pub surface: String,
    pub header_fg: String,
    pub accent: String,
    pub accent_fg: String,
    pub text_normal: String,
    pub text_dim: String,
    pub border: String,
    pub selection_fg: String,
    pub selection_bg: String,
    pub success: String,
    pub error: String,
    pub warning: String,
    pub info: String,
}

impl Palette {
    /// The bundled palette for `scheme`.
    ///
    /// Falls back to a hard-coded monochrome palette if the bundled TOML is
    /// unreadable, which keeps rendering alive.
    #[must_use]
    pub fn builtin(scheme: ColorScheme) -> Self {
        let source = match scheme {
            ColorScheme::Light => include_str!("../../themes/light.toml"),
            ColorScheme::Dark => include_str!("../../themes/dark.toml"),
        };

        Self::parse(source).unwrap_or_else(|e| {
            tracing::warn!(?scheme, error = %e, "bundled palette failed to parse");
            Self::monochrome(scheme)
        })
    }

    /// Parses a palette from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyPlusError::Theme`] on invalid syntax or missing fields.
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source)
            .map_err(|e| CompanyPlusError::Theme(format!("failed to parse palette TOML: {e}")))
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CompanyPlusError::Theme(format!("failed to read palette file: {e}")))?;
        Self::parse(&contents)
    }

    fn monochrome(scheme: ColorScheme) -> Self {
        let (bg, fg, dim) = match scheme {
            ColorScheme::Light => ("#ffffff", "#000000", "#808080"),
            ColorScheme::Dark => ("#000000", "#ffffff", "#808080"),
        };
        let c = |hex: &str| hex.to_string();

        Self {
            name: "monochrome".to_string(),
            scheme,
            colors: PaletteColors {
                background: c(bg),
                surface: c(bg),
                header_fg: c(fg),
                accent: c(fg),
                accent_fg: c(bg),
                text_normal: c(fg),
                text_dim: c(dim),
                border: c(dim),
                selection_fg: c(bg),
                selection_bg: c(fg),
                success: c(fg),
                error: c(fg),
                warning: c(fg),
                info: c(fg),
            },
        }
    }

    /// Converts a hex colour to RGB. Returns white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for `hex`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use companyplus::ui::Palette;
    ///
    /// assert_eq!(Palette::fg("#0a97f7"), "\u{1b}[38;2;10;151;247m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

/// Owns the theme preference, the palettes and the subscriber list.
pub struct ThemeStore {
    preference: ThemePreference,
    system: ColorScheme,
    light: Palette,
    dark: Palette,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
}

impl ThemeStore {
    /// Creates a store with bundled palettes.
    #[must_use]
    pub fn new(preference: ThemePreference, system: ColorScheme) -> Self {
        Self {
            preference,
            system,
            light: Palette::builtin(ColorScheme::Light),
            dark: Palette::builtin(ColorScheme::Dark),
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a store whose preference is read from `store`, falling back to
    /// `configured` when nothing valid is stored.
    #[must_use]
    pub fn restore(
        configured: ThemePreference,
        system: ColorScheme,
        store: &dyn KeyValueStore,
    ) -> Self {
        let stored = store.get(keys::THEME).and_then(|value| {
            let pref = ThemePreference::parse(&value);
            if pref.is_none() {
                tracing::warn!(value = %value, "ignoring invalid stored theme");
            }
            pref
        });

        Self::new(stored.unwrap_or(configured), system)
    }

    /// Replaces the palette for the palette's own scheme with one read from
    /// `path`. On failure the bundled palette stays and the error is logged.
    pub fn load_custom_palette(&mut self, path: &str) {
        match Palette::from_file(path) {
            Ok(palette) => {
                tracing::debug!(path = %path, name = %palette.name, "loaded custom palette");
                match palette.scheme {
                    ColorScheme::Light => self.light = palette,
                    ColorScheme::Dark => self.dark = palette,
                }
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "custom palette unavailable, using default");
            }
        }
    }

    #[must_use]
    pub const fn get(&self) -> ThemePreference {
        self.preference
    }

    /// The scheme in effect after resolving `Auto`.
    #[must_use]
    pub const fn resolved(&self) -> ColorScheme {
        match self.preference {
            ThemePreference::Light => ColorScheme::Light,
            ThemePreference::Dark => ColorScheme::Dark,
            ThemePreference::Auto => self.system,
        }
    }

    /// Document marker: the explicit preference, or `None` under `Auto`.
    #[must_use]
    pub const fn marker(&self) -> Option<&'static str> {
        match self.preference {
            ThemePreference::Light => Some("light"),
            ThemePreference::Dark => Some("dark"),
            ThemePreference::Auto => None,
        }
    }

    #[must_use]
    pub const fn palette(&self) -> &Palette {
        match self.resolved() {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    /// Applies `preference`, persists it and notifies every subscriber.
    ///
    /// A storage failure is logged; the preference still applies.
    pub fn set(&mut self, preference: ThemePreference, store: &mut dyn KeyValueStore) {
        let _span = tracing::debug_span!("theme_set", preference = preference.as_str()).entered();

        self.preference = preference;
        if let Err(e) = store.set(keys::THEME, preference.as_str()) {
            tracing::warn!(error = %e, "failed to persist theme");
        }
        self.notify();
    }

    /// Advances light → dark → auto → light. Returns the new preference.
    pub fn toggle(&mut self, store: &mut dyn KeyValueStore) -> ThemePreference {
        let next = self.preference.cycle();
        self.set(next, store);
        next
    }

    /// Records the host's scheme. Subscribers hear about it only when the
    /// preference is `Auto` and the effective scheme actually changed.
    pub fn set_system_scheme(&mut self, scheme: ColorScheme) {
        let before = self.resolved();
        self.system = scheme;

        if self.preference == ThemePreference::Auto && before != self.resolved() {
            tracing::debug!(?scheme, "system scheme changed");
            self.notify();
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ThemeChange) + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a subscriber. Returns `false` for an unknown id.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let change = ThemeChange {
            preference: self.preference,
            scheme: self.resolved(),
        };
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("preference", &self.preference)
            .field("system", &self.system)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::{Arc, Mutex};

    #[test]
    fn bundled_palettes_parse() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let source = match scheme {
                ColorScheme::Light => include_str!("../../themes/light.toml"),
                ColorScheme::Dark => include_str!("../../themes/dark.toml"),
            };
            let palette = Palette::parse(source).unwrap();
            assert_eq!(palette.scheme, scheme);
        }
    }

    #[test]
    fn toggle_cycles_and_persists() {
        let mut store = MemoryStore::default();
        let mut theme = ThemeStore::new(ThemePreference::Light, ColorScheme::Dark);

        assert_eq!(theme.toggle(&mut store), ThemePreference::Dark);
        assert_eq!(theme.toggle(&mut store), ThemePreference::Auto);
        assert_eq!(theme.marker(), None);
        assert_eq!(store.get(keys::THEME).as_deref(), Some("auto"));
        assert_eq!(theme.toggle(&mut store), ThemePreference::Light);
        assert_eq!(theme.marker(), Some("light"));
    }

    #[test]
    fn subscribers_hear_changes_before_set_returns() {
        let mut store = MemoryStore::default();
        let mut theme = ThemeStore::new(ThemePreference::Auto, ColorScheme::Light);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let id = theme.subscribe(move |change| sink.lock().unwrap().push(change.scheme));

        theme.set(ThemePreference::Dark, &mut store);
        assert_eq!(*seen.lock().unwrap(), vec![ColorScheme::Dark]);

        assert!(theme.unsubscribe(id));
        assert!(!theme.unsubscribe(id));
        theme.set(ThemePreference::Light, &mut store);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn system_scheme_only_notifies_under_auto() {
        let mut theme = ThemeStore::new(ThemePreference::Dark, ColorScheme::Dark);
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        theme.subscribe(move |_| *sink.lock().unwrap() += 1);

        theme.set_system_scheme(ColorScheme::Light);
        assert_eq!(*count.lock().unwrap(), 0);
        assert_eq!(theme.resolved(), ColorScheme::Dark);

        let mut store = MemoryStore::default();
        theme.set(ThemePreference::Auto, &mut store);
        assert_eq!(theme.resolved(), ColorScheme::Light);

        theme.set_system_scheme(ColorScheme::Light);
        assert_eq!(*count.lock().unwrap(), 1);
        theme.set_system_scheme(ColorScheme::Dark);
        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn invalid_stored_theme_is_ignored() {
        let mut store = MemoryStore::default();
        store.set(keys::THEME, "sepia").unwrap();

        let theme = ThemeStore::restore(ThemePreference::Light, ColorScheme::Dark, &store);
        assert_eq!(theme.get(), ThemePreference::Light);
    }

    #[test]
    fn missing_custom_palette_keeps_default() {
        let mut theme = ThemeStore::new(ThemePreference::Dark, ColorScheme::Dark);
        theme.load_custom_palette("/nonexistent/palette.toml");
        assert_eq!(theme.palette().name, "companyplus-dark");
    }

    #[test]
    fn bad_hex_renders_white() {
        assert_eq!(Palette::fg("#zz"), "\u{1b}[38;2;255;255;255m");
    }
}
