//! COMPANY+: a streaming-service demo shell hosted as a Zellij plugin.
//!
//! The crate holds the whole application core:
//! - Hash-style routing with access guards and a transition window
//! - Theme preference store with light, dark and auto schemes
//! - Translation tables for Spanish, English, Portuguese and French
//! - Toast notifications with expiry
//! - A decorative particle field behind the sign-in forms
//! - Form validation with debounced input
//! - A simulated account backend with synthetic latency and failures
//! - Viewer profiles persisted to a JSON store
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Keys, timers, pane title
//! └─────────────────────────────────────────────────────┘
//!                        │ Event            ▲ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event dispatch                                   │
//! │  - Wake scheduling                                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │              │              │             │
//! ┌────────────┐ ┌──────────────┐ ┌────────────┐ ┌──────────┐
//! │navigation/ │ │ session/     │ │ forms/     │ │ ui/      │
//! │ routes     │ │ backend      │ │ rules      │ │ theme    │
//! │ guards     │ │ profiles     │ │ debounce   │ │ render   │
//! │ history    │ │ persistence  │ │            │ │          │
//! └────────────┘ └──────────────┘ └────────────┘ └──────────┘
//!         │              │              │             │
//! ┌─────────────────────────────────────────────────────┐
//! │  i18n/, notifications/, particles/, storage/,       │
//! │  domain/, infrastructure/                           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans exported to a JSON file      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never calls the host. [`handle_event`] consumes an [`Event`],
//! mutates [`AppState`] and returns [`Action`]s for the host to run. The
//! screen is a pure projection of the state.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/companyplus.wasm" {
//!         language "en"
//!         theme "dark"
//!         failure_rate "0.1"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use companyplus::{handle_event, AppState, Config, Event, ViewId};
//! use companyplus::storage::Stores;
//!
//! let config = Config {
//!     rng_seed: Some(7),
//!     failure_rate: 0.0,
//!     ..Config::default()
//! };
//! let mut state = AppState::new(config, Stores::in_memory());
//!
//! let (_render, _actions) = handle_event(&mut state, &Event::Navigate { fragment: "#faq".into() })?;
//! assert_eq!(state.router.current(), ViewId::Faq);
//! # Ok::<(), companyplus::CompanyPlusError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod forms;
pub mod i18n;
pub mod infrastructure;
pub mod navigation;
pub mod notifications;
pub mod particles;
pub mod session;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Overlay};
pub use domain::{CompanyPlusError, Result, ViewId};
pub use ui::{ColorScheme, ThemePreference};

use crate::i18n::Language;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Every key is optional. Unparseable values fall back to the default and
/// are logged.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Interface language when nothing is stored. Default: `es`.
    pub language: Language,
    /// Language consulted when a key is missing. Default: `es`.
    pub fallback_language: Language,
    /// Theme preference when nothing is stored. Default: `auto`.
    pub theme: ThemePreference,
    /// Scheme assumed for `auto` until the host reports one. Default: `dark`.
    pub system_scheme: ColorScheme,
    /// Path to a custom TOML palette.
    pub palette_file: Option<String>,
    pub notification_timeout_ms: u64,
    pub max_notifications: usize,
    /// Whether the particle field may run at all.
    pub particles: bool,
    pub particle_count: usize,
    /// Length of the navigation transition window.
    pub transition_ms: u64,
    pub login_delay_ms: u64,
    pub register_delay_ms: u64,
    pub forgot_delay_ms: u64,
    /// Probability that a simulated request fails.
    pub failure_rate: f64,
    /// Debounce for form validation and dashboard search.
    pub debounce_ms: u64,
    /// Skip the profile picker when a profile is already selected.
    pub skip_profile_picker: bool,
    /// Tracing level: `trace`, `debug`, `info`, `warn` or `error`.
    pub trace_level: Option<String>,
    /// Seed for every random source; entropy when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::Es,
            fallback_language: Language::Es,
            theme: ThemePreference::Auto,
            system_scheme: ColorScheme::Dark,
            palette_file: None,
            notification_timeout_ms: 5000,
            max_notifications: 3,
            particles: true,
            particle_count: 50,
            transition_ms: 300,
            login_delay_ms: 1500,
            register_delay_ms: 2000,
            forgot_delay_ms: 1500,
            failure_rate: 0.1,
            debounce_ms: 300,
            skip_profile_picker: true,
            trace_level: None,
            rng_seed: None,
        }
    }
}

/// Parses `key` with `parse`, logging and falling back to `default` when the
/// value is present but invalid.
fn parse_or<T, F>(config: &BTreeMap<String, String>, key: &str, default: T, parse: F) -> T
where
    F: FnOnce(&str) -> Option<T>,
{
    match config.get(key) {
        None => default,
        Some(raw) => parse(raw.trim()).unwrap_or_else(|| {
            tracing::warn!(key, value = %raw, "invalid configuration value, using default");
            default
        }),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use companyplus::{Config, ThemePreference};
    /// use companyplus::i18n::Language;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("language".to_string(), "pt".to_string());
    /// map.insert("theme".to_string(), "light".to_string());
    /// map.insert("failure_rate".to_string(), "2.5".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.language, Language::Pt);
    /// assert_eq!(config.theme, ThemePreference::Light);
    /// assert!((config.failure_rate - 0.1).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let d = Self::default();

        let positive_u64 = |raw: &str| raw.parse::<u64>().ok();
        let probability = |raw: &str| {
            raw.parse::<f64>()
                .ok()
                .filter(|p| p.is_finite() && (0.0..=1.0).contains(p))
        };

        Self {
            language: parse_or(config, "language", d.language, Language::from_code),
            fallback_language: parse_or(
                config,
                "fallback_language",
                d.fallback_language,
                Language::from_code,
            ),
            theme: parse_or(config, "theme", d.theme, ThemePreference::parse),
            system_scheme: parse_or(config, "system_scheme", d.system_scheme, ColorScheme::parse),
            palette_file: config
                .get("palette_file")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(infrastructure::expand_tilde),
            notification_timeout_ms: parse_or(
                config,
                "notification_timeout_ms",
                d.notification_timeout_ms,
                positive_u64,
            ),
            max_notifications: parse_or(config, "max_notifications", d.max_notifications, |raw| {
                raw.parse::<usize>().ok().filter(|n| *n > 0)
            }),
            particles: parse_or(config, "particles", d.particles, parse_bool),
            particle_count: parse_or(config, "particle_count", d.particle_count, |raw| {
                raw.parse::<usize>().ok()
            }),
            transition_ms: parse_or(config, "transition_ms", d.transition_ms, positive_u64),
            login_delay_ms: parse_or(config, "login_delay_ms", d.login_delay_ms, positive_u64),
            register_delay_ms: parse_or(config, "register_delay_ms", d.register_delay_ms, positive_u64),
            forgot_delay_ms: parse_or(config, "forgot_delay_ms", d.forgot_delay_ms, positive_u64),
            failure_rate: parse_or(config, "failure_rate", d.failure_rate, probability),
            debounce_ms: parse_or(config, "debounce_ms", d.debounce_ms, positive_u64),
            skip_profile_picker: parse_or(
                config,
                "skip_profile_picker",
                d.skip_profile_picker,
                parse_bool,
            ),
            trace_level: config.get("trace_level").cloned(),
            rng_seed: config.get("rng_seed").and_then(|s| s.trim().parse().ok()),
        }
    }
}

/// Initializes the plugin with configuration.
///
/// Installs tracing (best-effort), opens the persistent store under the
/// plugin data directory and builds the [`AppState`]. Storage problems fall
/// back to in-memory stores.
pub fn initialize(config: &Config) -> AppState {
    observability::init_tracing(config);
    tracing::debug!("initializing companyplus plugin");

    let stores = match infrastructure::paths::data_dir() {
        Ok(dir) => storage::Stores::open(&dir),
        Err(e) => {
            tracing::warn!(error = %e, "no data directory, preferences will not persist");
            storage::Stores::in_memory()
        }
    };

    AppState::new(config.clone(), stores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("language", "klingon"),
            ("theme", "sepia"),
            ("max_notifications", "0"),
            ("particles", "maybe"),
            ("failure_rate", "NaN"),
        ]));
        let d = Config::default();
        assert_eq!(config.language, d.language);
        assert_eq!(config.theme, d.theme);
        assert_eq!(config.max_notifications, d.max_notifications);
        assert!(config.particles);
        assert!((config.failure_rate - d.failure_rate).abs() < f64::EPSILON);
    }

    #[test]
    fn valid_values_are_parsed() {
        let config = Config::from_zellij(&map(&[
            ("fallback_language", "en"),
            ("system_scheme", "light"),
            ("particles", "off"),
            ("transition_ms", "0"),
            ("skip_profile_picker", "false"),
            ("rng_seed", "42"),
            ("palette_file", "  "),
        ]));
        assert_eq!(config.fallback_language, Language::En);
        assert_eq!(config.system_scheme, ColorScheme::Light);
        assert!(!config.particles);
        assert_eq!(config.transition_ms, 0);
        assert!(!config.skip_profile_picker);
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.palette_file, None);
    }
}
