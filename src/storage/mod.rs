//! Storage layer for preferences, session and profiles.
//!
//! Two stores mirror the browser model: `local` persists across restarts
//! (JSON file) and `session` lives as long as the plugin instance (memory).
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait
//! - `json`: JSON file store with atomic writes
//! - `memory`: in-memory store
//! - `prefs`: typed JSON helpers over any store

pub mod backend;
pub mod json;
pub mod memory;
pub mod prefs;

pub use backend::KeyValueStore;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use prefs::{load_json, save_json};

use std::path::Path;

/// Storage keys shared by every component.
pub mod keys {
    pub const THEME: &str = "companyplus.theme";
    pub const LANGUAGE: &str = "companyplus.language";
    pub const SESSION: &str = "companyplus.session";
    pub const CURRENT_PROFILE: &str = "companyplus.current_profile";
    pub const PROFILES: &str = "companyplus.profiles";
}

/// The pair of stores owned by the application.
pub struct Stores {
    pub local: Box<dyn KeyValueStore>,
    pub session: Box<dyn KeyValueStore>,
}

impl Stores {
    /// Two empty in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            local: Box::new(MemoryStore::default()),
            session: Box::new(MemoryStore::default()),
        }
    }

    /// Opens `local.json` under `data_dir` as the persistent store.
    ///
    /// Falls back to memory when the file cannot be opened, so a corrupt or
    /// unreadable file only costs persistence.
    #[must_use]
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join("local.json");
        let local: Box<dyn KeyValueStore> = match JsonStore::new(path) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "local store unavailable, using memory");
                Box::new(MemoryStore::default())
            }
        };

        Self {
            local,
            session: Box::new(MemoryStore::default()),
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
