//! Key-value store abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that stands in for the
//! browser's `localStorage` and `sessionStorage`. Values are opaque strings;
//! typed access goes through [`crate::storage::prefs`].

use crate::domain::error::Result;

/// Abstraction over persistent string key-value backends.
///
/// # Implementations
///
/// - [`JsonStore`](crate::storage::JsonStore): JSON file with atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): process-lifetime map
///
/// # Examples
///
/// ```
/// use companyplus::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("companyplus.theme", "dark")?;
/// assert_eq!(store.get("companyplus.theme").as_deref(), Some("dark"));
/// # Ok::<(), companyplus::CompanyPlusError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the change.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the change.
    fn remove(&mut self, key: &str) -> Result<()>;
}
