//! Typed access to JSON values held in a [`KeyValueStore`].
//!
//! Reads are best-effort: a value that fails to parse is treated as absent and
//! logged, so corrupt storage never blocks startup.

use crate::domain::error::{CompanyPlusError, Result};
use crate::storage::backend::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reads and decodes the JSON value under `key`.
///
/// Returns `None` when the key is absent or its value does not decode as `T`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "ignoring corrupt stored value");
            None
        }
    }
}

/// Encodes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns an error if serialization fails or the store cannot persist.
pub fn save_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| CompanyPlusError::Storage(format!("failed to serialize {key}: {e}")))?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Session;
    use crate::storage::MemoryStore;

    #[test]
    fn corrupt_value_reads_as_absent() {
        let mut store = MemoryStore::default();
        store.set("companyplus.session", "{\"logged_in\":").unwrap();

        let session: Option<Session> = load_json(&store, "companyplus.session");
        assert!(session.is_none());
    }

    #[test]
    fn saved_value_loads_back() {
        let mut store = MemoryStore::default();
        let session = Session {
            selected_profile: Some("profile_2".into()),
            ..Session::default()
        };
        save_json(&mut store, "companyplus.session", &session).unwrap();

        let loaded: Option<Session> = load_json(&store, "companyplus.session");
        assert_eq!(loaded, Some(session));
    }
}
