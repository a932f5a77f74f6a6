//! Profile management.
//!
//! Profiles persist in local storage as a JSON array; the selected profile id
//! persists in session storage. Missing or corrupt profile data falls back to
//! the two default profiles.

use crate::domain::error::{CompanyPlusError, Result};
use crate::domain::{Profile, MAX_PROFILES};
use crate::storage::{keys, load_json, save_json, KeyValueStore};

#[derive(Debug, Clone)]
pub struct ProfileManager {
    profiles: Vec<Profile>,
}

impl ProfileManager {
    /// Loads profiles from `local`, or the defaults when none are usable.
    #[must_use]
    pub fn load(local: &dyn KeyValueStore) -> Self {
        let profiles = load_json::<Vec<Profile>>(local, keys::PROFILES)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| {
                tracing::debug!("no stored profiles, using defaults");
                Profile::defaults()
            });

        tracing::debug!(count = profiles.len(), "profiles loaded");
        Self { profiles }
    }

    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.profiles.len() >= MAX_PROFILES
    }

    /// Stored selection, if it still names an existing profile.
    #[must_use]
    pub fn restore_selection(&self, session: &dyn KeyValueStore) -> Option<String> {
        session
            .get(keys::CURRENT_PROFILE)
            .filter(|id| self.get(id).is_some())
    }

    /// Marks `id` as the current profile.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyPlusError::Profile`] for an unknown id.
    pub fn select(&self, id: &str, session: &mut dyn KeyValueStore) -> Result<&Profile> {
        let _span = tracing::debug_span!("select_profile", id = %id).entered();

        let profile = self
            .get(id)
            .ok_or_else(|| CompanyPlusError::Profile(format!("unknown profile: {id}")))?;
        session.set(keys::CURRENT_PROFILE, &profile.id)?;
        Ok(profile)
    }

    pub fn clear_selection(session: &mut dyn KeyValueStore) {
        if let Err(e) = session.remove(keys::CURRENT_PROFILE) {
            tracing::warn!(error = %e, "failed to clear selected profile");
        }
    }

    /// Adds a profile with an id derived from the wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyPlusError::Profile`] when the limit is reached or the
    /// name is blank, and a storage error if persisting fails.
    pub fn create(&mut self, name: &str, is_kid: bool, local: &mut dyn KeyValueStore) -> Result<&Profile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CompanyPlusError::Profile("profile name is empty".into()));
        }
        if self.is_full() {
            return Err(CompanyPlusError::Profile(format!(
                "profile limit of {MAX_PROFILES} reached"
            )));
        }

        let id = self.fresh_id(chrono::Utc::now().timestamp_millis());
        tracing::debug!(id = %id, is_kid, "creating profile");

        self.profiles.push(Profile::new(id, name, is_kid));
        if let Err(e) = self.save(local) {
            self.profiles.pop();
            return Err(e);
        }

        let index = self.profiles.len() - 1;
        Ok(&self.profiles[index])
    }

    /// `profile_<millis>`, bumped until unused.
    fn fresh_id(&self, millis: i64) -> String {
        let mut stamp = millis;
        loop {
            let id = format!("profile_{stamp}");
            if self.get(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }

    /// Renames `id`. The old name is kept if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyPlusError::Profile`] for an unknown id or blank name,
    /// and a storage error if persisting fails.
    pub fn rename(&mut self, id: &str, name: &str, local: &mut dyn KeyValueStore) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CompanyPlusError::Profile("profile name is empty".into()));
        }

        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CompanyPlusError::Profile(format!("unknown profile: {id}")))?;
        let previous = std::mem::replace(&mut profile.name, name.to_string());

        if let Err(e) = self.save(local) {
            if let Some(profile) = self.profiles.iter_mut().find(|p| p.id == id) {
                profile.name = previous;
            }
            return Err(e);
        }
        tracing::debug!(id = %id, "profile renamed");
        Ok(())
    }

    /// Deletes a profile. The last remaining profile cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyPlusError::Profile`] for an unknown id or when only
    /// one profile is left.
    pub fn delete(&mut self, id: &str, local: &mut dyn KeyValueStore) -> Result<Profile> {
        if self.profiles.len() <= 1 {
            return Err(CompanyPlusError::Profile("cannot delete the last profile".into()));
        }

        let index = self
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CompanyPlusError::Profile(format!("unknown profile: {id}")))?;

        let removed = self.profiles.remove(index);
        if let Err(e) = self.save(local) {
            self.profiles.insert(index, removed);
            return Err(e);
        }
        tracing::debug!(id = %id, "profile deleted");
        Ok(removed)
    }

    fn save(&self, local: &mut dyn KeyValueStore) -> Result<()> {
        save_json(local, keys::PROFILES, &self.profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::storage::MemoryStore;

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(CompanyPlusError::Storage("read-only".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(CompanyPlusError::Storage("read-only".into()))
        }
    }

    #[test]
    fn corrupt_storage_yields_defaults() {
        let mut local = MemoryStore::default();
        local.set(keys::PROFILES, "[{\"id\":").unwrap();
        assert_eq!(ProfileManager::load(&local).profiles(), Profile::defaults().as_slice());
    }

    #[test]
    fn empty_list_yields_defaults() {
        let mut local = MemoryStore::default();
        local.set(keys::PROFILES, "[]").unwrap();
        assert_eq!(ProfileManager::load(&local).len(), 2);
    }

    #[test]
    fn create_is_capped() {
        let mut local = MemoryStore::default();
        let mut manager = ProfileManager::load(&local);
        for name in ["Ana", "Bo", "Cy"] {
            manager.create(name, false, &mut local).unwrap();
        }
        assert!(manager.is_full());

        let err = manager.create("Di", false, &mut local).unwrap_err();
        assert!(matches!(err, CompanyPlusError::Profile(_)));
        assert_eq!(ProfileManager::load(&local).len(), MAX_PROFILES);
    }

    #[test]
    fn created_ids_are_unique_and_prefixed() {
        let mut local = MemoryStore::default();
        let mut manager = ProfileManager::load(&local);
        let a = manager.create("Ana", false, &mut local).unwrap().id.clone();
        let b = manager.create("Bo", true, &mut local).unwrap().id.clone();

        assert!(a.starts_with("profile_"));
        assert_ne!(a, b);
        assert!(manager.get(&b).is_some_and(|p| p.is_kid));
    }

    #[test]
    fn last_profile_survives_delete() {
        let mut local = MemoryStore::default();
        let mut manager = ProfileManager::load(&local);
        manager.delete("profile_2", &mut local).unwrap();
        assert!(manager.delete("profile_1", &mut local).is_err());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn selection_persists_and_is_validated() {
        let mut local = MemoryStore::default();
        let mut session = MemoryStore::default();
        let mut manager = ProfileManager::load(&local);

        assert!(manager.select("nope", &mut session).is_err());
        manager.select("profile_2", &mut session).unwrap();
        assert_eq!(manager.restore_selection(&session).as_deref(), Some("profile_2"));

        manager.delete("profile_2", &mut local).unwrap();
        assert_eq!(manager.restore_selection(&session), None);
    }

    #[test]
    fn rename_persists() {
        let mut local = MemoryStore::default();
        let mut manager = ProfileManager::load(&local);
        manager.rename("profile_1", " Ana ", &mut local).unwrap();

        let reloaded = ProfileManager::load(&local);
        assert_eq!(reloaded.get("profile_1").map(|p| p.name.as_str()), Some("Ana"));
        assert_eq!(reloaded.get("profile_1").and_then(|p| p.preferences.language), None::<Language>);
    }

    #[test]
    fn failed_save_leaves_profiles_untouched() {
        let mut manager = ProfileManager::load(&ReadOnlyStore);
        let before = manager.profiles().to_vec();

        assert!(manager.create("Ana", false, &mut ReadOnlyStore).is_err());
        assert!(manager.rename("profile_1", "Ana", &mut ReadOnlyStore).is_err());
        assert!(manager.delete("profile_2", &mut ReadOnlyStore).is_err());

        assert_eq!(manager.profiles(), before.as_slice());
    }
}
