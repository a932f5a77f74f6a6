//! Session mirroring to the local and session stores.
//!
//! A remembered session lives in local storage and survives restarts; any
//! other session lives in session storage. Restore prefers local.

use crate::domain::Session;
use crate::storage::{keys, load_json, save_json, Stores};

/// Reads the stored session. Corrupt or anonymous records count as absent.
#[must_use]
pub fn restore_session(stores: &Stores) -> Session {
    load_json::<Session>(stores.local.as_ref(), keys::SESSION)
        .filter(Session::is_authenticated)
        .or_else(|| {
            load_json::<Session>(stores.session.as_ref(), keys::SESSION)
                .filter(Session::is_authenticated)
        })
        .unwrap_or_default()
}

/// Mirrors `session` into the store selected by its `remember` flag.
pub fn persist_session(stores: &mut Stores, session: &Session) {
    let store = if session.remember {
        stores.local.as_mut()
    } else {
        stores.session.as_mut()
    };

    if let Err(e) = save_json(store, keys::SESSION, session) {
        tracing::warn!(error = %e, "failed to persist session");
    }
}

/// Removes the session and selected profile from both stores.
pub fn clear_session(stores: &mut Stores) {
    for store in [stores.local.as_mut(), stores.session.as_mut()] {
        for key in [keys::SESSION, keys::CURRENT_PROFILE] {
            if let Err(e) = store.remove(key) {
                tracing::warn!(key, error = %e, "failed to clear stored session");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    #[test]
    fn remembered_session_goes_to_local_store() {
        let mut stores = Stores::in_memory();
        let session = Session::signed_in(User::from_email("ana@example.com"), true);
        persist_session(&mut stores, &session);

        assert!(stores.local.get(keys::SESSION).is_some());
        assert!(stores.session.get(keys::SESSION).is_none());
        assert_eq!(restore_session(&stores), session);
    }

    #[test]
    fn unremembered_session_goes_to_session_store() {
        let mut stores = Stores::in_memory();
        let session = Session::signed_in(User::from_email("ana@example.com"), false);
        persist_session(&mut stores, &session);

        assert!(stores.local.get(keys::SESSION).is_none());
        assert_eq!(restore_session(&stores), session);
    }

    #[test]
    fn corrupt_local_falls_back_to_session_store() {
        let mut stores = Stores::in_memory();
        stores.local.set(keys::SESSION, "garbage").unwrap();
        let session = Session::signed_in(User::from_email("bo@example.com"), false);
        persist_session(&mut stores, &session);

        assert_eq!(restore_session(&stores), session);
    }

    #[test]
    fn clear_removes_every_mirror() {
        let mut stores = Stores::in_memory();
        persist_session(&mut stores, &Session::signed_in(User::from_email("a@b.co"), true));
        persist_session(&mut stores, &Session::signed_in(User::from_email("a@b.co"), false));
        clear_session(&mut stores);

        assert_eq!(restore_session(&stores), Session::default());
    }
}
