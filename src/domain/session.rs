//! Authenticated session model.
//!
//! A [`Session`] is created by a successful simulated login or registration and
//! cleared by logout. It is mirrored to local storage when the user asked to be
//! remembered and to session storage otherwise.

use serde::{Deserialize, Serialize};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    /// Builds a user whose display name is the local part of `email`.
    ///
    /// # Examples
    ///
    /// ```
    /// use companyplus::domain::User;
    ///
    /// let user = User::from_email("ana@example.com");
    /// assert_eq!(user.name, "ana");
    /// ```
    #[must_use]
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            name,
            email: email.to_string(),
        }
    }
}

/// Current authentication state.
///
/// The default value is the anonymous session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub logged_in: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub selected_profile: Option<String>,
    #[serde(default)]
    pub remember: bool,
}

impl Session {
    /// A logged-in session for `user`.
    #[must_use]
    pub const fn signed_in(user: User, remember: bool) -> Self {
        Self {
            logged_in: true,
            user: Some(user),
            selected_profile: None,
            remember,
        }
    }

    /// Whether a user is signed in. A stored record without a user counts as
    /// anonymous.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.logged_in && self.user.is_some()
    }

    #[must_use]
    pub const fn has_profile(&self) -> bool {
        self.selected_profile.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_name_is_local_part_of_email() {
        let user = User::from_email("maria.lopez@company.plus");
        assert_eq!(user.name, "maria.lopez");
        assert_eq!(user.email, "maria.lopez@company.plus");
    }

    #[test]
    fn logged_in_flag_without_user_is_anonymous() {
        let session = Session {
            logged_in: true,
            ..Session::default()
        };
        assert!(!session.is_authenticated());
    }

    #[test]
    fn stored_session_tolerates_missing_optional_fields() {
        let session: Session = serde_json::from_str(r#"{"logged_in":false}"#).unwrap();
        assert_eq!(session, Session::default());
    }
}
