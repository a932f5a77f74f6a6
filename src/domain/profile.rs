//! Viewer profiles.
//!
//! Each account carries up to [`MAX_PROFILES`] profiles. A profile may restrict
//! the catalog to kid-safe titles and may carry a preferred interface language.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of profiles per account.
pub const MAX_PROFILES: usize = 5;

/// Content rating a profile is allowed to see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    #[default]
    Adult,
    Kids,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePreferences {
    /// Interface language applied when the profile is selected.
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub maturity: Maturity,
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
}

const fn default_autoplay() -> bool {
    true
}

impl ProfilePreferences {
    #[must_use]
    pub const fn for_kid(is_kid: bool) -> Self {
        Self {
            language: None,
            maturity: if is_kid { Maturity::Kids } else { Maturity::Adult },
            autoplay: true,
        }
    }
}

/// A viewer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// Single glyph shown in the picker.
    pub avatar: String,
    #[serde(default)]
    pub is_kid: bool,
    pub preferences: ProfilePreferences,
}

impl Profile {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_kid: bool) -> Self {
        let name = name.into();
        let avatar = name
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().to_string());

        Self {
            id: id.into(),
            name,
            avatar,
            is_kid,
            preferences: ProfilePreferences::for_kid(is_kid),
        }
    }

    /// The two profiles every fresh account starts with.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        let mut kids = Self::new("profile_2", "Niños", true);
        kids.preferences.autoplay = false;
        vec![Self::new("profile_1", "Usuario Principal", false), kids]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_contain_main_and_kids_profiles() {
        let profiles = Profile::defaults();
        assert_eq!(profiles.len(), 2);
        assert!(!profiles[0].is_kid);
        assert!(profiles[1].is_kid);
        assert_eq!(profiles[1].preferences.maturity, Maturity::Kids);
        assert_eq!(profiles[1].avatar, "N");
    }

    #[test]
    fn missing_preference_fields_use_defaults() {
        let raw = r#"{"id":"p","name":"Ana","avatar":"A","preferences":{}}"#;
        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.preferences.language, None);
        assert!(profile.preferences.autoplay);
        assert!(!profile.is_kid);
    }
}
