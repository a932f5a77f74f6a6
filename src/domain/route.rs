//! View identifiers and the static route records that describe them.
//!
//! A [`Route`] binds a URL fragment to a [`ViewId`] together with the flags the
//! router needs: whether the view is guarded, whether it is one of the
//! authentication forms, and which chrome (header, particles) it shows.

use serde::{Deserialize, Serialize};

/// One full-screen section of the application.
///
/// Views are mutually exclusive: exactly one is visible at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    Home,
    Login,
    Register,
    ForgotPassword,
    Profiles,
    Dashboard,
    Support,
    Faq,
    Security,
    Settings,
    Terms,
}

impl ViewId {
    /// Every view in display order.
    pub const ALL: [Self; 11] = [
        Self::Home,
        Self::Login,
        Self::Register,
        Self::ForgotPassword,
        Self::Profiles,
        Self::Dashboard,
        Self::Support,
        Self::Faq,
        Self::Security,
        Self::Settings,
        Self::Terms,
    ];

    /// Canonical fragment for this view (without the leading `#`).
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::ForgotPassword => "forgot-password",
            Self::Profiles => "profiles",
            Self::Dashboard => "dashboard",
            Self::Support => "support",
            Self::Faq => "faq",
            Self::Security => "security",
            Self::Settings => "settings",
            Self::Terms => "terms",
        }
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Static description of a navigable view.
///
/// Routes are defined once at startup by
/// [`RouteTable`](crate::navigation::RouteTable) and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Fragment key, e.g. `forgot-password`.
    pub path: &'static str,
    /// View shown when this route is active.
    pub view: ViewId,
    /// Translation key of the document title.
    pub title_key: &'static str,
    /// Unreachable without a logged-in session.
    pub requires_auth: bool,
    /// One of the login/register/recovery forms.
    pub auth_view: bool,
    /// Whether the top navigation header is rendered.
    pub show_header: bool,
    /// Whether the decorative particle field runs behind the view.
    pub show_particles: bool,
}

impl Route {
    /// Builds the route record for `view`.
    #[must_use]
    pub const fn for_view(view: ViewId) -> Self {
        let (title_key, requires_auth, auth_view, show_header, show_particles) = match view {
            ViewId::Home => ("title_home", false, false, true, false),
            ViewId::Login => ("title_login", false, true, false, true),
            ViewId::Register => ("title_register", false, true, false, true),
            ViewId::ForgotPassword => ("title_forgot_password", false, true, false, true),
            ViewId::Profiles => ("title_profiles", true, false, false, false),
            ViewId::Dashboard => ("title_dashboard", true, false, false, false),
            ViewId::Support => ("title_support", false, false, true, false),
            ViewId::Faq => ("title_faq", false, false, true, false),
            ViewId::Security => ("title_security", false, false, true, false),
            ViewId::Settings => ("title_settings", false, false, true, false),
            ViewId::Terms => ("title_terms", false, false, true, false),
        };

        Self {
            path: view.path(),
            view,
            title_key,
            requires_auth,
            auth_view,
            show_header,
            show_particles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_views_hide_header_and_show_particles() {
        for view in [ViewId::Login, ViewId::Register, ViewId::ForgotPassword] {
            let route = Route::for_view(view);
            assert!(route.auth_view);
            assert!(!route.show_header);
            assert!(route.show_particles);
            assert!(!route.requires_auth);
        }
    }

    #[test]
    fn only_profiles_and_dashboard_are_guarded() {
        let guarded: Vec<ViewId> = ViewId::ALL
            .iter()
            .copied()
            .filter(|v| Route::for_view(*v).requires_auth)
            .collect();
        assert_eq!(guarded, vec![ViewId::Profiles, ViewId::Dashboard]);
    }
}
