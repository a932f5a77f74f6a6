//! Access guards applied before a navigation commits.
//!
//! At most one rule fires, checked in order:
//!
//! 1. a guarded view without a session goes to login, with a warning
//! 2. an auth form with a session goes to profiles, or to the dashboard once
//!    a profile is selected
//! 3. the profile picker goes to the dashboard when a profile is already
//!    selected and the picker is configured to be skipped

use crate::domain::{Route, Session, ViewId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardPolicy {
    pub skip_profile_picker: bool,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            skip_profile_picker: true,
        }
    }
}

/// Where a guarded navigation ends up instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: ViewId,
    /// Translation key of a warning to surface, if any.
    pub notice_key: Option<&'static str>,
}

/// Decides whether navigating to `target` must be redirected.
#[must_use]
pub fn evaluate(target: &Route, session: &Session, policy: &GuardPolicy) -> Option<Redirect> {
    let authenticated = session.is_authenticated();

    if target.requires_auth && !authenticated {
        return Some(Redirect {
            to: ViewId::Login,
            notice_key: Some("msg_auth_required"),
        });
    }

    if target.auth_view && authenticated {
        let to = if session.has_profile() {
            ViewId::Dashboard
        } else {
            ViewId::Profiles
        };
        return Some(Redirect { to, notice_key: None });
    }

    if target.view == ViewId::Profiles && session.has_profile() && policy.skip_profile_picker {
        return Some(Redirect {
            to: ViewId::Dashboard,
            notice_key: None,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    fn signed_in(profile: Option<&str>) -> Session {
        Session {
            selected_profile: profile.map(String::from),
            ..Session::signed_in(User::from_email("ana@example.com"), false)
        }
    }

    #[test]
    fn anonymous_dashboard_goes_to_login_with_warning() {
        let redirect = evaluate(
            &Route::for_view(ViewId::Dashboard),
            &Session::default(),
            &GuardPolicy::default(),
        );
        assert_eq!(
            redirect,
            Some(Redirect {
                to: ViewId::Login,
                notice_key: Some("msg_auth_required")
            })
        );
    }

    #[test]
    fn signed_in_user_skips_auth_forms() {
        let policy = GuardPolicy::default();
        let login = Route::for_view(ViewId::Login);
        assert_eq!(evaluate(&login, &signed_in(None), &policy).map(|r| r.to), Some(ViewId::Profiles));
        assert_eq!(
            evaluate(&login, &signed_in(Some("profile_1")), &policy).map(|r| r.to),
            Some(ViewId::Dashboard)
        );
    }

    #[test]
    fn profile_picker_skip_follows_policy() {
        let profiles = Route::for_view(ViewId::Profiles);
        let session = signed_in(Some("profile_1"));

        assert_eq!(
            evaluate(&profiles, &session, &GuardPolicy::default()).map(|r| r.to),
            Some(ViewId::Dashboard)
        );
        assert_eq!(
            evaluate(&profiles, &session, &GuardPolicy { skip_profile_picker: false }),
            None
        );
    }

    #[test]
    fn public_views_are_never_redirected() {
        let policy = GuardPolicy::default();
        for view in [ViewId::Home, ViewId::Faq, ViewId::Terms, ViewId::Settings] {
            assert_eq!(evaluate(&Route::for_view(view), &Session::default(), &policy), None);
            assert_eq!(evaluate(&Route::for_view(view), &signed_in(None), &policy), None);
        }
    }
}
