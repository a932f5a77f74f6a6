//! Transition-aware router.
//!
//! A committed navigation opens a transition window of `transition_ms`.
//! Requests arriving inside that window are dropped, not queued, which keeps
//! double activations from stacking views. [`Router::settle`] closes the
//! window once the clock passes it.

use crate::domain::{Route, Session, ViewId};
use crate::navigation::guard::{self, GuardPolicy, Redirect};
use crate::navigation::table::RouteTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current: ViewId,
    pub previous: Option<ViewId>,
    pub transitioning: bool,
    pub transition_until: Option<u64>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current: ViewId::Home,
            previous: None,
            transitioning: false,
            transition_until: None,
        }
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// A transition was in flight; nothing happened.
    Dropped,
    /// The (possibly redirected) target is already current.
    Unchanged { redirect: Option<Redirect> },
    Committed {
        from: ViewId,
        to: ViewId,
        redirect: Option<Redirect>,
    },
}

impl NavOutcome {
    #[must_use]
    pub const fn redirect(&self) -> Option<Redirect> {
        match self {
            Self::Dropped => None,
            Self::Unchanged { redirect } | Self::Committed { redirect, .. } => *redirect,
        }
    }

    #[must_use]
    pub const fn committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    state: NavigationState,
    policy: GuardPolicy,
    transition_ms: u64,
}

impl Router {
    #[must_use]
    pub fn new(policy: GuardPolicy, transition_ms: u64) -> Self {
        Self {
            table: RouteTable::new(),
            state: NavigationState::default(),
            policy,
            transition_ms,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub const fn current(&self) -> ViewId {
        self.state.current
    }

    #[must_use]
    pub fn current_route(&self) -> &Route {
        self.table.route(self.state.current)
    }

    #[must_use]
    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Requests navigation to `fragment`.
    ///
    /// Unknown fragments resolve to home. The guard runs once against the
    /// resolved route; its redirect target is not guarded again.
    ///
    /// # Example
    ///
    /// ```rust
    /// use companyplus::domain::{Session, ViewId};
    /// use companyplus::navigation::{GuardPolicy, NavOutcome, Router};
    ///
    /// let mut router = Router::new(GuardPolicy::default(), 300);
    /// let outcome = router.navigate("#dashboard", &Session::default(), 0);
    /// assert!(outcome.committed());
    /// assert_eq!(router.current(), ViewId::Login);
    ///
    /// // Still inside the transition window.
    /// assert_eq!(router.navigate("#faq", &Session::default(), 100), NavOutcome::Dropped);
    /// ```
    pub fn navigate(&mut self, fragment: &str, session: &Session, now_ms: u64) -> NavOutcome {
        let _span = tracing::debug_span!("navigate", fragment = %fragment).entered();

        if self.state.transitioning {
            tracing::debug!("transition in flight, dropping request");
            return NavOutcome::Dropped;
        }

        let target = *self.table.resolve(fragment).unwrap_or_else(|| {
            tracing::debug!("unknown fragment, falling back to home");
            self.table.route(ViewId::Home)
        });

        let redirect = guard::evaluate(&target, session, &self.policy);
        let to = redirect.map_or(target.view, |r| r.to);

        if to == self.state.current {
            tracing::debug!(view = %to, "already on view");
            return NavOutcome::Unchanged { redirect };
        }

        let from = self.state.current;
        self.state.previous = Some(from);
        self.state.current = to;
        if self.transition_ms > 0 {
            self.state.transitioning = true;
            self.state.transition_until = Some(now_ms.saturating_add(self.transition_ms));
        }

        tracing::debug!(%from, %to, redirected = redirect.is_some(), "navigation committed");
        NavOutcome::Committed { from, to, redirect }
    }

    /// Ends the transition once its window has elapsed. Returns whether it
    /// did.
    pub fn settle(&mut self, now_ms: u64) -> bool {
        match self.state.transition_until {
            Some(until) if until <= now_ms => {
                self.state.transitioning = false;
                self.state.transition_until = None;
                true
            }
            _ => false,
        }
    }

    /// Closes any open transition window so the next request is accepted.
    /// Used for navigations the application itself initiates, such as after
    /// sign-in or logout.
    pub fn interrupt(&mut self) {
        if self.state.transitioning {
            tracing::debug!("transition interrupted");
        }
        self.state.transitioning = false;
        self.state.transition_until = None;
    }

    #[must_use]
    pub const fn next_deadline(&self) -> Option<u64> {
        self.state.transition_until
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    fn router() -> Router {
        Router::new(GuardPolicy::default(), 300)
    }

    #[test]
    fn unknown_fragment_lands_home() {
        let mut router = router();
        router.navigate("#faq", &Session::default(), 0);
        router.settle(300);

        let outcome = router.navigate("#does-not-exist", &Session::default(), 400);
        assert_eq!(
            outcome,
            NavOutcome::Committed {
                from: ViewId::Faq,
                to: ViewId::Home,
                redirect: None
            }
        );
    }

    #[test]
    fn same_view_is_unchanged_and_opens_no_window() {
        let mut router = router();
        assert_eq!(
            router.navigate("#home", &Session::default(), 0),
            NavOutcome::Unchanged { redirect: None }
        );
        assert!(!router.state().transitioning);
    }

    #[test]
    fn requests_inside_window_are_dropped_then_accepted() {
        let mut router = router();
        router.navigate("#support", &Session::default(), 0);

        assert_eq!(router.navigate("#terms", &Session::default(), 299), NavOutcome::Dropped);
        assert!(!router.settle(299));
        assert!(router.settle(300));

        assert!(router.navigate("#terms", &Session::default(), 300).committed());
        assert_eq!(router.state().previous, Some(ViewId::Support));
    }

    #[test]
    fn redirect_to_current_view_still_reports_notice() {
        let mut router = router();
        router.navigate("#login", &Session::default(), 0);
        router.settle(1000);

        let outcome = router.navigate("#profiles", &Session::default(), 1000);
        assert!(matches!(outcome, NavOutcome::Unchanged { redirect: Some(_) }));
        assert_eq!(outcome.redirect().and_then(|r| r.notice_key), Some("msg_auth_required"));
    }

    #[test]
    fn signed_in_login_request_goes_to_profiles() {
        let mut router = router();
        let session = Session::signed_in(User::from_email("ana@example.com"), false);

        router.navigate("#login", &session, 0);
        assert_eq!(router.current(), ViewId::Profiles);
    }

    #[test]
    fn interrupt_reopens_navigation() {
        let mut router = router();
        router.navigate("#faq", &Session::default(), 0);
        router.interrupt();

        assert!(router.navigate("#terms", &Session::default(), 10).committed());
        assert_eq!(router.next_deadline(), Some(310));
    }

    #[test]
    fn zero_transition_never_blocks() {
        let mut router = Router::new(GuardPolicy::default(), 0);
        router.navigate("#faq", &Session::default(), 0);
        assert!(router.navigate("#terms", &Session::default(), 0).committed());
        assert_eq!(router.next_deadline(), None);
    }
}
