//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user intents
//! and environment changes, translating them into state changes and action
//! sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, timers, resizes)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected, a wake is appended if a deadline moved closer,
//!    and everything is returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `Navigate`, `HistoryChanged`, `OpenAddress`
//! - **Forms**: `FocusNextField`, `FocusPrevField`, `Char`, `Backspace`,
//!   `SubmitForm`, `EditForm`, `TogglePasswordVisibility`
//! - **Session**: `Logout`, `SelectProfile`, `SwitchProfile`,
//!   `OpenAddProfile`, `RenameProfile`, `DeleteProfile`
//! - **Preferences**: `ToggleTheme`, `SetTheme`, `SetLanguage`,
//!   `ToggleLanguageMenu`
//! - **Surface**: `ToggleMobileMenu`, `Escape`, `FocusSearch`, `ToggleFaq`,
//!   `DismissNotification`, `DismissLatest`, `CursorUp`, `CursorDown`,
//!   `Activate`
//! - **Environment**: `SystemSchemeChanged`, `ConnectivityChanged`, `Resize`,
//!   `Tick`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use companyplus::{handle_event, AppState, Config, Event};
//! use companyplus::storage::Stores;
//!
//! let mut state = AppState::new(Config::default(), Stores::in_memory());
//! let (render, actions) = handle_event(&mut state, &Event::ToggleTheme)?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), companyplus::CompanyPlusError>(())
//! ```

use super::state::NavSource;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::notifications::NotificationId;
use crate::ui::theme::{ColorScheme, ThemePreference};

/// Events triggered by user input or host changes.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Navigates to a fragment such as `#login`.
    Navigate { fragment: String },
    /// The host moved its back/forward pointer to `fragment`.
    HistoryChanged { fragment: String },
    /// Opens the address bar pre-filled with the current fragment.
    OpenAddress,

    /// Moves focus to the next form field, validating the one left.
    FocusNextField,
    FocusPrevField,
    /// Types a character into whatever owns the keyboard.
    Char(char),
    Backspace,
    SubmitForm,
    /// Starts typing into the form on the current view.
    EditForm,
    /// Shows or hides the focused password.
    TogglePasswordVisibility,

    Logout,
    SelectProfile { id: String },
    /// Drops the current profile and returns to the picker.
    SwitchProfile,
    OpenAddProfile,
    /// Opens the profile modal to rename `id`.
    RenameProfile { id: String },
    DeleteProfile { id: String },

    /// Cycles light → dark → auto.
    ToggleTheme,
    SetTheme(ThemePreference),
    SetLanguage { code: String },
    ToggleLanguageMenu,

    ToggleMobileMenu,
    /// Closes overlays, clears notifications and leaves any text mode.
    Escape,
    /// Focuses the dashboard search.
    FocusSearch,
    ToggleFaq { index: usize },
    DismissNotification { id: NotificationId },
    /// Dismisses the newest notification.
    DismissLatest,
    CursorUp,
    CursorDown,
    /// Enter: submits or activates the entry under the cursor.
    Activate,

    /// The host's preferred colour scheme changed.
    SystemSchemeChanged(ColorScheme),
    ConnectivityChanged { online: bool },
    Resize { rows: usize, cols: usize },
    /// Monotonic host time in milliseconds.
    Tick { now_ms: u64 },
    /// Hides the plugin pane.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the screen must be re-rendered, and the actions to execute in
/// sequence. A trailing [`Action::ScheduleWake`] is included whenever the
/// earliest pending deadline moved closer.
///
/// # Errors
///
/// Reserved for failures the host must hear about. Storage and validation
/// problems are absorbed into notifications and log lines.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
///
/// # Example
///
/// ```rust
/// use companyplus::{handle_event, AppState, Config, Event, ViewId};
/// use companyplus::storage::Stores;
///
/// let mut state = AppState::new(Config::default(), Stores::in_memory());
/// handle_event(&mut state, &Event::Navigate { fragment: "#dashboard".into() })?;
///
/// // Guarded view without a session lands on the sign-in form.
/// assert_eq!(state.router.current(), ViewId::Login);
/// assert_eq!(state.notifications.len(), 1);
/// # Ok::<(), companyplus::CompanyPlusError>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (render, mut actions) = match event {
        Event::Navigate { fragment } => (true, state.navigate(fragment, NavSource::User)),
        Event::HistoryChanged { fragment } => (true, state.navigate(fragment, NavSource::History)),
        Event::OpenAddress => {
            state.open_address();
            (true, vec![])
        }

        Event::FocusNextField => (state.focus_next_field(), vec![]),
        Event::FocusPrevField => (state.focus_prev_field(), vec![]),
        Event::Char(c) => (state.type_char(*c), vec![]),
        Event::Backspace => (state.backspace(), vec![]),
        Event::SubmitForm => (true, state.submit_form()),
        Event::EditForm => (state.edit_form(), vec![]),
        Event::TogglePasswordVisibility => (state.toggle_password_visibility(), vec![]),

        Event::Logout => {
            if state.session.is_authenticated() {
                (true, state.logout())
            } else {
                tracing::debug!("logout without session");
                (false, vec![])
            }
        }
        Event::SelectProfile { id } => (true, state.select_profile(id)),
        Event::SwitchProfile => (true, state.switch_profile()),
        Event::OpenAddProfile => (state.open_add_profile(), vec![]),
        Event::RenameProfile { id } => (state.open_rename_profile(id), vec![]),
        Event::DeleteProfile { id } => {
            state.delete_profile(id);
            (true, vec![])
        }

        Event::ToggleTheme => {
            let preference = state.toggle_theme();
            tracing::debug!(preference = preference.as_str(), "theme toggled");
            (true, vec![])
        }
        Event::SetTheme(preference) => {
            state.set_theme(*preference);
            (true, vec![])
        }
        Event::SetLanguage { code } => {
            let actions = state.set_language(code);
            (!actions.is_empty(), actions)
        }
        Event::ToggleLanguageMenu => {
            state.toggle_language_menu();
            (true, vec![])
        }

        Event::ToggleMobileMenu => {
            state.toggle_mobile_menu();
            (true, vec![])
        }
        Event::Escape => {
            state.escape();
            (true, vec![])
        }
        Event::FocusSearch => (state.focus_search(), vec![]),
        Event::ToggleFaq { index } => (state.toggle_faq(*index), vec![]),
        Event::DismissNotification { id } => (state.notifications.dismiss(*id), vec![]),
        Event::DismissLatest => {
            let latest = state.notifications.latest().map(|n| n.id);
            (latest.is_some_and(|id| state.notifications.dismiss(id)), vec![])
        }
        Event::CursorUp => (state.move_cursor(false), vec![]),
        Event::CursorDown => (state.move_cursor(true), vec![]),
        Event::Activate => (true, state.activate()),

        Event::SystemSchemeChanged(scheme) => {
            state.set_system_scheme(*scheme);
            (true, vec![])
        }
        Event::ConnectivityChanged { online } => (state.set_online(*online), vec![]),
        Event::Resize { rows, cols } => (state.resize(*rows, *cols), vec![]),
        Event::Tick { now_ms } => state.tick(*now_ms),
        Event::CloseFocus => return Ok((false, vec![Action::CloseFocus])),
    };

    if let Some(wake) = state.schedule_wake() {
        actions.push(wake);
    }

    Ok((render, actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{InputMode, Overlay};
    use crate::domain::ViewId;
    use crate::storage::Stores;
    use crate::Config;

    fn state() -> AppState {
        let config = Config {
            rng_seed: Some(11),
            failure_rate: 0.0,
            ..Config::default()
        };
        AppState::new(config, Stores::in_memory())
    }

    fn run(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    #[test]
    fn committed_navigation_pushes_history_and_title() {
        let mut state = state();
        let actions = run(&mut state, Event::Navigate { fragment: "#faq".into() });

        assert_eq!(actions[0], Action::PushHistory { fragment: "#faq".into() });
        assert!(matches!(&actions[1], Action::SetTitle { title } if title.ends_with("· COMPANY+")));
        assert_eq!(actions.last(), Some(&Action::ScheduleWake { after_ms: 300 }));
    }

    #[test]
    fn history_navigation_does_not_push() {
        let mut state = state();
        let actions = run(&mut state, Event::HistoryChanged { fragment: "#terms".into() });

        assert!(!actions.iter().any(|a| matches!(a, Action::PushHistory { .. })));
        assert_eq!(state.router.current(), ViewId::Terms);
    }

    #[test]
    fn navigation_inside_transition_is_dropped() {
        let mut state = state();
        run(&mut state, Event::Navigate { fragment: "#faq".into() });
        let actions = run(&mut state, Event::Navigate { fragment: "#terms".into() });

        assert!(actions.is_empty());
        assert_eq!(state.router.current(), ViewId::Faq);

        run(&mut state, Event::Tick { now_ms: 300 });
        run(&mut state, Event::Navigate { fragment: "#terms".into() });
        assert_eq!(state.router.current(), ViewId::Terms);
    }

    #[test]
    fn dropped_history_step_rewrites_host_entry() {
        let mut state = state();
        run(&mut state, Event::Navigate { fragment: "#faq".into() });
        let actions = run(&mut state, Event::HistoryChanged { fragment: "#home".into() });

        assert_eq!(actions, vec![Action::ReplaceHistory { fragment: "#faq".into() }]);
        assert_eq!(state.router.current(), ViewId::Faq);
    }

    #[test]
    fn choosing_current_view_from_menu_closes_it() {
        let mut state = state();
        run(&mut state, Event::ToggleMobileMenu);
        let actions = run(&mut state, Event::Activate);

        assert_eq!(state.overlay, None);
        assert_eq!(state.router.current(), ViewId::Home);
        assert!(!actions.iter().any(|a| matches!(a, Action::PushHistory { .. })));
    }

    #[test]
    fn escape_closes_overlay_and_clears_toasts() {
        let mut state = state();
        run(&mut state, Event::ToggleMobileMenu);
        run(&mut state, Event::ConnectivityChanged { online: false });
        assert_eq!(state.overlay, Some(Overlay::MobileMenu));

        run(&mut state, Event::Escape);
        assert_eq!(state.overlay, None);
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn navigation_closes_menus() {
        let mut state = state();
        run(&mut state, Event::ToggleLanguageMenu);
        run(&mut state, Event::Navigate { fragment: "#support".into() });
        assert_eq!(state.overlay, None);
    }

    #[test]
    fn connectivity_only_notifies_on_change() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::ConnectivityChanged { online: true }).unwrap();
        assert!(!render);
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn characters_are_ignored_while_browsing() {
        let mut state = state();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert_eq!(state.input_mode, InputMode::Browse);
    }

    #[test]
    fn address_bar_navigates_on_activate() {
        let mut state = state();
        run(&mut state, Event::OpenAddress);
        assert_eq!(state.address_buffer, "#home");

        for _ in 0..4 {
            run(&mut state, Event::Backspace);
        }
        for c in "soporte".chars() {
            run(&mut state, Event::Char(c));
        }
        run(&mut state, Event::Activate);

        assert_eq!(state.router.current(), ViewId::Support);
        assert_eq!(state.input_mode, InputMode::Browse);
    }

    #[test]
    fn unsupported_language_changes_nothing() {
        let mut state = state();
        let (render, actions) =
            handle_event(&mut state, &Event::SetLanguage { code: "de".into() }).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn close_focus_is_forwarded() {
        let mut state = state();
        assert_eq!(run(&mut state, Event::CloseFocus), vec![Action::CloseFocus]);
    }
}
