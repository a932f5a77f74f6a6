//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the COMPANY+ library and the
//! Zellij plugin system. It owns everything the library leaves to the host:
//! the clock, the back/forward history, timers, the pane title and the
//! keymap.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, Timer and permission events
//! 3. **Update**: Tick the clock, map the event, delegate to `handle_event`
//! 4. **Actions**: Push or replace history, rename the pane, arm timers, hide the pane
//! 5. **Render**: Report size changes, then call the library renderer
//!
//! # Timers
//!
//! `Action::ScheduleWake` arms a Zellij timeout. When it fires the clock is
//! reported as at least the due time, so a timer that fires slightly early
//! still settles the deadline it was armed for.
//!
//! # Keybindings
//!
//! Browsing:
//! - `H` `L` `R` `W` `P` `D` `S` `F` `Y` `C` `T`: Jump to a view
//! - `j`/`Down`, `k`/`Up`: Move the cursor
//! - `Enter`: Activate the entry under the cursor
//! - `e`: Edit the form on the current view
//! - `g`: Type a fragment into the address bar
//! - `[` / `]`: History back / forward
//! - `t` or `Alt+l`: Cycle the theme
//! - `l`: Language menu
//! - `m`: Navigation menu
//! - `/` or `Alt+s`: Dashboard search
//! - `1`-`9`: Toggle a FAQ entry
//! - `a`: Add profile, `r`/`X`: rename/delete the profile under the cursor
//! - `O`: Sign out
//! - `x`: Dismiss the newest notification
//! - `Esc`: Close overlays and notifications
//! - `q`: Hide the plugin
//!
//! `Alt+l` and `Alt+s` also work while typing, and `Alt+v` shows or hides
//! the focused password.
//!
//! Typing (forms, address bar, search):
//! - Characters go to the focused input, `Space` toggles checkboxes
//! - `Tab`/`Down`: Next field, `Up`: previous field
//! - `Enter`: Submit or apply, `Esc`: stop typing

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use std::time::Instant;

    use zellij_tile::prelude::*;

    use companyplus::app::AppState;
    use companyplus::domain::ViewId;
    use companyplus::navigation::History;
    use companyplus::{handle_event, Action, Config, Event, InputMode};

    /// Plugin state wrapper.
    pub struct State {
        app: AppState,
        history: History,
        started: Instant,
        /// Due time of the earliest armed timer.
        pending_wake_due: Option<u64>,
    }

    impl Default for State {
        fn default() -> Self {
            let app = AppState::new(Config::default(), companyplus::storage::Stores::in_memory());
            let history = History::new(app.current_fragment());
            Self {
                app,
                history,
                started: Instant::now(),
                pending_wake_due: None,
            }
        }
    }

    impl ZellijPlugin for State {
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            self.app = companyplus::initialize(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            self.history = History::new(self.app.current_fragment());
            self.started = Instant::now();

            request_permission(&[PermissionType::ChangeApplicationState]);
            subscribe(&[EventType::Key, EventType::Timer, EventType::PermissionRequestResult]);

            for action in self.app.startup_actions() {
                self.execute_action(&action);
            }
            self.dispatch(&Event::Tick { now_ms: 0 });

            tracing::debug!(fragment = %self.history.current(), "plugin load complete");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let span = tracing::debug_span!("plugin_update");
            let _guard = span.entered();

            match event {
                zellij_tile::prelude::Event::Key(key) => {
                    let ticked = self.dispatch(&Event::Tick {
                        now_ms: self.clock_ms(),
                    });
                    let handled = self.handle_key(&key);
                    ticked || handled
                }
                zellij_tile::prelude::Event::Timer(_) => {
                    let due = self.pending_wake_due.take().unwrap_or(0);
                    let now_ms = self.clock_ms().max(due);
                    self.dispatch(&Event::Tick { now_ms })
                }
                zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                    tracing::debug!(?status, "permission result");
                    for action in self.app.startup_actions() {
                        self.execute_action(&action);
                    }
                    false
                }
                _ => false,
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            if self.app.size() != (rows, cols) {
                self.dispatch(&Event::Resize { rows, cols });
            }
            companyplus::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        fn clock_ms(&self) -> u64 {
            u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
        }

        fn dispatch(&mut self, event: &Event) -> bool {
            match handle_event(&mut self.app, event) {
                Ok((should_render, actions)) => {
                    for action in &actions {
                        self.execute_action(action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn handle_key(&mut self, key: &KeyWithModifier) -> bool {
            if self.app.input_mode == InputMode::Browse && key.has_no_modifiers() {
                match key.bare_key {
                    BareKey::Char('[') => return self.step_history(false),
                    BareKey::Char(']') => return self.step_history(true),
                    _ => {}
                }
            }

            match self.map_key(key) {
                Some(event) => self.dispatch(&event),
                None => false,
            }
        }

        fn step_history(&mut self, forward: bool) -> bool {
            let target = if forward {
                self.history.forward()
            } else {
                self.history.back()
            };
            match target.map(str::to_string) {
                Some(fragment) => self.dispatch(&Event::HistoryChanged { fragment }),
                None => false,
            }
        }

        fn map_key(&self, key: &KeyWithModifier) -> Option<Event> {
            if key.has_modifiers(&[KeyModifier::Alt]) {
                return match key.bare_key {
                    BareKey::Char('l') => Some(Event::ToggleTheme),
                    BareKey::Char('s') => Some(Event::FocusSearch),
                    BareKey::Char('v') => Some(Event::TogglePasswordVisibility),
                    _ => None,
                };
            }

            if self.app.input_mode.captures_text() {
                return Some(match key.bare_key {
                    BareKey::Esc => Event::Escape,
                    BareKey::Enter => Event::Activate,
                    BareKey::Backspace => Event::Backspace,
                    BareKey::Tab | BareKey::Down => Event::FocusNextField,
                    BareKey::Up => Event::FocusPrevField,
                    BareKey::Char(c) => Event::Char(c),
                    _ => return None,
                });
            }

            Some(match key.bare_key {
                BareKey::Esc => Event::Escape,
                BareKey::Enter => Event::Activate,
                BareKey::Down | BareKey::Char('j') => Event::CursorDown,
                BareKey::Up | BareKey::Char('k') => Event::CursorUp,
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Char('g') => Event::OpenAddress,
                BareKey::Char('t') => Event::ToggleTheme,
                BareKey::Char('l') => Event::ToggleLanguageMenu,
                BareKey::Char('m') => Event::ToggleMobileMenu,
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('e') => Event::EditForm,
                BareKey::Char('a') => Event::OpenAddProfile,
                BareKey::Char('x') => Event::DismissLatest,
                BareKey::Char('O') => Event::Logout,
                BareKey::Char('r') => Event::RenameProfile {
                    id: self.app.profile_under_cursor()?.to_string(),
                },
                BareKey::Char('X') => Event::DeleteProfile {
                    id: self.app.profile_under_cursor()?.to_string(),
                },
                BareKey::Char(c @ '1'..='9') if self.app.router.current() == ViewId::Faq => {
                    Event::ToggleFaq {
                        index: c.to_digit(10)? as usize - 1,
                    }
                }
                BareKey::Char(c) => Event::Navigate {
                    fragment: format!("#{}", view_for_hotkey(c)?.path()),
                },
                _ => return None,
            })
        }

        fn execute_action(&mut self, action: &Action) {
            match action {
                Action::PushHistory { fragment } => {
                    tracing::debug!(%fragment, "history push");
                    self.history.push(fragment.as_str());
                }
                Action::ReplaceHistory { fragment } => {
                    tracing::debug!(%fragment, "history replace");
                    self.history.replace(fragment.as_str());
                }
                Action::SetTitle { title } => {
                    rename_plugin_pane(get_plugin_ids().plugin_id, title);
                }
                Action::ScheduleWake { after_ms } => {
                    let due = self.clock_ms().saturating_add(*after_ms);
                    self.pending_wake_due = Some(self.pending_wake_due.map_or(due, |d| d.min(due)));
                    #[allow(clippy::cast_precision_loss)]
                    set_timeout(*after_ms as f64 / 1000.0);
                }
                Action::CloseFocus => hide_self(),
            }
        }
    }

    const fn view_for_hotkey(c: char) -> Option<ViewId> {
        Some(match c {
            'H' => ViewId::Home,
            'L' => ViewId::Login,
            'R' => ViewId::Register,
            'W' => ViewId::ForgotPassword,
            'P' => ViewId::Profiles,
            'D' => ViewId::Dashboard,
            'S' => ViewId::Support,
            'F' => ViewId::Faq,
            'Y' => ViewId::Security,
            'C' => ViewId::Settings,
            'T' => ViewId::Terms,
            _ => return None,
        })
    }
}

#[cfg(target_family = "wasm")]
use plugin::State;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("companyplus is a Zellij plugin; build it for wasm32-wasip1 and load the .wasm from Zellij");
}
