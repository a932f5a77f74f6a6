//! Application state management.
//!
//! This module defines [`AppState`], the explicitly constructed context that
//! owns every store and service of the application. The event handler calls
//! its methods; the renderer reads it through
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel).
//!
//! # Time
//!
//! The state never reads a clock. [`Event::Tick`](crate::app::Event::Tick)
//! carries the host's monotonic time and every deadline (transition window,
//! toast expiry, debounce, pending request, particle frame) is compared
//! against it. After each event the earliest deadline is turned into an
//! [`Action::ScheduleWake`] when it is earlier than the wake already
//! requested.
//!
//! # Example
//!
//! ```rust
//! use companyplus::{AppState, Config};
//! use companyplus::storage::Stores;
//!
//! let config = Config { rng_seed: Some(1), ..Config::default() };
//! let mut state = AppState::new(config, Stores::in_memory());
//! let actions = state.startup_actions();
//! assert!(!actions.is_empty());
//! ```

use super::actions::Action;
use super::modes::{InputMode, Overlay};
use crate::domain::{CatalogItem, Profile, Session, User, ViewId, CATALOG, MAX_PROFILES};
use crate::forms::{FormKind, FormState, SubmitError};
use crate::i18n::{Language, Translator};
use crate::navigation::{GuardPolicy, NavOutcome, Router};
use crate::notifications::{NotificationId, NotificationQueue, Severity};
use crate::particles::{ParticleConfig, ParticleField};
use crate::session::{
    clear_session, persist_session, restore_session, Latency, Outcome, PendingRequest,
    ProfileManager, Request, SimulatedBackend,
};
use crate::storage::Stores;
use crate::ui::theme::{ColorScheme, ThemePreference, ThemeStore};
use crate::Config;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashMap};

/// Rows taken by the address bar, header and footer.
pub(crate) const CHROME_ROWS: usize = 6;

/// FAQ topics in display order; each names `faq_<topic>_title` and `_answer`.
pub const FAQ_TOPICS: [&str; 4] = ["account", "devices", "quality", "cancel"];

/// Who asked for a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSource {
    /// A key press, link or typed address.
    User,
    /// The host's back/forward stack; the host already moved its pointer.
    History,
    /// The application itself, after sign-in, logout or profile selection.
    /// Preempts an open transition window.
    App,
}

/// One visible dashboard row after kid filtering and search.
#[derive(Debug, Clone)]
pub struct VisibleRow {
    pub title_key: &'static str,
    pub items: Vec<VisibleItem>,
}

#[derive(Debug, Clone)]
pub struct VisibleItem {
    pub item: CatalogItem,
    pub title: String,
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub stores: Stores,
    pub router: Router,
    pub theme: ThemeStore,
    pub translator: Translator,
    pub notifications: NotificationQueue,
    pub particles: ParticleField,
    pub forms: HashMap<FormKind, FormState>,
    pub profiles: ProfileManager,
    pub backend: SimulatedBackend,
    pub session: Session,
    /// The simulated request in flight, if any. At most one at a time.
    pub pending: Option<PendingRequest>,

    pub input_mode: InputMode,
    pub overlay: Option<Overlay>,
    /// Profile edited by the rename modal.
    pub rename_target: Option<String>,

    /// Dashboard query as typed.
    pub search_query: String,
    /// Dashboard query the rows are filtered by; lags `search_query` by the
    /// debounce.
    pub applied_search: String,
    search_debounce_until: Option<u64>,

    pub address_buffer: String,
    pub faq_expanded: BTreeSet<usize>,

    /// Selection within the current view.
    pub cursor: usize,
    /// Selection within the open menu overlay.
    pub menu_cursor: usize,

    pub online: bool,

    now_ms: u64,
    rows: usize,
    cols: usize,
    next_frame_at: Option<u64>,
    scheduled_wake: Option<u64>,
}

impl AppState {
    /// Builds the state from `config`, restoring theme, language, session and
    /// profiles from `stores`.
    #[must_use]
    pub fn new(config: Config, stores: Stores) -> Self {
        let mut rng = config
            .rng_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let particle_rng = StdRng::seed_from_u64(rng.gen());

        let mut theme = ThemeStore::restore(config.theme, config.system_scheme, stores.local.as_ref());
        if let Some(path) = &config.palette_file {
            theme.load_custom_palette(path);
        }
        theme.subscribe(|change| {
            tracing::debug!(
                preference = change.preference.as_str(),
                scheme = ?change.scheme,
                "theme changed"
            );
        });

        let translator = Translator::restore(
            config.language,
            config.fallback_language,
            stores.local.as_ref(),
        );

        let profiles = ProfileManager::load(stores.local.as_ref());
        let mut session = restore_session(&stores);
        if session.is_authenticated() {
            let recorded = session.selected_profile.take();
            session.selected_profile = profiles
                .restore_selection(stores.session.as_ref())
                .or_else(|| recorded.filter(|id| profiles.get(id).is_some()));
        }
        tracing::debug!(
            authenticated = session.is_authenticated(),
            profile = ?session.selected_profile,
            "session restored"
        );

        let forms = [
            FormKind::Login,
            FormKind::Register,
            FormKind::ForgotPassword,
            FormKind::AddProfile,
            FormKind::RenameProfile,
        ]
        .into_iter()
        .map(|kind| (kind, FormState::new(kind, config.debounce_ms)))
        .collect();

        let particles = ParticleField::new(
            ParticleConfig {
                count: config.particle_count,
                ..ParticleConfig::default()
            },
            particle_rng,
        );

        let backend = SimulatedBackend::new(
            rng,
            config.failure_rate,
            Latency {
                login_ms: config.login_delay_ms,
                register_ms: config.register_delay_ms,
                forgot_ms: config.forgot_delay_ms,
            },
        );

        let router = Router::new(
            GuardPolicy {
                skip_profile_picker: config.skip_profile_picker,
            },
            config.transition_ms,
        );

        Self {
            notifications: NotificationQueue::new(config.max_notifications),
            config,
            stores,
            router,
            theme,
            translator,
            particles,
            forms,
            profiles,
            backend,
            session,
            pending: None,
            input_mode: InputMode::Browse,
            overlay: None,
            rename_target: None,
            search_query: String::new(),
            applied_search: String::new(),
            search_debounce_until: None,
            address_buffer: String::new(),
            faq_expanded: BTreeSet::new(),
            cursor: 0,
            menu_cursor: 0,
            online: true,
            now_ms: 0,
            rows: 24,
            cols: 80,
            next_frame_at: None,
            scheduled_wake: None,
        }
    }

    /// Actions the host runs once after loading: the initial title.
    pub fn startup_actions(&mut self) -> Vec<Action> {
        self.sync_particles();
        vec![Action::SetTitle { title: self.title() }]
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub const fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Pane title for the current view.
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "{} · {}",
            self.translator.t(self.router.current_route().title_key),
            self.translator.t("app_name")
        )
    }

    /// Fragment of the current view, e.g. `#faq`.
    #[must_use]
    pub fn current_fragment(&self) -> String {
        format!("#{}", self.router.current().path())
    }

    /// Profile selected in the session, if it still exists.
    #[must_use]
    pub fn current_profile(&self) -> Option<&Profile> {
        self.session
            .selected_profile
            .as_deref()
            .and_then(|id| self.profiles.get(id))
    }

    /// The form that receives typing: the profile modal when open,
    /// otherwise the form on the current view.
    #[must_use]
    pub fn active_form_kind(&self) -> Option<FormKind> {
        if let Some(kind) = self.overlay.and_then(Overlay::form) {
            return Some(kind);
        }
        match self.router.current() {
            ViewId::Login => Some(FormKind::Login),
            ViewId::Register => Some(FormKind::Register),
            ViewId::ForgotPassword => Some(FormKind::ForgotPassword),
            _ => None,
        }
    }

    #[must_use]
    pub fn form(&self, kind: FormKind) -> Option<&FormState> {
        self.forms.get(&kind)
    }

    fn active_form_mut(&mut self) -> Option<&mut FormState> {
        let kind = self.active_form_kind()?;
        self.forms.get_mut(&kind)
    }

    /// Shows a translated notification with the configured timeout.
    pub fn notify(&mut self, key: &str, severity: Severity) -> NotificationId {
        let message = self.translator.t(key);
        self.notify_text(message, severity)
    }

    fn notify_text(&mut self, message: String, severity: Severity) -> NotificationId {
        self.notifications
            .show(message, severity, self.config.notification_timeout_ms, self.now_ms)
    }

    // Navigation

    /// Requests navigation to `fragment` and applies the side effects of a
    /// commit: history push, title, particles, overlay reset and the view's
    /// setup hook. A guard notice is raised even when nothing commits.
    pub fn navigate(&mut self, fragment: &str, source: NavSource) -> Vec<Action> {
        if source == NavSource::App {
            self.router.interrupt();
        }

        let outcome = self.router.navigate(fragment, &self.session, self.now_ms);
        let mut actions = Vec::new();

        if let Some(key) = outcome.redirect().and_then(|r| r.notice_key) {
            self.notify(key, Severity::Warning);
        }

        if let NavOutcome::Committed { to, redirect, .. } = outcome {
            if source != NavSource::History || redirect.is_some() {
                actions.push(Action::PushHistory {
                    fragment: format!("#{}", to.path()),
                });
            }
            actions.push(Action::SetTitle { title: self.title() });
            self.enter_view(to);
        } else if source == NavSource::History {
            actions.push(Action::ReplaceHistory {
                fragment: self.current_fragment(),
            });
        }

        actions
    }

    fn enter_view(&mut self, view: ViewId) {
        self.overlay = None;
        self.rename_target = None;
        self.input_mode = InputMode::Browse;
        self.cursor = 0;
        self.menu_cursor = 0;
        self.sync_particles();
        self.setup_view(view);
    }

    /// Per-view setup. Safe to run repeatedly.
    fn setup_view(&mut self, view: ViewId) {
        match view {
            ViewId::Login | ViewId::Register | ViewId::ForgotPassword => {
                if let Some(form) = self.active_form_mut() {
                    if !form.submitting {
                        form.reset();
                    }
                }
            }
            ViewId::Dashboard => self.clear_search(),
            ViewId::Faq => self.faq_expanded.clear(),
            _ => {}
        }
    }

    fn sync_particles(&mut self) {
        let wanted = self.config.particles && self.router.current_route().show_particles;

        if wanted && !self.particles.is_active() {
            self.particles.resize(self.cols, self.body_rows());
            self.particles.start();
            self.next_frame_at = Some(self.now_ms.saturating_add(self.particles.frame_interval_ms()));
        } else if !wanted && self.particles.is_active() {
            self.particles.stop();
            self.next_frame_at = None;
        }
    }

    pub(crate) const fn body_rows(&self) -> usize {
        self.rows.saturating_sub(CHROME_ROWS)
    }

    // Forms and the simulated backend

    /// Enters editing mode on the active form.
    pub fn edit_form(&mut self) -> bool {
        if self.active_form_kind().is_none() {
            return false;
        }
        self.input_mode = InputMode::Editing;
        true
    }

    /// Validates and submits the active form.
    ///
    /// Account forms start a simulated request; the add-profile form creates
    /// the profile at once.
    pub fn submit_form(&mut self) -> Vec<Action> {
        let Some(kind) = self.active_form_kind() else {
            return Vec::new();
        };
        let _span = tracing::debug_span!("submit_form", form = ?kind).entered();

        let profile_form = matches!(kind, FormKind::AddProfile | FormKind::RenameProfile);
        if !profile_form && self.pending.is_some() {
            tracing::debug!("request already in flight");
            return Vec::new();
        }

        let Some(form) = self.forms.get_mut(&kind) else {
            return Vec::new();
        };

        let values = match form.submit() {
            Ok(values) => values,
            Err(SubmitError::Busy) => {
                tracing::debug!("form busy, ignoring submit");
                return Vec::new();
            }
            Err(SubmitError::Invalid { field }) => {
                tracing::debug!(field, "form invalid");
                self.input_mode = InputMode::Editing;
                self.notify("msg_form_invalid", Severity::Warning);
                return Vec::new();
            }
        };

        let request = match kind {
            FormKind::Login => Request::Login {
                email: values.get("email").to_string(),
                password: values.get("password").to_string(),
                remember: values.checked("remember"),
            },
            FormKind::Register => Request::Register {
                name: values.get("name").to_string(),
                email: values.get("email").to_string(),
                password: values.get("password").to_string(),
            },
            FormKind::ForgotPassword => Request::ForgotPassword {
                email: values.get("email").to_string(),
            },
            FormKind::AddProfile => {
                return self.create_profile(values.get("name"), values.checked("kids"));
            }
            FormKind::RenameProfile => return self.rename_profile(values.get("name")),
        };

        form.submitting = true;
        self.input_mode = InputMode::Browse;
        self.pending = Some(self.backend.begin(request, self.now_ms));
        Vec::new()
    }

    fn resolve_pending(&mut self) -> Vec<Action> {
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };
        let _span = tracing::debug_span!("resolve_request", kind = pending.request.kind()).entered();

        let kind = match pending.request {
            Request::Login { .. } => FormKind::Login,
            Request::Register { .. } => FormKind::Register,
            Request::ForgotPassword { .. } => FormKind::ForgotPassword,
        };
        if let Some(form) = self.forms.get_mut(&kind) {
            form.submitting = false;
        }

        if self.backend.resolve(&pending) == Outcome::SyntheticFailure {
            tracing::warn!("simulated request failed");
            self.notify("msg_error_generic", Severity::Error);
            return Vec::new();
        }

        if let Some(form) = self.forms.get_mut(&kind) {
            form.reset();
        }

        match pending.request {
            Request::Login { email, remember, .. } => {
                self.session = Session::signed_in(User::from_email(&email), remember);
                if self.profiles.len() == 1 {
                    self.session.selected_profile = self.profiles.profiles().first().map(|p| p.id.clone());
                }
                persist_session(&mut self.stores, &self.session);
                self.notify("msg_login_success", Severity::Success);

                let target = if self.profiles.len() > 1 { "#profiles" } else { "#dashboard" };
                self.navigate(target, NavSource::App)
            }
            Request::Register { name, email, .. } => {
                self.session = Session::signed_in(User { name, email }, false);
                persist_session(&mut self.stores, &self.session);
                self.notify("msg_register_success", Severity::Success);
                self.navigate("#profiles", NavSource::App)
            }
            Request::ForgotPassword { .. } => {
                self.notify("msg_forgot_success", Severity::Success);
                self.navigate("#login", NavSource::App)
            }
        }
    }

    // Session and profiles

    /// Ends the session, clears its storage mirrors and goes home.
    pub fn logout(&mut self) -> Vec<Action> {
        let _span = tracing::debug_span!("logout").entered();

        clear_session(&mut self.stores);
        self.session = Session::default();
        self.pending = None;
        for form in self.forms.values_mut() {
            form.reset();
        }
        self.notify("msg_logout", Severity::Info);
        self.navigate("#home", NavSource::App)
    }

    /// Makes `id` the current profile, applies its language and opens the
    /// dashboard.
    pub fn select_profile(&mut self, id: &str) -> Vec<Action> {
        let language = match self.profiles.select(id, self.stores.session.as_mut()) {
            Ok(profile) => profile.preferences.language,
            Err(e) => {
                tracing::warn!(error = %e, "profile selection failed");
                self.notify("msg_error_generic", Severity::Error);
                return Vec::new();
            }
        };

        self.session.selected_profile = Some(id.to_string());
        persist_session(&mut self.stores, &self.session);

        if let Some(lang) = language {
            if lang != self.translator.language() {
                self.translator.set_language(lang.code(), self.stores.local.as_mut());
            }
        }

        self.navigate("#dashboard", NavSource::App)
    }

    /// Drops the current profile and returns to the picker.
    pub fn switch_profile(&mut self) -> Vec<Action> {
        ProfileManager::clear_selection(self.stores.session.as_mut());
        self.session.selected_profile = None;
        persist_session(&mut self.stores, &self.session);
        self.navigate("#profiles", NavSource::App)
    }

    /// Opens the add-profile modal, or warns when the limit is reached.
    pub fn open_add_profile(&mut self) -> bool {
        if self.profiles.is_full() {
            let message = self
                .translator
                .t_with("msg_profile_limit", &[("n", &MAX_PROFILES.to_string())]);
            self.notify_text(message, Severity::Warning);
            return true;
        }
        if self.router.current() != ViewId::Profiles {
            return false;
        }

        if let Some(form) = self.forms.get_mut(&FormKind::AddProfile) {
            form.reset();
        }
        self.overlay = Some(Overlay::AddProfile);
        self.input_mode = InputMode::Editing;
        true
    }

    fn create_profile(&mut self, name: &str, is_kid: bool) -> Vec<Action> {
        match self.profiles.create(name, is_kid, self.stores.local.as_mut()) {
            Ok(_) => {
                self.notify("msg_profile_created", Severity::Success);
                self.cursor = self.profiles.len() - 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile creation failed");
                if self.profiles.is_full() {
                    let message = self
                        .translator
                        .t_with("msg_profile_limit", &[("n", &MAX_PROFILES.to_string())]);
                    self.notify_text(message, Severity::Warning);
                } else {
                    self.notify("msg_error_generic", Severity::Error);
                }
            }
        }

        self.close_profile_modal();
        Vec::new()
    }

    /// Opens the profile modal prefilled with the name of `id`.
    pub fn open_rename_profile(&mut self, id: &str) -> bool {
        if self.router.current() != ViewId::Profiles {
            return false;
        }
        let Some(name) = self.profiles.get(id).map(|p| p.name.clone()) else {
            tracing::debug!(id = %id, "rename requested for unknown profile");
            return false;
        };

        if let Some(form) = self.forms.get_mut(&FormKind::RenameProfile) {
            form.reset();
            form.prefill("name", &name);
        }
        self.rename_target = Some(id.to_string());
        self.overlay = Some(Overlay::RenameProfile);
        self.input_mode = InputMode::Editing;
        true
    }

    fn rename_profile(&mut self, name: &str) -> Vec<Action> {
        if let Some(id) = self.rename_target.take() {
            match self.profiles.rename(&id, name, self.stores.local.as_mut()) {
                Ok(()) => {
                    self.notify("msg_profile_renamed", Severity::Success);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "profile rename failed");
                    self.notify("msg_error_generic", Severity::Error);
                }
            }
        }

        self.close_profile_modal();
        Vec::new()
    }

    /// Closes the add or rename modal and clears its form.
    fn close_profile_modal(&mut self) {
        if let Some(kind) = self.overlay.and_then(Overlay::form) {
            if let Some(form) = self.forms.get_mut(&kind) {
                form.reset();
            }
        }
        self.overlay = None;
        self.rename_target = None;
        self.input_mode = InputMode::Browse;
    }

    /// Shows or hides the focused password field.
    pub fn toggle_password_visibility(&mut self) -> bool {
        if self.input_mode != InputMode::Editing {
            return false;
        }
        self.active_form_mut().is_some_and(FormState::toggle_reveal)
    }

    /// Deletes `id`; the last profile is kept with a warning.
    pub fn delete_profile(&mut self, id: &str) {
        if self.profiles.len() <= 1 {
            self.notify("msg_profile_last", Severity::Warning);
            return;
        }

        match self.profiles.delete(id, self.stores.local.as_mut()) {
            Ok(removed) => {
                if self.session.selected_profile.as_deref() == Some(removed.id.as_str()) {
                    ProfileManager::clear_selection(self.stores.session.as_mut());
                    self.session.selected_profile = None;
                    persist_session(&mut self.stores, &self.session);
                }
                self.notify("msg_profile_deleted", Severity::Info);
                self.cursor = self.cursor.min(self.cursor_len().saturating_sub(1));
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile deletion failed");
                self.notify("msg_error_generic", Severity::Error);
            }
        }
    }

    /// Id of the profile card under the cursor on the picker.
    #[must_use]
    pub fn profile_under_cursor(&self) -> Option<&str> {
        if self.router.current() != ViewId::Profiles {
            return None;
        }
        self.profiles.profiles().get(self.cursor).map(|p| p.id.as_str())
    }

    // Theme and language

    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.theme.toggle(self.stores.local.as_mut())
    }

    pub fn set_theme(&mut self, preference: ThemePreference) {
        self.theme.set(preference, self.stores.local.as_mut());
    }

    pub fn set_system_scheme(&mut self, scheme: ColorScheme) {
        self.theme.set_system_scheme(scheme);
    }

    /// Switches language. Unsupported codes change nothing.
    pub fn set_language(&mut self, code: &str) -> Vec<Action> {
        if !self.translator.set_language(code, self.stores.local.as_mut()) {
            return Vec::new();
        }
        if self.overlay == Some(Overlay::LanguageMenu) {
            self.overlay = None;
        }
        self.notify("msg_language_changed", Severity::Success);
        vec![Action::SetTitle { title: self.title() }]
    }

    pub fn toggle_language_menu(&mut self) {
        if self.overlay == Some(Overlay::LanguageMenu) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::LanguageMenu);
            self.menu_cursor = Language::all()
                .iter()
                .position(|l| *l == self.translator.language())
                .unwrap_or(0);
        }
    }

    pub fn toggle_mobile_menu(&mut self) {
        if self.overlay == Some(Overlay::MobileMenu) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::MobileMenu);
            self.menu_cursor = menu_views()
                .iter()
                .position(|v| *v == self.router.current())
                .unwrap_or(0);
        }
    }

    // Keyboard surface

    /// Closes overlays, clears notifications and leaves any text mode.
    pub fn escape(&mut self) {
        if self.input_mode == InputMode::Search {
            self.clear_search();
        }
        self.close_profile_modal();
        self.notifications.clear();
        self.address_buffer.clear();
        self.input_mode = InputMode::Browse;
    }

    /// Focuses the dashboard search. Only meaningful on the dashboard.
    pub fn focus_search(&mut self) -> bool {
        if self.router.current() != ViewId::Dashboard {
            return false;
        }
        self.overlay = None;
        self.input_mode = InputMode::Search;
        true
    }

    pub fn open_address(&mut self) {
        self.overlay = None;
        self.address_buffer = self.current_fragment();
        self.input_mode = InputMode::Address;
    }

    /// Routes a typed character to the field owning the keyboard.
    pub fn type_char(&mut self, c: char) -> bool {
        let now = self.now_ms;
        match self.input_mode {
            InputMode::Browse => false,
            InputMode::Editing => self.active_form_mut().map_or(false, |form| {
                form.input(c, now);
                true
            }),
            InputMode::Address => {
                self.address_buffer.push(c);
                true
            }
            InputMode::Search => {
                self.search_query.push(c);
                self.search_debounce_until = Some(now.saturating_add(self.config.debounce_ms));
                true
            }
        }
    }

    pub fn backspace(&mut self) -> bool {
        let now = self.now_ms;
        match self.input_mode {
            InputMode::Browse => false,
            InputMode::Editing => self.active_form_mut().map_or(false, |form| {
                form.backspace(now);
                true
            }),
            InputMode::Address => self.address_buffer.pop().is_some(),
            InputMode::Search => {
                let changed = self.search_query.pop().is_some();
                if changed {
                    self.search_debounce_until = Some(now.saturating_add(self.config.debounce_ms));
                }
                changed
            }
        }
    }

    pub fn focus_next_field(&mut self) -> bool {
        self.active_form_mut().map_or(false, |form| {
            form.focus_next();
            true
        })
    }

    pub fn focus_prev_field(&mut self) -> bool {
        self.active_form_mut().map_or(false, |form| {
            form.focus_prev();
            true
        })
    }

    fn clear_search(&mut self) {
        self.search_query.clear();
        self.applied_search.clear();
        self.search_debounce_until = None;
    }

    fn apply_search_now(&mut self) {
        self.search_debounce_until = None;
        if self.applied_search != self.search_query {
            self.applied_search.clone_from(&self.search_query);
            self.cursor = 0;
            tracing::debug!(query = %self.applied_search, "search applied");
        }
    }

    pub fn toggle_faq(&mut self, index: usize) -> bool {
        if index >= FAQ_TOPICS.len() {
            return false;
        }
        if !self.faq_expanded.remove(&index) {
            self.faq_expanded.insert(index);
        }
        true
    }

    /// Number of selectable entries under the cursor right now.
    #[must_use]
    pub fn cursor_len(&self) -> usize {
        match self.overlay {
            Some(Overlay::MobileMenu) => return menu_views().len(),
            Some(Overlay::LanguageMenu) => return Language::all().len(),
            Some(Overlay::AddProfile | Overlay::RenameProfile) => return 0,
            None => {}
        }

        match self.router.current() {
            ViewId::Home | ViewId::Settings => 2,
            ViewId::Profiles => self.profiles.len() + usize::from(!self.profiles.is_full()),
            ViewId::Dashboard => self.visible_rows().iter().map(|r| r.items.len()).sum(),
            ViewId::Faq => FAQ_TOPICS.len(),
            _ => 0,
        }
    }

    pub fn move_cursor(&mut self, down: bool) -> bool {
        let len = self.cursor_len();
        if len == 0 {
            return false;
        }
        let cursor = if self.overlay.is_some() {
            &mut self.menu_cursor
        } else {
            &mut self.cursor
        };
        *cursor = if down {
            (*cursor + 1) % len
        } else {
            (*cursor + len - 1) % len
        };
        true
    }

    /// Enter key: submits in text modes, otherwise activates the entry under
    /// the cursor.
    pub fn activate(&mut self) -> Vec<Action> {
        match self.input_mode {
            InputMode::Editing => return self.submit_form(),
            InputMode::Address => {
                let fragment = std::mem::take(&mut self.address_buffer);
                self.input_mode = InputMode::Browse;
                return self.navigate(&fragment, NavSource::User);
            }
            InputMode::Search => {
                self.apply_search_now();
                self.input_mode = InputMode::Browse;
                return Vec::new();
            }
            InputMode::Browse => {}
        }

        match self.overlay {
            Some(Overlay::MobileMenu) => {
                let view = menu_views()[self.menu_cursor % menu_views().len()];
                self.overlay = None;
                return self.navigate(&format!("#{}", view.path()), NavSource::User);
            }
            Some(Overlay::LanguageMenu) => {
                let lang = Language::all()[self.menu_cursor % Language::all().len()];
                return self.set_language(lang.code());
            }
            Some(Overlay::AddProfile | Overlay::RenameProfile) => return self.submit_form(),
            None => {}
        }

        match self.router.current() {
            ViewId::Home => {
                let target = if self.cursor == 0 { "#register" } else { "#login" };
                self.navigate(target, NavSource::User)
            }
            ViewId::Profiles => {
                let id = self.profile_under_cursor().map(str::to_string);
                match id {
                    Some(id) => self.select_profile(&id),
                    None => {
                        self.open_add_profile();
                        Vec::new()
                    }
                }
            }
            ViewId::Faq => {
                self.toggle_faq(self.cursor);
                Vec::new()
            }
            ViewId::Settings => {
                if self.cursor == 0 {
                    self.toggle_theme();
                } else {
                    self.toggle_language_menu();
                }
                Vec::new()
            }
            ViewId::Login | ViewId::Register | ViewId::ForgotPassword => {
                self.edit_form();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    // Environment

    /// Records a connectivity change. Returns whether it changed.
    pub fn set_online(&mut self, online: bool) -> bool {
        if self.online == online {
            return false;
        }
        self.online = online;
        if online {
            self.notify("msg_online", Severity::Success);
        } else {
            self.notify("msg_offline", Severity::Warning);
        }
        true
    }

    pub fn resize(&mut self, rows: usize, cols: usize) -> bool {
        if (rows, cols) == (self.rows, self.cols) {
            return false;
        }
        self.rows = rows;
        self.cols = cols;
        if self.particles.is_active() {
            self.particles.resize(cols, self.body_rows());
        }
        true
    }

    /// Advances the clock and fires every deadline that has passed. Returns
    /// whether anything visible changed, plus actions from completed requests.
    pub fn tick(&mut self, now_ms: u64) -> (bool, Vec<Action>) {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        if self.scheduled_wake.is_some_and(|w| w <= now) {
            self.scheduled_wake = None;
        }

        let mut changed = self.router.settle(now);
        changed |= !self.notifications.expire(now).is_empty();

        for form in self.forms.values_mut() {
            changed |= form.flush_debounce(now);
        }

        if self.search_debounce_until.is_some_and(|t| t <= now) {
            self.apply_search_now();
            changed = true;
        }

        let mut actions = Vec::new();
        if self.pending.as_ref().is_some_and(|p| p.due_ms <= now) {
            actions = self.resolve_pending();
            changed = true;
        }

        if self.particles.is_active() && self.next_frame_at.is_some_and(|t| t <= now) {
            self.particles.step();
            self.next_frame_at = Some(now.saturating_add(self.particles.frame_interval_ms()));
            changed = true;
        }

        (changed, actions)
    }

    /// Earliest pending deadline across every timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        [
            self.router.next_deadline(),
            self.notifications.next_deadline(),
            self.forms.values().filter_map(FormState::next_deadline).min(),
            self.search_debounce_until,
            self.pending.as_ref().map(|p| p.due_ms),
            self.next_frame_at.filter(|_| self.particles.is_active()),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// A wake request when the earliest deadline precedes the one already
    /// scheduled.
    pub fn schedule_wake(&mut self) -> Option<Action> {
        let deadline = self.next_deadline()?.max(self.now_ms);
        if self.scheduled_wake.is_some_and(|w| w <= deadline) {
            return None;
        }

        self.scheduled_wake = Some(deadline);
        Some(Action::ScheduleWake {
            after_ms: deadline - self.now_ms,
        })
    }

    // Dashboard

    /// Dashboard rows after kid filtering and the applied search, in catalog
    /// order. Rows left empty by the search are dropped.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let kid = self.current_profile().is_some_and(|p| p.is_kid);
        let query = self.applied_search.trim();
        let matcher = (!query.is_empty()).then(SkimMatcherV2::default);

        CATALOG
            .iter()
            .filter_map(|row| {
                let items: Vec<VisibleItem> = row
                    .items
                    .iter()
                    .filter(|item| !kid || item.kid_safe)
                    .filter_map(|item| {
                        let title = self.translator.t(item.title_key);
                        let highlight_ranges = match &matcher {
                            None => Vec::new(),
                            Some(m) => {
                                let (_score, indices) = m.fuzzy_indices(&title, query)?;
                                coalesce(&indices)
                            }
                        };
                        Some(VisibleItem {
                            item: *item,
                            title,
                            highlight_ranges,
                        })
                    })
                    .collect();

                (!items.is_empty()).then_some(VisibleRow {
                    title_key: row.title_key,
                    items,
                })
            })
            .collect()
    }
}

/// Views reachable from the navigation menu, in header order.
#[must_use]
pub const fn menu_views() -> &'static [ViewId] {
    &[
        ViewId::Home,
        ViewId::Support,
        ViewId::Faq,
        ViewId::Security,
        ViewId::Settings,
        ViewId::Terms,
    ]
}

/// Collapses sorted match indices into `(start, end)` runs.
fn coalesce(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let config = Config {
            rng_seed: Some(3),
            failure_rate: 0.0,
            transition_ms: 0,
            ..Config::default()
        };
        AppState::new(config, Stores::in_memory())
    }

    #[test]
    fn coalesce_merges_runs() {
        assert_eq!(coalesce(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
        assert!(coalesce(&[]).is_empty());
    }

    #[test]
    fn wake_is_only_requested_when_earlier() {
        let mut state = state();
        state.notify("msg_online", Severity::Success);
        assert_eq!(state.schedule_wake(), Some(Action::ScheduleWake { after_ms: 5000 }));
        assert_eq!(state.schedule_wake(), None);

        state.input_mode = InputMode::Search;
        state.router.navigate("#dashboard", &state.session.clone(), 0);
        state.type_char('x');
        assert_eq!(state.schedule_wake(), Some(Action::ScheduleWake { after_ms: 300 }));
    }

    #[test]
    fn kid_profile_sees_only_kid_safe_titles() {
        let mut state = state();
        state.session = Session::signed_in(User::from_email("ana@example.com"), false);
        state.session.selected_profile = Some("profile_2".into());

        let rows = state.visible_rows();
        assert!(rows.iter().flat_map(|r| &r.items).all(|i| i.item.kid_safe));
        assert!(!rows.is_empty());
    }

    #[test]
    fn search_keeps_catalog_order() {
        let mut state = state();
        state.translator = Translator::new(Language::En, Language::Es);
        state.applied_search = "drama".into();

        let rows = state.visible_rows();
        let titles: Vec<&str> = rows
            .iter()
            .flat_map(|r| r.items.iter().map(|i| i.title.as_str()))
            .collect();
        assert_eq!(titles, vec!["Modern Drama", "Modern Drama"]);
        assert_eq!(rows[0].title_key, "dashboard_continue_watching");
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut state = state();
        state.tick(500);
        state.tick(100);
        assert_eq!(state.now_ms(), 500);
    }

    #[test]
    fn faq_toggle_ignores_out_of_range() {
        let mut state = state();
        assert!(state.toggle_faq(1));
        assert!(state.faq_expanded.contains(&1));
        assert!(state.toggle_faq(1));
        assert!(state.faq_expanded.is_empty());
        assert!(!state.toggle_faq(9));
    }
}
