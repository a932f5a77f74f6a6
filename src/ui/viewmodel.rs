//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! every string is already translated and every password already masked.
//!
//! # Example
//!
//! ```rust
//! use companyplus::ui::viewmodel::{FooterInfo, ToastInfo};
//! use companyplus::notifications::Severity;
//!
//! let toast = ToastInfo {
//!     id: 1,
//!     icon: Severity::Success.icon(),
//!     message: "Signed in successfully".to_string(),
//!     severity: Severity::Success,
//! };
//! let footer = FooterInfo { keybindings: "q: quit".to_string() };
//! assert_eq!(toast.icon, "✔");
//! assert!(!footer.keybindings.is_empty());
//! ```

use crate::domain::ViewId;
use crate::forms::{FieldKind, StrengthLevel};
use crate::notifications::{NotificationId, Severity};
use crate::particles::ParticleDot;
use crate::ui::theme::ColorScheme;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Pane title, `"{view title} · COMPANY+"`.
    pub title: String,

    /// Effective colour scheme.
    pub scheme: ColorScheme,

    /// `Some("light" | "dark")` for an explicit preference, `None` under auto.
    pub scheme_marker: Option<&'static str>,

    pub address_bar: AddressBarInfo,

    /// `None` when the current route hides the header.
    pub header: Option<HeaderInfo>,

    /// One container per view. Exactly one is visible.
    pub views: Vec<ViewContainer>,

    /// Content of the visible view.
    pub body: ViewBody,

    pub toasts: Vec<ToastInfo>,

    /// Decorative dots in body coordinates.
    pub particles: Vec<ParticleDot>,

    pub overlay: Option<OverlayInfo>,

    pub footer: FooterInfo,

    /// A simulated request is in flight.
    pub loading: bool,

    pub online: bool,
}

impl UIViewModel {
    /// The view whose container is visible.
    #[must_use]
    pub fn visible_view(&self) -> Option<ViewId> {
        self.views.iter().find(|v| v.visible).map(|v| v.view)
    }
}

/// The fragment line at the top of the pane.
#[derive(Debug, Clone)]
pub struct AddressBarInfo {
    pub prompt: String,
    /// Current fragment, or the buffer while editing.
    pub text: String,
    pub editing: bool,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub brand: String,
    pub links: Vec<NavLink>,
    /// Sign-in links, or the user's name when signed in.
    pub account: Vec<NavLink>,
    /// Native name of the active language.
    pub language: String,
    /// Translated theme preference.
    pub theme: String,
    /// The pane is too narrow for inline links; show the menu hint instead.
    pub collapsed: bool,
}

/// A navigation link with its shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub view: Option<ViewId>,
    pub hotkey: Option<char>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContainer {
    pub view: ViewId,
    pub visible: bool,
}

/// Per-view content.
#[derive(Debug, Clone)]
pub enum ViewBody {
    Home(HomeBody),
    Form(FormBody),
    Profiles(ProfilesBody),
    Dashboard(DashboardBody),
    Faq(FaqBody),
    Settings(SettingsBody),
    /// Static pages: support, security and terms.
    Info(InfoBody),
}

#[derive(Debug, Clone)]
pub struct HomeBody {
    pub title: String,
    pub highlight: String,
    pub subtitle: String,
    pub actions: Vec<MenuEntry>,
    pub features_title: String,
    pub features: Vec<InfoSection>,
}

/// A rendered form, used both as a view body and inside the add-profile modal.
#[derive(Debug, Clone)]
pub struct FormBody {
    pub title: String,
    pub subtitle: String,
    pub fields: Vec<FieldInfo>,
    pub submit_label: String,
    pub submitting: bool,
    /// Typing goes to this form.
    pub editing: bool,
    /// Secondary links such as "forgot your password?".
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub label: String,
    /// Display value; passwords are masked unless revealed.
    pub value: String,
    pub kind: FieldKind,
    pub checked: bool,
    pub error: Option<String>,
    pub focused: bool,
    pub revealed: bool,
    pub strength: Option<StrengthMeter>,
}

/// Password strength under a field, present while it is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthMeter {
    pub level: StrengthLevel,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct ProfilesBody {
    pub title: String,
    pub subtitle: String,
    pub cards: Vec<ProfileCard>,
    /// Present while another profile can still be created.
    pub add: Option<MenuEntry>,
}

#[derive(Debug, Clone)]
pub struct ProfileCard {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub kid_badge: Option<String>,
    pub selected: bool,
    pub current: bool,
}

#[derive(Debug, Clone)]
pub struct DashboardBody {
    pub welcome: String,
    pub profile: Option<String>,
    pub search: SearchBarInfo,
    pub rows: Vec<ContentRow>,
    /// Shown instead of rows when the search matches nothing.
    pub empty: Option<EmptyState>,
    pub user_menu: Vec<NavLink>,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub placeholder: String,
    pub query: String,
    pub focused: bool,
}

#[derive(Debug, Clone)]
pub struct ContentRow {
    pub title: String,
    pub items: Vec<ContentTile>,
}

#[derive(Debug, Clone)]
pub struct ContentTile {
    pub title: String,
    /// Character ranges matched by the search, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
    pub selected: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct FaqBody {
    pub title: String,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone)]
pub struct FaqItem {
    pub question: String,
    /// `Some` while expanded.
    pub answer: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct SettingsBody {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

#[derive(Debug, Clone)]
pub struct InfoBody {
    pub title: String,
    pub subtitle: Option<String>,
    pub sections: Vec<InfoSection>,
}

#[derive(Debug, Clone)]
pub struct InfoSection {
    pub heading: Option<String>,
    pub text: String,
}

/// A selectable line in a menu or list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    /// Secondary text, e.g. the current value of a setting.
    pub detail: Option<String>,
    pub selected: bool,
    /// Marks the entry matching the current state (active view, language).
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct ToastInfo {
    pub id: NotificationId,
    pub icon: &'static str,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone)]
pub enum OverlayInfo {
    Menu { title: String, entries: Vec<MenuEntry> },
    Modal { form: FormBody },
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}
