//! View model computation.
//!
//! Everything here reads [`AppState`] and produces a [`UIViewModel`]; nothing
//! mutates. Strings are translated at projection time, so a language switch
//! regenerates every label on the next render.

use super::modes::{InputMode, Overlay};
use super::state::{menu_views, AppState, FAQ_TOPICS};
use crate::domain::ViewId;
use crate::forms::{password_strength, FieldKind, FormKind, FormState};
use crate::i18n::Language;
use crate::ui::theme::ThemePreference;
use crate::ui::viewmodel::{
    AddressBarInfo, ContentRow, ContentTile, DashboardBody, EmptyState, FaqBody, FaqItem,
    FieldInfo, FooterInfo, FormBody, HeaderInfo, HomeBody, InfoBody, InfoSection, MenuEntry,
    NavLink, OverlayInfo, ProfileCard, ProfilesBody, SearchBarInfo, SettingsBody, StrengthMeter,
    ToastInfo, UIViewModel, ViewBody, ViewContainer,
};

/// Below this width the header collapses its links behind the menu key.
const COLLAPSE_BELOW_COLS: usize = 100;

/// Shortcut shown next to each menu view in the header.
const fn hotkey(view: ViewId) -> Option<char> {
    match view {
        ViewId::Home => Some('H'),
        ViewId::Login => Some('L'),
        ViewId::Register => Some('R'),
        ViewId::ForgotPassword => Some('W'),
        ViewId::Profiles => Some('P'),
        ViewId::Dashboard => Some('D'),
        ViewId::Support => Some('S'),
        ViewId::Faq => Some('F'),
        ViewId::Security => Some('Y'),
        ViewId::Settings => Some('C'),
        ViewId::Terms => Some('T'),
    }
}

const fn nav_key(view: ViewId) -> &'static str {
    match view {
        ViewId::Home => "nav_home",
        ViewId::Support => "nav_support",
        ViewId::Faq => "nav_faq",
        ViewId::Security => "nav_security",
        ViewId::Settings => "nav_settings",
        ViewId::Terms => "nav_terms",
        ViewId::Login => "header_login",
        ViewId::Register => "header_register",
        ViewId::ForgotPassword => "login_forgot",
        ViewId::Profiles => "user_profiles",
        ViewId::Dashboard => "title_dashboard",
    }
}

const fn theme_key(preference: ThemePreference) -> &'static str {
    match preference {
        ThemePreference::Light => "theme_light",
        ThemePreference::Dark => "theme_dark",
        ThemePreference::Auto => "theme_auto",
    }
}

impl AppState {
    /// Computes the renderable view model for a `rows` x `cols` pane.
    ///
    /// # Example
    ///
    /// ```rust
    /// use companyplus::{AppState, Config, ViewId};
    /// use companyplus::storage::Stores;
    ///
    /// let state = AppState::new(Config::default(), Stores::in_memory());
    /// let vm = state.compute_viewmodel(24, 120);
    /// assert_eq!(vm.visible_view(), Some(ViewId::Home));
    /// assert_eq!(vm.views.iter().filter(|v| v.visible).count(), 1);
    /// ```
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let current = self.router.current();
        let route = self.router.current_route();

        UIViewModel {
            title: self.title(),
            scheme: self.theme.resolved(),
            scheme_marker: self.theme.marker(),
            address_bar: self.compute_address_bar(),
            header: route.show_header.then(|| self.compute_header(cols)),
            views: ViewId::ALL
                .iter()
                .map(|view| ViewContainer {
                    view: *view,
                    visible: *view == current,
                })
                .collect(),
            body: self.compute_body(current),
            toasts: self
                .notifications
                .iter()
                .map(|n| ToastInfo {
                    id: n.id,
                    icon: n.severity.icon(),
                    message: n.message.clone(),
                    severity: n.severity,
                })
                .collect(),
            particles: self.particles.dots(cols, rows.saturating_sub(super::state::CHROME_ROWS)),
            overlay: self.compute_overlay(),
            footer: self.compute_footer(),
            loading: self.pending.is_some(),
            online: self.online,
        }
    }

    fn compute_address_bar(&self) -> AddressBarInfo {
        let editing = self.input_mode == InputMode::Address;
        AddressBarInfo {
            prompt: self.translator.t("address_prompt"),
            text: if editing {
                self.address_buffer.clone()
            } else {
                self.current_fragment()
            },
            editing,
        }
    }

    fn link(&self, view: ViewId) -> NavLink {
        NavLink {
            label: self.translator.t(nav_key(view)),
            view: Some(view),
            hotkey: hotkey(view),
            active: self.router.current() == view,
        }
    }

    fn compute_header(&self, cols: usize) -> HeaderInfo {
        let account = match &self.session.user {
            Some(user) if self.session.is_authenticated() => vec![
                NavLink {
                    label: user.name.clone(),
                    view: None,
                    hotkey: None,
                    active: false,
                },
                self.link(ViewId::Dashboard),
            ],
            _ => vec![self.link(ViewId::Login), self.link(ViewId::Register)],
        };

        HeaderInfo {
            brand: self.translator.t("app_name"),
            links: menu_views().iter().map(|v| self.link(*v)).collect(),
            account,
            language: self.translator.language().native_name().to_string(),
            theme: self.translator.t(theme_key(self.theme.get())),
            collapsed: cols < COLLAPSE_BELOW_COLS,
        }
    }

    fn compute_body(&self, view: ViewId) -> ViewBody {
        let tr = &self.translator;
        match view {
            ViewId::Home => ViewBody::Home(HomeBody {
                title: tr.t("hero_title"),
                highlight: tr.t("hero_highlight"),
                subtitle: tr.t("hero_subtitle"),
                actions: ["hero_cta_register", "hero_cta_login"]
                    .iter()
                    .enumerate()
                    .map(|(i, key)| MenuEntry {
                        label: tr.t(key),
                        detail: None,
                        selected: self.cursor == i,
                        active: false,
                    })
                    .collect(),
                features_title: tr.t("features_title"),
                features: ["quality", "offline", "profiles", "family"]
                    .iter()
                    .map(|f| InfoSection {
                        heading: Some(tr.t(&format!("feature_{f}_title"))),
                        text: tr.t(&format!("feature_{f}_desc")),
                    })
                    .collect(),
            }),
            ViewId::Login => self.form_view(FormKind::Login, "login", &[ViewId::ForgotPassword, ViewId::Register]),
            ViewId::Register => self.form_view(FormKind::Register, "register", &[ViewId::Login]),
            ViewId::ForgotPassword => self.form_view(FormKind::ForgotPassword, "forgot", &[ViewId::Login]),
            ViewId::Profiles => self.compute_profiles(),
            ViewId::Dashboard => self.compute_dashboard(),
            ViewId::Faq => ViewBody::Faq(FaqBody {
                title: tr.t("faq_title"),
                items: FAQ_TOPICS
                    .iter()
                    .enumerate()
                    .map(|(i, topic)| FaqItem {
                        question: tr.t(&format!("faq_{topic}_title")),
                        answer: self
                            .faq_expanded
                            .contains(&i)
                            .then(|| tr.t(&format!("faq_{topic}_answer"))),
                        selected: self.cursor == i,
                    })
                    .collect(),
            }),
            ViewId::Settings => ViewBody::Settings(SettingsBody {
                title: tr.t("settings_title"),
                entries: vec![
                    MenuEntry {
                        label: tr.t("settings_theme"),
                        detail: Some(tr.t(theme_key(self.theme.get()))),
                        selected: self.cursor == 0,
                        active: false,
                    },
                    MenuEntry {
                        label: tr.t("settings_language"),
                        detail: Some(tr.language().native_name().to_string()),
                        selected: self.cursor == 1,
                        active: false,
                    },
                ],
            }),
            ViewId::Support => ViewBody::Info(InfoBody {
                title: tr.t("support_title"),
                subtitle: Some(tr.t("support_subtitle")),
                sections: vec![
                    InfoSection {
                        heading: Some(tr.t("support_contact_title")),
                        text: tr.t("support_contact_email"),
                    },
                    InfoSection {
                        heading: None,
                        text: tr.t("support_hours"),
                    },
                ],
            }),
            ViewId::Security => ViewBody::Info(InfoBody {
                title: tr.t("security_title"),
                subtitle: None,
                sections: ["password", "phishing", "devices"]
                    .iter()
                    .map(|tip| InfoSection {
                        heading: None,
                        text: tr.t(&format!("security_tip_{tip}")),
                    })
                    .collect(),
            }),
            ViewId::Terms => ViewBody::Info(InfoBody {
                title: tr.t("terms_title"),
                subtitle: Some(tr.t("terms_intro")),
                sections: ["use", "privacy"]
                    .iter()
                    .map(|part| InfoSection {
                        heading: None,
                        text: tr.t(&format!("terms_{part}")),
                    })
                    .collect(),
            }),
        }
    }

    fn form_view(&self, kind: FormKind, prefix: &str, links: &[ViewId]) -> ViewBody {
        let mut body = self.compute_form(kind, prefix);
        body.links = links.iter().map(|v| self.link(*v)).collect();
        ViewBody::Form(body)
    }

    fn compute_form(&self, kind: FormKind, prefix: &str) -> FormBody {
        let tr = &self.translator;
        let editing = self.input_mode == InputMode::Editing && self.active_form_kind() == Some(kind);

        let fields = self.form(kind).map_or_else(Vec::new, |form: &FormState| {
            form.specs()
                .iter()
                .zip(form.fields())
                .enumerate()
                .map(|(i, (spec, field))| FieldInfo {
                    label: tr.t(spec.label_key),
                    value: if spec.kind == FieldKind::Password && !field.revealed {
                        "•".repeat(field.value.chars().count())
                    } else {
                        field.value.clone()
                    },
                    kind: spec.kind,
                    checked: field.checked,
                    error: field.error.map(|e| e.message(tr)),
                    focused: editing && form.focus() == i,
                    revealed: field.revealed,
                    strength: (spec.strength_meter && !field.value.is_empty()).then(|| {
                        let level = password_strength(&field.value);
                        StrengthMeter {
                            level,
                            label: tr.t(level.label_key()),
                        }
                    }),
                })
                .collect()
        });

        let (title, subtitle) = match kind {
            FormKind::AddProfile => (tr.t("profiles_add"), String::new()),
            FormKind::RenameProfile => (tr.t("profiles_rename"), String::new()),
            _ => (tr.t(&format!("{prefix}_title")), tr.t(&format!("{prefix}_subtitle"))),
        };

        FormBody {
            title,
            subtitle,
            fields,
            submit_label: tr.t(kind.submit_key()),
            submitting: self.form(kind).is_some_and(|f| f.submitting),
            editing,
            links: Vec::new(),
        }
    }

    fn compute_profiles(&self) -> ViewBody {
        let tr = &self.translator;
        let current = self.session.selected_profile.as_deref();

        ViewBody::Profiles(ProfilesBody {
            title: tr.t("profiles_title"),
            subtitle: tr.t("profiles_subtitle"),
            cards: self
                .profiles
                .profiles()
                .iter()
                .enumerate()
                .map(|(i, p)| ProfileCard {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    avatar: p.avatar.clone(),
                    kid_badge: p.is_kid.then(|| tr.t("profile_kids_badge")),
                    selected: self.overlay.is_none() && self.cursor == i,
                    current: current == Some(p.id.as_str()),
                })
                .collect(),
            add: (!self.profiles.is_full()).then(|| MenuEntry {
                label: tr.t("profiles_add"),
                detail: None,
                selected: self.overlay.is_none() && self.cursor == self.profiles.len(),
                active: false,
            }),
        })
    }

    fn compute_dashboard(&self) -> ViewBody {
        let tr = &self.translator;
        let visible = self.visible_rows();

        let mut index = 0;
        let rows: Vec<ContentRow> = visible
            .into_iter()
            .map(|row| ContentRow {
                title: tr.t(row.title_key),
                items: row
                    .items
                    .into_iter()
                    .map(|item| {
                        let tile = ContentTile {
                            title: item.title,
                            highlight_ranges: item.highlight_ranges,
                            selected: self.input_mode == InputMode::Browse && self.cursor == index,
                        };
                        index += 1;
                        tile
                    })
                    .collect(),
            })
            .collect();

        let welcome = match &self.session.user {
            Some(user) => format!("{}, {}", tr.t("dashboard_welcome"), user.name),
            None => tr.t("dashboard_welcome"),
        };

        ViewBody::Dashboard(DashboardBody {
            welcome,
            profile: self.current_profile().map(|p| p.name.clone()),
            search: SearchBarInfo {
                placeholder: tr.t("dashboard_search_placeholder"),
                query: self.search_query.clone(),
                focused: self.input_mode == InputMode::Search,
            },
            empty: rows.is_empty().then(|| EmptyState {
                message: tr.t("dashboard_no_results"),
            }),
            rows,
            user_menu: vec![
                NavLink {
                    label: tr.t("user_profiles"),
                    view: Some(ViewId::Profiles),
                    hotkey: Some('P'),
                    active: false,
                },
                NavLink {
                    label: tr.t("user_logout"),
                    view: None,
                    hotkey: Some('O'),
                    active: false,
                },
            ],
        })
    }

    fn compute_overlay(&self) -> Option<OverlayInfo> {
        let tr = &self.translator;
        match self.overlay? {
            Overlay::MobileMenu => Some(OverlayInfo::Menu {
                title: tr.t("menu"),
                entries: menu_views()
                    .iter()
                    .enumerate()
                    .map(|(i, view)| MenuEntry {
                        label: tr.t(nav_key(*view)),
                        detail: hotkey(*view).map(String::from),
                        selected: self.menu_cursor == i,
                        active: self.router.current() == *view,
                    })
                    .collect(),
            }),
            Overlay::LanguageMenu => Some(OverlayInfo::Menu {
                title: tr.t("language_menu_title"),
                entries: Language::all()
                    .iter()
                    .enumerate()
                    .map(|(i, lang)| MenuEntry {
                        label: lang.native_name().to_string(),
                        detail: Some(lang.code().to_string()),
                        selected: self.menu_cursor == i,
                        active: tr.language() == *lang,
                    })
                    .collect(),
            }),
            modal @ (Overlay::AddProfile | Overlay::RenameProfile) => Some(OverlayInfo::Modal {
                form: self.compute_form(modal.form()?, "profile"),
            }),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.overlay, self.router.current()) {
            (InputMode::Editing, _, _) => {
                "ESC: stop editing  Tab/↓: next field  ↑: previous field  Space: toggle  Alt+v: show password  Enter: submit"
            }
            (InputMode::Address, _, _) => "ESC: cancel  Enter: go  Type a fragment, e.g. #faq",
            (InputMode::Search, _, _) => "ESC: clear search  Enter: apply  Type to filter",
            (InputMode::Browse, Some(_), _) => "ESC: close  j/k: move  Enter: choose",
            (InputMode::Browse, None, ViewId::Login | ViewId::Register | ViewId::ForgotPassword) => {
                "e/Enter: edit form  H: home  g: address  t: theme  l: language  q: quit"
            }
            (InputMode::Browse, None, ViewId::Profiles) => {
                "j/k: move  Enter: select  a: add  r: rename  X: delete  O: sign out  t: theme  q: quit"
            }
            (InputMode::Browse, None, ViewId::Dashboard) => {
                "/: search  j/k: move  P: profiles  O: sign out  t: theme  l: language  q: quit"
            }
            (InputMode::Browse, None, _) => {
                "j/k: move  Enter: open  m: menu  g: address  [/]: back/forward  t: theme  l: language  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
