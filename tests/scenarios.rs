use companyplus::app::InputMode;
use companyplus::forms::FormKind;
use companyplus::navigation::History;
use companyplus::notifications::Severity;
use companyplus::storage::Stores;
use companyplus::ui::viewmodel::ViewBody;
use companyplus::{handle_event, Action, AppState, Config, Event, ThemePreference, ViewId};

fn config() -> Config {
    Config {
        rng_seed: Some(11),
        failure_rate: 0.0,
        transition_ms: 0,
        ..Config::default()
    }
}

fn run(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).unwrap().1
}

fn go(state: &mut AppState, fragment: &str) -> Vec<Action> {
    run(
        state,
        Event::Navigate {
            fragment: fragment.to_string(),
        },
    )
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        run(state, Event::Char(c));
    }
}

fn advance(state: &mut AppState, ms: u64) -> Vec<Action> {
    let now_ms = state.now_ms() + ms;
    run(state, Event::Tick { now_ms })
}

fn latest_severity(state: &AppState) -> Option<Severity> {
    state.notifications.latest().map(|n| n.severity)
}

fn sign_in(state: &mut AppState) {
    go(state, "#login");
    run(state, Event::EditForm);
    type_text(state, "ana@example.com");
    run(state, Event::FocusNextField);
    type_text(state, "secret-pass");
    run(state, Event::Activate);
    assert!(state.pending.is_some());
    advance(state, 1_500);
}

#[test]
fn sign_in_pick_profile_and_sign_out() {
    let mut state = AppState::new(config(), Stores::in_memory());

    sign_in(&mut state);
    assert!(state.session.is_authenticated());
    assert_eq!(state.router.current(), ViewId::Profiles);
    assert_eq!(latest_severity(&state), Some(Severity::Success));

    let actions = run(
        &mut state,
        Event::SelectProfile {
            id: "profile_1".to_string(),
        },
    );
    assert_eq!(state.router.current(), ViewId::Dashboard);
    assert!(actions.contains(&Action::PushHistory {
        fragment: "#dashboard".to_string()
    }));
    assert_eq!(state.current_profile().map(|p| p.id.as_str()), Some("profile_1"));

    run(&mut state, Event::Logout);
    assert!(!state.session.is_authenticated());
    assert_eq!(state.router.current(), ViewId::Home);
    assert_eq!(latest_severity(&state), Some(Severity::Info));
}

#[test]
fn home_sign_in_entry_opens_login_with_particles() {
    let mut state = AppState::new(config(), Stores::in_memory());
    assert_eq!(state.router.current(), ViewId::Home);
    assert!(state.compute_viewmodel(24, 80).header.is_some());

    run(&mut state, Event::CursorDown);
    run(&mut state, Event::Activate);

    assert_eq!(state.router.current(), ViewId::Login);
    let vm = state.compute_viewmodel(24, 80);
    assert!(vm.header.is_none());
    assert!(!vm.particles.is_empty());
}

#[test]
fn signed_in_user_skips_auth_views() {
    let mut state = AppState::new(config(), Stores::in_memory());
    sign_in(&mut state);
    run(
        &mut state,
        Event::SelectProfile {
            id: "profile_2".to_string(),
        },
    );

    go(&mut state, "#login");
    assert_eq!(state.router.current(), ViewId::Dashboard);
}

#[test]
fn dashboard_requires_sign_in() {
    let mut state = AppState::new(config(), Stores::in_memory());

    let actions = go(&mut state, "#dashboard");

    assert_eq!(state.router.current(), ViewId::Login);
    assert_eq!(latest_severity(&state), Some(Severity::Warning));
    assert!(actions.contains(&Action::PushHistory {
        fragment: "#login".to_string()
    }));
}

#[test]
fn exactly_one_view_is_visible_per_fragment() {
    let mut state = AppState::new(config(), Stores::in_memory());

    for fragment in ["#faq", "#terms", "#support", "#security", "#settings", "#register"] {
        go(&mut state, fragment);
        let vm = state.compute_viewmodel(30, 120);
        assert_eq!(vm.views.iter().filter(|v| v.visible).count(), 1);
        assert_eq!(vm.visible_view(), Some(state.router.current()));
        assert_eq!(state.current_fragment(), fragment);
    }

    go(&mut state, "#no-such-page");
    assert_eq!(state.router.current(), ViewId::Home);
    assert!(matches!(state.compute_viewmodel(30, 120).body, ViewBody::Home(_)));
}

#[test]
fn theme_cycles_back_to_auto() {
    let mut state = AppState::new(config(), Stores::in_memory());
    assert_eq!(state.theme.get(), ThemePreference::Auto);

    run(&mut state, Event::ToggleTheme);
    assert_eq!(state.theme.get(), ThemePreference::Light);
    run(&mut state, Event::ToggleTheme);
    assert_eq!(state.theme.get(), ThemePreference::Dark);
    run(&mut state, Event::ToggleTheme);
    assert_eq!(state.theme.get(), ThemePreference::Auto);
}

#[test]
fn missing_translations_fall_back_to_spanish() {
    let mut state = AppState::new(config(), Stores::in_memory());

    run(
        &mut state,
        Event::SetLanguage {
            code: "fr".to_string(),
        },
    );

    assert_eq!(state.translator.t("nav_faq"), "Aide");
    assert_eq!(state.translator.t("faq_title"), "Preguntas Frecuentes");
    assert_eq!(state.translator.t("no_such_key"), "no_such_key");
}

#[test]
fn empty_required_field_blocks_submit() {
    let mut state = AppState::new(config(), Stores::in_memory());
    go(&mut state, "#login");
    run(&mut state, Event::EditForm);
    type_text(&mut state, "ana@example.com");

    run(&mut state, Event::SubmitForm);

    assert!(state.pending.is_none());
    assert_eq!(state.input_mode, InputMode::Editing);
    assert_eq!(latest_severity(&state), Some(Severity::Warning));

    let form = state.form(FormKind::Login).unwrap();
    assert_eq!(form.fields()[1].error.map(|e| e.key), Some("validation_required"));
    assert_eq!(form.focus(), 1);
}

#[test]
fn synthetic_failure_keeps_user_on_form() {
    let mut state = AppState::new(
        Config {
            failure_rate: 1.0,
            ..config()
        },
        Stores::in_memory(),
    );

    sign_in(&mut state);

    assert!(!state.session.is_authenticated());
    assert_eq!(state.router.current(), ViewId::Login);
    assert_eq!(latest_severity(&state), Some(Severity::Error));
    assert!(state.pending.is_none());
}

#[test]
fn notifications_expire_after_timeout() {
    let mut state = AppState::new(config(), Stores::in_memory());
    go(&mut state, "#dashboard");
    assert_eq!(state.notifications.len(), 1);

    advance(&mut state, 4_999);
    assert_eq!(state.notifications.len(), 1);
    advance(&mut state, 1);
    assert!(state.notifications.is_empty());
}

/// Runs the history actions the way the host does.
fn apply_history(history: &mut History, actions: &[Action]) {
    for action in actions {
        match action {
            Action::PushHistory { fragment } => history.push(fragment.as_str()),
            Action::ReplaceHistory { fragment } => history.replace(fragment.as_str()),
            _ => {}
        }
    }
}

#[test]
fn quick_back_steps_keep_history_on_visible_view() {
    let mut state = AppState::new(
        Config {
            transition_ms: 300,
            ..config()
        },
        Stores::in_memory(),
    );
    let mut history = History::new(state.current_fragment());

    for fragment in ["#faq", "#terms"] {
        let actions = go(&mut state, fragment);
        apply_history(&mut history, &actions);
        advance(&mut state, 300);
    }
    assert_eq!(history.current(), "#terms");

    for _ in 0..2 {
        let fragment = history.back().map(str::to_string).unwrap();
        let actions = run(&mut state, Event::HistoryChanged { fragment });
        apply_history(&mut history, &actions);
    }

    assert_eq!(state.current_fragment(), "#faq");
    assert_eq!(history.current(), state.current_fragment());
}

#[test]
fn renamed_profile_survives_reload() {
    let mut state = AppState::new(config(), Stores::in_memory());
    sign_in(&mut state);
    assert_eq!(state.router.current(), ViewId::Profiles);

    run(
        &mut state,
        Event::RenameProfile {
            id: "profile_1".to_string(),
        },
    );
    assert_eq!(state.input_mode, InputMode::Editing);
    for _ in 0..state.profiles.get("profile_1").unwrap().name.chars().count() {
        run(&mut state, Event::Backspace);
    }
    type_text(&mut state, "Sala");
    run(&mut state, Event::Activate);

    assert_eq!(state.overlay, None);
    assert_eq!(state.profiles.get("profile_1").map(|p| p.name.as_str()), Some("Sala"));
    assert_eq!(latest_severity(&state), Some(Severity::Success));
    assert_eq!(
        companyplus::session::ProfileManager::load(state.stores.local.as_ref())
            .get("profile_1")
            .map(|p| p.name.clone()),
        Some("Sala".to_string())
    );
}
