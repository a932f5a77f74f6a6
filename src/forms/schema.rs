//! Field layouts for every form in the application.

use crate::forms::rules::{FieldKind, FieldSpec};

const LOGIN: &[FieldSpec] = &[
    FieldSpec::new("email", "login_email", FieldKind::Email).required(),
    FieldSpec::new("password", "login_password", FieldKind::Password).required(),
    FieldSpec::new("remember", "login_remember", FieldKind::Checkbox),
];

const REGISTER: &[FieldSpec] = &[
    FieldSpec::new("name", "register_name", FieldKind::Text).required(),
    FieldSpec::new("email", "register_email", FieldKind::Email).required(),
    FieldSpec::new("password", "register_password", FieldKind::Password)
        .required()
        .min_len(8)
        .strength_meter(),
    FieldSpec::new("confirm", "register_confirm_password", FieldKind::Password)
        .required()
        .must_match("password"),
    FieldSpec::new("terms", "register_terms", FieldKind::Checkbox).required(),
];

const FORGOT_PASSWORD: &[FieldSpec] =
    &[FieldSpec::new("email", "forgot_email", FieldKind::Email).required()];

const ADD_PROFILE: &[FieldSpec] = &[
    FieldSpec::new("name", "profile_name", FieldKind::Text)
        .required()
        .max_len(20),
    FieldSpec::new("kids", "profile_kids", FieldKind::Checkbox),
];

const RENAME_PROFILE: &[FieldSpec] = &[FieldSpec::new("name", "profile_name", FieldKind::Text)
    .required()
    .max_len(20)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Login,
    Register,
    ForgotPassword,
    AddProfile,
    RenameProfile,
}

impl FormKind {
    #[must_use]
    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Login => LOGIN,
            Self::Register => REGISTER,
            Self::ForgotPassword => FORGOT_PASSWORD,
            Self::AddProfile => ADD_PROFILE,
            Self::RenameProfile => RENAME_PROFILE,
        }
    }

    /// Translation key of the submit button.
    #[must_use]
    pub const fn submit_key(self) -> &'static str {
        match self {
            Self::Login => "login_button",
            Self::Register => "register_button",
            Self::ForgotPassword => "forgot_button",
            Self::AddProfile => "profile_create",
            Self::RenameProfile => "profile_save",
        }
    }
}
