//! Validation rules.
//!
//! Rules for a field always run in the same order: required, email, minimum
//! length, maximum length, confirmation. Evaluation stops at the first
//! failure, so a field reports at most one message. Values are trimmed before
//! checking, and every rule except `Required` passes on an empty value.

use crate::i18n::Translator;
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Checkbox,
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label_key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    /// Name of a field whose value this one must equal.
    pub must_match: Option<&'static str>,
    /// Shows the strength meter while the field is non-empty.
    pub strength_meter: bool,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(name: &'static str, label_key: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label_key,
            kind,
            required: false,
            min_len: None,
            max_len: None,
            must_match: None,
            strength_meter: false,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn min_len(mut self, n: usize) -> Self {
        self.min_len = Some(n);
        self
    }

    #[must_use]
    pub const fn max_len(mut self, n: usize) -> Self {
        self.max_len = Some(n);
        self
    }

    #[must_use]
    pub const fn must_match(mut self, other: &'static str) -> Self {
        self.must_match = Some(other);
        self
    }

    #[must_use]
    pub const fn strength_meter(mut self) -> Self {
        self.strength_meter = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    MinLength(usize),
    MaxLength(usize),
    MatchesField(&'static str),
}

/// A failed rule, kept as a translation key so the message follows the
/// active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub key: &'static str,
    pub limit: Option<usize>,
}

impl ValidationError {
    const fn new(key: &'static str) -> Self {
        Self { key, limit: None }
    }

    #[must_use]
    pub fn message(&self, tr: &Translator) -> String {
        match self.limit {
            Some(n) => tr.t_with(self.key, &[("n", &n.to_string())]),
            None => tr.t(self.key),
        }
    }
}

/// Rules for `spec`, in evaluation order.
///
/// # Example
///
/// ```rust
/// use companyplus::forms::{rules_for, FieldKind, FieldSpec, Rule};
///
/// let spec = FieldSpec::new("email", "login_email", FieldKind::Email).required();
/// assert_eq!(rules_for(&spec), vec![Rule::Required, Rule::Email]);
/// ```
#[must_use]
pub fn rules_for(spec: &FieldSpec) -> Vec<Rule> {
    let mut rules = Vec::new();
    if spec.required {
        rules.push(Rule::Required);
    }
    if spec.kind == FieldKind::Email {
        rules.push(Rule::Email);
    }
    if let Some(n) = spec.min_len {
        rules.push(Rule::MinLength(n));
    }
    if let Some(n) = spec.max_len {
        rules.push(Rule::MaxLength(n));
    }
    if let Some(other) = spec.must_match {
        rules.push(Rule::MatchesField(other));
    }
    rules
}

impl Rule {
    /// Checks a trimmed text value. `other` resolves confirmation targets.
    fn check<'a>(self, value: &str, other: impl Fn(&str) -> Option<&'a str>) -> Option<ValidationError> {
        let failed = match self {
            Self::Required => value.is_empty(),
            Self::Email => !value.is_empty() && !email_regex().is_match(value),
            Self::MinLength(n) => !value.is_empty() && value.chars().count() < n,
            Self::MaxLength(n) => !value.is_empty() && value.chars().count() > n,
            Self::MatchesField(name) => other(name).is_some_and(|target| target.trim() != value),
        };

        failed.then(|| match self {
            Self::Required => ValidationError::new("validation_required"),
            Self::Email => ValidationError::new("validation_email"),
            Self::MinLength(n) => ValidationError {
                key: "validation_min_length",
                limit: Some(n),
            },
            Self::MaxLength(n) => ValidationError {
                key: "validation_max_length",
                limit: Some(n),
            },
            Self::MatchesField(_) => ValidationError::new("validation_match"),
        })
    }
}

/// Validates one field and returns its first failure.
///
/// Checkboxes only know `Required`, which demands `checked`.
pub fn validate_field<'a>(
    spec: &FieldSpec,
    value: &str,
    checked: bool,
    other: impl Fn(&str) -> Option<&'a str>,
) -> Option<ValidationError> {
    if spec.kind == FieldKind::Checkbox {
        return (spec.required && !checked).then(|| ValidationError::new("validation_checkbox"));
    }

    let value = value.trim();
    rules_for(spec)
        .into_iter()
        .find_map(|rule| rule.check(value, &other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    fn none(_: &str) -> Option<&'static str> {
        None
    }

    #[test]
    fn rule_order_is_fixed() {
        let spec = FieldSpec::new("pw", "register_password", FieldKind::Email)
            .required()
            .min_len(8)
            .max_len(64)
            .must_match("other");
        assert_eq!(
            rules_for(&spec),
            vec![
                Rule::Required,
                Rule::Email,
                Rule::MinLength(8),
                Rule::MaxLength(64),
                Rule::MatchesField("other"),
            ]
        );
    }

    #[test]
    fn only_first_failure_is_reported() {
        let spec = FieldSpec::new("email", "login_email", FieldKind::Email).required().min_len(10);
        let err = validate_field(&spec, "a@b", false, none).unwrap();
        assert_eq!(err.key, "validation_email");
    }

    #[test]
    fn whitespace_only_fails_required() {
        let spec = FieldSpec::new("name", "register_name", FieldKind::Text).required();
        assert_eq!(
            validate_field(&spec, "   ", false, none).map(|e| e.key),
            Some("validation_required")
        );
    }

    #[test]
    fn optional_empty_field_skips_length_rules() {
        let spec = FieldSpec::new("nick", "profile_name", FieldKind::Text).min_len(3);
        assert_eq!(validate_field(&spec, "", false, none), None);
        assert!(validate_field(&spec, "ab", false, none).is_some());
    }

    #[test]
    fn email_pattern() {
        let spec = FieldSpec::new("email", "login_email", FieldKind::Email);
        assert!(validate_field(&spec, " ana@example.com ", false, none).is_none());
        for bad in ["ana", "ana@", "ana@example", "a na@example.com", "@example.com"] {
            assert!(validate_field(&spec, bad, false, none).is_some(), "{bad}");
        }
    }

    #[test]
    fn confirmation_compares_trimmed_values() {
        let spec = FieldSpec::new("confirm", "register_confirm_password", FieldKind::Password)
            .must_match("password");
        let lookup = |name: &str| (name == "password").then_some("secret123 ");
        assert!(validate_field(&spec, "secret123", false, lookup).is_none());
        assert_eq!(
            validate_field(&spec, "secret124", false, lookup).map(|e| e.key),
            Some("validation_match")
        );
    }

    #[test]
    fn required_checkbox_must_be_checked() {
        let spec = FieldSpec::new("terms", "register_terms", FieldKind::Checkbox).required();
        assert!(validate_field(&spec, "", false, none).is_some());
        assert!(validate_field(&spec, "", true, none).is_none());
    }

    #[test]
    fn length_messages_carry_the_limit() {
        let tr = Translator::new(Language::Es, Language::Es);
        let spec = FieldSpec::new("pw", "register_password", FieldKind::Password).min_len(8);
        let err = validate_field(&spec, "short", false, none).unwrap();
        assert_eq!(err.message(&tr), "Debe tener al menos 8 caracteres");
    }
}
