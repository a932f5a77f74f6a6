//! Editable form state.
//!
//! Typing into a field arms a debounce; the field is validated once the
//! debounce settles or immediately when focus leaves it. Submitting validates
//! everything and moves focus to the first invalid field.

use crate::forms::rules::{validate_field, FieldKind, FieldSpec, ValidationError};
use crate::forms::schema::FormKind;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub checked: bool,
    pub error: Option<ValidationError>,
    /// Password shown in clear text.
    pub revealed: bool,
    /// Pending debounced validation deadline.
    debounce_until: Option<u64>,
}

/// Trimmed values of a successfully validated form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    text: BTreeMap<&'static str, String>,
    flags: BTreeMap<&'static str, bool>,
}

impl FormValues {
    /// Trimmed text of `name`, or `""` for unknown fields.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.text.get(name).map_or("", String::as_str)
    }

    #[must_use]
    pub fn checked(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// A submission is already in flight.
    Busy,
    /// Validation failed; `field` is the index of the first invalid field.
    Invalid { field: usize },
}

#[derive(Debug, Clone)]
pub struct FormState {
    kind: FormKind,
    fields: Vec<FieldState>,
    focus: usize,
    debounce_ms: u64,
    /// Set while a simulated request for this form is pending.
    pub submitting: bool,
}

impl FormState {
    #[must_use]
    pub fn new(kind: FormKind, debounce_ms: u64) -> Self {
        Self {
            kind,
            fields: vec![FieldState::default(); kind.fields().len()],
            focus: 0,
            debounce_ms,
            submitting: false,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FormKind {
        self.kind
    }

    #[must_use]
    pub fn specs(&self) -> &'static [FieldSpec] {
        self.kind.fields()
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }

    /// Clears values, errors and the in-flight flag.
    pub fn reset(&mut self) {
        self.fields.fill(FieldState::default());
        self.focus = 0;
        self.submitting = false;
    }

    fn focused_spec(&self) -> Option<&'static FieldSpec> {
        self.kind.fields().get(self.focus)
    }

    /// Types `c` into the focused field.
    ///
    /// On a checkbox, a space toggles it and validates at once; other
    /// characters are ignored.
    pub fn input(&mut self, c: char, now_ms: u64) {
        let Some(spec) = self.focused_spec() else {
            return;
        };

        if spec.kind == FieldKind::Checkbox {
            if c == ' ' {
                self.fields[self.focus].checked = !self.fields[self.focus].checked;
                self.validate(self.focus);
            }
            return;
        }

        let field = &mut self.fields[self.focus];
        field.value.push(c);
        field.debounce_until = Some(now_ms.saturating_add(self.debounce_ms));
    }

    pub fn backspace(&mut self, now_ms: u64) {
        let Some(spec) = self.focused_spec() else {
            return;
        };
        if spec.kind == FieldKind::Checkbox {
            return;
        }

        let field = &mut self.fields[self.focus];
        if field.value.pop().is_some() {
            field.debounce_until = Some(now_ms.saturating_add(self.debounce_ms));
        }
    }

    /// Moves focus forward, blurring the current field.
    pub fn focus_next(&mut self) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        self.blur();
        self.focus = (self.focus + 1) % len;
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        self.blur();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Shows or hides the focused password. Returns whether the focused
    /// field is a password.
    pub fn toggle_reveal(&mut self) -> bool {
        let Some(spec) = self.focused_spec() else {
            return false;
        };
        if spec.kind != FieldKind::Password {
            return false;
        }
        let field = &mut self.fields[self.focus];
        field.revealed = !field.revealed;
        true
    }

    /// Sets the text of `name` without validating it.
    pub fn prefill(&mut self, name: &str, value: &str) {
        if let Some(index) = self.kind.fields().iter().position(|s| s.name == name) {
            self.fields[index].value = value.to_string();
        }
    }

    /// Validates the focused field now and drops its pending debounce.
    fn blur(&mut self) {
        if self.focus < self.fields.len() {
            self.fields[self.focus].debounce_until = None;
            self.validate(self.focus);
        }
    }

    /// Validates every field whose debounce has elapsed. Returns whether any
    /// field was validated.
    pub fn flush_debounce(&mut self, now_ms: u64) -> bool {
        let due: Vec<usize> = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.debounce_until.is_some_and(|t| t <= now_ms))
            .map(|(i, _)| i)
            .collect();

        for &index in &due {
            self.fields[index].debounce_until = None;
            self.validate(index);
        }
        !due.is_empty()
    }

    /// Earliest pending debounce deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.fields.iter().filter_map(|f| f.debounce_until).min()
    }

    fn validate(&mut self, index: usize) -> bool {
        let specs = self.kind.fields();
        let Some(spec) = specs.get(index) else {
            return true;
        };

        let fields = &self.fields;
        let lookup = |name: &str| {
            specs
                .iter()
                .position(|s| s.name == name)
                .and_then(|i| fields.get(i))
                .map(|f| f.value.as_str())
        };
        let error = validate_field(spec, &fields[index].value, fields[index].checked, lookup);

        self.fields[index].error = error;
        error.is_none()
    }

    /// Validates every field and returns the trimmed values.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Busy`] while a submission is in flight
    /// - [`SubmitError::Invalid`] with the first failing field, which also
    ///   receives focus
    pub fn submit(&mut self) -> std::result::Result<FormValues, SubmitError> {
        if self.submitting {
            return Err(SubmitError::Busy);
        }

        let mut first_invalid = None;
        for index in 0..self.fields.len() {
            self.fields[index].debounce_until = None;
            if !self.validate(index) && first_invalid.is_none() {
                first_invalid = Some(index);
            }
        }

        if let Some(field) = first_invalid {
            self.focus = field;
            return Err(SubmitError::Invalid { field });
        }

        let mut values = FormValues::default();
        for (spec, field) in self.kind.fields().iter().zip(&self.fields) {
            if spec.kind == FieldKind::Checkbox {
                values.flags.insert(spec.name, field.checked);
            } else {
                values.text.insert(spec.name, field.value.trim().to_string());
            }
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut FormState, text: &str, now: u64) {
        for c in text.chars() {
            form.input(c, now);
        }
    }

    #[test]
    fn debounce_rearms_on_each_keystroke() {
        let mut form = FormState::new(FormKind::Login, 300);
        form.input('a', 0);
        form.input('b', 200);
        assert_eq!(form.next_deadline(), Some(500));

        assert!(!form.flush_debounce(400));
        assert!(form.fields()[0].error.is_none());

        assert!(form.flush_debounce(500));
        assert_eq!(form.fields()[0].error.map(|e| e.key), Some("validation_email"));
        assert_eq!(form.next_deadline(), None);
    }

    #[test]
    fn blur_validates_immediately_and_cancels_debounce() {
        let mut form = FormState::new(FormKind::Login, 300);
        type_str(&mut form, "nope", 0);
        form.focus_next();

        assert_eq!(form.focus(), 1);
        assert_eq!(form.next_deadline(), None);
        assert!(form.fields()[0].error.is_some());
    }

    #[test]
    fn submit_focuses_first_invalid_field() {
        let mut form = FormState::new(FormKind::Register, 300);
        form.focus_next();
        type_str(&mut form, "ana@example.com", 0);
        form.focus_next();
        form.focus_next();

        assert_eq!(form.submit(), Err(SubmitError::Invalid { field: 0 }));
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn valid_register_form_yields_trimmed_values() {
        let mut form = FormState::new(FormKind::Register, 300);
        type_str(&mut form, "  Ana Lopez ", 0);
        form.focus_next();
        type_str(&mut form, "ana@example.com", 0);
        form.focus_next();
        type_str(&mut form, "secret123", 0);
        form.focus_next();
        type_str(&mut form, "secret123", 0);
        form.focus_next();
        form.input(' ', 0);

        let values = form.submit().unwrap();
        assert_eq!(values.get("name"), "Ana Lopez");
        assert!(values.checked("terms"));
        assert!(form.fields().iter().all(|f| f.error.is_none()));
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut form = FormState::new(FormKind::Register, 300);
        type_str(&mut form, "Ana", 0);
        form.focus_next();
        type_str(&mut form, "ana@example.com", 0);
        form.focus_next();
        type_str(&mut form, "secret123", 0);
        form.focus_next();
        type_str(&mut form, "secret999", 0);
        form.focus_next();
        form.input(' ', 0);

        assert_eq!(form.submit(), Err(SubmitError::Invalid { field: 3 }));
        assert_eq!(form.fields()[3].error.map(|e| e.key), Some("validation_match"));
    }

    #[test]
    fn submitting_blocks_resubmission() {
        let mut form = FormState::new(FormKind::ForgotPassword, 300);
        type_str(&mut form, "ana@example.com", 0);
        assert!(form.submit().is_ok());

        form.submitting = true;
        assert_eq!(form.submit(), Err(SubmitError::Busy));
    }

    #[test]
    fn reveal_only_applies_to_passwords() {
        let mut form = FormState::new(FormKind::Login, 300);
        assert!(!form.toggle_reveal());

        form.focus_next();
        assert!(form.toggle_reveal());
        assert!(form.fields()[1].revealed);

        form.reset();
        assert!(!form.fields()[1].revealed);
    }

    #[test]
    fn prefill_sets_value_without_errors() {
        let mut form = FormState::new(FormKind::AddProfile, 300);
        form.prefill("name", "Niños");
        form.prefill("missing", "x");

        assert_eq!(form.fields()[0].value, "Niños");
        assert!(form.fields()[0].error.is_none());
        assert_eq!(form.next_deadline(), None);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = FormState::new(FormKind::Login, 300);
        form.focus_prev();
        assert_eq!(form.focus(), 2);
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }
}
