//! Form model and validation.
//!
//! - `rules`: validation rules and their evaluation order
//! - `schema`: field layouts of the login, register, recovery and profile forms
//! - `form`: editable form state with debounced validation
//! - `strength`: password strength meter

pub mod form;
pub mod rules;
pub mod schema;
pub mod strength;

pub use form::{FieldState, FormState, FormValues, SubmitError};
pub use rules::{rules_for, validate_field, FieldKind, FieldSpec, Rule, ValidationError};
pub use schema::FormKind;
pub use strength::{password_strength, strength_score, StrengthLevel};
