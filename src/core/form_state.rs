//! Form state with per-field validation
//!
//! `FormState` tracks the current value and error of every field of a form
//! plus an overall validity flag. A field's error is only reported once the
//! field has been changed, while validity always covers every field.

use std::collections::HashMap;
use std::hash::Hash;

use super::validation::{FieldError, Rule, validate};

/// Describes the fields of a form
pub trait FormFields: Copy + Eq + Hash + 'static {
    /// All fields, in display order
    fn all() -> &'static [Self];

    /// Wire/input name of the field
    fn name(self) -> &'static str;

    /// Client-side rules for the field
    fn rules(self) -> &'static [Rule];

    /// Find a field by its input name
    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|field| field.name() == name)
    }

    /// Check a value against this field's rules
    fn validate(self, value: &str) -> Result<(), FieldError> {
        validate(value, self.rules())
    }
}

/// Values, errors and validity of a form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F: FormFields> {
    values: HashMap<F, String>,
    errors: HashMap<F, FieldError>,
    is_valid: bool,
}

impl<F: FormFields> Default for FormState<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FormFields> FormState<F> {
    /// Empty form; invalid whenever a field is required
    pub fn new() -> Self {
        let mut state = Self {
            values: HashMap::new(),
            errors: HashMap::new(),
            is_valid: false,
        };
        state.is_valid = state.compute_validity();
        state
    }

    /// Current value of a field (empty if never changed)
    pub fn value(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Current error of a field
    pub fn error(&self, field: F) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Whether every field passes its rules
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Apply an input change to one field
    pub fn handle_change(&mut self, field: F, value: impl Into<String>) {
        let value = value.into();
        match field.validate(&value) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(err) => {
                self.errors.insert(field, err);
            }
        }
        self.values.insert(field, value);
        self.is_valid = self.compute_validity();
    }

    /// Record an error for a field without touching its value
    pub fn set_error(&mut self, field: F, error: FieldError) {
        self.errors.insert(field, error);
    }

    /// Back to the initial empty state
    pub fn reset_form(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.is_valid = self.compute_validity();
    }

    fn compute_validity(&self) -> bool {
        F::all()
            .iter()
            .all(|field| field.validate(self.value(*field)).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Field {
        Title,
        Note,
    }

    impl FormFields for Field {
        fn all() -> &'static [Self] {
            &[Field::Title, Field::Note]
        }

        fn name(self) -> &'static str {
            match self {
                Field::Title => "title",
                Field::Note => "note",
            }
        }

        fn rules(self) -> &'static [Rule] {
            match self {
                Field::Title => &[Rule::Required, Rule::MaxLength(10)],
                Field::Note => &[Rule::MaxLength(5)],
            }
        }
    }

    #[test]
    fn test_new_form_is_empty_and_invalid() {
        let form = FormState::<Field>::new();

        assert_eq!(form.value(Field::Title), "");
        assert!(form.error(Field::Title).is_none());
        assert!(!form.is_valid());
    }

    #[test]
    fn test_change_updates_only_that_field() {
        let mut form = FormState::<Field>::new();
        form.handle_change(Field::Title, "Borscht");
        form.handle_change(Field::Note, "hot");
        form.handle_change(Field::Title, "Pelmeni");

        assert_eq!(form.value(Field::Title), "Pelmeni");
        assert_eq!(form.value(Field::Note), "hot");
    }

    #[test]
    fn test_errors_only_for_touched_fields() {
        let mut form = FormState::<Field>::new();
        form.handle_change(Field::Note, "far too long");

        assert!(matches!(
            form.error(Field::Note),
            Some(FieldError::TooLong { max: 5, .. })
        ));
        assert!(form.error(Field::Title).is_none());
        assert!(!form.is_valid());
    }

    #[test]
    fn test_validity_follows_every_change() {
        let mut form = FormState::<Field>::new();

        form.handle_change(Field::Title, "Soup");
        assert!(form.is_valid());

        form.handle_change(Field::Title, "");
        assert!(!form.is_valid());
        assert_eq!(form.error(Field::Title), Some(&FieldError::Required));

        form.handle_change(Field::Title, "Soup");
        assert!(form.is_valid());
        assert!(form.error(Field::Title).is_none());
    }

    #[test]
    fn test_field_from_name() {
        assert_eq!(Field::from_name("title"), Some(Field::Title));
        assert_eq!(Field::from_name("note"), Some(Field::Note));
        assert_eq!(Field::from_name("unknown"), None);
    }

    #[test]
    fn test_set_error_keeps_value() {
        let mut form = FormState::<Field>::new();
        form.handle_change(Field::Title, "Soup");
        form.set_error(Field::Title, FieldError::Server("taken".to_string()));

        assert_eq!(form.value(Field::Title), "Soup");
        assert_eq!(
            form.error(Field::Title).map(ToString::to_string),
            Some("taken".to_string())
        );
    }

    #[test]
    fn test_reset_form() {
        let mut form = FormState::<Field>::new();
        form.handle_change(Field::Title, "Soup");
        form.handle_change(Field::Note, "too long note");
        form.reset_form();

        assert_eq!(form, FormState::new());
    }
}
