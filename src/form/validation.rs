use crate::form::field::Field;
use crate::form::state::FormState;
use crate::widgets::validators::{self, Validator, run_validators};
use indexmap::IndexMap;
use serde::Serialize;

pub const REQUIRED: &str = "Required";
pub const INVALID_EMAIL: &str = "Invalid email";
pub const INVALID_AGE: &str = "Invalid age";

/// Field errors, kept in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorMap {
    entries: IndexMap<Field, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.entries.insert(field, message.into());
        self.entries.sort_keys();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

/// Validators applied to a text field on submit.
pub fn field_validators(field: Field) -> Vec<Validator> {
    match field {
        Field::FullName => vec![validators::required(REQUIRED)],
        Field::Email => vec![
            validators::required(INVALID_EMAIL),
            validators::email(INVALID_EMAIL),
        ],
        Field::Age => vec![
            validators::required(INVALID_AGE),
            validators::positive_integer(INVALID_AGE),
        ],
        Field::GuestName => vec![validators::required(REQUIRED)],
        Field::IsAttendingWithGuest => Vec::new(),
    }
}

pub fn validate_field(state: &FormState, field: Field) -> Result<(), String> {
    if field == Field::GuestName && !state.is_attending_with_guest {
        return Ok(());
    }
    let Some(value) = state.text(field) else {
        return Ok(());
    };
    run_validators(&field_validators(field), value)
}

/// Full submit-time validation.
pub fn validate(state: &FormState) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in Field::ALL {
        if let Err(message) = validate_field(state, field) {
            errors.insert(field, message);
        }
    }
    errors
}

/// Adds the guest name error while attending with an empty guest name.
/// Never removes an existing error. Returns whether an error was added.
pub fn apply_guest_rule(state: &FormState, errors: &mut ErrorMap) -> bool {
    if state.guest_name_missing() && !errors.contains(Field::GuestName) {
        errors.insert(Field::GuestName, REQUIRED);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_state() -> FormState {
        FormState {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            age: "30".to_string(),
            ..FormState::default()
        }
    }

    #[test]
    fn empty_form_reports_name_email_and_age() {
        let errors = validate(&FormState::default());
        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(fields, vec![Field::FullName, Field::Email, Field::Age]);
        assert_eq!(errors.get(Field::FullName), Some(REQUIRED));
        assert_eq!(errors.get(Field::Email), Some(INVALID_EMAIL));
        assert_eq!(errors.get(Field::Age), Some(INVALID_AGE));
    }

    #[test]
    fn empty_form_attending_also_reports_guest_name() {
        let state = FormState {
            is_attending_with_guest: true,
            ..FormState::default()
        };
        let errors = validate(&state);
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(Field::GuestName), Some(REQUIRED));
    }

    #[test]
    fn email_cases() {
        for (email, ok) in [
            ("test@example.com", true),
            ("test@com", false),
            ("not-an-email", false),
        ] {
            let state = FormState {
                email: email.to_string(),
                ..valid_state()
            };
            assert_eq!(validate_field(&state, Field::Email).is_ok(), ok, "{email}");
        }
    }

    #[test]
    fn age_cases() {
        for (age, ok) in [
            ("0", false),
            ("-5", false),
            ("abc", false),
            ("", false),
            ("1", true),
            ("42", true),
        ] {
            let state = FormState {
                age: age.to_string(),
                ..valid_state()
            };
            assert_eq!(validate_field(&state, Field::Age).is_ok(), ok, "{age:?}");
        }
    }

    #[test]
    fn guest_name_ignored_when_not_attending() {
        let errors = validate(&valid_state());
        assert!(errors.is_empty());
    }

    #[test]
    fn guest_rule_only_adds() {
        let mut state = valid_state();
        let mut errors = ErrorMap::new();
        assert!(!apply_guest_rule(&state, &mut errors));

        state.is_attending_with_guest = true;
        assert!(apply_guest_rule(&state, &mut errors));
        assert_eq!(errors.get(Field::GuestName), Some(REQUIRED));

        state.guest_name = "John".to_string();
        assert!(!apply_guest_rule(&state, &mut errors));
        assert!(errors.contains(Field::GuestName));
    }

    #[test]
    fn insert_keeps_field_order() {
        let mut errors = ErrorMap::new();
        errors.insert(Field::GuestName, REQUIRED);
        errors.insert(Field::FullName, REQUIRED);
        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(fields, vec![Field::FullName, Field::GuestName]);
    }
}
