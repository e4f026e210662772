use crate::form::field::Field;
use crate::form::state::FormState;
use serde::Serialize;

/// Values captured at the moment a submission was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    full_name: String,
    email: String,
    age: String,
    is_attending_with_guest: bool,
    guest_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl SummaryLine {
    fn new(field: Field, value: &str) -> Self {
        Self {
            label: field.label(),
            value: value.to_string(),
        }
    }
}

impl Summary {
    pub fn capture(state: &FormState) -> Self {
        let guest_name = if state.is_attending_with_guest {
            state.guest_name.clone()
        } else {
            String::new()
        };
        Self {
            full_name: state.full_name.clone(),
            email: state.email.clone(),
            age: state.age.clone(),
            is_attending_with_guest: state.is_attending_with_guest,
            guest_name,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn is_attending_with_guest(&self) -> bool {
        self.is_attending_with_guest
    }

    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    /// Display lines; the guest line only appears when attending.
    pub fn lines(&self) -> Vec<SummaryLine> {
        let mut lines = vec![
            SummaryLine::new(Field::FullName, &self.full_name),
            SummaryLine::new(Field::Email, &self.email),
            SummaryLine::new(Field::Age, &self.age),
        ];
        if self.is_attending_with_guest {
            lines.push(SummaryLine::new(Field::GuestName, &self.guest_name));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::Summary;
    use crate::form::state::FormState;
    use pretty_assertions::assert_eq;

    #[test]
    fn guest_name_blanked_when_not_attending() {
        let state = FormState {
            full_name: "Jane Doe".to_string(),
            guest_name: "Leftover".to_string(),
            ..FormState::default()
        };
        let summary = Summary::capture(&state);
        assert_eq!(summary.guest_name(), "");
        assert_eq!(summary.lines().len(), 3);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let state = FormState {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            age: "30".to_string(),
            is_attending_with_guest: true,
            guest_name: "John".to_string(),
        };
        let json = serde_json::to_value(Summary::capture(&state)).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "fullName": "Jane Doe",
                "email": "jane@example.com",
                "age": "30",
                "isAttendingWithGuest": true,
                "guestName": "John",
            })
        );
    }
}
