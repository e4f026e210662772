use crate::form::field::Field;
use serde::{Deserialize, Serialize};

/// Current values of every field, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormState {
    pub full_name: String,
    pub email: String,
    pub age: String,
    pub is_attending_with_guest: bool,
    pub guest_name: String,
}

/// A single field update, as produced by one input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    FullName(String),
    Email(String),
    Age(String),
    AttendingWithGuest(bool),
    GuestName(String),
}

impl FieldChange {
    pub fn field(&self) -> Field {
        match self {
            Self::FullName(_) => Field::FullName,
            Self::Email(_) => Field::Email,
            Self::Age(_) => Field::Age,
            Self::AttendingWithGuest(_) => Field::IsAttendingWithGuest,
            Self::GuestName(_) => Field::GuestName,
        }
    }
}

impl FormState {
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::FullName(value) => self.full_name = value,
            FieldChange::Email(value) => self.email = value,
            FieldChange::Age(value) => self.age = value,
            FieldChange::AttendingWithGuest(value) => self.is_attending_with_guest = value,
            FieldChange::GuestName(value) => self.guest_name = value,
        }
    }

    /// Text value of a text field. The guest toggle has no text value.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::FullName => Some(&self.full_name),
            Field::Email => Some(&self.email),
            Field::Age => Some(&self.age),
            Field::GuestName => Some(&self.guest_name),
            Field::IsAttendingWithGuest => None,
        }
    }

    pub fn guest_name_missing(&self) -> bool {
        self.is_attending_with_guest && self.guest_name.is_empty()
    }
}
