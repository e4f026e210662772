use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Age,
    IsAttendingWithGuest,
    GuestName,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FullName,
        Field::Email,
        Field::Age,
        Field::IsAttendingWithGuest,
        Field::GuestName,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Age => "age",
            Self::IsAttendingWithGuest => "isAttendingWithGuest",
            Self::GuestName => "guestName",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Age => "Age",
            Self::IsAttendingWithGuest => "Are you attending with a guest?",
            Self::GuestName => "Guest Name",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::FullName => Some("Enter your full name"),
            Self::Email => Some("Enter your email"),
            Self::Age => Some("Enter your age"),
            Self::IsAttendingWithGuest => None,
            Self::GuestName => Some("Enter your guest's name"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
