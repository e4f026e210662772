//! The registration form model: field values, validation and the summary
//! snapshot. Nothing in here knows about terminals or widgets.

pub mod field;
pub mod registration;
pub mod state;
pub mod summary;
pub mod validation;

pub use field::Field;
pub use registration::{Phase, RegistrationForm, SubmitOutcome};
pub use state::{FieldChange, FormState};
pub use summary::{Summary, SummaryLine};
pub use validation::{ErrorMap, validate};
