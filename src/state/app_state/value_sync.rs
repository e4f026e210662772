use super::{AppState, GUEST_OPTIONS};
use crate::core::value::Value;
use crate::form::{Field, FieldChange, FormState};
use crate::runtime::event::ValueChange;
use tracing::debug;

impl AppState {
    /// Writes a widget edit into the form. Returns whether the form took it.
    pub(super) fn sync_value(&mut self, change: ValueChange) -> bool {
        let Some(field_change) = field_change(&change) else {
            debug!(target_id = %change.target, "value change without a form field");
            return false;
        };
        if !self.form.update(field_change) {
            return false;
        }
        if change.target.field() == Some(Field::IsAttendingWithGuest) {
            self.rebuild_focus();
        }
        true
    }
}

pub(super) fn field_change(change: &ValueChange) -> Option<FieldChange> {
    let field = change.target.field()?;
    let text = || change.value.to_text_scalar().unwrap_or_default();
    Some(match field {
        Field::FullName => FieldChange::FullName(text()),
        Field::Email => FieldChange::Email(text()),
        Field::Age => FieldChange::Age(text()),
        Field::GuestName => FieldChange::GuestName(text()),
        Field::IsAttendingWithGuest => {
            FieldChange::AttendingWithGuest(change.value.as_text() == Some(GUEST_OPTIONS[1]))
        }
    })
}

pub(super) fn widget_value(state: &FormState, field: Field) -> Value {
    match field {
        Field::IsAttendingWithGuest => {
            Value::from(GUEST_OPTIONS[usize::from(state.is_attending_with_guest)])
        }
        _ => state.text(field).map(Value::from).unwrap_or(Value::None),
    }
}
