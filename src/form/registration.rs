use crate::form::field::Field;
use crate::form::state::{FieldChange, FormState};
use crate::form::summary::Summary;
use crate::form::validation::{self, ErrorMap};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitted(Summary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome<'a> {
    Accepted(&'a Summary),
    Rejected(&'a ErrorMap),
}

impl SubmitOutcome<'_> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// The registration form: field values, errors, and the one-way
/// `Editing` -> `Submitted` transition.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    state: FormState,
    errors: ErrorMap,
    phase: Phase,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::with_state(FormState::default())
    }

    pub fn with_state(state: FormState) -> Self {
        let mut form = Self {
            state,
            errors: ErrorMap::new(),
            phase: Phase::Editing,
        };
        validation::apply_guest_rule(&form.state, &mut form.errors);
        form
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, Phase::Submitted(_))
    }

    pub fn summary(&self) -> Option<&Summary> {
        match &self.phase {
            Phase::Submitted(summary) => Some(summary),
            Phase::Editing => None,
        }
    }

    pub fn is_visible(&self, field: Field) -> bool {
        field != Field::GuestName || self.state.is_attending_with_guest
    }

    pub fn visible_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.is_visible(*field))
            .collect()
    }

    /// Applies one field change. Ignored once the form has been submitted.
    pub fn update(&mut self, change: FieldChange) -> bool {
        if self.is_submitted() {
            debug!(field = %change.field(), "ignoring update after submit");
            return false;
        }
        let field = change.field();
        self.state.apply(change);
        debug!(field = %field, "field updated");

        if matches!(field, Field::IsAttendingWithGuest | Field::GuestName)
            && validation::apply_guest_rule(&self.state, &mut self.errors)
        {
            debug!("guest name required while attending with guest");
        }
        true
    }

    pub fn submit(&mut self) -> SubmitOutcome<'_> {
        if !self.is_submitted() {
            self.errors = validation::validate(&self.state);
            if self.errors.is_empty() {
                info!("submission accepted");
                self.phase = Phase::Submitted(Summary::capture(&self.state));
            } else {
                debug!(
                    errors = self.errors.len(),
                    fields = ?self.errors.fields().collect::<Vec<_>>(),
                    "submission rejected"
                );
            }
        }
        self.outcome()
    }

    fn outcome(&self) -> SubmitOutcome<'_> {
        match &self.phase {
            Phase::Submitted(summary) => SubmitOutcome::Accepted(summary),
            Phase::Editing => SubmitOutcome::Rejected(&self.errors),
        }
    }
}
