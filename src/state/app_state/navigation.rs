use super::AppState;
use crate::runtime::command::Command;
use crate::runtime::event::WidgetAction;
use crate::terminal::{CursorPos, KeyEvent};
use crate::widgets::node::{find_node, find_node_mut};
use crate::widgets::traits::{InteractionResult, TextAction};
use tracing::debug;

impl AppState {
    pub fn dispatch_key_to_focused(&mut self, key: KeyEvent) -> InteractionResult {
        let Some(focused_id) = self.focus.current_id().map(ToOwned::to_owned) else {
            return InteractionResult::ignored();
        };
        let Some(node) = find_node_mut(self.nodes.as_mut_slice(), &focused_id) else {
            return InteractionResult::ignored();
        };
        node.on_key(key)
    }

    pub fn dispatch_text_action_to_focused(&mut self, action: TextAction) -> InteractionResult {
        let Some(focused_id) = self.focus.current_id().map(ToOwned::to_owned) else {
            return InteractionResult::ignored();
        };
        let Some(node) = find_node_mut(self.nodes.as_mut_slice(), &focused_id) else {
            return InteractionResult::ignored();
        };
        node.on_text_action(action)
    }

    pub fn focus_next(&mut self) {
        self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus.prev();
    }

    /// Cursor of the focused node, relative to that node's first line.
    pub fn focused_cursor(&self) -> Option<CursorPos> {
        let focused_id = self.focus.current_id()?;
        find_node(self.nodes.as_slice(), focused_id)?.cursor_pos()
    }

    /// Applies an action emitted by a widget. `InputDone` turns into a submit.
    pub fn handle_widget_action(&mut self, action: WidgetAction) -> Option<Command> {
        match action {
            WidgetAction::ValueChanged { change } => {
                self.sync_value(change);
                None
            }
            WidgetAction::InputDone => Some(Command::Submit),
        }
    }

    /// Validates and submits the form. Returns `true` once the summary is shown.
    pub fn submit(&mut self) -> bool {
        let accepted = self.form.submit().is_accepted();
        if accepted {
            self.rebuild_focus();
        } else if let Some(first) = self.form.errors().fields().next() {
            debug!(field = %first, "first invalid field");
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use crate::form::validation::{INVALID_AGE, REQUIRED};
    use crate::form::{Field, RegistrationForm};
    use crate::runtime::command::Command;
    use crate::runtime::event::WidgetAction;
    use crate::state::AppState;
    use crate::terminal::{KeyCode, KeyEvent};

    fn press(state: &mut AppState, code: KeyCode) {
        let result = state.dispatch_key_to_focused(KeyEvent::plain(code));
        for action in result.actions {
            state.handle_widget_action(action);
        }
    }

    fn type_text(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            press(state, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_updates_form_state_immediately() {
        let mut state = AppState::new(RegistrationForm::new());
        type_text(&mut state, "Jane");
        assert_eq!(state.form().state().full_name, "Jane");
    }

    #[test]
    fn toggling_guest_reveals_field_and_keeps_focus() {
        let mut state = AppState::new(RegistrationForm::new());
        for _ in 0..3 {
            state.focus_next();
        }
        assert_eq!(state.focused_id(), Some("isAttendingWithGuest"));

        press(&mut state, KeyCode::Right);
        assert!(state.form().state().is_attending_with_guest);
        assert_eq!(state.focused_id(), Some("isAttendingWithGuest"));
        assert_eq!(state.visible_error("guestName"), Some(REQUIRED));

        state.focus_next();
        assert_eq!(state.focused_id(), Some("guestName"));
    }

    #[test]
    fn enter_on_text_input_requests_submit() {
        let mut state = AppState::new(RegistrationForm::new());
        let result = state.dispatch_key_to_focused(KeyEvent::plain(KeyCode::Enter));
        let [action] = result.actions.as_slice() else {
            panic!("expected one action");
        };
        assert_eq!(
            state.handle_widget_action(action.clone()),
            Some(Command::Submit)
        );
        assert!(matches!(action, WidgetAction::InputDone));
    }

    #[test]
    fn rejected_submit_keeps_focus_and_reports_errors() {
        let mut state = AppState::new(RegistrationForm::new());
        state.focus_next();
        assert!(!state.submit());
        assert_eq!(state.focused_id(), Some("email"));
        assert_eq!(state.form().error(Field::Age), Some(INVALID_AGE));
    }

    #[test]
    fn accepted_submit_clears_focus() {
        let mut state = AppState::new(RegistrationForm::new());
        type_text(&mut state, "Jane Doe");
        state.focus_next();
        type_text(&mut state, "jane@example.com");
        state.focus_next();
        type_text(&mut state, "30");

        assert!(state.submit());
        assert_eq!(state.focused_id(), None);
        assert_eq!(state.focused_cursor(), None);
    }
}
