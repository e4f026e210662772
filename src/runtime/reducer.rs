use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::state::AppState;
use crate::terminal::KeyCode;
use crate::widgets::traits::InteractionResult;
use tracing::debug;

pub struct Reducer;

impl Reducer {
    pub fn reduce(state: &mut AppState, command: Command) -> Vec<Effect> {
        if state.form().is_submitted() {
            return Self::reduce_summary(state, command);
        }

        match command {
            Command::Exit => {
                state.request_exit();
                vec![Effect::RequestRender]
            }
            Command::Submit => {
                state.submit();
                vec![Effect::RequestRender]
            }
            Command::NextFocus => {
                state.focus_next();
                vec![Effect::RequestRender]
            }
            Command::PrevFocus => {
                state.focus_prev();
                vec![Effect::RequestRender]
            }
            Command::InputKey(key) => collect_effects(state.dispatch_key_to_focused(key)),
            Command::TextAction(action) => {
                collect_effects(state.dispatch_text_action_to_focused(action))
            }
        }
    }

    /// The summary view only listens for the keys that leave it.
    fn reduce_summary(state: &mut AppState, command: Command) -> Vec<Effect> {
        match command {
            Command::Exit | Command::Submit => {
                state.request_exit();
                vec![Effect::RequestRender]
            }
            Command::InputKey(key) if key.code == KeyCode::Enter => {
                state.request_exit();
                vec![Effect::RequestRender]
            }
            other => {
                debug!(command = ?other, "ignored on summary view");
                vec![]
            }
        }
    }
}

fn collect_effects(result: InteractionResult) -> Vec<Effect> {
    let mut effects: Vec<Effect> = result.actions.into_iter().map(Effect::Action).collect();
    if result.request_render {
        effects.push(Effect::RequestRender);
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::Reducer;
    use crate::form::validation::{INVALID_AGE, INVALID_EMAIL, REQUIRED};
    use crate::form::{Field, RegistrationForm};
    use crate::runtime::command::Command;
    use crate::runtime::effect::Effect;
    use crate::runtime::key_bindings::KeyBindings;
    use crate::state::AppState;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
    use crate::widgets::traits::TextAction;
    use std::collections::VecDeque;

    /// Reduces a command and follows widget actions the same way the runtime does.
    fn drive(state: &mut AppState, command: Command) {
        let mut queue = VecDeque::from([command]);
        while let Some(command) = queue.pop_front() {
            for effect in Reducer::reduce(state, command) {
                if let Effect::Action(action) = effect
                    && let Some(next) = state.handle_widget_action(action)
                {
                    queue.push_back(next);
                }
            }
        }
    }

    fn press(state: &mut AppState, key: KeyEvent) {
        let command = KeyBindings::new().resolve(key);
        drive(state, command);
    }

    fn type_text(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            press(state, KeyEvent::plain(KeyCode::Char(ch)));
        }
    }

    fn fill_valid(state: &mut AppState) {
        type_text(state, "Jane Doe");
        press(state, KeyEvent::plain(KeyCode::Tab));
        type_text(state, "jane@example.com");
        press(state, KeyEvent::plain(KeyCode::Tab));
        type_text(state, "30");
    }

    #[test]
    fn enter_on_empty_form_reports_three_errors() {
        let mut state = AppState::new(RegistrationForm::new());
        press(&mut state, KeyEvent::plain(KeyCode::Enter));

        let form = state.form();
        assert!(!form.is_submitted());
        assert_eq!(form.error(Field::FullName), Some(REQUIRED));
        assert_eq!(form.error(Field::Email), Some(INVALID_EMAIL));
        assert_eq!(form.error(Field::Age), Some(INVALID_AGE));
        assert_eq!(form.error(Field::GuestName), None);
    }

    #[test]
    fn valid_entry_switches_to_summary_and_enter_exits() {
        let mut state = AppState::new(RegistrationForm::new());
        fill_valid(&mut state);
        press(&mut state, KeyEvent::plain(KeyCode::Enter));

        let summary = state.form().summary().expect("summary after valid submit");
        assert_eq!(summary.lines().len(), 3);
        assert!(!state.should_exit());

        press(&mut state, KeyEvent::plain(KeyCode::Char('x')));
        assert!(!state.should_exit());
        press(&mut state, KeyEvent::plain(KeyCode::Enter));
        assert!(state.should_exit());
    }

    #[test]
    fn guest_toggle_and_name_produce_fourth_summary_line() {
        let mut state = AppState::new(RegistrationForm::new());
        fill_valid(&mut state);
        press(&mut state, KeyEvent::plain(KeyCode::Down));
        press(&mut state, KeyEvent::plain(KeyCode::Right));
        assert_eq!(state.form().error(Field::GuestName), Some(REQUIRED));

        press(&mut state, KeyEvent::plain(KeyCode::Down));
        assert_eq!(state.focused_id(), Some("guestName"));
        type_text(&mut state, "John");
        press(&mut state, KeyEvent::plain(KeyCode::Down));
        assert_eq!(state.focused_id(), Some("submit"));
        press(&mut state, KeyEvent::plain(KeyCode::Enter));

        let lines = state.form().summary().expect("accepted").lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3].label, "Guest Name");
        assert_eq!(lines[3].value, "John");
    }

    #[test]
    fn word_delete_and_back_tab_edit_previous_field() {
        let mut state = AppState::new(RegistrationForm::new());
        type_text(&mut state, "Jane Doe");
        press(&mut state, KeyEvent::plain(KeyCode::Tab));
        press(
            &mut state,
            KeyEvent {
                code: KeyCode::BackTab,
                modifiers: KeyModifiers::SHIFT,
            },
        );
        drive(&mut state, Command::TextAction(TextAction::DeleteWordLeft));
        assert_eq!(state.form().state().full_name, "Jane ");
    }

    #[test]
    fn escape_exits_from_form() {
        let mut state = AppState::new(RegistrationForm::new());
        press(&mut state, KeyEvent::plain(KeyCode::Esc));
        assert!(state.should_exit());
    }
}
