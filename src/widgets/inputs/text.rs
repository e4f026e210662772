use super::text_edit;
use crate::core::NodeId;
use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, TextAction,
    TextEditState,
};
use unicode_width::UnicodeWidthChar;

pub struct TextInput {
    base: WidgetBase,
    value: String,
    cursor: usize,
    placeholder: Option<String>,
    change_target: Option<NodeId>,
}

impl TextInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(id, label),
            value: String::new(),
            cursor: 0,
            placeholder: None,
            change_target: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Every edit reports the full new value to `target`.
    pub fn with_change_target(mut self, target: impl Into<NodeId>) -> Self {
        self.change_target = Some(target.into());
        self
    }

    fn edited_result(&self) -> InteractionResult {
        InteractionResult::value_changed(
            self.change_target.as_ref(),
            Value::Text(self.value.clone()),
        )
    }
}

impl Drawable for TextInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let mut line = vec![Span::new(self.base.input_prefix(ctx))];
        match &self.placeholder {
            Some(placeholder) if self.value.is_empty() => {
                line.push(Span::styled(
                    placeholder.clone(),
                    Style::new().color(Color::DarkGrey),
                ));
            }
            _ => line.push(Span::new(self.value.clone())),
        }
        DrawOutput { lines: vec![line] }
    }
}

impl Interactive for TextInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                self.edited_result()
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.value, &mut self.cursor) {
                    return self.edited_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.value, &mut self.cursor) {
                    return self.edited_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Left => {
                if text_edit::move_left(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                if text_edit::move_right(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.value);
                InteractionResult::handled()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        Some(TextEditState {
            value: &mut self.value,
            cursor: &mut self.cursor,
        })
    }

    fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        let Some(mut state) = self.text_editing() else {
            return InteractionResult::ignored();
        };
        if action.apply(&mut state) {
            return self.edited_result();
        }
        InteractionResult::ignored()
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.value.clone()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(v) = value.to_text_scalar() {
            self.value = v;
            self.cursor = text_edit::char_count(&self.value);
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let value_width: usize = self
            .value
            .chars()
            .take(text_edit::clamp_cursor(self.cursor, &self.value))
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum();
        let col = self.base.prefix_width() + value_width;
        Some(CursorPos {
            col: col.min(u16::MAX as usize) as u16,
            row: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::event::WidgetAction;
    use crate::ui::span::line_text;

    fn ctx(focused: Option<&str>) -> RenderContext {
        RenderContext {
            focused_id: focused.map(NodeId::from),
        }
    }

    fn type_text(input: &mut TextInput, text: &str) -> InteractionResult {
        let mut last = InteractionResult::ignored();
        for ch in text.chars() {
            last = input.on_key(KeyEvent::plain(KeyCode::Char(ch)));
        }
        last
    }

    #[test]
    fn typing_reports_full_value_to_change_target() {
        let mut input = TextInput::new("fullName", "Full Name").with_change_target("fullName");
        let result = type_text(&mut input, "Jane");

        let [WidgetAction::ValueChanged { change }] = result.actions.as_slice() else {
            panic!("expected one value change, got {:?}", result.actions);
        };
        assert_eq!(change.target.as_str(), "fullName");
        assert_eq!(change.value, Value::Text("Jane".to_string()));
    }

    #[test]
    fn cursor_moves_do_not_report_changes() {
        let mut input = TextInput::new("age", "Age").with_change_target("age");
        type_text(&mut input, "42");
        let result = input.on_key(KeyEvent::plain(KeyCode::Left));
        assert!(result.handled);
        assert!(result.actions.is_empty());
    }

    #[test]
    fn backspace_on_empty_is_ignored() {
        let mut input = TextInput::new("age", "Age");
        assert!(!input.on_key(KeyEvent::plain(KeyCode::Backspace)).handled);
    }

    #[test]
    fn enter_signals_input_done() {
        let mut input = TextInput::new("email", "Email");
        let result = input.on_key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
        });
        assert!(matches!(result.actions.as_slice(), [WidgetAction::InputDone]));
    }

    #[test]
    fn placeholder_shown_only_when_empty() {
        let mut input = TextInput::new("email", "Email").with_placeholder("Enter your email");
        let out = input.draw(&ctx(Some("email")));
        assert_eq!(line_text(&out.lines[0]), "> Email: Enter your email");

        type_text(&mut input, "a@b.io");
        let out = input.draw(&ctx(None));
        assert_eq!(line_text(&out.lines[0]), "  Email: a@b.io");
    }

    #[test]
    fn cursor_column_includes_label_prefix() {
        let mut input = TextInput::new("age", "Age");
        type_text(&mut input, "30");
        assert_eq!(input.cursor_pos(), Some(CursorPos { col: 9, row: 0 }));
    }

    #[test]
    fn delete_word_left_reports_change() {
        let mut input = TextInput::new("fullName", "Full Name").with_change_target("fullName");
        input.set_value(Value::from("Jane Doe"));
        let result = input.on_text_action(TextAction::DeleteWordLeft);
        assert_eq!(input.value(), Some(Value::Text("Jane ".to_string())));
        assert_eq!(result.actions.len(), 1);
    }
}
