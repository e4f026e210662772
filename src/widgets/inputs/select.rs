use crate::core::NodeId;
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext,
};

pub struct SelectInput {
    base: WidgetBase,
    options: Vec<String>,
    selected: usize,
    change_target: Option<NodeId>,
}

impl SelectInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            base: WidgetBase::new(id, label),
            options,
            selected: 0,
            change_target: None,
        }
    }

    pub fn with_change_target(mut self, target: impl Into<NodeId>) -> Self {
        self.change_target = Some(target.into());
        self
    }

    fn selected_text(&self) -> &str {
        self.options
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or("")
    }

    fn step(&mut self, forward: bool) -> bool {
        if self.options.len() < 2 {
            return false;
        }
        let len = self.options.len();
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
        true
    }

    fn changed_result(&self) -> InteractionResult {
        InteractionResult::value_changed(
            self.change_target.as_ref(),
            Value::Text(self.selected_text().to_string()),
        )
    }
}

impl Drawable for SelectInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let style = if focused {
            Style::new().color(Color::Cyan)
        } else {
            Style::default()
        };
        DrawOutput {
            lines: vec![vec![
                Span::new(self.base.input_prefix(ctx)),
                Span::styled(format!("‹ {} ›", self.selected_text()), style),
            ]],
        }
    }
}

impl Interactive for SelectInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left => {
                if self.step(false) {
                    return self.changed_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                if self.step(true) {
                    return self.changed_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.selected_text().to_string()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(text) = value.to_text_scalar()
            && let Some(position) = self.options.iter().position(|option| option == &text)
        {
            self.selected = position;
        }
    }
}
