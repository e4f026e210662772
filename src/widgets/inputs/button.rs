use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext,
};

pub struct ButtonInput {
    base: WidgetBase,
    text: String,
}

impl ButtonInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            base: WidgetBase::new(id, label.clone()),
            text: label,
        }
    }
}

impl Drawable for ButtonInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let style = if focused {
            Style::new()
                .color(Color::White)
                .background(Color::Blue)
                .bold()
        } else {
            Style::new().color(Color::DarkGrey)
        };

        DrawOutput {
            lines: vec![vec![
                Span::new(format!("{} ", self.base.focus_marker(focused))),
                Span::styled(format!("[ {} ]", self.text), style),
            ]],
        }
    }
}

impl Interactive for ButtonInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }
}
