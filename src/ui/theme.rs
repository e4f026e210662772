use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub hint: Style,
    pub error: Style,
    pub summary_label: Style,
    pub summary_value: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::new().color(Color::Cyan).bold(),
            hint: Style::new().color(Color::DarkGrey),
            error: Style::new().color(Color::Red),
            summary_label: Style::new().bold(),
            summary_value: Style::new().color(Color::Green),
        }
    }
}
