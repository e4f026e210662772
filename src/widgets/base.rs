use crate::widgets::traits::RenderContext;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct WidgetBase {
    id: String,
    label: String,
}

impl WidgetBase {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_focused(&self, ctx: &RenderContext) -> bool {
        ctx.is_focused(&self.id)
    }

    pub fn focus_marker(&self, focused: bool) -> &'static str {
        if focused { ">" } else { " " }
    }

    /// `"> Label: "` when focused, `"  Label: "` otherwise. Question labels
    /// keep their `?` and skip the colon.
    pub fn input_prefix(&self, ctx: &RenderContext) -> String {
        format!(
            "{} {}{}",
            self.focus_marker(self.is_focused(ctx)),
            self.label,
            self.label_separator()
        )
    }

    pub fn prefix_width(&self) -> usize {
        2 + UnicodeWidthStr::width(self.label.as_str()) + self.label_separator().len()
    }

    fn label_separator(&self) -> &'static str {
        if self.label.ends_with('?') { " " } else { ": " }
    }
}
