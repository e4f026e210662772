use crate::form::Summary;
use crate::state::AppState;
use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use crate::widgets::traits::RenderContext;

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

#[derive(Debug, Default, Clone)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn render(&self, state: &AppState) -> RenderFrame {
        let mut frame = RenderFrame::default();
        frame
            .lines
            .push(vec![Span::styled(state.title(), self.theme.title)]);
        frame
            .lines
            .push(vec![Span::styled(state.hint(), self.theme.hint)]);
        frame.lines.push(Vec::new());

        match state.form().summary() {
            Some(summary) => self.render_summary(summary, &mut frame),
            None => self.render_form(state, &mut frame),
        }
        frame
    }

    fn render_form(&self, state: &AppState, frame: &mut RenderFrame) {
        let ctx = RenderContext {
            focused_id: state.focused_id().map(Into::into),
        };

        for node in state.visible_nodes() {
            let row_offset = frame.lines.len().min(u16::MAX as usize) as u16;
            if ctx.is_focused(node.id())
                && let Some(local_cursor) = node.cursor_pos()
            {
                frame.cursor = Some(CursorPos {
                    col: local_cursor.col,
                    row: row_offset.saturating_add(local_cursor.row),
                });
            }
            frame.lines.extend(node.draw(&ctx).lines);

            if let Some(error) = state.visible_error(node.id()) {
                frame
                    .lines
                    .push(vec![Span::styled(format!("  ! {error}"), self.theme.error)]);
            }
        }
    }

    fn render_summary(&self, summary: &Summary, frame: &mut RenderFrame) {
        for line in summary.lines() {
            frame.lines.push(vec![
                Span::styled(format!("  {}: ", line.label), self.theme.summary_label),
                Span::styled(line.value, self.theme.summary_value),
            ]);
        }
    }
}
