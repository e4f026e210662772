use crate::core::value::Value;
use crate::core::NodeId;
use crate::runtime::event::{ValueChange, WidgetAction};
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::SpanLine;
use crate::widgets::inputs::text_edit;

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub focused_id: Option<NodeId>,
}

impl RenderContext {
    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_id.as_ref().is_some_and(|focused| focused.as_str() == id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

pub trait Drawable: Send {
    fn id(&self) -> &str;
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn input_done() -> Self {
        Self::with_action(WidgetAction::InputDone)
    }

    /// Handled result that reports the new value when a change target is set.
    pub fn value_changed(target: Option<&NodeId>, value: Value) -> Self {
        match target {
            Some(target) => Self::with_action(WidgetAction::ValueChanged {
                change: ValueChange::new(target.clone(), value),
            }),
            None => Self::handled(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    DeleteWordLeft,
    DeleteWordRight,
}

pub struct TextEditState<'a> {
    pub value: &'a mut String,
    pub cursor: &'a mut usize,
}

impl TextAction {
    pub(crate) fn apply(self, state: &mut TextEditState<'_>) -> bool {
        match self {
            Self::DeleteWordLeft => text_edit::delete_word_left(state.value, state.cursor),
            Self::DeleteWordRight => text_edit::delete_word_right(state.value, state.cursor),
        }
    }
}

/// Every interactive node is a focus target.
pub trait Interactive: Send {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        None
    }

    fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        let Some(mut state) = self.text_editing() else {
            return InteractionResult::ignored();
        };
        if action.apply(&mut state) {
            InteractionResult::handled()
        } else {
            InteractionResult::ignored()
        }
    }

    /// Cursor position relative to the node's first drawn line.
    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }

    fn value(&self) -> Option<Value> {
        None
    }
    fn set_value(&mut self, _value: Value) {}
}

pub trait InteractiveNode: Drawable + Interactive {}
impl<T> InteractiveNode for T where T: Drawable + Interactive {}
