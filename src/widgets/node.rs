use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyEvent};
use crate::widgets::traits::{
    DrawOutput, InteractionResult, InteractiveNode, RenderContext, TextAction,
};

/// One widget in the form view.
pub struct Node {
    widget: Box<dyn InteractiveNode>,
}

impl Node {
    pub fn input(widget: impl InteractiveNode + 'static) -> Self {
        Self {
            widget: Box::new(widget),
        }
    }

    pub fn id(&self) -> &str {
        self.widget.id()
    }

    pub fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        self.widget.draw(ctx)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        self.widget.on_key(key)
    }

    pub fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        self.widget.on_text_action(action)
    }

    pub fn cursor_pos(&self) -> Option<CursorPos> {
        self.widget.cursor_pos()
    }

    pub fn value(&self) -> Option<Value> {
        self.widget.value()
    }

    pub fn set_value(&mut self, value: Value) {
        self.widget.set_value(value);
    }
}

pub fn find_node<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    nodes.iter().find(|node| node.id() == id)
}

pub fn find_node_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    nodes.iter_mut().find(|node| node.id() == id)
}
