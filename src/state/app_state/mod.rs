mod navigation;
mod value_sync;

use crate::core::NodeId;
use crate::form::{Field, RegistrationForm};
use crate::state::focus::FocusState;
use crate::widgets::inputs::button::ButtonInput;
use crate::widgets::inputs::select::SelectInput;
use crate::widgets::inputs::text::TextInput;
use crate::widgets::node::Node;

pub const SUBMIT_ID: &str = "submit";
pub const FORM_TITLE: &str = "Registration Form";
pub const SUMMARY_TITLE: &str = "Summary";
pub const FORM_HINT: &str = "Tab/↑↓ move · ←/→ toggle · Enter submit · Esc quit";
pub const SUMMARY_HINT: &str = "Enter or Esc to exit";

pub(crate) const GUEST_OPTIONS: [&str; 2] = ["No", "Yes"];

pub struct AppState {
    form: RegistrationForm,
    nodes: Vec<Node>,
    focus: FocusState,
    should_exit: bool,
}

impl AppState {
    pub fn new(form: RegistrationForm) -> Self {
        let nodes = build_nodes(&form);
        let mut state = Self {
            form,
            nodes,
            focus: FocusState::default(),
            should_exit: false,
        };
        state.rebuild_focus();
        state
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn into_form(self) -> RegistrationForm {
        self.form
    }

    pub fn title(&self) -> &'static str {
        if self.form.is_submitted() {
            SUMMARY_TITLE
        } else {
            FORM_TITLE
        }
    }

    pub fn hint(&self) -> &'static str {
        if self.form.is_submitted() {
            SUMMARY_HINT
        } else {
            FORM_HINT
        }
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus.current_id()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    /// Nodes currently shown in the form view, in display order.
    pub fn visible_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(move |node| self.is_node_visible(node))
    }

    /// Form error for the node's field, only while that field is shown.
    pub fn visible_error(&self, id: &str) -> Option<&str> {
        let field = Field::from_key(id)?;
        if !self.form.is_visible(field) {
            return None;
        }
        self.form.error(field)
    }

    fn is_node_visible(&self, node: &Node) -> bool {
        NodeId::from(node.id())
            .field()
            .is_none_or(|field| self.form.is_visible(field))
    }

    fn rebuild_focus(&mut self) {
        if self.form.is_submitted() {
            self.focus.clear();
            return;
        }
        let visible: Vec<&Node> = self
            .nodes
            .iter()
            .filter(|node| self.is_node_visible(node))
            .collect();
        self.focus.rebuild(visible);
    }
}

fn build_nodes(form: &RegistrationForm) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(Field::ALL.len() + 1);
    for field in Field::ALL {
        let node = match field {
            Field::IsAttendingWithGuest => Node::input(
                SelectInput::new(
                    field.key(),
                    field.label(),
                    GUEST_OPTIONS.iter().map(|option| option.to_string()).collect(),
                )
                .with_change_target(field),
            ),
            _ => {
                let mut input = TextInput::new(field.key(), field.label()).with_change_target(field);
                if let Some(placeholder) = field.placeholder() {
                    input = input.with_placeholder(placeholder);
                }
                Node::input(input)
            }
        };
        nodes.push(node);
    }
    nodes.push(Node::input(ButtonInput::new(SUBMIT_ID, "Submit")));

    for node in &mut nodes {
        if let Some(field) = Field::from_key(node.id()) {
            node.set_value(value_sync::widget_value(form.state(), field));
        }
    }
    nodes
}
