use crate::core::NodeId;
use crate::core::value::Value;
use crate::runtime::command::Command;
use crate::terminal::TerminalEvent;

#[derive(Debug, Clone)]
pub struct ValueChange {
    pub target: NodeId,
    pub value: Value,
}

impl ValueChange {
    pub fn new(target: impl Into<NodeId>, value: Value) -> Self {
        Self {
            target: target.into(),
            value,
        }
    }
}

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the runtime.
#[derive(Debug, Clone)]
pub enum WidgetAction {
    ValueChanged { change: ValueChange },
    /// Widget signals it is done with its value; the form is submitted.
    InputDone,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Terminal(TerminalEvent),
    Command(Command),
    Action(WidgetAction),
}
