use crate::runtime::event::WidgetAction;

#[derive(Debug, Clone)]
pub enum Effect {
    Action(WidgetAction),
    RequestRender,
}
