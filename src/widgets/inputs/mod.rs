pub mod button;
pub mod select;
pub mod text;
pub mod text_edit;
