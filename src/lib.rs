pub mod config;
pub mod core;
pub mod error;
pub mod form;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod ui;
pub mod widgets;
