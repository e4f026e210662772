pub mod app_state;
pub mod focus;

pub use app_state::AppState;
