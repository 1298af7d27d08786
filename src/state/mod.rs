//! Application state module

mod app_state;
mod forms;
mod notifications;

pub use app_state::*;
pub use forms::*;
