//! Form domain layer
//!
//! Focus, text entry and row layout for the registration screen.

mod field;
mod form_state;

pub use field::FormSlot;
pub use form_state::{Form, RegisterScreen, REGISTER_BUTTON, RESET_BUTTON};
