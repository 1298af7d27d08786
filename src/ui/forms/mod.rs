//! Form rendering module
//!
//! - `field_renderer`: one bordered field with its inline error
//! - `register_form`: the registration form and its action panel

mod field_renderer;
mod register_form;

pub use register_form::draw_register;
