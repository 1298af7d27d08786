//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod registered;

use crate::app::App;
use crate::state::View;
use components::{render_discard_dialog, render_error_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match &app.state.current_view {
        View::Register => forms::draw_register(frame, main_area, app),
        View::Registered => registered::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Modal overlays, error dialog on top
    if let Some(dialog) = &app.state.pending_discard {
        render_discard_dialog(frame, dialog, app.state.register.submission.is_submitting());
    }
    if let Some(message) = app.state.notifications.current_error() {
        render_error_dialog(frame, message, app.state.notifications.queued_errors());
    }
}
