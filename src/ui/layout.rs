//! Layout components (content area, status bar)

use crate::app::App;
use crate::register::{NotificationKind, SubmitState};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and the one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // In-flight indicator
    let indicator = match app.state.register.submission.state() {
        SubmitState::Submitting => Span::styled(" ⟳ ", Style::default().fg(Color::Yellow)),
        SubmitState::Success => Span::styled(" ✓ ", Style::default().fg(Color::Green)),
        SubmitState::Idle | SubmitState::Validating => {
            Span::styled(" ● ", Style::default().fg(Color::Green))
        }
    };
    spans.push(indicator);

    spans.push(Span::styled(
        app.state.api_endpoint.as_str(),
        Style::default().fg(Color::Blue),
    ));

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        get_view_hints(&app.state.current_view),
        Style::default().fg(Color::Gray),
    ));

    if let Some(toast) = app.state.notifications.toast() {
        let color = match toast.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(toast.header.as_str(), Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View) -> &'static str {
    match view {
        View::Register => "Tab:next  ←/→:role  ^S:register  Esc:discard",
        View::Registered => "Enter:new registration  q:quit",
    }
}
