//! Registration form rendering

use super::field_renderer::{draw_field, FieldLook, FIELD_HEIGHT};
use crate::app::App;
use crate::register::Role;
use crate::state::{FormSlot, RegisterScreen, REGISTER_BUTTON, RESET_BUTTON};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the registration form with action sidebar
pub fn draw_register(frame: &mut Frame, area: Rect, app: &App) {
    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(24), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], &app.state.register);
    draw_action_panel(frame, main_chunks[1], &app.state.register);
}

fn role_hint(role: Role) -> &'static str {
    match role {
        Role::Individual => "Registering as an individual reader.",
        Role::Organization(_) => "Organization details are sent with the account.",
        Role::Unspecified => "Choose a role to see the fields it needs.",
    }
}

/// Draw the form fields, scrolled so the focused one stays visible
fn draw_form(frame: &mut Frame, area: Rect, screen: &RegisterScreen) {
    let block = Block::default()
        .title(" Register ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if screen.is_buttons_row_active() {
            Color::DarkGray
        } else {
            Color::Cyan
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Role hint
            Constraint::Min(0),    // Fields
        ])
        .horizontal_margin(1)
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            role_hint(screen.form.role()),
            Style::default().fg(Color::DarkGray),
        )),
        chunks[0],
    );

    let fields: Vec<(usize, FormSlot)> = screen
        .slots()
        .into_iter()
        .enumerate()
        .filter(|(_, slot)| *slot != FormSlot::Actions)
        .collect();
    let visible = (chunks[1].height / FIELD_HEIGHT).max(1) as usize;
    let offset = scroll_offset(screen.active_field_index, fields.len(), visible);

    let schema = screen.form.schema();
    let groups_disabled = screen.groups_disabled();
    for (row, (index, slot)) in fields.iter().skip(offset).take(visible).enumerate() {
        let field_area = Rect {
            x: chunks[1].x,
            y: chunks[1].y + row as u16 * FIELD_HEIGHT,
            width: chunks[1].width,
            height: FIELD_HEIGHT,
        };
        let look = FieldLook {
            is_active: *index == screen.active_field_index,
            is_disabled: groups_disabled && matches!(slot, FormSlot::Group(..)),
        };
        draw_field(frame, field_area, *slot, &screen.form, &schema, look);
    }
}

/// First field index to draw so that `active` is on screen
fn scroll_offset(active: usize, total: usize, visible: usize) -> usize {
    if total <= visible {
        return 0;
    }
    let active = active.min(total - 1);
    if active < visible {
        0
    } else {
        (active + 1 - visible).min(total - visible)
    }
}

/// Draw the action panel sidebar
fn draw_action_panel(frame: &mut Frame, area: Rect, screen: &RegisterScreen) {
    let is_focused = screen.is_buttons_row_active();
    let submitting = screen.submission.is_submitting();

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Register (primary)
            Constraint::Length(BUTTON_HEIGHT), // Reset
            Constraint::Min(0),                // Form-level error
        ])
        .split(inner_area);

    render_action_button(
        frame,
        button_chunks[0],
        if submitting { "Registering…" } else { "Register" },
        is_focused && screen.selected_button == REGISTER_BUTTON,
        !submitting,
        Some(Color::Green),
    );
    render_action_button(
        frame,
        button_chunks[1],
        "Reset",
        is_focused && screen.selected_button == RESET_BUTTON,
        true,
        Some(Color::Gray),
    );

    if let Some(internal) = screen.form.errors().internal() {
        let message = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                internal,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(message, button_chunks[2]);
    }
}
