//! Field rendering utilities for forms

use crate::register::{FormSchema, RegistrationForm};
use crate::state::FormSlot;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field box
pub const FIELD_HEIGHT: u16 = 3;

/// How a field is drawn besides its value
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldLook {
    pub is_active: bool,
    pub is_disabled: bool,
}

/// Draw one registration field with its inline error
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    slot: FormSlot,
    form: &RegistrationForm,
    schema: &FormSchema,
    look: FieldLook,
) {
    let error = slot.error(form);
    let border_color = match (look.is_active, error.is_some(), look.is_disabled) {
        (_, _, true) => Color::DarkGray,
        (_, true, _) => Color::Red,
        (true, _, _) => Color::Cyan,
        _ => Color::DarkGray,
    };

    let value = slot.display_value(form);
    let value_span = if value.is_empty() {
        Span::styled(slot.placeholder(), Style::default().fg(Color::DarkGray))
    } else if look.is_disabled {
        Span::styled(value, Style::default().fg(Color::DarkGray))
    } else if look.is_active {
        Span::styled(value, Style::default().fg(Color::Cyan))
    } else {
        Span::raw(value)
    };

    let mut spans = vec![value_span];
    if look.is_active && !look.is_disabled && !slot.is_choice() {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let mut title = vec![Span::raw(format!(" {}", slot.label()))];
    if slot.is_required(schema) {
        title.push(Span::styled("*", Style::default().fg(Color::Red)));
    }
    if look.is_disabled {
        title.push(Span::styled(" (locked)", Style::default().fg(Color::DarkGray)));
    }
    title.push(Span::raw(" "));

    let mut block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
