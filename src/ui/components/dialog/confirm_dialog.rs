//! Confirmation dialog before throwing away a filled form

use super::base::{render_dialog, DialogConfig};
use crate::state::DiscardDialog;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the "discard registration?" dialog
pub fn render_discard_dialog(frame: &mut Frame, dialog: &DiscardDialog, submitting: bool) {
    let message = if submitting {
        "A registration is still being sent. Discard the form and ignore its result?"
    } else {
        "Discard everything typed into this registration form?"
    };

    // Keep editing, Discard
    let options = [(false, "Keep editing", Color::White), (true, "Discard", Color::Red)]
        .into_iter()
        .map(|(is_discard, label, color)| {
            let is_selected = dialog.selected_option == is_discard;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!("{prefix}{label}"), style))
        })
        .collect();

    let hint = vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Discard Registration",
            title_color: Color::Red,
            border_color: Color::Red,
            message,
            options,
            hint: Some(hint),
            max_width: 50,
        },
    );
}
