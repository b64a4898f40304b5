//! Modal dialog rendering
//!
//! The JSON body editor opens as a modal over the main layout.

use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the JSON body editor modal for body-carrying requests
pub fn render_body_editor_modal(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Larger modal for multi-line JSON editing
    let modal_width = (area.width as f32 * 0.8).min(100.0) as u16;
    let modal_height = (area.height as f32 * 0.7).min(30.0) as u16;
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;

    let modal_area = Rect {
        x: modal_x,
        y: modal_y,
        width: modal_width,
        height: modal_height,
    };

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(format!(" Edit Request Body (JSON) - {} ", state.endpoint().label))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Body content (grows)
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let editor = &state.request.body;
    let (line, col) = editor.cursor_line_col();

    // Keep the cursor line on screen
    let visible = chunks[0].height as usize;
    let scroll = line.saturating_sub(visible.saturating_sub(1));

    let body_text = Paragraph::new(editor.content().to_string())
        .style(Style::default().fg(Color::Yellow))
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(body_text, chunks[0]);

    let cursor_x = chunks[0].x + (col as u16).min(chunks[0].width.saturating_sub(1));
    let cursor_y = chunks[0].y + (line - scroll) as u16;
    frame.set_cursor_position(Position::new(cursor_x, cursor_y));

    if let Some(notice) = &state.input.body_notice {
        let notice = Paragraph::new(notice.clone()).style(Style::default().fg(Color::Red));
        frame.render_widget(notice, chunks[1]);
    }

    // Help text
    let help = Paragraph::new("Esc: Close  |  Ctrl+F: Format JSON  |  Ctrl+R: Reset  |  Ctrl+L: Clear")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}
