//! Reusable UI components
//!
//! - Header (title, base URL, send status)
//! - Footer (command help for the current mode)

use crate::request::normalize_base_url;
use crate::state::AppState;
use crate::types::{InputMode, PanelFocus};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the application header with the target and send status
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let status_text = if state.response.in_flight {
        "Sending…"
    } else {
        "Ready"
    };

    let base_url = normalize_base_url(&state.request.base_url);
    let base_url = if base_url.is_empty() {
        "no base URL"
    } else {
        base_url
    };

    let header_text = format!("fq playground - {base_url} [{status_text}]");

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Help text for the footer, by input mode and focused panel
pub fn footer_text(state: &AppState) -> String {
    match &state.input.mode {
        InputMode::EditingField(_) => {
            "Type to edit | Enter:Confirm Esc:Cancel Ctrl+W:Delete word Ctrl+L:Clear".to_string()
        }
        InputMode::EditingBody => {
            "Esc:Close Ctrl+F:Format JSON Ctrl+R:Reset to default".to_string()
        }
        InputMode::Normal => {
            let panel_help = match state.ui.panel_focus {
                PanelFocus::Endpoints => "j/k:Select endpoint",
                PanelFocus::Request => "j/k:Field e:Edit",
                PanelFocus::Response => "j/k:Scroll y:Copy body",
            };

            let send_help = match state.check_submission() {
                Ok(()) => "Space:Send".to_string(),
                Err(blocked) => format!("Send disabled ({blocked})"),
            };

            format!("Tab:Panel {panel_help} | {send_help} | q:Quit")
        }
    }
}

/// Render the footer with command help
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer = Paragraph::new(footer_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}
