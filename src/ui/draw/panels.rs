//! Main panel rendering
//!
//! - Endpoints panel (left side) - the catalog
//! - Request panel (right top) - base URL, path params, preview, body
//! - Response panel (right bottom) - error, metadata and body

use super::styling::{border_for, get_method_color, get_status_color};
use crate::catalog;
use crate::state::AppState;
use crate::types::{InputMode, PanelFocus, RequestField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Lines of the body shown inline before "press e to edit"
const BODY_PREVIEW_LINES: usize = 6;

/// Render the left panel with the endpoint catalog
pub fn render_endpoints_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    list_state: &mut ListState,
) {
    let items: Vec<ListItem> = catalog::all()
        .iter()
        .map(|template| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<5}", template.method),
                    Style::default()
                        .fg(get_method_color(template.method))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(template.label),
            ]))
        })
        .collect();

    let focused = state.ui.panel_focus == PanelFocus::Endpoints;

    let list = List::new(items)
        .block(
            Block::default()
                .title("[1] Endpoints")
                .borders(Borders::ALL)
                .border_style(border_for(focused)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, list_state);
}

/// Render the Request panel
pub fn render_request_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.panel_focus == PanelFocus::Request;

    let block = Block::default()
        .title("[2] Request")
        .borders(Borders::ALL)
        .border_style(border_for(focused));

    let content = Paragraph::new(request_lines(state))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(content, area);
}

/// Render the Response panel
pub fn render_response_panel(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let focused = state.ui.panel_focus == PanelFocus::Response;

    let block = Block::default()
        .title("[3] Response")
        .borders(Borders::ALL)
        .border_style(border_for(focused));

    let content = Paragraph::new(response_lines(state, spinner_index))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.ui.response_scroll.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(content, area);
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Build the Request panel content
pub(crate) fn request_lines(state: &AppState) -> Vec<Line<'static>> {
    let endpoint = state.endpoint();
    let focused = state.ui.panel_focus == PanelFocus::Request;
    let label_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    for (idx, field) in state.request_fields().iter().enumerate() {
        let is_selected = focused && state.ui.selected_field == idx;
        match field {
            RequestField::BaseUrl => {
                lines.push(field_line(state, field, "Base URL", is_selected));
                lines.push(Line::from(""));
            }
            RequestField::Param(name) => {
                if idx == 1 {
                    lines.push(Line::from(Span::styled("Path Params:", label_style)));
                }
                lines.push(field_line(state, field, name, is_selected));
            }
            RequestField::Body => {}
        }
    }

    let missing = state.missing_params();
    if !missing.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Missing parameters: {}", missing.join(", ")),
            Style::default().fg(Color::Red),
        )));
    }
    if !endpoint.required_params().is_empty() {
        lines.push(Line::from(""));
    }

    // Request preview
    lines.push(Line::from(Span::styled("Request:", label_style)));
    lines.push(Line::from(vec![
        Span::styled(
            endpoint.method.to_string(),
            Style::default()
                .fg(get_method_color(endpoint.method))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(state.preview_url(), Style::default().fg(Color::Yellow)),
    ]));

    // JSON body for body-carrying methods
    if endpoint.method.sends_body() {
        let body_index = state.request_fields().len() - 1;
        let is_selected = focused && state.ui.selected_field == body_index;

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                if is_selected { "→ " } else { "  " },
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("JSON Body:", label_style),
            Span::raw("  "),
            Span::styled(
                "(validated before sending; empty sends {})",
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        let body = state.request.body.content();
        let body_lines: Vec<&str> = body.lines().collect();
        for line in body_lines.iter().take(BODY_PREVIEW_LINES) {
            lines.push(Line::from(Span::styled(
                format!("  {line}"),
                Style::default().fg(Color::Yellow),
            )));
        }
        if body_lines.len() > BODY_PREVIEW_LINES {
            lines.push(Line::from(Span::styled(
                "  ... (press 'e' to edit)",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines
}

/// One editable single-line field, showing the edit buffer while editing
fn field_line(state: &AppState, field: &RequestField, label: &str, is_selected: bool) -> Line<'static> {
    let is_editing = matches!(&state.input.mode, InputMode::EditingField(f) if f == field);

    let value = if is_editing {
        format!("[{}▊]", state.input.edit_buffer)
    } else {
        let value = state.field_value(field);
        if value.is_empty() {
            "[_____]".to_string()
        } else {
            format!("[{value}]")
        }
    };

    let indicator_style = if is_selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_style = if is_editing {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(if is_selected { "→ " } else { "  " }, indicator_style),
        Span::styled(format!("{label}: "), Style::default().fg(Color::White)),
        Span::styled(value, value_style),
    ])
}

/// Build the Response panel content
pub(crate) fn response_lines(state: &AppState, spinner_index: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(error) = &state.response.error {
        lines.push(Line::from(Span::styled(
            "❌ Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        for line in error.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
    }

    if state.response.in_flight {
        let spinner = ["⠋", "⠙", "⠹", "⠸"];
        lines.push(Line::from(Span::styled(
            format!("{} Sending request...", spinner[spinner_index % spinner.len()]),
            Style::default().fg(Color::Cyan),
        )));
    } else if let Some(response) = &state.response.last {
        lines.push(Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{} {}", response.status, response.status_text),
                Style::default().fg(get_status_color(response.status)),
            ),
            Span::raw("  "),
            Span::styled("Time: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{}ms", response.duration_ms)),
            Span::raw("  "),
            Span::styled("Content-Type: ", Style::default().fg(Color::Cyan)),
            Span::raw(response.content_type_display().to_string()),
        ]));
        lines.push(Line::from(""));

        let body_style = if state.ui.yank_flash {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default()
        };
        for line in response.body.lines() {
            lines.push(Line::from(Span::styled(line.to_string(), body_style)));
        }
    } else if state.response.error.is_none() {
        lines.push(Line::from(Span::styled(
            "Press [Space] to send the request",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}
