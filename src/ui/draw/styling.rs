//! Styling utilities and color schemes
//!
//! This module contains color helpers and style constants used throughout the UI.

use crate::catalog::Method;
use ratatui::style::{Color, Style};

/// Get the color for an HTTP method
pub fn get_method_color(method: Method) -> Color {
    match method {
        Method::Get => Color::Green,
        Method::Post => Color::Blue,
    }
}

/// Color for a status code: green 2xx, yellow 3xx, red otherwise
pub fn get_status_color(status: u16) -> Color {
    match status {
        200..=299 => Color::Green,
        300..=399 => Color::Yellow,
        _ => Color::Red,
    }
}

pub fn focused_border() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Border style for a panel depending on whether it has focus
pub fn border_for(focused: bool) -> Style {
    if focused {
        focused_border()
    } else {
        unfocused_border()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(get_status_color(200), Color::Green);
        assert_eq!(get_status_color(304), Color::Yellow);
        assert_eq!(get_status_color(404), Color::Red);
        assert_eq!(get_status_color(500), Color::Red);
    }
}
