//! Inline editing of the Request panel's single-line fields
//!
//! `e`/`Enter` on a field copies its value into the edit buffer; `Enter`
//! writes the buffer back, `Esc` drops it.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::{self, SharedState};
use crate::types::{InputMode, PanelFocus, RequestField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Start editing the selected Request panel field
pub fn handle_field_edit(state: &SharedState) {
    let field = {
        let s = state::read(state);
        if s.ui.panel_focus != PanelFocus::Request {
            return;
        }
        s.selected_field()
    };

    if let Some(field) = field {
        tracing::debug!(?field, "editing field");
        apply(state, AppAction::StartEditingField(field));
    }
}

/// Append typed or pasted text to the edit buffer.
///
/// Fields are single-line: a newline in the text confirms the edit, and
/// anything after it is dropped.
pub fn handle_field_text(state: &SharedState, text: String) {
    let (line, confirmed) = match text.split_once(['\n', '\r']) {
        Some((line, rest)) => {
            if !rest.trim().is_empty() {
                tracing::debug!(dropped = rest.len(), "ignored text after newline");
            }
            (line, true)
        }
        None => (text.as_str(), false),
    };

    if !line.is_empty() {
        apply(state, AppAction::AppendToEditBuffer(line.to_string()));
    }
    if confirmed {
        confirm_field_edit(state);
    }
}

/// Write the edit buffer back to its field
fn confirm_field_edit(state: &SharedState) {
    let edited = {
        let s = state::read(state);
        match &s.input.mode {
            InputMode::EditingField(field) => Some(field.clone()),
            _ => None,
        }
    };
    apply(state, AppAction::ConfirmFieldEdit);
    if let Some(field) = edited {
        tracing::debug!(?field, "field updated");
        if field == RequestField::BaseUrl {
            tracing::info!(base_url = %state::read(state).request.base_url, "base URL changed");
        }
    }
}

/// Handle a non-character key while a field is being edited
pub fn handle_field_key(key: KeyEvent, state: &SharedState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => confirm_field_edit(state),
        KeyCode::Esc => apply(state, AppAction::CancelFieldEdit),
        KeyCode::Backspace => apply(state, AppAction::BackspaceEditBuffer),
        KeyCode::Char('w') if ctrl => apply(state, AppAction::DeleteWordEditBuffer),
        KeyCode::Char('l') if ctrl => apply(state, AppAction::ClearEditBuffer),
        KeyCode::Char(c) if !ctrl => handle_field_text(state, c.to_string()),
        _ => {}
    }
}
