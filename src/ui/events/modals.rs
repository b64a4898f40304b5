//! Body editor modal input
//!
//! Editing keys go to the `BodyEditor`; modal commands become actions.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::{self, SharedState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Insert typed or pasted text at the cursor, normalizing smart quotes
pub fn handle_body_text(state: &SharedState, text: &str) {
    let mut s = state::write(state);
    s.input.body_notice = None;
    s.request.body.insert_str_normalized(text);
}

/// Handle a key while the body editor modal is open
pub fn handle_body_editor_input(key: KeyEvent, state: &SharedState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => apply(state, AppAction::CloseBodyEditor),
        KeyCode::Char('f') if ctrl => {
            apply(state, AppAction::PrettifyBody);
            if let Some(notice) = &state::read(state).input.body_notice {
                tracing::debug!(%notice, "prettify failed");
            }
        }
        KeyCode::Char('r') if ctrl => {
            tracing::debug!("body reset to template default");
            apply(state, AppAction::ResetBodyToDefault);
        }
        _ => {
            let mut s = state::write(state);
            if s.request.body.handle_key_event(key) {
                s.input.body_notice = None;
            }
        }
    }
}
