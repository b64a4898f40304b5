//! Yank (copy) handler
//!
//! Copies the displayed response body to the system clipboard.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::{self, AppState, SharedState};
use arboard::Clipboard;
use std::time::Duration;

/// How long the body flashes after a successful copy
const FLASH_DURATION: Duration = Duration::from_millis(200);

/// The text a yank would copy: the body exactly as displayed
pub fn yank_text(state: &AppState) -> Option<String> {
    if state.response.in_flight {
        return None;
    }
    state
        .response
        .last
        .as_ref()
        .map(|response| response.body.clone())
}

/// Copy the response body and flash it
pub fn handle_yank_response(state: &SharedState) {
    let Some(text) = yank_text(&state::read(state)) else {
        tracing::debug!("no response available to yank");
        return;
    };

    let copied = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.clone()));

    match copied {
        Ok(()) => {
            tracing::debug!(bytes = text.len(), "yanked response body");
            apply(state, AppAction::SetYankFlash(true));

            let state = state.clone();
            tokio::spawn(async move {
                tokio::time::sleep(FLASH_DURATION).await;
                apply(&state, AppAction::SetYankFlash(false));
            });
        }
        Err(e) => tracing::warn!(error = %e, "failed to copy to clipboard"),
    }
}
