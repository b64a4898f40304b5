//! Request execution handler (Space / `s`)

use crate::request::{execute_request_background, Transport};
use crate::state::SharedState;
use std::sync::Arc;

/// Send the current selection unless the submission gate blocks it
pub fn handle_send(state: &SharedState, transport: &Arc<dyn Transport>) {
    match execute_request_background(state.clone(), Arc::clone(transport)) {
        Ok(_) => tracing::debug!("send dispatched"),
        // The footer already shows why; nothing to record in state
        Err(blocked) => tracing::info!(reason = %blocked, "send blocked"),
    }
}
