//! Helper functions for event handling
//!
//! - State locking helper (apply an action)
//! - Paste batching

use crate::actions::{apply_action, AppAction};
use crate::state::{self, SharedState};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Apply a single action to state
pub fn apply(state: &SharedState, action: AppAction) {
    let mut s = state::write(state);
    apply_action(action, &mut s);
}

/// Collect a batch of characters for paste support
///
/// When a character is typed, this function checks for any immediately available
/// character events and batches them together. This enables fast paste operations
/// in terminals.
///
/// The event that ended the batch, if any, is returned so the caller can
/// dispatch it instead of losing it.
pub fn collect_paste_batch(initial_char: char) -> (String, Option<Event>) {
    batch_from(initial_char, || match event::poll(Duration::from_millis(0)) {
        Ok(true) => event::read().ok(),
        _ => None,
    })
}

/// Batch characters pulled from `next_event` until it runs dry or yields
/// something that is not plain text
fn batch_from(
    initial_char: char,
    mut next_event: impl FnMut() -> Option<Event>,
) -> (String, Option<Event>) {
    let mut batch = String::from(initial_char);
    let mut leftover = None;

    while let Some(next) = next_event() {
        match &next {
            Event::Key(key) if key.kind != KeyEventKind::Press => {}
            Event::Key(key) => match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    batch.push(c);
                }
                // Pasted newlines arrive as Enter
                KeyCode::Enter => batch.push('\n'),
                _ => {
                    leftover = Some(next);
                    break;
                }
            },
            _ => {
                leftover = Some(next);
                break;
            }
        }
    }

    if batch.len() > 1 {
        tracing::trace!(chars = batch.chars().count(), "batched pasted input");
    }
    (batch, leftover)
}
