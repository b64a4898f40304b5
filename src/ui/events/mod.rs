//! Event handling for fq-playground
//!
//! This module processes user input and translates it into state-changing actions.
//! It handles three input modes:
//! - Normal: Panel navigation, sending, copying
//! - EditingField: Inline editing of the base URL or a path parameter
//! - EditingBody: The JSON body editor modal
//!
//! # Architecture
//!
//! Input events generate AppActions that are applied to AppState via the
//! apply_action function in actions.rs.
//!
//! # Lock Management
//!
//! The background send task writes to the same `SharedState`. Handlers take the
//! lock only for the duration of a single read or action and never hold it
//! across a call into another handler.

mod execution;
mod fields;
mod helpers;
mod modals;
mod navigation;
mod yank;

use crate::actions::AppAction;
use crate::request::Transport;
use crate::state::{self, SharedState};
use crate::types::{InputMode, PanelFocus};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use helpers::apply;
use std::sync::Arc;
use std::time::Duration;

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for one input event and dispatch it by input mode
    pub fn handle_events(
        &mut self,
        state: &SharedState,
        transport: &Arc<dyn Transport>,
    ) -> Result<()> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(());
        }

        // A paste batch may end on a key that still needs handling
        let mut pending = Some(event::read()?);
        while let Some(next) = pending.take() {
            pending = self.dispatch(next, state, transport);
        }

        Ok(())
    }

    /// Handle one event, returning any event read ahead while batching input
    fn dispatch(
        &mut self,
        event: Event,
        state: &SharedState,
        transport: &Arc<dyn Transport>,
    ) -> Option<Event> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let input_mode = state::read(state).input.mode.clone();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match input_mode {
            InputMode::EditingField(_) => match key.code {
                KeyCode::Char(c) if !ctrl => {
                    let (text, leftover) = helpers::collect_paste_batch(c);
                    fields::handle_field_text(state, text);
                    return leftover;
                }
                _ => fields::handle_field_key(key, state),
            },
            InputMode::EditingBody => match key.code {
                KeyCode::Char(c) if !ctrl => {
                    let (text, leftover) = helpers::collect_paste_batch(c);
                    modals::handle_body_text(state, &text);
                    return leftover;
                }
                _ => modals::handle_body_editor_input(key, state),
            },
            InputMode::Normal => self.handle_normal_key(key, state, transport),
        }

        None
    }

    fn handle_normal_key(
        &mut self,
        key: KeyEvent,
        state: &SharedState,
        transport: &Arc<dyn Transport>,
    ) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }

            // Panel focus
            KeyCode::Tab => apply(state, AppAction::NavigateTabForward),
            KeyCode::BackTab => apply(state, AppAction::NavigateTabBackward),
            KeyCode::Char('1') => apply(state, AppAction::NavigateToPanel(PanelFocus::Endpoints)),
            KeyCode::Char('2') => apply(state, AppAction::NavigateToPanel(PanelFocus::Request)),
            KeyCode::Char('3') => apply(state, AppAction::NavigateToPanel(PanelFocus::Response)),

            // Movement within the focused panel
            KeyCode::Char('j') | KeyCode::Down => navigation::handle_down(state),
            KeyCode::Char('k') | KeyCode::Up => navigation::handle_up(state),

            // Editing
            KeyCode::Char('e') | KeyCode::Enter => fields::handle_field_edit(state),

            // Send
            KeyCode::Char(' ') | KeyCode::Char('s') => execution::handle_send(state, transport),

            // Copy response body
            KeyCode::Char('y') => {
                if state::read(state).ui.panel_focus == PanelFocus::Response {
                    yank::handle_yank_response(state);
                }
            }

            _ => {}
        }
    }
}
