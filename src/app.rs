use crate::catalog;
use crate::request::Transport;
use crate::state::{self, AppState, SharedState};
use crate::types::InputMode;
use crate::ui::{self, draw};
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::ListState,
    DefaultTerminal, Frame,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;

pub struct App {
    state: SharedState,
    transport: Arc<dyn Transport>,
    list_state: ListState,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
}

impl App {
    pub fn new(state: AppState, transport: Arc<dyn Transport>) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            transport,
            list_state: ListState::default(),
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            self.event_handler
                .handle_events(&self.state, &self.transport)?;
        }

        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let state = state::read(&self.state);

        self.list_state
            .select(Some(catalog::position(state.request.endpoint_key)));

        // Header, Body, Footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(main_chunks[1]);

        let detail_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(body_chunks[1]);

        draw::render_header(frame, main_chunks[0], &state);
        draw::render_endpoints_panel(frame, body_chunks[0], &state, &mut self.list_state);
        draw::render_request_panel(frame, detail_chunks[0], &state);
        draw::render_response_panel(frame, detail_chunks[1], &state, self.spinner_index);
        draw::render_footer(frame, main_chunks[2], &state);

        // Render modals LAST - after everything else
        if state.input.mode == InputMode::EditingBody {
            draw::render_body_editor_modal(frame, &state);
        }
    }
}
