//! Navigation handlers
//!
//! `j`/`k` mean different things depending on the focused panel:
//! template selection, field selection or response scrolling.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::{self, SharedState};
use crate::types::PanelFocus;

/// Move down in the focused panel
pub fn handle_down(state: &SharedState) {
    let panel = state::read(state).ui.panel_focus;
    let action = match panel {
        PanelFocus::Endpoints => AppAction::SelectNextEndpoint,
        PanelFocus::Request => AppAction::NavigateFieldDown,
        PanelFocus::Response => AppAction::ScrollDown,
    };
    apply(state, action);
    log_selection(state, panel);
}

/// Move up in the focused panel
pub fn handle_up(state: &SharedState) {
    let panel = state::read(state).ui.panel_focus;
    let action = match panel {
        PanelFocus::Endpoints => AppAction::SelectPreviousEndpoint,
        PanelFocus::Request => AppAction::NavigateFieldUp,
        PanelFocus::Response => AppAction::ScrollUp,
    };
    apply(state, action);
    log_selection(state, panel);
}

fn log_selection(state: &SharedState, panel: PanelFocus) {
    if panel == PanelFocus::Endpoints {
        tracing::debug!(endpoint = state::read(state).request.endpoint_key, "template selected");
    }
}
