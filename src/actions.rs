use crate::catalog;
use crate::state::AppState;
use crate::types::{ApiResponse, InputMode, PanelFocus, RequestField};

/// Represents all possible state-changing actions in the application
/// This pattern separates input handling from state mutations, making the code
/// more testable
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Navigation actions
    NavigateToPanel(PanelFocus),
    NavigateTabForward,
    NavigateTabBackward,
    NavigateFieldUp,
    NavigateFieldDown,

    // Template selection
    SelectEndpoint(&'static str),
    SelectNextEndpoint,
    SelectPreviousEndpoint,

    // Scrolling actions
    ScrollUp,
    ScrollDown,

    // Single-line field editing
    StartEditingField(RequestField),
    AppendToEditBuffer(String),
    BackspaceEditBuffer,
    DeleteWordEditBuffer,
    ClearEditBuffer,
    ConfirmFieldEdit,
    CancelFieldEdit,

    // Body editor
    PrettifyBody,
    ResetBodyToDefault,
    CloseBodyEditor,

    // Send lifecycle
    BeginSend,
    SendSucceeded(ApiResponse),
    SendFailed(String),

    SetYankFlash(bool),
}

/// Lines moved per scroll action in the Response panel
const SCROLL_STEP: usize = 5;

/// Apply an action to the application state
/// All state mutations should go through this function to maintain consistency
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        // Navigation
        AppAction::NavigateToPanel(panel) => {
            state.ui.panel_focus = panel;
        }
        AppAction::NavigateTabForward => {
            state.ui.panel_focus = match state.ui.panel_focus {
                PanelFocus::Endpoints => PanelFocus::Request,
                PanelFocus::Request => PanelFocus::Response,
                PanelFocus::Response => PanelFocus::Endpoints,
            };
        }
        AppAction::NavigateTabBackward => {
            state.ui.panel_focus = match state.ui.panel_focus {
                PanelFocus::Endpoints => PanelFocus::Response,
                PanelFocus::Request => PanelFocus::Endpoints,
                PanelFocus::Response => PanelFocus::Request,
            };
        }
        AppAction::NavigateFieldUp => {
            state.ui.selected_field = state.ui.selected_field.saturating_sub(1);
        }
        AppAction::NavigateFieldDown => {
            let last = state.request_fields().len().saturating_sub(1);
            state.ui.selected_field = (state.ui.selected_field + 1).min(last);
        }

        // Template selection
        AppAction::SelectEndpoint(key) => select_endpoint(state, key),
        AppAction::SelectNextEndpoint => {
            let all = catalog::all();
            let next = (catalog::position(state.request.endpoint_key) + 1).min(all.len() - 1);
            select_endpoint(state, all[next].key);
        }
        AppAction::SelectPreviousEndpoint => {
            let prev = catalog::position(state.request.endpoint_key).saturating_sub(1);
            select_endpoint(state, catalog::all()[prev].key);
        }

        // Scrolling
        AppAction::ScrollUp => {
            state.ui.response_scroll = state.ui.response_scroll.saturating_sub(SCROLL_STEP);
        }
        AppAction::ScrollDown => {
            state.ui.response_scroll = state.ui.response_scroll.saturating_add(SCROLL_STEP);
        }

        // Field editing
        AppAction::StartEditingField(field) => match field {
            RequestField::Body => {
                state.input.mode = InputMode::EditingBody;
                state.input.body_notice = None;
            }
            field => {
                state.input.edit_buffer = state.field_value(&field);
                state.input.mode = InputMode::EditingField(field);
            }
        },
        AppAction::AppendToEditBuffer(text) => {
            state.input.edit_buffer.push_str(&text);
        }
        AppAction::BackspaceEditBuffer => {
            state.input.edit_buffer.pop();
        }
        AppAction::DeleteWordEditBuffer => {
            delete_word(&mut state.input.edit_buffer);
        }
        AppAction::ClearEditBuffer => {
            state.input.edit_buffer.clear();
        }
        AppAction::ConfirmFieldEdit => {
            if let InputMode::EditingField(field) = &state.input.mode {
                let value = std::mem::take(&mut state.input.edit_buffer);
                match field {
                    RequestField::BaseUrl => state.request.base_url = value,
                    RequestField::Param(name) => {
                        state.request.params.insert(name.to_string(), value);
                    }
                    RequestField::Body => {}
                }
            }
            state.input.mode = InputMode::Normal;
            state.input.edit_buffer.clear();
        }
        AppAction::CancelFieldEdit => {
            state.input.mode = InputMode::Normal;
            state.input.edit_buffer.clear();
        }

        // Body editor
        AppAction::PrettifyBody => {
            state.input.body_notice = state.request.body.format_json().err();
        }
        AppAction::ResetBodyToDefault => {
            let default_body = state.endpoint().initial_body();
            state.request.body.set_content(default_body.to_string());
            state.input.body_notice = None;
        }
        AppAction::CloseBodyEditor => {
            state.input.mode = InputMode::Normal;
            state.input.body_notice = None;
        }

        // Send lifecycle
        AppAction::BeginSend => {
            state.response.error = None;
            state.response.last = None;
            state.response.in_flight = true;
            state.ui.response_scroll = 0;
        }
        AppAction::SendSucceeded(response) => {
            state.response.last = Some(response);
            state.response.in_flight = false;
        }
        AppAction::SendFailed(message) => {
            state.response.error = Some(message);
            state.response.last = None;
            state.response.in_flight = false;
        }

        AppAction::SetYankFlash(on) => {
            state.ui.yank_flash = on;
        }
    }
}

/// Switch templates. The body resets to the new template's default; parameter
/// values stay as they are.
fn select_endpoint(state: &mut AppState, key: &str) {
    let endpoint = catalog::find(key);
    if endpoint.key == state.request.endpoint_key {
        return;
    }

    state.request.endpoint_key = endpoint.key;
    state
        .request
        .body
        .set_content(endpoint.initial_body().to_string());

    let last = state.request_fields().len().saturating_sub(1);
    state.ui.selected_field = state.ui.selected_field.min(last);
}

/// Helper function to delete the last word from a string (Ctrl+W behavior)
fn delete_word(s: &mut String) {
    // Trim trailing whitespace first
    let trimmed_len = s.trim_end().len();
    s.truncate(trimmed_len);

    // Find last whitespace and truncate there
    if let Some(pos) = s.rfind(char::is_whitespace) {
        s.truncate(pos);
    } else {
        s.clear();
    }
}
