use crate::catalog::{self, EndpointTemplate, DEFAULT_BASE_URL};
use crate::editor::BodyEditor;
use crate::error::SendBlocked;
use crate::request;
use crate::types::{ApiResponse, InputMode, PanelFocus, RequestField};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// State shared between the UI loop and the background send task
pub type SharedState = Arc<RwLock<AppState>>;

/// Acquire a read lock, recovering the data if a writer panicked
pub fn read(state: &SharedState) -> RwLockReadGuard<'_, AppState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a write lock, recovering the data if a writer panicked
pub fn write(state: &SharedState) -> RwLockWriteGuard<'_, AppState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// What the user has filled in for the next request
#[derive(Debug, Clone)]
pub struct RequestState {
    pub endpoint_key: &'static str,
    pub base_url: String,
    /// Values by placeholder name; kept across template switches
    pub params: HashMap<String, String>,
    pub body: BodyEditor,
}

/// Outcome of the most recent Send
#[derive(Debug, Clone, Default)]
pub struct ResponseState {
    pub in_flight: bool,
    pub error: Option<String>,
    pub last: Option<ApiResponse>,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub panel_focus: PanelFocus,
    /// Row in the Request panel, see `AppState::request_fields`
    pub selected_field: usize,
    pub response_scroll: usize,
    pub yank_flash: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            panel_focus: PanelFocus::Endpoints,
            selected_field: 0,
            response_scroll: 0,
            yank_flash: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputState {
    pub mode: InputMode,
    /// Text being typed into a single-line field
    pub edit_buffer: String,
    /// Feedback shown in the body editor (e.g. a failed prettify)
    pub body_notice: Option<String>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            mode: InputMode::Normal,
            edit_buffer: String::new(),
            body_notice: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub request: RequestState,
    pub response: ResponseState,
    pub ui: UiState,
    pub input: InputState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string(), catalog::example_params())
    }
}

impl AppState {
    /// Fresh session with the first template selected
    pub fn new(base_url: String, params: HashMap<String, String>) -> Self {
        let endpoint = catalog::first();
        Self {
            request: RequestState {
                endpoint_key: endpoint.key,
                base_url,
                params,
                body: BodyEditor::with_content(endpoint.initial_body().to_string()),
            },
            response: ResponseState::default(),
            ui: UiState::default(),
            input: InputState::default(),
        }
    }

    /// The currently selected template
    pub fn endpoint(&self) -> &'static EndpointTemplate {
        catalog::find(self.request.endpoint_key)
    }

    pub fn required_params(&self) -> Vec<&'static str> {
        self.endpoint().required_params()
    }

    pub fn missing_params(&self) -> Vec<&'static str> {
        request::missing_params(&self.required_params(), &self.request.params)
    }

    /// URL the next Send would hit, placeholders and all
    pub fn preview_url(&self) -> String {
        request::build_url(
            &self.request.base_url,
            self.endpoint().path_template,
            &self.request.params,
        )
    }

    pub fn check_submission(&self) -> Result<(), SendBlocked> {
        request::check_submission(
            &self.required_params(),
            &self.request.params,
            &self.request.base_url,
            self.response.in_flight,
        )
    }

    /// Editable rows of the Request panel, top to bottom
    pub fn request_fields(&self) -> Vec<RequestField> {
        let endpoint = self.endpoint();
        let mut fields = vec![RequestField::BaseUrl];
        fields.extend(endpoint.required_params().into_iter().map(RequestField::Param));
        if endpoint.method.sends_body() {
            fields.push(RequestField::Body);
        }
        fields
    }

    pub fn selected_field(&self) -> Option<RequestField> {
        self.request_fields().get(self.ui.selected_field).cloned()
    }

    /// Current text of a single-line field
    pub fn field_value(&self, field: &RequestField) -> String {
        match field {
            RequestField::BaseUrl => self.request.base_url.clone(),
            RequestField::Param(name) => self
                .request
                .params
                .get(*name)
                .cloned()
                .unwrap_or_default(),
            RequestField::Body => self.request.body.content().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = AppState::default();
        assert_eq!(state.request.endpoint_key, "health");
        assert_eq!(state.request.base_url, DEFAULT_BASE_URL);
        assert_eq!(state.request.body.content(), "");
        assert!(!state.response.in_flight);
        assert!(state.response.error.is_none());
        assert!(state.response.last.is_none());
    }

    #[test]
    fn test_preview_url_for_health() {
        let state = AppState::default();
        assert_eq!(
            state.preview_url(),
            "https://fq.amethysty.dev/api/fqnovel/health"
        );
    }

    #[test]
    fn test_request_fields_follow_template() {
        let mut state = AppState::default();
        assert_eq!(state.request_fields(), vec![RequestField::BaseUrl]);

        state.request.endpoint_key = "chapter_get";
        assert_eq!(
            state.request_fields(),
            vec![
                RequestField::BaseUrl,
                RequestField::Param("bookId"),
                RequestField::Param("chapterId"),
            ]
        );

        state.request.endpoint_key = "batch_ids";
        assert_eq!(
            state.request_fields(),
            vec![RequestField::BaseUrl, RequestField::Body]
        );
    }

    #[test]
    fn test_missing_params_uses_session_values() {
        let mut state = AppState::default();
        state.request.endpoint_key = "chapter_get";
        assert!(state.missing_params().is_empty());

        state.request.params.remove("chapterId");
        assert_eq!(state.missing_params(), vec!["chapterId"]);
    }

    #[test]
    fn test_check_submission_empty_base_url() {
        let mut state = AppState::default();
        state.request.base_url = "  / ".to_string();
        assert_eq!(state.check_submission(), Err(SendBlocked::EmptyBaseUrl));
    }

    #[test]
    fn test_field_value() {
        let mut state = AppState::default();
        state.request.endpoint_key = "item_id";
        assert_eq!(
            state.field_value(&RequestField::Param("itemId")),
            "7282975997584998953"
        );
        assert_eq!(state.field_value(&RequestField::Param("unknown")), "");
        assert_eq!(state.field_value(&RequestField::BaseUrl), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_lock_helpers() {
        let shared: SharedState = Arc::new(RwLock::new(AppState::default()));
        write(&shared).response.in_flight = true;
        assert!(read(&shared).response.in_flight);
    }
}
