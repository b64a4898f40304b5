use std::time::Instant;

/// The result of one successful Send, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code (200, 404, etc.)
    pub status: u16,

    /// Human-readable status text ("OK", "Not Found", etc.)
    pub status_text: String,

    /// Milliseconds between starting the send and receiving the response head
    pub duration_ms: u64,

    /// Value of the content-type header, if the server sent one
    pub content_type: Option<String>,

    /// Response body, already formatted for display
    pub body: String,
}

impl ApiResponse {
    /// Content type as shown in the metadata line
    pub fn content_type_display(&self) -> &str {
        self.content_type.as_deref().unwrap_or("unknown")
    }
}

/// One outgoing HTTP request, after body validation
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub method: crate::catalog::Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// What a transport hands back before any display formatting
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,

    /// When the response head arrived
    pub received_at: Instant,
}

/// Tracks which main panel has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Endpoints, // Left panel
    Request,   // Right top
    Response,  // Right bottom
}

/// An editable row in the Request panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestField {
    BaseUrl,
    Param(&'static str),
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingField(RequestField),
    EditingBody,
}
