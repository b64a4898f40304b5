//! Endpoint catalog
//!
//! The fixed, ordered set of request templates the playground can send.
//! Templates are looked up by key; an unknown key resolves to the first entry.

use crate::request::extract_placeholders;
use std::collections::HashMap;
use std::fmt;

/// Base URL used when neither the command line nor the config file sets one
pub const DEFAULT_BASE_URL: &str = "https://fq.amethysty.dev";

/// HTTP method of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// Whether requests with this method carry a JSON body
    pub fn sends_body(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A static description of one HTTP call shape
#[derive(Debug, PartialEq, Eq)]
pub struct EndpointTemplate {
    pub key: &'static str,
    pub label: &'static str,
    pub method: Method,
    pub path_template: &'static str,
    pub default_body: Option<&'static str>,
    /// Render the response unparsed regardless of its content type
    pub expects_text: bool,
}

impl EndpointTemplate {
    /// Placeholder names that must be filled before this template can be sent
    pub fn required_params(&self) -> Vec<&'static str> {
        extract_placeholders(self.path_template)
    }

    /// Body text a fresh selection of this template starts with
    pub fn initial_body(&self) -> &'static str {
        self.default_body.unwrap_or("")
    }
}

static CATALOG: [EndpointTemplate; 6] = [
    EndpointTemplate {
        key: "health",
        label: "健康检查: GET /api/fqnovel/health",
        method: Method::Get,
        path_template: "/api/fqnovel/health",
        default_body: None,
        expects_text: false,
    },
    EndpointTemplate {
        key: "item_id",
        label: "单章(新增): GET /api/fqnovel/item_id/{itemId}",
        method: Method::Get,
        path_template: "/api/fqnovel/item_id/{itemId}",
        default_body: None,
        expects_text: true,
    },
    EndpointTemplate {
        key: "chapter_get",
        label: "章节(兼容): GET /api/fqnovel/chapter/{bookId}/{chapterId}",
        method: Method::Get,
        path_template: "/api/fqnovel/chapter/{bookId}/{chapterId}",
        default_body: None,
        expects_text: true,
    },
    EndpointTemplate {
        key: "chapter_post",
        label: "章节(兼容): POST /api/fqnovel/chapter",
        method: Method::Post,
        path_template: "/api/fqnovel/chapter",
        default_body: Some("{\n  \"bookId\": \"\",\n  \"chapterId\": \"\"\n}"),
        expects_text: true,
    },
    EndpointTemplate {
        key: "batch_ids",
        label: "批量(更新): POST /api/fqnovel/chapters/batch (chapterIds)",
        method: Method::Post,
        path_template: "/api/fqnovel/chapters/batch",
        default_body: Some(
            "{\n  \"bookId\": \"7276384138653862966\",\n  \"chapterIds\": [\n    \"7282975997584998953\"\n  ]\n}",
        ),
        expects_text: false,
    },
    EndpointTemplate {
        key: "batch_range",
        label: "批量(新增): POST /api/fqnovel/chapters/batch (chapterRange)",
        method: Method::Post,
        path_template: "/api/fqnovel/chapters/batch",
        default_body: Some(
            "{\n  \"bookId\": \"7276384138653862966\",\n  \"chapterRange\": \"1-30\"\n}",
        ),
        expects_text: false,
    },
];

/// All templates in display order
pub fn all() -> &'static [EndpointTemplate] {
    &CATALOG
}

/// The template selected when nothing else has been chosen
pub fn first() -> &'static EndpointTemplate {
    &CATALOG[0]
}

/// Look up a template by key, falling back to the first entry
pub fn find(key: &str) -> &'static EndpointTemplate {
    CATALOG.iter().find(|t| t.key == key).unwrap_or(first())
}

/// Index of the template with this key, or 0 for an unknown key
pub fn position(key: &str) -> usize {
    CATALOG.iter().position(|t| t.key == key).unwrap_or(0)
}

/// Example parameter values the session starts with
pub fn example_params() -> HashMap<String, String> {
    [
        ("itemId", "7282975997584998953"),
        ("bookId", "7276384138653862966"),
        ("chapterId", "7282975997584998953"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}
