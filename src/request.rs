use crate::actions::{apply_action, AppAction};
use crate::catalog::{EndpointTemplate, Method};
use crate::error::{SendBlocked, SendError};
use crate::state::{self, AppState, SharedState};
use crate::types::{ApiResponse, OutgoingRequest, RawResponse};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Payload sent when a body-carrying template has an empty body
pub const EMPTY_JSON_BODY: &str = "{}";

const JSON_CONTENT_TYPE: &str = "application/json";

// ============================================================================
// Request building
// ============================================================================

/// Locate every `{name}` token in a path template, left to right.
/// `{}` is not a token, and an unclosed `{` ends the scan.
fn scan_placeholders(path_template: &str) -> Vec<(Range<usize>, &str)> {
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(open) = path_template[pos..].find('{').map(|i| pos + i) {
        let Some(close) = path_template[open + 1..].find('}').map(|i| open + 1 + i) else {
            break;
        };

        if close == open + 1 {
            pos = open + 1;
            continue;
        }

        found.push((open..close + 1, &path_template[open + 1..close]));
        pos = close + 1;
    }

    found
}

/// Names of the placeholders in a path template, in first-seen order
pub fn extract_placeholders(path_template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for (_, name) in scan_placeholders(path_template) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Trim whitespace and strip trailing slashes from a base URL
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim().trim_end_matches('/')
}

/// Build the full request URL.
///
/// Each `{name}` is replaced by the percent-encoded value from `params`.
/// A name with no entry keeps its literal `{name}` text, so an incomplete URL
/// can still be previewed.
pub fn build_url(base_url: &str, path_template: &str, params: &HashMap<String, String>) -> String {
    let mut url = normalize_base_url(base_url).to_string();
    let mut last = 0;

    for (span, name) in scan_placeholders(path_template) {
        url.push_str(&path_template[last..span.start]);
        match params.get(name) {
            Some(value) => url.push_str(&urlencoding::encode(value)),
            None => url.push_str(&path_template[span.clone()]),
        }
        last = span.end;
    }

    url.push_str(&path_template[last..]);
    url
}

/// Required names whose value is absent or blank
pub fn missing_params<'a>(required: &[&'a str], params: &HashMap<String, String>) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|name| {
            params
                .get(*name)
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        })
        .collect()
}

/// Decide whether a Send may start
pub fn check_submission(
    required: &[&str],
    params: &HashMap<String, String>,
    base_url: &str,
    in_flight: bool,
) -> Result<(), SendBlocked> {
    let missing = missing_params(required, params);
    if !missing.is_empty() {
        return Err(SendBlocked::MissingParams(
            missing.into_iter().map(str::to_string).collect(),
        ));
    }

    if in_flight {
        return Err(SendBlocked::InFlight);
    }

    if normalize_base_url(base_url).is_empty() {
        return Err(SendBlocked::EmptyBaseUrl);
    }

    Ok(())
}

/// Validate the body and assemble the outgoing request.
///
/// Body-carrying methods get a JSON content type and send the body text as
/// typed, or `{}` when it is blank. Malformed JSON fails before anything is
/// sent.
pub fn prepare_request(
    method: Method,
    url: String,
    body_text: &str,
) -> Result<OutgoingRequest, SendError> {
    if !method.sends_body() {
        return Ok(OutgoingRequest {
            method,
            url,
            headers: Vec::new(),
            body: None,
        });
    }

    let payload = if body_text.trim().is_empty() {
        EMPTY_JSON_BODY.to_string()
    } else {
        body_text.to_string()
    };

    serde_json::from_str::<serde_json::Value>(&payload)?;

    Ok(OutgoingRequest {
        method,
        url,
        headers: vec![(
            CONTENT_TYPE.as_str().to_string(),
            JSON_CONTENT_TYPE.to_string(),
        )],
        body: Some(payload),
    })
}

// ============================================================================
// Response formatting
// ============================================================================

/// Attempts to pretty-print JSON, returns original string if not valid JSON
pub fn try_format_json(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

/// Choose how a response body is displayed.
///
/// Only a JSON content type on a template that does not force text gets
/// pretty-printed; everything else is shown exactly as received.
pub fn format_body(body: &str, content_type: Option<&str>, expects_text: bool) -> String {
    let is_json = content_type.is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE));
    if expects_text || !is_json {
        return body.to_string();
    }
    try_format_json(body)
}

fn elapsed_millis(started: Instant, received_at: Instant) -> u64 {
    let elapsed = received_at.saturating_duration_since(started);
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}

// ============================================================================
// Execution
// ============================================================================

/// Sends one prepared request over the network
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, SendError>;
}

/// `Transport` backed by a reqwest client with its default settings
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, SendError> {
        let mut builder = self.client.request(request.method.into(), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(SendError::Request)?;
        let received_at = Instant::now();

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        // Servers may send their own reason phrase; hyper keeps it only when it
        // differs from the canonical one
        let status_text = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok())
            .or_else(|| status.canonical_reason())
            .unwrap_or("")
            .to_string();

        let body = response.text().await.map_err(SendError::ReadBody)?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text,
            content_type,
            body,
            received_at,
        })
    }
}

/// Everything one Send needs, captured when the action starts
#[derive(Debug, Clone)]
pub struct SendRequest {
    pub template: &'static EndpointTemplate,
    pub url: String,
    pub body: String,
}

/// Validate, send, time and format one request
pub async fn send(transport: &dyn Transport, request: &SendRequest) -> Result<ApiResponse, SendError> {
    let started = Instant::now();

    let outgoing = prepare_request(request.template.method, request.url.clone(), &request.body)?;

    tracing::debug!(method = %outgoing.method, url = %outgoing.url, "sending request");
    let raw = transport.send(outgoing).await?;

    let body = format_body(
        &raw.body,
        raw.content_type.as_deref(),
        request.template.expects_text,
    );

    Ok(ApiResponse {
        status: raw.status,
        status_text: raw.status_text,
        duration_ms: elapsed_millis(started, raw.received_at),
        content_type: raw.content_type,
        body,
    })
}

/// Check the gate, clear the previous result and mark the session in flight
pub fn begin_send(state: &mut AppState) -> Result<SendRequest, SendBlocked> {
    state.check_submission()?;

    let request = SendRequest {
        template: state.endpoint(),
        url: state.preview_url(),
        body: state.request.body.content().to_string(),
    };

    apply_action(AppAction::BeginSend, state);
    Ok(request)
}

/// Record the outcome of a Send and clear the in-flight flag
pub fn finish_send(state: &mut AppState, outcome: Result<ApiResponse, SendError>) {
    match outcome {
        Ok(response) => {
            tracing::info!(
                status = response.status,
                duration_ms = response.duration_ms,
                "request completed"
            );
            apply_action(AppAction::SendSucceeded(response), state);
        }
        Err(e) => {
            tracing::warn!(error = %e, "request failed");
            apply_action(AppAction::SendFailed(e.to_string()), state);
        }
    }
}

/// Start a Send for the current selection on a background task.
///
/// Returns the gate's reason when the Send is not allowed. The task writes its
/// result into `state` whatever is selected by then.
pub fn execute_request_background(
    state: SharedState,
    transport: Arc<dyn Transport>,
) -> Result<JoinHandle<()>, SendBlocked> {
    let request = {
        let mut s = state::write(&state);
        begin_send(&mut s)?
    };

    Ok(tokio::spawn(async move {
        let outcome = send(transport.as_ref(), &request).await;

        let mut s = state::write(&state);
        finish_send(&mut s, outcome);
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use std::sync::{Mutex, RwLock};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::Notify;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Replies with a canned response and records every request it sees
    struct FakeTransport {
        reply: RawResponse,
        calls: Mutex<Vec<OutgoingRequest>>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeTransport {
        fn new(content_type: Option<&str>, body: &str) -> Self {
            Self {
                reply: RawResponse {
                    status: 200,
                    status_text: "OK".to_string(),
                    content_type: content_type.map(str::to_string),
                    body: body.to_string(),
                    received_at: Instant::now(),
                },
                calls: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        fn calls(&self) -> Vec<OutgoingRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, SendError> {
            self.calls.lock().unwrap().push(request);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(RawResponse {
                received_at: Instant::now(),
                ..self.reply.clone()
            })
        }
    }

    /// Local test servers must not be routed through a proxy from the environment
    fn local_http() -> HttpTransport {
        HttpTransport {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
        }
    }

    fn send_request(key: &str, url: &str, body: &str) -> SendRequest {
        SendRequest {
            template: catalog::find(key),
            url: url.to_string(),
            body: body.to_string(),
        }
    }

    /// Serve exactly one canned HTTP response on a local port
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}")
    }

    // ------------------------------------------------------------------
    // Placeholders and URLs
    // ------------------------------------------------------------------

    #[test]
    fn test_extract_placeholders_in_order() {
        assert_eq!(
            extract_placeholders("/api/fqnovel/chapter/{bookId}/{chapterId}"),
            vec!["bookId", "chapterId"]
        );
    }

    #[test]
    fn test_extract_placeholders_none() {
        assert!(extract_placeholders("/api/fqnovel/health").is_empty());
        assert!(extract_placeholders("").is_empty());
    }

    #[test]
    fn test_extract_placeholders_repeated_name_reported_once() {
        assert_eq!(extract_placeholders("/{a}/{b}/{a}"), vec!["a", "b"]);
    }

    #[test]
    fn test_extract_placeholders_skips_empty_and_unclosed() {
        assert_eq!(extract_placeholders("/{}/{id}"), vec!["id"]);
        assert_eq!(extract_placeholders("/{id}/{open"), vec!["id"]);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("  https://x.test///  "), "https://x.test");
        assert_eq!(normalize_base_url("https://x.test"), "https://x.test");
        assert_eq!(normalize_base_url("   "), "");
        assert_eq!(normalize_base_url("/"), "");
    }

    #[test]
    fn test_build_url_encodes_values() {
        let url = build_url("https://x.test/", "/a/{id}", &params(&[("id", "7 7")]));
        assert_eq!(url, "https://x.test/a/7%207");
    }

    #[test]
    fn test_build_url_reserved_characters() {
        let url = build_url("https://x.test", "/a/{id}", &params(&[("id", "a/b?c#d")]));
        assert_eq!(url, "https://x.test/a/a%2Fb%3Fc%23d");
    }

    #[test]
    fn test_build_url_missing_param_keeps_placeholder() {
        let url = build_url(
            "https://x.test",
            "/chapter/{bookId}/{chapterId}",
            &params(&[("bookId", "1")]),
        );
        assert_eq!(url, "https://x.test/chapter/1/{chapterId}");
    }

    #[test]
    fn test_build_url_repeated_placeholder_reuses_value() {
        let url = build_url("https://x.test", "/{id}/copy/{id}", &params(&[("id", "9")]));
        assert_eq!(url, "https://x.test/9/copy/9");
    }

    #[test]
    fn test_build_url_ignores_unused_params() {
        let url = build_url(
            "https://x.test",
            "/api/fqnovel/health",
            &params(&[("itemId", "1")]),
        );
        assert_eq!(url, "https://x.test/api/fqnovel/health");
    }

    // ------------------------------------------------------------------
    // Submission gate
    // ------------------------------------------------------------------

    #[test]
    fn test_missing_params_blank_and_absent() {
        let values = params(&[("bookId", "  "), ("itemId", "1")]);
        assert_eq!(
            missing_params(&["bookId", "chapterId", "itemId"], &values),
            vec!["bookId", "chapterId"]
        );
    }

    #[test]
    fn test_check_submission_allows_complete_request() {
        let values = params(&[("itemId", "1")]);
        assert_eq!(
            check_submission(&["itemId"], &values, "https://x.test", false),
            Ok(())
        );
    }

    #[test]
    fn test_check_submission_blocks_missing_params() {
        let values = params(&[("itemId", " ")]);
        assert_eq!(
            check_submission(&["itemId"], &values, "https://x.test", false),
            Err(SendBlocked::MissingParams(vec!["itemId".to_string()]))
        );
    }

    #[test]
    fn test_check_submission_blocks_in_flight() {
        assert_eq!(
            check_submission(&[], &HashMap::new(), "https://x.test", true),
            Err(SendBlocked::InFlight)
        );
    }

    #[test]
    fn test_check_submission_blocks_empty_base_url() {
        assert_eq!(
            check_submission(&[], &HashMap::new(), " // ", false),
            Err(SendBlocked::EmptyBaseUrl)
        );
    }

    // ------------------------------------------------------------------
    // Request preparation and body formatting
    // ------------------------------------------------------------------

    #[test]
    fn test_prepare_get_has_no_body_or_headers() {
        let request = prepare_request(Method::Get, "https://x.test".to_string(), "{bad").unwrap();
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_prepare_post_empty_body_sends_empty_object() {
        let request = prepare_request(Method::Post, "https://x.test".to_string(), "  \n").unwrap();
        assert_eq!(request.body.as_deref(), Some("{}"));
        assert_eq!(
            request.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn test_prepare_post_keeps_body_text_verbatim() {
        let body = "{\n  \"bookId\": \"1\"\n}";
        let request = prepare_request(Method::Post, "https://x.test".to_string(), body).unwrap();
        assert_eq!(request.body.as_deref(), Some(body));
    }

    #[test]
    fn test_prepare_post_invalid_json_fails() {
        let err = prepare_request(Method::Post, "https://x.test".to_string(), r#"{"a":}"#)
            .unwrap_err();
        assert!(matches!(err, SendError::InvalidBody(_)));
        assert!(err.to_string().starts_with("Invalid JSON body"));
    }

    #[test]
    fn test_format_body_pretty_prints_json() {
        assert_eq!(
            format_body(r#"{"a":1}"#, Some("application/json"), false),
            "{\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn test_format_body_with_charset_parameter() {
        assert_eq!(
            format_body(r#"{"a":1}"#, Some("application/json; charset=utf-8"), false),
            "{\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn test_format_body_preserves_key_order() {
        assert_eq!(
            format_body(r#"{"z":1,"a":2}"#, Some("application/json"), false),
            "{\n  \"z\": 1,\n  \"a\": 2\n}"
        );
    }

    #[test]
    fn test_format_body_forced_text_is_raw() {
        assert_eq!(
            format_body(r#"{"a":1}"#, Some("application/json"), true),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_format_body_non_json_content_type_is_raw() {
        assert_eq!(format_body(r#"{"a":1}"#, Some("text/plain"), false), r#"{"a":1}"#);
        assert_eq!(format_body(r#"{"a":1}"#, None, false), r#"{"a":1}"#);
    }

    #[test]
    fn test_format_body_invalid_json_falls_back_to_raw() {
        assert_eq!(
            format_body("not json", Some("application/json"), false),
            "not json"
        );
    }

    #[test]
    fn test_elapsed_millis_rounds_and_never_negative() {
        let start = Instant::now();
        let later = start + std::time::Duration::from_micros(1_600);
        assert_eq!(elapsed_millis(start, later), 2);
        assert_eq!(elapsed_millis(later, start), 0);
    }

    // ------------------------------------------------------------------
    // Send
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_send_post_with_empty_body() {
        let transport = FakeTransport::new(Some("application/json"), r#"{"ok":true}"#);
        let request = send_request("batch_ids", "https://x.test/api/fqnovel/chapters/batch", "");

        let response = send(&transport, &request).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].body.as_deref(), Some("{}"));
        assert_eq!(response.body, "{\n  \"ok\": true\n}");
    }

    #[tokio::test]
    async fn test_send_invalid_body_makes_no_call() {
        let transport = FakeTransport::new(Some("application/json"), "{}");
        let request = send_request("batch_ids", "https://x.test", r#"{"a":}"#);

        let result = send(&transport, &request).await;

        assert!(matches!(result, Err(SendError::InvalidBody(_))));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_forced_text_template() {
        let transport = FakeTransport::new(Some("application/json"), r#"{"a":1}"#);
        let request = send_request("item_id", "https://x.test/api/fqnovel/item_id/1", "");

        let response = send(&transport, &request).await.unwrap();

        assert_eq!(response.body, r#"{"a":1}"#);
        assert_eq!(transport.calls()[0].method, Method::Get);
        assert!(transport.calls()[0].body.is_none());
    }

    #[tokio::test]
    async fn test_http_transport_end_to_end() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 7\r\nConnection: close\r\n\r\n{\"a\":1}",
        )
        .await;
        let request = send_request("health", &format!("{base}/api/fqnovel/health"), "");

        let response = send(&local_http(), &request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.status_text, "OK");
        assert_eq!(response.content_type.as_deref(), Some("application/json"));
        assert_eq!(response.body, "{\n  \"a\": 1\n}");
    }

    #[tokio::test]
    async fn test_http_transport_error_status_is_not_an_error() {
        let base = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 4\r\nConnection: close\r\n\r\nnope",
        )
        .await;
        let request = send_request("health", &format!("{base}/missing"), "");

        let response = send(&local_http(), &request).await.unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.status_text, "Not Found");
        assert_eq!(response.body, "nope");
    }

    #[tokio::test]
    async fn test_http_transport_keeps_server_reason_phrase() {
        let base = serve_once(
            "HTTP/1.1 200 Success\r\nContent-Type: text/plain\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
        )
        .await;
        let request = send_request("health", &format!("{base}/api/fqnovel/health"), "");

        let response = send(&local_http(), &request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.status_text, "Success");
    }

    #[tokio::test]
    async fn test_http_transport_unknown_status_has_empty_text() {
        let base = serve_once(
            "HTTP/1.1 599 \r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let request = send_request("health", &format!("{base}/api/fqnovel/health"), "");

        let response = send(&local_http(), &request).await.unwrap();

        assert_eq!(response.status, 599);
        assert_eq!(response.status_text, "");
    }

    #[tokio::test]
    async fn test_http_transport_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let request = send_request("health", &format!("http://{addr}/api/fqnovel/health"), "");
        let result = send(&local_http(), &request).await;

        let err = result.unwrap_err();
        assert!(matches!(err, SendError::Request(_)));
        assert!(err.to_string().starts_with("Request failed"));
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    fn shared_state(base_url: &str) -> SharedState {
        Arc::new(RwLock::new(AppState::new(
            base_url.to_string(),
            catalog::example_params(),
        )))
    }

    #[tokio::test]
    async fn test_background_send_success_clears_in_flight() {
        let state = shared_state("https://x.test");
        let transport: Arc<dyn Transport> =
            Arc::new(FakeTransport::new(Some("application/json"), r#"{"status":"up"}"#));

        let handle = execute_request_background(state.clone(), transport).unwrap();
        handle.await.unwrap();

        let s = state::read(&state);
        assert!(!s.response.in_flight);
        assert!(s.response.error.is_none());
        let response = s.response.last.as_ref().unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{\n  \"status\": \"up\"\n}");
    }

    #[tokio::test]
    async fn test_background_send_invalid_body_sets_error() {
        let state = shared_state("https://x.test");
        {
            let mut s = state::write(&state);
            apply_action(AppAction::SelectEndpoint("chapter_post"), &mut s);
            s.request.body.set_content(r#"{"a":}"#.to_string());
        }
        let fake = Arc::new(FakeTransport::new(None, ""));
        let transport: Arc<dyn Transport> = fake.clone();

        let handle = execute_request_background(state.clone(), transport).unwrap();
        handle.await.unwrap();

        let s = state::read(&state);
        assert!(!s.response.in_flight);
        assert!(s.response.last.is_none());
        assert!(s
            .response
            .error
            .as_deref()
            .unwrap()
            .starts_with("Invalid JSON body"));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_background_send_network_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let state = shared_state(&format!("http://{addr}"));
        let transport: Arc<dyn Transport> = Arc::new(local_http());

        let handle = execute_request_background(state.clone(), transport).unwrap();
        handle.await.unwrap();

        let s = state::read(&state);
        assert!(!s.response.in_flight);
        assert!(s.response.last.is_none());
        assert!(s.response.error.is_some());
    }

    #[tokio::test]
    async fn test_second_send_blocked_while_in_flight() {
        let state = shared_state("https://x.test");
        let gate = Arc::new(Notify::new());
        let mut fake = FakeTransport::new(Some("text/plain"), "ok");
        fake.gate = Some(gate.clone());
        let fake = Arc::new(fake);
        let transport: Arc<dyn Transport> = fake.clone();

        let handle = execute_request_background(state.clone(), transport.clone()).unwrap();
        assert!(state::read(&state).response.in_flight);

        let second = execute_request_background(state.clone(), transport);
        assert_eq!(second.err(), Some(SendBlocked::InFlight));

        gate.notify_one();
        handle.await.unwrap();

        let s = state::read(&state);
        assert!(!s.response.in_flight);
        assert_eq!(s.response.last.as_ref().unwrap().body, "ok");
        assert_eq!(fake.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_send_blocked_by_missing_param_leaves_state_untouched() {
        let state = shared_state("https://x.test");
        {
            let mut s = state::write(&state);
            apply_action(AppAction::SelectEndpoint("item_id"), &mut s);
            s.request.params.insert("itemId".to_string(), "   ".to_string());
            s.response.error = Some("previous".to_string());
        }
        let transport: Arc<dyn Transport> = Arc::new(FakeTransport::new(None, ""));

        let result = execute_request_background(state.clone(), transport);

        assert_eq!(
            result.err(),
            Some(SendBlocked::MissingParams(vec!["itemId".to_string()]))
        );
        let s = state::read(&state);
        assert!(!s.response.in_flight);
        assert_eq!(s.response.error.as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn test_begin_send_clears_previous_result() {
        let mut state = AppState::new("https://x.test".to_string(), catalog::example_params());
        state.response.error = Some("old error".to_string());

        let request = begin_send(&mut state).unwrap();

        assert!(state.response.in_flight);
        assert!(state.response.error.is_none());
        assert!(state.response.last.is_none());
        assert_eq!(request.url, "https://x.test/api/fqnovel/health");

        let transport = FakeTransport::new(Some("text/plain"), "up");
        let outcome = send(&transport, &request).await;
        finish_send(&mut state, outcome);

        assert!(!state.response.in_flight);
        assert_eq!(state.response.last.as_ref().unwrap().body, "up");
    }
}
