//! Command line interface
//!
//! Without a subcommand the terminal UI starts. `list` and `send` run the same
//! catalog and executor headlessly, which is handy for scripts.

use crate::actions::{apply_action, AppAction};
use crate::catalog;
use crate::config;
use crate::logging::DEFAULT_LOG_FILE;
use crate::request::{self, Transport};
use crate::state::AppState;
use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fq-playground", version, about = "Send requests to the fqnovel API")]
pub struct Cli {
    /// API base URL (overrides the config file)
    #[arg(long, env = "FQ_PLAYGROUND_BASE_URL", value_parser = parse_base_url)]
    pub base_url: Option<String>,

    /// Config file to read instead of ~/.config/fq-playground/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where to write the debug log
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the endpoint catalog
    List,

    /// Send one request and print the response
    Send {
        /// Endpoint key, e.g. `chapter_get` (unknown keys use `health`)
        endpoint: String,

        /// Path parameter as name=value; may be repeated
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// JSON body for POST endpoints (defaults to the endpoint's example body)
        #[arg(long)]
        body: Option<String>,
    },
}

fn parse_base_url(s: &str) -> Result<String, String> {
    config::validate_url(s)?;
    Ok(s.to_string())
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{s}`"))?;

    if name.trim().is_empty() {
        return Err(format!("parameter name is empty in `{s}`"));
    }

    Ok((name.trim().to_string(), value.to_string()))
}

/// One line per template: key, method, path and required parameters
pub fn catalog_lines() -> Vec<String> {
    catalog::all()
        .iter()
        .map(|template| {
            let required = template.required_params();
            let required = if required.is_empty() {
                "-".to_string()
            } else {
                required.join(", ")
            };
            format!(
                "{:<13}{:<6}{:<45}{}",
                template.key, template.method, template.path_template, required
            )
        })
        .collect()
}

/// Fill a session the way the user would in the UI before pressing Send
pub fn prepare_session(
    state: &mut AppState,
    endpoint: &str,
    params: Vec<(String, String)>,
    body: Option<String>,
) {
    apply_action(AppAction::SelectEndpoint(catalog::find(endpoint).key), state);
    state.request.params.extend(params);
    if let Some(body) = body {
        state.request.body.set_content(body);
    }
}

/// Run a single Send without the UI
pub async fn run_send(
    mut state: AppState,
    transport: &dyn Transport,
    endpoint: String,
    params: Vec<(String, String)>,
    body: Option<String>,
) -> Result<()> {
    prepare_session(&mut state, &endpoint, params, body);

    let template = state.endpoint();
    if template.key != endpoint {
        eprintln!("Unknown endpoint `{endpoint}`, using `{}`", template.key);
    }

    let send_request = request::begin_send(&mut state).map_err(|blocked| eyre!("{blocked}"))?;
    eprintln!("{} {}", template.method, send_request.url);

    let outcome = request::send(transport, &send_request).await;
    request::finish_send(&mut state, outcome);

    if let Some(error) = state.response.error {
        return Err(eyre!(error));
    }

    if let Some(response) = state.response.last {
        eprintln!(
            "Status: {} {}  Time: {}ms  Content-Type: {}",
            response.status,
            response.status_text,
            response.duration_ms,
            response.content_type_display()
        );
        println!("{}", response.body);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_send_with_params() {
        let cli = Cli::try_parse_from([
            "fq-playground",
            "send",
            "chapter_get",
            "-p",
            "bookId=1",
            "--param",
            "chapterId=a=b",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Send {
                endpoint, params, ..
            }) => {
                assert_eq!(endpoint, "chapter_get");
                assert_eq!(
                    params,
                    vec![
                        ("bookId".to_string(), "1".to_string()),
                        ("chapterId".to_string(), "a=b".to_string()),
                    ]
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_base_url() {
        let result = Cli::try_parse_from(["fq-playground", "--base-url", "nope", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("itemId=7 7"),
            Ok(("itemId".to_string(), "7 7".to_string()))
        );
        assert_eq!(
            parse_param("itemId="),
            Ok(("itemId".to_string(), String::new()))
        );
        assert!(parse_param("itemId").is_err());
        assert!(parse_param("=1").is_err());
    }

    #[test]
    fn test_catalog_lines() {
        let lines = catalog_lines();
        assert_eq!(lines.len(), catalog::all().len());
        assert!(lines[0].starts_with("health"));
        assert!(lines[0].trim_end().ends_with('-'));
        assert!(lines[2].ends_with("bookId, chapterId"));
    }

    #[test]
    fn test_prepare_session() {
        let mut state = AppState::default();
        prepare_session(
            &mut state,
            "item_id",
            vec![("itemId".to_string(), "5".to_string())],
            None,
        );
        assert_eq!(
            state.preview_url(),
            "https://fq.amethysty.dev/api/fqnovel/item_id/5"
        );

        prepare_session(&mut state, "batch_ids", vec![], Some("{}".to_string()));
        assert_eq!(state.request.body.content(), "{}");
    }
}
