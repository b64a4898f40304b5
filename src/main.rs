mod actions;
mod app;
mod catalog;
mod cli;
mod config;
mod editor;
mod error;
mod logging;
mod request;
mod state;
mod types;
mod ui;

use crate::app::App;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::request::{HttpTransport, Transport};
use crate::state::AppState;
use clap::Parser;
use color_eyre::Result;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(&cli.log_file)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let state = AppState::new(
        config.resolve_base_url(cli.base_url.clone()),
        config.seeded_params(),
    );
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::default());

    match cli.command {
        Some(Command::List) => {
            for line in cli::catalog_lines() {
                println!("{line}");
            }
            Ok(())
        }
        Some(Command::Send {
            endpoint,
            params,
            body,
        }) => cli::run_send(state, transport.as_ref(), endpoint, params, body).await,
        None => {
            tracing::info!(base_url = %state.request.base_url, "starting playground");
            let terminal = ratatui::init();
            let app_result = App::new(state, transport).run(terminal).await;
            ratatui::restore();
            app_result
        }
    }
}
