use color_eyre::Result;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file used unless `--log-file` says otherwise
pub const DEFAULT_LOG_FILE: &str = "/tmp/fq-playground.log";

const DEFAULT_FILTER: &str = "fq_playground=debug";

/// Send tracing output to an append-only log file so it never draws over the
/// terminal UI. `RUST_LOG` overrides the default filter.
///
/// A log file that cannot be opened only costs the log: a warning goes to
/// stderr and the session carries on without one.
pub fn init(path: &Path) -> Result<()> {
    let file_layer = open_log_file(path).map(|file| {
        tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn open_log_file(path: &Path) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!(
                "warning: logging disabled, cannot open {}: {e}",
                path.display()
            );
            None
        }
    }
}
