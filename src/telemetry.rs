// src/telemetry.rs
//! Tracing setup. Output goes to a file because the terminal belongs to the UI.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

static TELEMETRY_INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber once, appending to `log_path`.
///
/// `RUST_LOG` overrides the default `specscroll=info` filter.
pub fn init(log_path: &Path) {
    TELEMETRY_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("specscroll=info"))
            .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into()));

        if let Some(dir) = log_path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        let file = match OpenOptions::new().create(true).append(true).open(log_path) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("[telemetry] cannot open {}: {err}", log_path.display());
                return;
            }
        };

        if let Err(err) = fmt()
            .with_env_filter(env_filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .compact()
            .try_init()
        {
            eprintln!("[telemetry] failed to initialise tracing subscriber: {err}");
        }
    });
}
