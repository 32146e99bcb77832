use std::env;

use anyhow::Result;
use tracing::info;

use specscroll::{app::App, cli::Args, config::AppConfig, telemetry, ui};

fn main() -> Result<()> {
    let args = Args::parse(env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default(),
    };

    telemetry::init(&config.log_path());
    info!("[main] opening {}", args.audio.display());

    let app = App::new(&args.audio, config)?;
    ui::run(app)
}
