// src/main.rs

use clap::Parser;
use log::info;
use std::error::Error;

use sleep_log_render::config::AnalysisConfig;
use sleep_log_render::constants::{DEFAULT_INPUT_FOLDER, DEFAULT_OUTPUT_FOLDER, DEFAULT_WINDOW_SIZE};
use sleep_log_render::report::process_latest_recording;
use sleep_log_render::report::renderer::BitmapRenderer;

/// Render the most recent breathing monitor recording into an HTML report.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Folder holding the recordings; the file whose name sorts last is rendered.
    #[arg(long, default_value = DEFAULT_INPUT_FOLDER)]
    input: String,

    /// Folder the report is written under.
    #[arg(long, default_value = DEFAULT_OUTPUT_FOLDER)]
    output: String,

    /// Samples per report page.
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "sleep_log_render=info");
    }
    env_logger::init();

    let cli = Cli::parse();
    if cli.window_size == 0 {
        return Err("--window-size must be at least 1".into());
    }
    let config = AnalysisConfig::new(&cli.input, &cli.output, cli.window_size)?;

    let summary = process_latest_recording(&config, &mut BitmapRenderer)?;
    info!(
        "Report with {} windows written to '{}'",
        summary.windows,
        summary.report_path.display()
    );
    Ok(())
}
