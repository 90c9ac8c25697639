// src/main.rs

mod core;

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::Path;
use std::process::ExitCode;

// Edit these to collect a different project or write somewhere else.
const PROJECT_ROOT: &str = ".";
const OUTPUT_FILENAME: &str = "combined_project.txt";

fn initialize_logging() {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // Logs go to stderr; stdout carries the collection summary.
    if let Err(e) = TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: failed to initialize logger: {e}");
    }
}

fn main() -> ExitCode {
    initialize_logging();
    log::info!("Application starting up.");

    match crate::core::collect(Path::new(PROJECT_ROOT), Path::new(OUTPUT_FILENAME)) {
        Ok(summary) => {
            log::info!(
                "Application finished. Collected {} files.",
                summary.file_count
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Collection failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
