mod cli;
mod coaching;
mod config;
mod form;
mod model;
mod select;
mod telemetry;
mod tui;

use std::process;

use clap::Parser;

use cli::Cli;
use config::Config;
use telemetry::Sink;

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    // The TUI owns the terminal, so its logs go to a file.
    let sink = match (&cli.command, Config::log_path()) {
        (Some(_), _) => Sink::Stderr,
        (None, Some(path)) => Sink::File(path),
        (None, None) => Sink::Discard,
    };
    if let Err(e) = telemetry::init(&config.log_level, &sink) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    let preset = cli.preset.map_or(config.preset, cli::PresetArg::to_domain);
    let policy = preset.policy();
    tracing::debug!(%preset, "scoring policy selected");

    let outcome = match &cli.command {
        Some(command) => cli::run(command, &policy),
        None => tui::run(policy).map_err(|e| e.to_string()),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
