//! TextDrop - replays a scripted drag gesture against an editor.
//!
//! Usage: textdrop [--verbose] SCENARIO

mod replay;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "textdrop", version, about = "Replay a drag-and-drop gesture against a text editor")]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Log every transition
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    log::info!("Replaying {}", args.scenario.display());

    let scenario = match replay::load(&args.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = replay::replay(&scenario);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to write report: {}", e);
            ExitCode::FAILURE
        }
    }
}
