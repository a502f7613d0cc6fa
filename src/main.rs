//! termbars - live spectrum bars for a WAV file, drawn in the terminal.
//!
//! Usage: termbars <FILE>

use clap::Parser;
use log::info;
use std::process::ExitCode;

use termbars::cli::Args;
use termbars::display::install_panic_hook;
use termbars::params::AnalysisConfig;
use termbars::visualizer::visualize_file;

fn main() -> ExitCode {
    // Quiet by default: anything logged lands on top of the bars
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    install_panic_hook();

    let args = Args::parse();
    let config = AnalysisConfig::default();

    match visualize_file(&args.path, &config) {
        Ok(frames) => {
            info!("Done after {} frames", frames);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
