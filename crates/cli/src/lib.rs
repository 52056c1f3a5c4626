pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use bridget_core::config::{AppConfig, LoadOptions, LogFormat};
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    name = "bridget",
    about = "Bridget wedding budget CLI",
    long_about = "Plan wedding budgets from the command line: allocate a total budget across categories, surface recommendations and savings estimates, and inspect the effective configuration.",
    after_help = "Examples:\n  bridget sample > wedding.toml\n  bridget plan --input wedding.toml\n  bridget plan --input wedding.toml --json --seed 42\n  bridget doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Compute a budget plan from a TOML input file and render it")]
    Plan {
        #[arg(long, value_name = "FILE", help = "Wedding input TOML (see `bridget sample`)")]
        input: PathBuf,
        #[arg(long, help = "Emit the full breakdown as machine-readable JSON")]
        json: bool,
        #[arg(long, default_value_t = 3, help = "Recommendations to show in text output")]
        top: usize,
        #[arg(long, help = "Seed the savings rate source for reproducible estimates")]
        seed: Option<u64>,
    },
    #[command(about = "Print the effective category table with base shares and factor flags")]
    Categories {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Print a starter input TOML to adapt")]
    Sample,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and tables, then run an engine self-check")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Plan { input, json, top, seed } => commands::plan::run(&input, json, top, seed),
        Command::Categories { json } => commands::categories::run(json),
        Command::Sample => {
            commands::CommandResult { exit_code: 0, output: commands::sample::run() }
        }
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

// On a broken config the subscriber stays uninitialized; the invoked command
// reports the config error itself through its structured envelope.
fn init_logging() {
    let Ok(config) = AppConfig::load(LoadOptions::default()) else {
        return;
    };
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}
