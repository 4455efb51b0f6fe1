mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::Level;

use commands::sip::SipArgs;

/// Systematic investment plan projections
#[derive(Parser)]
#[command(
    name = "sip",
    version,
    about = "Systematic investment plan projections",
    long_about = "Projects the future value of a fixed monthly contribution made at the \
                  start of each month, compounding at a monthly rate derived from an \
                  annual nominal rate. Inputs come from flags, a JSON/YAML file or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Decimal places for rendered money and percentage fields
    #[arg(long, default_value_t = 2, global = true)]
    precision: u32,

    /// Log inputs and timings to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the future value, total invested, gains and return of a SIP
    Project(SipArgs),
    /// Show the year-by-year growth of a SIP
    Schedule(SipArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::sip::run_project(args, cli.precision),
        Commands::Schedule(args) => commands::sip::run_schedule(args, cli.precision),
        Commands::Version => {
            println!("sip {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
