use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eight_puzzle::{EightPuzzle, Interpreter, SessionConfig};
use tracing::Level;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "eight-puzzle")]
#[command(version, about = "Run 8-puzzle command scripts", long_about = None)]
struct Cli {
    #[arg(help = "Command script to run; reads stdin when omitted or '-'")]
    script: Option<PathBuf>,

    #[arg(long, help = "Node generation limit applied to every solve")]
    max_nodes: Option<usize>,

    #[arg(long, default_value = "0", help = "Seed for the first randomizeState")]
    seed: u64,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();

    let config = SessionConfig {
        max_nodes: cli.max_nodes.unwrap_or(usize::MAX),
        seed: cli.seed,
    };
    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(EightPuzzle::new(config), stdout.lock());

    match cli.script.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            interpreter.run_script(BufReader::new(file))?;
        }
        _ => {
            interpreter.run_script(io::stdin().lock())?;
        }
    }
    Ok(())
}
