mod calculus;
mod config;
mod data;
mod manager;

use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Differentiate positions into speeds.
    Speed,

    /// Integrate accelerations into accumulated speeds.
    Integrate,

    /// Summarize computed results.
    Report,

    /// Remove computed results.
    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.data_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Speed => mgr.compute_speed()?,
        Command::Integrate => mgr.compute_accumulated_speed()?,
        Command::Report => mgr.report()?,
        Command::Clean => mgr.clean()?,
    }

    Ok(())
}
