mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("partyscan=info,partyscan_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match args.command {
        Some(Command::Status { pid, json }) => commands::status::run(&args.config, pid, json),
        Some(Command::Titles) => commands::titles::run(),
        Some(Command::Run) | None => commands::run::run(&args.config),
    }
}
