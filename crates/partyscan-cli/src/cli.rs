//! CLI argument definitions for partyscan.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "partyscan")]
#[command(about = "Mario Party board-state tracker for Dolphin", version)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "partyscan.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Track the running game continuously (default)
    Run,
    /// Read one frame from the running game and print it
    Status {
        /// Process ID (skip automatic detection)
        #[arg(long)]
        pid: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the supported titles
    Titles,
}
