//! One-shot status command.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use partyscan_core::{DolphinHandle, EmulatedMemoryReader, Scanner, format_frame_console};

/// Read a single frame from the running game and print it
pub fn run(config_path: &Path, pid: Option<u32>, json: bool) -> Result<()> {
    let process = match pid {
        Some(pid) => DolphinHandle::hook(pid),
        None => DolphinHandle::find_and_hook(),
    }
    .context("Failed to hook Dolphin; is the emulator running?")?;

    let reader = EmulatedMemoryReader::new(&process);
    let mut scanner = Scanner::new(super::load_config(config_path));
    let frame = scanner.tick(&reader, Instant::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        print!("{}", format_frame_console(&frame));
    }

    Ok(())
}
