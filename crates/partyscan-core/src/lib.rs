//! # partyscan-core
//!
//! Core library for the partyscan board-state tracker.
//!
//! This crate provides:
//! - Dolphin process discovery and emulated-RAM memory reading
//! - The per-title address catalog for the supported Mario Party games
//! - Turn/scene reconciliation (the tracker state machine)
//! - Player stat and character identity decoding
//! - Status file export for external overlays

pub mod assets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod memory;
pub mod scanner;
pub mod track;

pub use catalog::{GAME_ID_ADDR, GAME_ID_LEN, StatAddrs, TitleId, TitleLayout};
pub use config::{Config, ConfigWatcher, LayoutConfig, OverlayConfig};
pub use error::{Error, Result};
pub use export::{StatusWriter, format_frame_console};
pub use memory::{DolphinHandle, EmulatedMemoryReader, ReadMemory};
pub use scanner::{FrameStatus, OverlayFrame, Scanner};
pub use track::{
    CharacterResolver, PlayerPanel, TrackerPhase, TurnDisplay, TurnReadout, TurnSample,
    TurnTracker, read_player_panels,
};

// Mock memory reader for testing (always available for unit and integration tests)
#[doc(hidden)]
pub use memory::{MockMemoryBuilder, MockMemoryReader};
