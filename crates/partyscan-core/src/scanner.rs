//! The per-tick scan pipeline and the polling loop that drives it.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{GAME_ID_ADDR, GAME_ID_LEN, TitleId};
use crate::config::{Config, ConfigWatcher};
use crate::error::Result;
use crate::export::StatusWriter;
use crate::memory::{DolphinHandle, EmulatedMemoryReader, ReadMemory};
use crate::track::{
    CharacterResolver, PlayerPanel, TurnDisplay, TurnSample, TurnTracker, read_player_panels,
};

/// Consecutive failed liveness probes tolerated before detaching for a
/// re-hook. Dolphin recreates the RAM mapping when a new game boots, which
/// leaves the old hook pointing at nothing.
const PROBE_FAILURE_LIMIT: u32 = 10;

/// Everything the presentation side needs for one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayFrame {
    pub captured_at: DateTime<Utc>,
    pub status: FrameStatus,
    /// True exactly once per confirmed turn reset
    pub stats_refreshed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FrameStatus {
    /// No cataloged title is running
    GameNotDetected,
    /// Title recognized, waiting for the first valid board scene
    SceneNotValid { title: TitleId },
    /// Tracking, but no turn value has been observed yet
    NotDetected { title: TitleId },
    /// Reconciled board state
    Detected {
        title: TitleId,
        current_turn: u8,
        final_turn: u8,
        panels: Vec<PlayerPanel>,
    },
}

impl FrameStatus {
    /// The line written to the status file (and shown by simple overlays)
    pub fn status_line(&self) -> String {
        match self {
            Self::GameNotDetected => "Game not detected".to_string(),
            Self::SceneNotValid { .. } => "Scene not valid".to_string(),
            Self::NotDetected { .. } => "Not detected".to_string(),
            Self::Detected {
                current_turn,
                final_turn,
                ..
            } => format!("Turn: {} / {}", current_turn, final_turn),
        }
    }
}

/// Main scanner
///
/// Owns the reconciliation state and drives one poll per tick: game id →
/// catalog lookup → scene gate → turn reconciliation → player panels →
/// status files. The tick itself never fails; every miss degrades to a
/// status variant.
pub struct Scanner {
    config: Config,
    tracker: TurnTracker,
    resolver: CharacterResolver,
    status: StatusWriter,
    watcher: Option<ConfigWatcher>,
    active_title: Option<TitleId>,
}

impl Scanner {
    pub fn new(config: Config) -> Self {
        let tracker = TurnTracker::new(config.zero_suppression_delay());
        let resolver = CharacterResolver::with_overrides(config.names.clone());
        let status = StatusWriter::new(
            config.overlay.output_dir.clone(),
            config.overlay.write_frame_json,
        );
        Self {
            config,
            tracker,
            resolver,
            status,
            watcher: None,
            active_title: None,
        }
    }

    /// Hot-reload the config file on change
    pub fn watch_config<P: AsRef<Path>>(&mut self, path: P) {
        self.watcher = Some(ConfigWatcher::new(path.as_ref().to_path_buf()));
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn apply_config(&mut self, config: Config) {
        self.tracker
            .set_suppression_delay(config.zero_suppression_delay());
        self.resolver.set_overrides(config.names.clone());
        self.status = StatusWriter::new(
            config.overlay.output_dir.clone(),
            config.overlay.write_frame_json,
        );
        self.config = config;
    }

    /// Perform one poll against the given memory source
    pub fn tick(&mut self, reader: &impl ReadMemory, now: Instant) -> OverlayFrame {
        if let Some(watcher) = &mut self.watcher
            && let Some(config) = watcher.poll()
        {
            self.apply_config(config);
        }

        let title = reader
            .read_ascii(GAME_ID_ADDR, GAME_ID_LEN)
            .ok()
            .and_then(|id| TitleId::from_game_id(&id));

        let Some(title) = title else {
            if self.active_title.take().is_some() {
                info!("Game id no longer recognized, tracker reset");
                self.tracker.reset();
            }
            return self.finish_frame(FrameStatus::GameNotDetected, false);
        };

        if self.active_title != Some(title) {
            info!("Detected {} ({})", title, title.game_id());
            self.tracker.reset();
            self.active_title = Some(title);
        }

        let layout = title.layout();
        let scene_valid = reader
            .read_u8(layout.scene_addr)
            .map(|scene| layout.is_valid_scene(scene))
            .unwrap_or(false);

        // Turn bytes are only meaningful on the board, so they are not
        // sampled while the gate is closed; the tracker shows its cache.
        let sample = TurnSample {
            scene_valid,
            current: if scene_valid {
                reader.read_u8(layout.turn_addr).ok()
            } else {
                None
            },
            final_turn: if scene_valid {
                reader.read_u8(layout.final_turn_addr).ok()
            } else {
                None
            },
        };

        let readout = self.tracker.advance(sample, now);

        let status = match readout.display {
            TurnDisplay::AwaitingScene => FrameStatus::SceneNotValid { title },
            TurnDisplay::NotDetected => FrameStatus::NotDetected { title },
            TurnDisplay::Turn { current, last } => FrameStatus::Detected {
                title,
                current_turn: current,
                final_turn: last,
                panels: read_player_panels(reader, title, &self.resolver).to_vec(),
            },
        };

        self.finish_frame(status, readout.refresh_stats)
    }

    fn finish_frame(&self, status: FrameStatus, stats_refreshed: bool) -> OverlayFrame {
        let frame = OverlayFrame {
            captured_at: Utc::now(),
            status,
            stats_refreshed,
        };
        if let Err(e) = self.status.write_frame(&frame) {
            warn!("Failed to write status files: {}", e);
        }
        frame
    }

    /// Run the polling loop against a hooked process
    ///
    /// Returns when the process dies, the emulated RAM mapping goes stale,
    /// or shutdown is requested; the caller decides whether to re-hook.
    pub fn run(&mut self, process: &DolphinHandle, shutdown_requested: &AtomicBool) -> Result<()> {
        let reader = EmulatedMemoryReader::new(process);
        let mut probe_failures: u32 = 0;

        info!("Starting scan loop...");

        loop {
            if shutdown_requested.load(Ordering::SeqCst) {
                debug!("Shutdown signal received, exiting scan loop");
                break;
            }

            if !process.is_alive() {
                info!("Process terminated");
                break;
            }

            if reader.read_bytes(GAME_ID_ADDR, GAME_ID_LEN).is_err() {
                probe_failures += 1;
                if probe_failures >= PROBE_FAILURE_LIMIT {
                    info!("Emulated RAM unreachable, detaching for re-hook");
                    break;
                }
            } else {
                probe_failures = 0;
            }

            let frame = self.tick(&reader, Instant::now());
            debug!("Tick: {}", frame.status.status_line());

            thread::sleep(self.config.poll_interval());
        }

        Ok(())
    }
}
