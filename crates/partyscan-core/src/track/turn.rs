use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::catalog::DEFAULT_FINAL_TURN;

/// Raw turn byte written by the games while a board transition animation is
/// in flight. Not a real turn number.
pub const TURN_SENTINEL: u8 = 255;

/// Tracker lifecycle
///
/// ## State Transition Rules
///
/// Valid transitions:
/// - Uninitialized -> AwaitingValidScene (a cataloged title was observed)
/// - AwaitingValidScene -> Tracking (first valid scene id seen)
///
/// The transition into Tracking is one-directional and permanent for the
/// life of the attached title: entering a minigame mid-turn (invalid scene)
/// never drops the tracker back to AwaitingValidScene. Only a title change
/// resets the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    Uninitialized,
    AwaitingValidScene,
    Tracking,
}

/// One tick's worth of raw reads
///
/// `None` means the read failed or was not attempted (e.g. the scene gate is
/// closed this tick). A raw byte of 0 arrives as `Some(0)`: the
/// reconciliation rules need to tell "no value" apart from "reset to zero".
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnSample {
    pub scene_valid: bool,
    pub current: Option<u8>,
    pub final_turn: Option<u8>,
}

/// What the display should show for the turn counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDisplay {
    /// No turn information available at all
    NotDetected,
    /// Title recognized but no valid board scene observed yet
    AwaitingScene,
    /// Reconciled turn pair
    Turn { current: u8, last: u8 },
}

/// Result of one reconciliation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReadout {
    pub display: TurnDisplay,
    /// True exactly once per confirmed turn reset; tells the consumer to
    /// rebuild stat displays.
    pub refresh_stats: bool,
}

/// Turn/scene reconciliation state machine
///
/// Consumes raw per-tick reads and produces a stable displayed turn pair.
/// The underlying memory is transiently inconsistent (mid-transition
/// sentinels, reset-to-zero flickers), so raw values pass through a small
/// cache before anything is shown:
///
/// - a raw 255 is a transition marker and is replaced by the cached value;
/// - a raw 0 while a nonzero value is cached holds the cached value for the
///   configured suppression delay before the reset is believed (the games
///   briefly zero the counter during the turn-change animation);
/// - any other nonzero raw value updates the cache unconditionally.
///
/// The machine is a pure function of (previous state, sample, now); the
/// polling schedule lives with the caller, which keeps this independently
/// testable.
pub struct TurnTracker {
    phase: TrackerPhase,
    cached_current: Option<u8>,
    cached_final: Option<u8>,
    /// When a reset-to-zero was first observed, while it is being held back
    zero_seen_at: Option<Instant>,
    suppression_delay: Duration,
}

impl TurnTracker {
    pub fn new(suppression_delay: Duration) -> Self {
        Self {
            phase: TrackerPhase::Uninitialized,
            cached_current: None,
            cached_final: None,
            zero_seen_at: None,
            suppression_delay,
        }
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// Update the zero-suppression window (config hot reload)
    pub fn set_suppression_delay(&mut self, delay: Duration) {
        self.suppression_delay = delay;
    }

    /// Reset to Uninitialized (e.g. when the game id changes)
    pub fn reset(&mut self) {
        debug!("Turn tracker reset");
        *self = Self::new(self.suppression_delay);
    }

    /// Advance the machine by one tick
    ///
    /// Never fails: every miss degrades to the cache or a default.
    pub fn advance(&mut self, sample: TurnSample, now: Instant) -> TurnReadout {
        if self.phase == TrackerPhase::Uninitialized {
            self.phase = TrackerPhase::AwaitingValidScene;
        }

        if self.phase == TrackerPhase::AwaitingValidScene {
            if sample.scene_valid {
                info!("Valid scene observed, tracking turns");
                self.phase = TrackerPhase::Tracking;
            } else {
                return TurnReadout {
                    display: TurnDisplay::AwaitingScene,
                    refresh_stats: false,
                };
            }
        }

        let mut refresh_stats = false;

        if let Some(v) = sample.final_turn
            && v != 0
        {
            self.cached_final = Some(v);
        }
        let last = self.cached_final.unwrap_or(DEFAULT_FINAL_TURN);

        let current = match sample.current {
            Some(TURN_SENTINEL) if self.cached_current != Some(TURN_SENTINEL) => {
                self.cached_current
            }
            Some(0) => match self.cached_current {
                None | Some(0) => Some(0),
                Some(prev) => match self.zero_seen_at {
                    None => {
                        debug!("Turn counter dropped to 0, holding {} for {:?}", prev, self.suppression_delay);
                        self.zero_seen_at = Some(now);
                        Some(prev)
                    }
                    Some(since) if now.duration_since(since) < self.suppression_delay => Some(prev),
                    Some(_) => {
                        info!("Turn reset confirmed, refreshing stat displays");
                        self.cached_current = None;
                        self.zero_seen_at = None;
                        refresh_stats = true;
                        Some(0)
                    }
                },
            },
            Some(v) => {
                self.cached_current = Some(v);
                self.zero_seen_at = None;
                Some(v)
            }
            None => self.cached_current,
        };

        let display = match current {
            Some(current) => TurnDisplay::Turn { current, last },
            None => TurnDisplay::NotDetected,
        };

        TurnReadout {
            display,
            refresh_stats,
        }
    }
}
