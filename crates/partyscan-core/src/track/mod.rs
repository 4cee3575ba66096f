//! State reconciliation: the turn tracker, the player stat reader, and the
//! character identity resolver.

mod character;
mod stats;
mod turn;

pub use character::CharacterResolver;
pub use stats::{PlayerPanel, read_player_panels};
pub use turn::{TURN_SENTINEL, TrackerPhase, TurnDisplay, TurnReadout, TurnSample, TurnTracker};
