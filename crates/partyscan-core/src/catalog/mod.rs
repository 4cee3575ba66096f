//! Per-title address catalog.
//!
//! Pure data: where each tracked field lives in the emulated RAM of each
//! supported title, which scene ids count as "on the board", and the
//! character code tables. No logic beyond lookups lives here.

mod layout;
mod titles;

pub use layout::{StatAddrs, TitleLayout};
pub use titles::TitleId;

/// Emulated address of the 6-character game id.
pub const GAME_ID_ADDR: u32 = 0x8000_0000;

/// Length of the game id token.
pub const GAME_ID_LEN: usize = 6;

/// Final-turn value assumed when nothing has been read yet.
pub const DEFAULT_FINAL_TURN: u8 = 20;
