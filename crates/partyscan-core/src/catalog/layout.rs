/// Memory layout descriptor for one title
///
/// All addresses are emulated (`0x8000_0000`-based). Slot arrays are indexed
/// by player slot 0-3.
#[derive(Debug, Clone, Copy)]
pub struct TitleLayout {
    /// Current-turn counter (one byte)
    pub turn_addr: u32,
    /// Final-turn counter (one byte, directly after the current turn)
    pub final_turn_addr: u32,
    /// Scene id (one byte)
    pub scene_addr: u32,
    /// Scene ids during which turn and score data is meaningful
    pub valid_scenes: &'static [u8],
    /// Per-slot character code (one byte each)
    pub character_addrs: [u32; 4],
    /// Per-slot counter addresses
    pub stats: StatAddrs,
}

impl TitleLayout {
    pub fn is_valid_scene(&self, scene: u8) -> bool {
        self.valid_scenes.contains(&scene)
    }
}

/// Per-slot addresses for the tracked counters
///
/// Coins are two bytes (big-endian); every star counter is one byte. The
/// optional categories exist only in the titles that have those bonus stars;
/// `None` means "not applicable", not an error.
#[derive(Debug, Clone, Copy)]
pub struct StatAddrs {
    pub coins: [u32; 4],
    pub stars: [u32; 4],
    pub minigame_stars: [u32; 4],
    pub coin_stars: [u32; 4],
    pub happening_stars: [u32; 4],
    pub running_stars: Option<[u32; 4]>,
    pub shopping_stars: Option<[u32; 4]>,
    pub red_stars: Option<[u32; 4]>,
}

/// Expand a per-slot field into the four slot addresses
pub(crate) const fn slots(base: u32, stride: u32) -> [u32; 4] {
    [base, base + stride, base + 2 * stride, base + 3 * stride]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_expansion() {
        assert_eq!(
            slots(0x8018_FC3C, 0x30),
            [0x8018_FC3C, 0x8018_FC6C, 0x8018_FC9C, 0x8018_FCCC]
        );
    }
}
