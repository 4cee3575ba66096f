use serde::Serialize;
use strum::{Display, EnumIter};

use super::layout::{StatAddrs, TitleLayout, slots};

/// The supported titles
///
/// One variant per known game id; everything downstream branches on this
/// enum instead of the raw id string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
pub enum TitleId {
    #[strum(serialize = "Mario Party 4")]
    MarioParty4,
    #[strum(serialize = "Mario Party 5")]
    MarioParty5,
    #[strum(serialize = "Mario Party 6")]
    MarioParty6,
    #[strum(serialize = "Mario Party 7")]
    MarioParty7,
    #[strum(serialize = "Mario Party 8")]
    MarioParty8,
}

impl TitleId {
    /// Look up a title by its 6-character game id
    ///
    /// Unknown ids return `None`; the caller treats that as "nothing to
    /// display", never as an error.
    pub fn from_game_id(id: &str) -> Option<Self> {
        match id {
            "GMPE01" => Some(Self::MarioParty4),
            "GP5E01" => Some(Self::MarioParty5),
            "GP6E01" => Some(Self::MarioParty6),
            "GP7E01" => Some(Self::MarioParty7),
            "RM8E01" => Some(Self::MarioParty8),
            _ => None,
        }
    }

    pub fn game_id(&self) -> &'static str {
        match self {
            Self::MarioParty4 => "GMPE01",
            Self::MarioParty5 => "GP5E01",
            Self::MarioParty6 => "GP6E01",
            Self::MarioParty7 => "GP7E01",
            Self::MarioParty8 => "RM8E01",
        }
    }

    pub fn layout(&self) -> &'static TitleLayout {
        match self {
            Self::MarioParty4 => &MP4_LAYOUT,
            Self::MarioParty5 => &MP5_LAYOUT,
            Self::MarioParty6 => &MP6_LAYOUT,
            Self::MarioParty7 => &MP7_LAYOUT,
            Self::MarioParty8 => &MP8_LAYOUT,
        }
    }

    /// Map a raw character code to its canonical name
    ///
    /// Unknown codes fall back to "mario": a transient garbage read must not
    /// take the display down.
    pub fn character_name(&self, code: u8) -> &'static str {
        let name = match self {
            Self::MarioParty4 => MP4_CHARACTERS.get(code as usize),
            Self::MarioParty5 => MP5_CHARACTERS.get(code as usize),
            Self::MarioParty6 => MP6_CHARACTERS.get(code as usize),
            Self::MarioParty7 => MP7_CHARACTERS.get(code as usize),
            Self::MarioParty8 => MP8_CHARACTERS.get(code as usize),
        };
        name.copied().unwrap_or(FALLBACK_CHARACTER)
    }
}

/// Canonical name used when a character code is unknown.
pub const FALLBACK_CHARACTER: &str = "mario";

const MP4_CHARACTERS: &[&str] = &[
    "mario", "luigi", "peach", "yoshi", "wario", "dk", "daisy", "waluigi",
];

const MP5_CHARACTERS: &[&str] = &[
    "mario", "luigi", "peach", "yoshi", "wario", "daisy", "waluigi", "toad", "boo", "koopakid",
];

const MP6_CHARACTERS: &[&str] = &[
    "mario", "luigi", "peach", "yoshi", "wario", "daisy", "waluigi", "toad", "boo", "koopakid",
    "toadette",
];

const MP7_CHARACTERS: &[&str] = &[
    "mario", "luigi", "peach", "yoshi", "wario", "daisy", "waluigi", "toad", "boo", "koopakid",
    "toadette", "birdo", "drybones",
];

const MP8_CHARACTERS: &[&str] = &[
    "mario", "luigi", "peach", "yoshi", "wario", "daisy", "waluigi", "toad", "boo", "toadette",
    "birdo", "drybones", "hammerbro", "blooper",
];

// Player state blocks sit directly before the turn counter pair in every
// title: four 0x30-byte blocks, then the current/final turn bytes.
// Field offsets within a block: character 0x00, coins 0x02 (u16),
// stars 0x04, then the bonus-star tallies from 0x08.

const fn stat_addrs(block_base: u32, with_extras: bool) -> StatAddrs {
    const STRIDE: u32 = 0x30;
    StatAddrs {
        coins: slots(block_base + 0x02, STRIDE),
        stars: slots(block_base + 0x04, STRIDE),
        minigame_stars: slots(block_base + 0x08, STRIDE),
        coin_stars: slots(block_base + 0x09, STRIDE),
        happening_stars: slots(block_base + 0x0A, STRIDE),
        running_stars: if with_extras {
            Some(slots(block_base + 0x0B, STRIDE))
        } else {
            None
        },
        shopping_stars: if with_extras {
            Some(slots(block_base + 0x0C, STRIDE))
        } else {
            None
        },
        red_stars: if with_extras {
            Some(slots(block_base + 0x0D, STRIDE))
        } else {
            None
        },
    }
}

static MP4_LAYOUT: TitleLayout = TitleLayout {
    turn_addr: 0x8018_FCFC,
    final_turn_addr: 0x8018_FCFD,
    scene_addr: 0x801D_3CE3,
    valid_scenes: &[89, 90, 91, 92, 93, 94],
    character_addrs: slots(0x8018_FC3C, 0x30),
    stats: stat_addrs(0x8018_FC3C, false),
};

static MP5_LAYOUT: TitleLayout = TitleLayout {
    turn_addr: 0x8022_A494,
    final_turn_addr: 0x8022_A495,
    scene_addr: 0x8028_8863,
    valid_scenes: &[118, 120, 122, 124, 126, 128, 130],
    character_addrs: slots(0x8022_A3D4, 0x30),
    stats: stat_addrs(0x8022_A3D4, false),
};

static MP6_LAYOUT: TitleLayout = TitleLayout {
    turn_addr: 0x8026_5B74,
    final_turn_addr: 0x8026_5B75,
    scene_addr: 0x802C_0257,
    valid_scenes: &[123, 124, 125, 126, 127, 128],
    character_addrs: slots(0x8026_5AB4, 0x30),
    stats: stat_addrs(0x8026_5AB4, false),
};

static MP7_LAYOUT: TitleLayout = TitleLayout {
    turn_addr: 0x8029_151C,
    final_turn_addr: 0x8029_151D,
    scene_addr: 0x802F_2F3F,
    valid_scenes: &[122, 123, 124, 125, 126, 127],
    character_addrs: slots(0x8029_145C, 0x30),
    stats: stat_addrs(0x8029_145C, true),
};

static MP8_LAYOUT: TitleLayout = TitleLayout {
    turn_addr: 0x8022_8764,
    final_turn_addr: 0x8022_8765,
    scene_addr: 0x802C_D223,
    valid_scenes: &[16, 17, 18, 19, 20, 21],
    character_addrs: slots(0x8022_86A4, 0x30),
    stats: stat_addrs(0x8022_86A4, true),
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_from_game_id() {
        assert_eq!(TitleId::from_game_id("GMPE01"), Some(TitleId::MarioParty4));
        assert_eq!(TitleId::from_game_id("GP5E01"), Some(TitleId::MarioParty5));
        assert_eq!(TitleId::from_game_id("GP6E01"), Some(TitleId::MarioParty6));
        assert_eq!(TitleId::from_game_id("GP7E01"), Some(TitleId::MarioParty7));
        assert_eq!(TitleId::from_game_id("RM8E01"), Some(TitleId::MarioParty8));
    }

    #[test]
    fn test_unknown_game_id_is_none() {
        assert_eq!(TitleId::from_game_id("GALE01"), None);
        assert_eq!(TitleId::from_game_id(""), None);
        assert_eq!(TitleId::from_game_id("gmpe01"), None);
    }

    #[test]
    fn test_game_id_round_trip() {
        for title in TitleId::iter() {
            assert_eq!(TitleId::from_game_id(title.game_id()), Some(title));
        }
    }

    #[test]
    fn test_final_turn_follows_turn() {
        for title in TitleId::iter() {
            let layout = title.layout();
            assert_eq!(layout.final_turn_addr, layout.turn_addr + 1);
            assert!(!layout.valid_scenes.is_empty());
        }
    }

    #[test]
    fn test_scene_gate_membership() {
        let layout = TitleId::MarioParty4.layout();
        assert!(layout.is_valid_scene(89));
        assert!(layout.is_valid_scene(94));
        assert!(!layout.is_valid_scene(88));
        assert!(!layout.is_valid_scene(0));
    }

    #[test]
    fn test_character_fallback() {
        assert_eq!(TitleId::MarioParty4.character_name(0), "mario");
        assert_eq!(TitleId::MarioParty4.character_name(5), "dk");
        assert_eq!(TitleId::MarioParty4.character_name(200), "mario");
        assert_eq!(TitleId::MarioParty8.character_name(13), "blooper");
        assert_eq!(TitleId::MarioParty8.character_name(14), "mario");
    }

    #[test]
    fn test_extras_only_on_recent_titles() {
        assert!(TitleId::MarioParty4.layout().stats.running_stars.is_none());
        assert!(TitleId::MarioParty5.layout().stats.red_stars.is_none());
        assert!(TitleId::MarioParty7.layout().stats.running_stars.is_some());
        assert!(TitleId::MarioParty8.layout().stats.shopping_stars.is_some());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(TitleId::MarioParty4.to_string(), "Mario Party 4");
        assert_eq!(TitleId::MarioParty8.to_string(), "Mario Party 8");
    }
}
