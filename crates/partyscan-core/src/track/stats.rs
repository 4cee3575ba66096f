use serde::Serialize;
use tracing::debug;

use crate::catalog::TitleId;
use crate::memory::ReadMemory;
use crate::track::CharacterResolver;

/// One player slot's decoded counters for a single tick
///
/// The optional categories exist only for the titles whose catalog entry
/// carries their addresses; `None` means "not applicable for this title".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerPanel {
    pub slot: usize,
    pub character: String,
    pub coins: u16,
    pub stars: u8,
    pub minigame_stars: u8,
    pub coin_stars: u8,
    pub happening_stars: u8,
    pub running_stars: Option<u8>,
    pub shopping_stars: Option<u8>,
    pub red_stars: Option<u8>,
}

/// Read a byte counter, degrading to 0 for this tick on failure
fn byte_or_zero(reader: &impl ReadMemory, address: u32, context: &str) -> u8 {
    match reader.read_u8(address) {
        Ok(v) => v,
        Err(e) => {
            debug!("Failed to read {}: {}", context, e);
            0
        }
    }
}

/// Read a two-byte counter, degrading to 0 for this tick on failure
fn word_or_zero(reader: &impl ReadMemory, address: u32, context: &str) -> u16 {
    match reader.read_u16(address) {
        Ok(v) => v,
        Err(e) => {
            debug!("Failed to read {}: {}", context, e);
            0
        }
    }
}

/// Decode all four player slots for the given title
///
/// Stateless: recomputed fresh every poll. Unlike the turn counter, these
/// counters get no suppression cache; a transiently stale value is
/// acceptable here, and a failed read shows as 0 for one tick only.
pub fn read_player_panels(
    reader: &impl ReadMemory,
    title: TitleId,
    resolver: &CharacterResolver,
) -> [PlayerPanel; 4] {
    let layout = title.layout();
    let stats = &layout.stats;

    std::array::from_fn(|slot| {
        let code = byte_or_zero(reader, layout.character_addrs[slot], "character code");
        PlayerPanel {
            slot,
            character: resolver.resolve(title, code),
            coins: word_or_zero(reader, stats.coins[slot], "coins"),
            stars: byte_or_zero(reader, stats.stars[slot], "stars"),
            minigame_stars: byte_or_zero(reader, stats.minigame_stars[slot], "minigame stars"),
            coin_stars: byte_or_zero(reader, stats.coin_stars[slot], "coin stars"),
            happening_stars: byte_or_zero(reader, stats.happening_stars[slot], "happening stars"),
            running_stars: stats
                .running_stars
                .map(|addrs| byte_or_zero(reader, addrs[slot], "running stars")),
            shopping_stars: stats
                .shopping_stars
                .map(|addrs| byte_or_zero(reader, addrs[slot], "shopping stars")),
            red_stars: stats
                .red_stars
                .map(|addrs| byte_or_zero(reader, addrs[slot], "red stars")),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemoryBuilder;

    #[test]
    fn test_read_panels_mp4() {
        let layout = TitleId::MarioParty4.layout();
        let reader = MockMemoryBuilder::new()
            .write_u8_at(layout.character_addrs[0], 3) // yoshi
            .write_u16_at(layout.stats.coins[0], 42)
            .write_u8_at(layout.stats.stars[0], 2)
            .write_u8_at(layout.stats.minigame_stars[0], 1)
            .write_u8_at(layout.character_addrs[2], 5) // dk
            .write_u16_at(layout.stats.coins[2], 310)
            .build();

        let resolver = CharacterResolver::new();
        let panels = read_player_panels(&reader, TitleId::MarioParty4, &resolver);

        assert_eq!(panels[0].character, "yoshi");
        assert_eq!(panels[0].coins, 42);
        assert_eq!(panels[0].stars, 2);
        assert_eq!(panels[0].minigame_stars, 1);

        assert_eq!(panels[2].character, "dk");
        assert_eq!(panels[2].coins, 310);

        // Untouched slots decode to mario with zeroed counters
        assert_eq!(panels[1].character, "mario");
        assert_eq!(panels[1].coins, 0);

        // MP4 has no extended bonus categories
        for panel in &panels {
            assert_eq!(panel.running_stars, None);
            assert_eq!(panel.shopping_stars, None);
            assert_eq!(panel.red_stars, None);
        }
    }

    #[test]
    fn test_extended_categories_present_for_mp8() {
        let layout = TitleId::MarioParty8.layout();
        let running = layout.stats.running_stars.unwrap();
        let reader = MockMemoryBuilder::new()
            .write_u8_at(running[1], 4)
            .write_u8_at(layout.stats.red_stars.unwrap()[1], 2)
            .build();

        let resolver = CharacterResolver::new();
        let panels = read_player_panels(&reader, TitleId::MarioParty8, &resolver);

        assert_eq!(panels[1].running_stars, Some(4));
        assert_eq!(panels[1].shopping_stars, Some(0));
        assert_eq!(panels[1].red_stars, Some(2));
    }

    #[test]
    fn test_read_failure_degrades_to_zero() {
        // Empty image: every read misses
        let reader = MockMemoryBuilder::new().build();

        let resolver = CharacterResolver::new();
        let panels = read_player_panels(&reader, TitleId::MarioParty6, &resolver);

        for (slot, panel) in panels.iter().enumerate() {
            assert_eq!(panel.slot, slot);
            assert_eq!(panel.character, "mario");
            assert_eq!(panel.coins, 0);
            assert_eq!(panel.stars, 0);
        }
    }
}
