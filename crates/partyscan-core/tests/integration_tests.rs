//! Integration tests for partyscan-core
//!
//! These drive the full scan pipeline against mock memory images. Narrower
//! reconciliation cases live in unit tests within the crate.

use std::path::Path;
use std::time::{Duration, Instant};

use partyscan_core::{
    Config, FrameStatus, GAME_ID_ADDR, MockMemoryBuilder, MockMemoryReader, Scanner, TitleId,
};

fn test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.overlay.output_dir = dir.to_string_lossy().into_owned();
    config.overlay.zero_suppression_delay_ms = 50;
    config
}

/// A Mario Party 4 board mid-game: valid scene, four players seated
fn mp4_board_image(turn: u8, final_turn: u8) -> MockMemoryReader {
    let layout = TitleId::MarioParty4.layout();
    MockMemoryBuilder::new()
        .write_ascii_at(GAME_ID_ADDR, "GMPE01")
        .write_u8_at(layout.scene_addr, 89)
        .write_u8_at(layout.turn_addr, turn)
        .write_u8_at(layout.final_turn_addr, final_turn)
        .write_u8_at(layout.character_addrs[0], 0) // mario
        .write_u8_at(layout.character_addrs[1], 3) // yoshi
        .write_u8_at(layout.character_addrs[2], 5) // dk
        .write_u8_at(layout.character_addrs[3], 7) // waluigi
        .write_u16_at(layout.stats.coins[1], 37)
        .write_u8_at(layout.stats.stars[1], 2)
        .build()
}

mod scanner_tests {
    use super::*;

    #[test]
    fn test_detected_board_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut scanner = Scanner::new(test_config(dir.path()));
        let reader = mp4_board_image(7, 20);

        let frame = scanner.tick(&reader, Instant::now());

        match frame.status {
            FrameStatus::Detected {
                title,
                current_turn,
                final_turn,
                panels,
            } => {
                assert_eq!(title, TitleId::MarioParty4);
                assert_eq!(current_turn, 7);
                assert_eq!(final_turn, 20);
                assert_eq!(panels.len(), 4);
                assert_eq!(panels[1].character, "yoshi");
                assert_eq!(panels[1].coins, 37);
                assert_eq!(panels[1].stars, 2);
                assert_eq!(panels[3].character, "waluigi");
            }
            other => panic!("expected Detected, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_game_id_yields_no_panels() {
        let dir = tempfile::tempdir().unwrap();
        let mut scanner = Scanner::new(test_config(dir.path()));

        // Smash Bros is not in the catalog
        let reader = MockMemoryBuilder::new()
            .write_ascii_at(GAME_ID_ADDR, "GALE01")
            .build();

        let frame = scanner.tick(&reader, Instant::now());
        assert_eq!(frame.status, FrameStatus::GameNotDetected);
    }

    #[test]
    fn test_unreadable_game_id_yields_game_not_detected() {
        let dir = tempfile::tempdir().unwrap();
        let mut scanner = Scanner::new(test_config(dir.path()));

        // Empty image: the game id read itself fails
        let reader = MockMemoryBuilder::new().build();

        let frame = scanner.tick(&reader, Instant::now());
        assert_eq!(frame.status, FrameStatus::GameNotDetected);
    }

    #[test]
    fn test_menu_scene_gates_until_board_loads() {
        let dir = tempfile::tempdir().unwrap();
        let mut scanner = Scanner::new(test_config(dir.path()));
        let layout = TitleId::MarioParty4.layout();

        let mut reader = mp4_board_image(7, 20);
        reader.poke(layout.scene_addr, 1); // main menu

        let frame = scanner.tick(&reader, Instant::now());
        assert_eq!(
            frame.status,
            FrameStatus::SceneNotValid {
                title: TitleId::MarioParty4
            }
        );

        // Board loads: tracking starts
        reader.poke(layout.scene_addr, 90);
        let frame = scanner.tick(&reader, Instant::now());
        assert!(matches!(frame.status, FrameStatus::Detected { .. }));
    }

    #[test]
    fn test_minigame_does_not_regate() {
        let dir = tempfile::tempdir().unwrap();
        let mut scanner = Scanner::new(test_config(dir.path()));
        let layout = TitleId::MarioParty4.layout();

        let mut reader = mp4_board_image(7, 20);
        scanner.tick(&reader, Instant::now());

        // Mid-turn minigame: scene leaves the valid set
        reader.poke(layout.scene_addr, 2);
        let frame = scanner.tick(&reader, Instant::now());

        match frame.status {
            FrameStatus::Detected { current_turn, .. } => assert_eq!(current_turn, 7),
            other => panic!("expected cached Detected, got {:?}", other),
        }
    }

    #[test]
    fn test_sentinel_suppressed_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut scanner = Scanner::new(test_config(dir.path()));
        let layout = TitleId::MarioParty4.layout();

        let mut reader = mp4_board_image(12, 20);
        scanner.tick(&reader, Instant::now());

        reader.poke(layout.turn_addr, 255);
        let frame = scanner.tick(&reader, Instant::now());

        match frame.status {
            FrameStatus::Detected { current_turn, .. } => assert_eq!(current_turn, 12),
            other => panic!("expected Detected, got {:?}", other),
        }
    }

    #[test]
    fn test_turn_reset_held_then_stats_refreshed_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut scanner = Scanner::new(test_config(dir.path()));
        let layout = TitleId::MarioParty4.layout();
        let delay = Duration::from_millis(50);

        let mut reader = mp4_board_image(12, 20);
        let t0 = Instant::now();
        scanner.tick(&reader, t0);

        reader.poke(layout.turn_addr, 0);

        let frame = scanner.tick(&reader, t0);
        match frame.status {
            FrameStatus::Detected { current_turn, .. } => assert_eq!(current_turn, 12),
            other => panic!("expected held Detected, got {:?}", other),
        }
        assert!(!frame.stats_refreshed);

        let frame = scanner.tick(&reader, t0 + delay * 2);
        match frame.status {
            FrameStatus::Detected { current_turn, .. } => assert_eq!(current_turn, 0),
            other => panic!("expected reset Detected, got {:?}", other),
        }
        assert!(frame.stats_refreshed);

        let frame = scanner.tick(&reader, t0 + delay * 3);
        assert!(!frame.stats_refreshed);
    }

    #[test]
    fn test_title_switch_resets_tracking() {
        let dir = tempfile::tempdir().unwrap();
        let mut scanner = Scanner::new(test_config(dir.path()));

        scanner.tick(&mp4_board_image(7, 20), Instant::now());

        // Player switches to MP5, still on a menu
        let mp5 = TitleId::MarioParty5.layout();
        let reader = MockMemoryBuilder::new()
            .write_ascii_at(GAME_ID_ADDR, "GP5E01")
            .write_u8_at(mp5.scene_addr, 1)
            .build();

        let frame = scanner.tick(&reader, Instant::now());
        assert_eq!(
            frame.status,
            FrameStatus::SceneNotValid {
                title: TitleId::MarioParty5
            }
        );
    }
}

mod status_file_tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_turn_file_written_each_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut scanner = Scanner::new(test_config(dir.path()));

        scanner.tick(&mp4_board_image(7, 20), Instant::now());
        assert_eq!(
            fs::read_to_string(dir.path().join("turn.txt")).unwrap(),
            "Turn: 7 / 20"
        );

        let empty = MockMemoryBuilder::new().build();
        scanner.tick(&empty, Instant::now());
        assert_eq!(
            fs::read_to_string(dir.path().join("turn.txt")).unwrap(),
            "Game not detected"
        );
    }

    #[test]
    fn test_frame_json_written_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.overlay.write_frame_json = true;
        let mut scanner = Scanner::new(config);

        scanner.tick(&mp4_board_image(3, 25), Instant::now());

        let json = fs::read_to_string(dir.path().join("frame.json")).unwrap();
        assert!(json.contains("\"current_turn\": 3"));
        assert!(json.contains("yoshi"));
    }
}

mod name_override_tests {
    use super::*;

    #[test]
    fn test_overrides_applied_to_panels() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config
            .names
            .insert("yoshi".to_string(), "Green Machine".to_string());
        config.names.insert("dk".to_string(), "   ".to_string());
        let mut scanner = Scanner::new(config);

        let frame = scanner.tick(&mp4_board_image(1, 20), Instant::now());

        match frame.status {
            FrameStatus::Detected { panels, .. } => {
                assert_eq!(panels[1].character, "Green Machine");
                // Blank override ignored
                assert_eq!(panels[2].character, "dk");
            }
            other => panic!("expected Detected, got {:?}", other),
        }
    }
}
