//! List the titles in the address catalog.

use anyhow::Result;
use partyscan_core::TitleId;
use partyscan_core::catalog::DEFAULT_FINAL_TURN;
use strum::IntoEnumIterator;

pub fn run() -> Result<()> {
    println!(
        "{:<8} {:<16} {:<12} {}",
        "GAME ID", "TITLE", "FINAL TURN", "BOARD SCENES"
    );

    for title in TitleId::iter() {
        let layout = title.layout();
        let scenes: Vec<String> = layout
            .valid_scenes
            .iter()
            .map(|s| s.to_string())
            .collect();
        println!(
            "{:<8} {:<16} {:<12} {}",
            title.game_id(),
            title.to_string(),
            DEFAULT_FINAL_TURN,
            scenes.join(", ")
        );
    }

    Ok(())
}
