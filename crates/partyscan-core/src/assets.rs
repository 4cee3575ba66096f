//! Asset path resolution.
//!
//! Overlay images live under the assets directory, grouped by game id, and
//! are addressed by canonical character or stat name. A missing file is
//! "no image", never an error.

use std::path::{Path, PathBuf};

use crate::catalog::TitleId;

/// Resolve the icon for a character, if present
pub fn character_icon(assets_dir: &Path, title: TitleId, canonical: &str) -> Option<PathBuf> {
    resolve(assets_dir.join(title.game_id()).join(format!("{canonical}.png")))
}

/// Resolve the icon for a stat counter, if present
///
/// Stat icons are shared across titles.
pub fn stat_icon(assets_dir: &Path, name: &str) -> Option<PathBuf> {
    resolve(assets_dir.join(format!("{name}.png")))
}

fn resolve(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}
