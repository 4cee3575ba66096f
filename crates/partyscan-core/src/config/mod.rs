//! Configuration.
//!
//! A single TOML file holds the polling knobs, the layout sizing parameters
//! consumed by the presentation side, and the per-character display-name
//! overrides. The file is optional (defaults apply) and is hot-reloaded by
//! polling its modification time from the tick loop.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub overlay: OverlayConfig,
    pub layout: LayoutConfig,
    /// Canonical character name -> display name override
    pub names: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Poll interval for the scan loop
    pub poll_interval_ms: u64,
    /// How long a reset-to-zero turn read is held back before it is believed.
    /// Tuned to the turn-change animation; a product knob, not an invariant.
    pub zero_suppression_delay_ms: u64,
    /// Also write the full frame as frame.json next to the status file
    pub write_frame_json: bool,
    /// Directory the status files are written into
    pub output_dir: String,
    /// Directory the per-title image assets are resolved against
    pub assets_dir: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            zero_suppression_delay_ms: 3500,
            write_frame_json: false,
            output_dir: ".".to_string(),
            assets_dir: "assets".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub icon_size: u32,
    pub name_font_size: u32,
    pub stat_font_size: u32,
    pub background_color: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            icon_size: 64,
            name_font_size: 24,
            stat_font_size: 18,
            background_color: "#1A1A1A".to_string(),
            window_width: 1330,
            window_height: 780,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.overlay.poll_interval_ms)
    }

    pub fn zero_suppression_delay(&self) -> Duration {
        Duration::from_millis(self.overlay.zero_suppression_delay_ms)
    }
}

/// Watches the config file for changes by polling its mtime
///
/// Called once per tick from the scan loop; a missing file is fine and just
/// means defaults stay in effect.
pub struct ConfigWatcher {
    path: PathBuf,
    last_modified: Option<SystemTime>,
}

impl ConfigWatcher {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let last_modified = mtime(&path);
        Self {
            path,
            last_modified,
        }
    }

    /// Return the freshly loaded config if the file changed since last poll
    pub fn poll(&mut self) -> Option<Config> {
        let current = mtime(&self.path);
        if current == self.last_modified {
            return None;
        }
        self.last_modified = current;

        match Config::load(&self.path) {
            Ok(config) => {
                info!("Reloaded config from {:?}", self.path);
                Some(config)
            }
            Err(e) => {
                warn!("Failed to reload config from {:?}: {}", self.path, e);
                None
            }
        }
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
