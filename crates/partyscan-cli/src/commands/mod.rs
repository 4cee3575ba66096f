pub mod run;
pub mod status;
pub mod titles;

use std::path::Path;

use partyscan_core::Config;
use tracing::{info, warn};

/// Load the config file, falling back to defaults when it is missing or
/// malformed
pub fn load_config(path: &Path) -> Config {
    match Config::load(path) {
        Ok(c) => {
            info!("Loaded config from {:?}", path);
            c
        }
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    }
}
