//! Main tracking mode command.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use partyscan_core::memory::{WINDOW_TITLE_HINTS, emulator_window_present};
use partyscan_core::{DolphinHandle, Scanner};
use tracing::{debug, error, info};

const RECONNECT_WAIT: Duration = Duration::from_secs(5);

/// Run the main tracking mode
///
/// Waits for a Dolphin process, hooks its emulated RAM, and runs the scan
/// loop until the process goes away or Ctrl+C is pressed. Detaches and
/// re-hooks across game restarts.
pub fn run(config_path: &Path) -> Result<()> {
    let shutdown = setup_shutdown_handler()?;

    let mut scanner = Scanner::new(super::load_config(config_path));
    scanner.watch_config(config_path);

    println!("partyscan v{}", env!("CARGO_PKG_VERSION"));
    println!("Waiting for Dolphin... (Ctrl+C to quit)");

    while !shutdown.load(Ordering::SeqCst) {
        if emulator_window_present(WINDOW_TITLE_HINTS) {
            match DolphinHandle::find_and_hook() {
                Ok(process) => {
                    info!("Hooked Dolphin (pid {})", process.pid);

                    if let Err(e) = scanner.run(&process, &shutdown) {
                        error!("Scan loop error: {}", e);
                    }

                    if !shutdown.load(Ordering::SeqCst) {
                        println!("Waiting for Dolphin...");
                    }
                }
                Err(e) => {
                    // Window is up but the RAM mapping is not; a game is
                    // probably still booting
                    debug!("Hook attempt failed: {}", e);
                }
            }
        }

        wait_interruptible(&shutdown, RECONNECT_WAIT);
    }

    println!("Shutdown complete.");
    Ok(())
}

fn setup_shutdown_handler() -> Result<Arc<AtomicBool>> {
    let shutdown = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("Shutdown requested");
        flag.store(true, Ordering::SeqCst);
    })?;

    Ok(shutdown)
}

/// Sleep in short slices so Ctrl+C is honored promptly
fn wait_interruptible(shutdown: &AtomicBool, total: Duration) {
    let slice = Duration::from_millis(100);
    let mut waited = Duration::ZERO;
    while waited < total && !shutdown.load(Ordering::SeqCst) {
        thread::sleep(slice);
        waited += slice;
    }
}
