//! Status file output for external overlays and streaming tools.

mod console;

pub use console::format_frame_console;

use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::scanner::OverlayFrame;

/// Writes the per-tick status files
///
/// `turn.txt` always carries a single human-readable line; `frame.json`
/// (optional) carries the whole frame for richer consumers.
pub struct StatusWriter {
    base_dir: PathBuf,
    write_frame_json: bool,
}

impl StatusWriter {
    pub fn new<P: Into<PathBuf>>(base_dir: P, write_frame_json: bool) -> Self {
        Self {
            base_dir: base_dir.into(),
            write_frame_json,
        }
    }

    /// Write the status files for one frame
    pub fn write_frame(&self, frame: &OverlayFrame) -> Result<()> {
        self.write_file("turn.txt", &frame.status.status_line())?;

        if self.write_frame_json {
            let json = serde_json::to_string_pretty(frame)?;
            self.write_file("frame.json", &json)?;
        }

        Ok(())
    }

    fn write_file(&self, filename: &str, content: &str) -> Result<()> {
        fs::write(self.base_dir.join(filename), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TitleId;
    use crate::scanner::FrameStatus;
    use chrono::Utc;

    fn frame(status: FrameStatus) -> OverlayFrame {
        OverlayFrame {
            captured_at: Utc::now(),
            status,
            stats_refreshed: false,
        }
    }

    #[test]
    fn test_writes_turn_line() {
        let dir = tempfile::tempdir().unwrap();
        let writer = StatusWriter::new(dir.path(), false);

        writer
            .write_frame(&frame(FrameStatus::Detected {
                title: TitleId::MarioParty4,
                current_turn: 7,
                final_turn: 20,
                panels: Vec::new(),
            }))
            .unwrap();

        let content = fs::read_to_string(dir.path().join("turn.txt")).unwrap();
        assert_eq!(content, "Turn: 7 / 20");
        assert!(!dir.path().join("frame.json").exists());
    }

    #[test]
    fn test_writes_degraded_status() {
        let dir = tempfile::tempdir().unwrap();
        let writer = StatusWriter::new(dir.path(), false);

        writer.write_frame(&frame(FrameStatus::GameNotDetected)).unwrap();

        let content = fs::read_to_string(dir.path().join("turn.txt")).unwrap();
        assert_eq!(content, "Game not detected");
    }

    #[test]
    fn test_writes_frame_json_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let writer = StatusWriter::new(dir.path(), true);

        writer
            .write_frame(&frame(FrameStatus::SceneNotValid {
                title: TitleId::MarioParty6,
            }))
            .unwrap();

        let json = fs::read_to_string(dir.path().join("frame.json")).unwrap();
        assert!(json.contains("scene_not_valid"));
        assert!(json.contains("MarioParty6"));
    }
}
