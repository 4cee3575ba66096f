//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::scanner::{FrameStatus, OverlayFrame};
use crate::track::PlayerPanel;

/// Format a frame for console display with colored output
///
/// Returns a multi-line string with a boxed format for a detected board,
/// or a single status line otherwise.
pub fn format_frame_console(frame: &OverlayFrame) -> String {
    let mut output = String::new();

    match &frame.status {
        FrameStatus::Detected {
            title,
            current_turn,
            final_turn,
            panels,
        } => {
            let border: String = "━".repeat(58);
            let border_dim = border.dimmed();

            let _ = writeln!(output, "{}", border_dim);
            let _ = writeln!(
                output,
                "  {}   Turn {} / {}",
                title.bold(),
                current_turn.green(),
                final_turn
            );
            let _ = writeln!(output, "{}", border_dim);
            for panel in panels {
                let _ = writeln!(output, "{}", format_panel_line(panel));
            }
            let _ = writeln!(output, "{}", border_dim);
        }
        status => {
            let _ = writeln!(output, "  {}", status.status_line().dimmed());
        }
    }

    output
}

fn format_panel_line(panel: &PlayerPanel) -> String {
    let mut line = format!(
        "  P{} {:<12} COINS {:>3}  STARS {:>2}  MG {}  CS {}  HS {}",
        panel.slot + 1,
        panel.character,
        panel.coins.yellow(),
        panel.stars.cyan(),
        panel.minigame_stars,
        panel.coin_stars,
        panel.happening_stars,
    );

    if let Some(v) = panel.running_stars {
        let _ = write!(line, "  RUN {}", v);
    }
    if let Some(v) = panel.shopping_stars {
        let _ = write!(line, "  SHOP {}", v);
    }
    if let Some(v) = panel.red_stars {
        let _ = write!(line, "  RED {}", v);
    }

    line
}
