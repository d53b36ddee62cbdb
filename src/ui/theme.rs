// Grazer Launcher - ui/theme.rs
//
// Shared palette and layout numbers for the panels: stream and status
// colour mappings, text accents, and pane sizing. Knows nothing about
// app state.

use crate::core::model::{RunStatus, StreamSource};
use egui::Color32;

/// Console text colour for a given child stream.
pub fn stream_colour(source: StreamSource) -> Color32 {
    match source {
        StreamSource::Stdout => Color32::from_rgb(209, 213, 219), // Gray 300
        StreamSource::Stderr => Color32::from_rgb(248, 113, 113), // Red 400
    }
}

/// Colour for a run status badge or history cell.
pub fn status_colour(status: &RunStatus) -> Color32 {
    match status {
        RunStatus::Success => Color32::from_rgb(34, 197, 94),  // Green 500
        RunStatus::ExitCode(_) => Color32::from_rgb(220, 38, 38), // Red 600
        RunStatus::Terminated => Color32::from_rgb(217, 119, 6), // Amber 600
    }
}

/// Colour for the command echo line at the top of a run's console output.
pub const ECHO_TEXT: Color32 = Color32::from_rgb(96, 165, 250); // Blue 400

/// Accents for inline status text.
pub const OK_TEXT: Color32 = Color32::from_rgb(74, 222, 128); // Green 400
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400
pub const WARN_TEXT: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600
pub const MUTED_TEXT: Color32 = Color32::from_rgb(156, 163, 175); // Gray 400
pub const DISABLED_TEXT: Color32 = Color32::from_rgb(107, 114, 128); // Gray 500

/// Status bar colours.
pub const STATUS_BG: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Badge colours shown in the status bar while a run is active.
pub const RUNNING_BADGE: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600
pub const RUNNING_BADGE_BG: Color32 = Color32::from_rgba_premultiplied(217, 119, 6, 30);

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 300.0;
pub const RESULTS_PANE_HEIGHT: f32 = 220.0;
pub const ROW_HEIGHT: f32 = 20.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
