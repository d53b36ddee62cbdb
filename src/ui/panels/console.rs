// Grazer Launcher - ui/panels/console.rs
//
// Central console view: the running (or last) grazer invocation's output,
// exactly as it arrived on stdout and stderr.
//
// Rows are laid out with `ScrollArea::show_rows`, so only the slice in the
// viewport is rendered and cost stays flat however much the child printed.
// While a run is active the view sticks to the bottom so new lines scroll
// into view as they arrive.
//
// The command echo line is pinned above the scroll area rather than stored
// in the ring, so it survives output that overflows the ring.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the console (echo line + virtual-scrolled output).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    // Header row: title, line count, copy button.
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Console").strong());
        if !state.console.is_empty() {
            ui.label(
                egui::RichText::new(format!("{} lines", state.console.len()))
                    .small()
                    .weak(),
            );
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let has_output = state.command_echo.is_some() || !state.console.is_empty();
            if ui
                .add_enabled(has_output, egui::Button::new(egui::RichText::new("Copy").small()).small())
                .on_hover_text("Copy the console contents to the clipboard")
                .clicked()
            {
                let mut text = String::new();
                if let Some(ref echo) = state.command_echo {
                    text.push_str(echo);
                    text.push('\n');
                }
                for line in &state.console {
                    text.push_str(&line.text);
                    text.push('\n');
                }
                let n = state.console.len();
                ui.ctx().copy_text(text);
                state.status_message = format!("Copied {n} console lines to clipboard.");
            }
        });
    });

    // Pinned command echo.
    if let Some(ref echo) = state.command_echo {
        ui.label(
            egui::RichText::new(format!("$ {echo}"))
                .monospace()
                .color(theme::ECHO_TEXT),
        );
    }

    // Ring overflow notice.
    if state.dropped_console_lines > 0 {
        ui.label(
            egui::RichText::new(format!(
                "({} earlier line{} dropped from the view; the results capture is unaffected)",
                state.dropped_console_lines,
                if state.dropped_console_lines == 1 { "" } else { "s" }
            ))
            .small()
            .color(theme::WARN_TEXT),
        );
    }

    ui.add_space(2.0);

    if state.console.is_empty() {
        if state.command_echo.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new(
                        "No output yet. Choose a directory and press Start.",
                    )
                    .weak(),
                );
            });
        }
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("console_output")
        .auto_shrink([false; 2])
        .stick_to_bottom(state.run_in_progress)
        .show_rows(ui, theme::ROW_HEIGHT, state.console.len(), |ui, row_range| {
            for idx in row_range {
                let Some(line) = state.console.get(idx) else {
                    continue;
                };
                ui.horizontal(|ui| {
                    // Stream gutter: dim for stdout, red for stderr.
                    ui.label(
                        egui::RichText::new(line.source.short_label())
                            .monospace()
                            .small()
                            .color(theme::stream_colour(line.source))
                            .weak(),
                    );
                    ui.label(
                        egui::RichText::new(line.text.as_str())
                            .monospace()
                            .color(theme::stream_colour(line.source)),
                    );
                });
            }
        });
}
