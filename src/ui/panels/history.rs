// Grazer Launcher - ui/panels/history.rs
//
// Run history modal window.
// Shows the recorded runs (newest first) with their command, directory,
// duration and exit status. History persists in the session file.

use crate::app::state::AppState;
use crate::ui::theme;
use chrono::Local;

/// Render the run history dialog (if `state.show_history` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_history {
        return;
    }

    let mut open = true;
    let mut clear_clicked = false;
    egui::Window::new("Run History")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(520.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if state.history.is_empty() {
                ui.label("No runs recorded yet.");
            } else {
                egui::ScrollArea::vertical()
                    .id_salt("history_rows")
                    .max_height(320.0)
                    .show(ui, |ui| {
                        egui::Grid::new("history_table")
                            .num_columns(6)
                            .striped(true)
                            .spacing([12.0, 3.0])
                            .show(ui, |ui| {
                                // Header row
                                ui.strong("Started");
                                ui.strong("Command");
                                ui.strong("Directory");
                                ui.strong("Duration");
                                ui.strong("Status");
                                ui.strong("Data");
                                ui.end_row();

                                for record in &state.history {
                                    let started = record
                                        .started
                                        .with_timezone(&Local)
                                        .format("%Y-%m-%d %H:%M:%S")
                                        .to_string();
                                    ui.label(
                                        egui::RichText::new(started).monospace().size(11.5),
                                    );
                                    ui.label(
                                        egui::RichText::new(record.command.as_str())
                                            .monospace()
                                            .size(11.5),
                                    );

                                    let dir_name = record
                                        .directory
                                        .file_name()
                                        .and_then(|n| n.to_str())
                                        .unwrap_or("?");
                                    ui.label(egui::RichText::new(dir_name).size(11.5))
                                        .on_hover_text(record.directory.display().to_string());

                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{:.1}s",
                                            record.duration.as_secs_f64()
                                        ))
                                        .size(11.5),
                                    );
                                    ui.colored_label(
                                        theme::status_colour(&record.status),
                                        record.status.to_string(),
                                    );
                                    if record.had_csv_block {
                                        ui.label("\u{2713}");
                                    } else {
                                        ui.label("");
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            }

            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                if !state.history.is_empty()
                    && ui
                        .add(
                            egui::Button::new(
                                egui::RichText::new("Clear History")
                                    .small()
                                    .color(theme::MUTED_TEXT),
                            )
                            .frame(false),
                        )
                        .on_hover_text("Forget all recorded runs")
                        .clicked()
                {
                    clear_clicked = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        state.show_history = false;
                    }
                });
            });
        });

    if clear_clicked {
        state.history.clear();
        state.save_session();
        state.status_message = "Run history cleared.".to_string();
    }
    if !open {
        state.show_history = false;
    }
}
