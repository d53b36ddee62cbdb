// Grazer Launcher - ui/panels/results.rs
//
// Bottom results pane: outcome of the most recent run and the simulation
// CSV block rendered as a table.
//
// The table is a preview. At most MAX_RESULT_ROWS rows are rendered;
// "Save CSV" writes the captured block verbatim, so nothing shown here
// ever re-encodes the data.

use crate::app::state::AppState;
use crate::ui::theme;

/// Maximum number of data rows rendered in the preview table.
const MAX_RESULT_ROWS: usize = 500;

/// Render the results pane (only called once a run has completed).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    // The save dialog is collected here and applied after rendering so the
    // status-message write does not conflict with the outcome borrow.
    let mut save_requested = false;

    let Some(ref outcome) = state.last_outcome else {
        return;
    };

    // Header row: status, duration, truncation notice, Save button.
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Results").strong());
        ui.label(
            egui::RichText::new(outcome.status.to_string())
                .color(theme::status_colour(&outcome.status)),
        );
        ui.label(
            egui::RichText::new(format!("{:.1}s", outcome.duration.as_secs_f64()))
                .small()
                .weak(),
        );
        if outcome.capture_truncated {
            ui.label(
                egui::RichText::new("capture truncated")
                    .small()
                    .color(theme::WARN_TEXT),
            )
            .on_hover_text(
                "Grazer printed more than the capture limit. The console saw \
                 every line but the extracted data block may be incomplete.",
            );
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(
                    outcome.csv_block.is_some(),
                    egui::Button::new(egui::RichText::new("Save CSV\u{2026}").small()).small(),
                )
                .on_hover_text("Write the extracted data block to a file, byte for byte")
                .clicked()
            {
                save_requested = true;
            }
        });
    });

    if outcome.csv_block.is_none() {
        ui.label(
            egui::RichText::new(
                "No simulation data block in the output. Schema commands do \
                 not produce one.",
            )
            .small()
            .weak(),
        );
    } else if let Some(ref table) = state.results_table {
        if table.is_empty() {
            ui.label(
                egui::RichText::new("The data block between the markers was empty.")
                    .small()
                    .weak(),
            );
        } else {
            let shown = table.rows.len().min(MAX_RESULT_ROWS);
            ui.label(
                egui::RichText::new(format!(
                    "{} column{}, {} row{}",
                    table.headers.len(),
                    if table.headers.len() == 1 { "" } else { "s" },
                    table.rows.len(),
                    if table.rows.len() == 1 { "" } else { "s" }
                ))
                .small()
                .weak(),
            );

            egui::ScrollArea::both()
                .id_salt("results_table")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    egui::Grid::new("results_grid")
                        .num_columns(table.headers.len())
                        .striped(true)
                        .spacing([14.0, 2.0])
                        .show(ui, |ui| {
                            for header in &table.headers {
                                ui.label(
                                    egui::RichText::new(header).strong().monospace().size(11.5),
                                );
                            }
                            ui.end_row();

                            for row in table.rows.iter().take(MAX_RESULT_ROWS) {
                                for cell in row {
                                    ui.label(egui::RichText::new(cell).monospace().size(11.5));
                                }
                                ui.end_row();
                            }
                        });

                    if table.rows.len() > shown {
                        ui.label(
                            egui::RichText::new(format!(
                                "... and {} more rows (Save CSV to get everything)",
                                table.rows.len() - shown
                            ))
                            .weak()
                            .small()
                            .italics(),
                        );
                    }
                });
        }
    } else {
        ui.label(
            egui::RichText::new(
                "The captured block did not parse as CSV. Save it to inspect \
                 the raw text.",
            )
            .small()
            .color(theme::WARN_TEXT),
        );
    }

    if save_requested {
        let block = state
            .last_outcome
            .as_ref()
            .and_then(|o| o.csv_block.clone());
        if let Some(block) = block {
            save_csv_block(state, &block);
        }
    }
}

/// Ask for a destination and write the raw block to it.
fn save_csv_block(state: &mut AppState, block: &str) {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name("results.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };
    match std::fs::write(&path, block) {
        Ok(()) => {
            tracing::info!(path = %path.display(), bytes = block.len(), "Saved CSV block");
            state.status_message = format!("Saved results to {}", path.display());
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save CSV block");
            state.status_message = format!("Cannot save results: {e}");
        }
    }
}
