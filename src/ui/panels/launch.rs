// Grazer Launcher - ui/panels/launch.rs
//
// Launch form for the left sidebar: directory field, subcommand selector,
// executable status, and the Start button.
//
// The form deliberately does not validate the directory. Grazer owns its
// own failure modes; whatever it prints on a bad directory lands in the
// console exactly as it would on a terminal.
//
// This panel writes `state.request_launch` and
// `state.request_refresh_workspace`; gui.rs consumes them each frame.
// No direct process spawning or LaunchManager access here.

use crate::app::state::{AppState, GrazerStatus};
use crate::core::command::GrazerCommand;
use crate::ui::theme;

/// Render the launch form (directory, subcommand, Start).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    // -------------------------------------------------------------------------
    // Directory
    // -------------------------------------------------------------------------
    ui.label(egui::RichText::new("Grazer directory:").small().strong());
    ui.horizontal(|ui| {
        let resp = ui.add_enabled(
            !state.run_in_progress,
            egui::TextEdit::singleline(&mut state.directory_input)
                .hint_text("Path to a grazer directory")
                .desired_width(ui.available_width() - 70.0),
        );
        if resp.changed() {
            // The old report describes a directory no longer in the form.
            state.workspace = None;
        }
        if ui
            .add_enabled(!state.run_in_progress, egui::Button::new("Browse\u{2026}"))
            .on_hover_text("Pick the grazer directory (the one containing 'problem')")
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new().pick_folder() {
                state.directory_input = path.display().to_string();
                state.request_refresh_workspace = true;
            }
        }
    });
    ui.label(
        egui::RichText::new(
            "Passed to grazer as-is. Grazer reports its own errors if the \
             directory is not usable.",
        )
        .small()
        .weak(),
    );

    ui.add_space(8.0);

    // -------------------------------------------------------------------------
    // Subcommand
    // -------------------------------------------------------------------------
    ui.label(egui::RichText::new("Command:").small().strong());
    for &cmd in GrazerCommand::all() {
        ui.add_enabled_ui(!state.run_in_progress, |ui| {
            ui.radio_value(&mut state.selected_command, cmd, cmd.label())
                .on_hover_text(cmd.description());
        });
    }
    ui.add_space(2.0);
    ui.label(
        egui::RichText::new(state.selected_command.description())
            .small()
            .weak(),
    );

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    // -------------------------------------------------------------------------
    // Executable status
    // -------------------------------------------------------------------------
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Executable:").small().strong());
        match &state.grazer_status {
            GrazerStatus::Found(path) => {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("grazer");
                ui.label(
                    egui::RichText::new(format!("\u{2713} {name}"))
                        .small()
                        .color(theme::OK_TEXT),
                )
                .on_hover_text(path.display().to_string());
            }
            GrazerStatus::NotFound(detail) => {
                ui.label(
                    egui::RichText::new("\u{2717} not found")
                        .small()
                        .color(theme::ERROR_TEXT),
                )
                .on_hover_text(detail.as_str());
            }
            GrazerStatus::Unknown => {
                ui.label(egui::RichText::new("checking\u{2026}").small().weak());
            }
        }
        if ui
            .add(egui::Button::new(egui::RichText::new("Locate\u{2026}").small()).small())
            .on_hover_text("Point the launcher at a specific grazer executable")
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new().pick_file() {
                state.grazer_override = Some(path);
                state.refresh_grazer_status();
            }
        }
    });
    if let Some(over) = state.grazer_override.clone() {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("override: {}", over.display()))
                    .small()
                    .weak(),
            );
            if ui
                .add(
                    egui::Button::new(
                        egui::RichText::new("\u{d7}")
                            .small()
                            .color(theme::MUTED_TEXT),
                    )
                    .small()
                    .frame(false),
                )
                .on_hover_text("Clear the override and search the usual locations again")
                .clicked()
            {
                state.grazer_override = None;
                state.refresh_grazer_status();
            }
        });
    }

    ui.add_space(8.0);

    // -------------------------------------------------------------------------
    // Start / running indicator
    // -------------------------------------------------------------------------
    if state.run_in_progress {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Running\u{2026}");
        });
        ui.label(
            egui::RichText::new(
                "Grazer runs to completion; the form unlocks when it exits.",
            )
            .small()
            .weak(),
        );
    } else {
        let has_dir = state.form_directory().is_some();
        if ui
            .add_enabled(has_dir, egui::Button::new("Start"))
            .on_hover_text("Run the selected command on this directory")
            .on_disabled_hover_text("Choose a grazer directory first")
            .clicked()
        {
            state.request_launch = true;
        }
    }
}
