// Grazer Launcher - ui/panels/workspace.rs
//
// Workspace tab for the left sidebar: a read-only snapshot of the grazer
// directory currently in the form.
//
// Shows the schema/data pairing table and a collapsible listing for each
// of the known subdirectories (problem/, schemas/, output/). Everything
// here is informational. The report never gates a launch.
//
// This panel writes `state.request_refresh_workspace`; gui.rs performs
// the actual directory walk.

use crate::app::state::AppState;
use crate::core::model::DirListing;
use crate::ui::theme;
use crate::util::constants::{
    OUTPUT_DIR_NAME, PROBLEM_DATA_FILE, PROBLEM_DIR_NAME, SCHEMAS_DIR_NAME,
};
use chrono::{DateTime, Datelike, Local, Utc};

/// Render the workspace tab (schema table + per-directory listings).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Workspace").small().strong());
        let has_dir = state.form_directory().is_some();
        if ui
            .add_enabled(has_dir, egui::Button::new(egui::RichText::new("Refresh").small()).small())
            .on_hover_text("Re-read the directory contents")
            .clicked()
        {
            state.request_refresh_workspace = true;
        }
    });

    let Some(ref report) = state.workspace else {
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new(
                "Choose a grazer directory to see its problem, schemas \
                 and output contents here.",
            )
            .small()
            .weak(),
        );
        return;
    };

    ui.label(
        egui::RichText::new(report.root.display().to_string())
            .small()
            .weak(),
    );
    ui.add_space(4.0);

    // -------------------------------------------------------------------------
    // Schema/data pairing table. One row per grazer data category showing
    // whether the schema file and the problem data file exist.
    // -------------------------------------------------------------------------
    egui::Grid::new("workspace_schema_status")
        .num_columns(3)
        .spacing([12.0, 2.0])
        .show(ui, |ui| {
            ui.label(egui::RichText::new("type").small().weak());
            ui.label(egui::RichText::new("schema").small().weak());
            ui.label(egui::RichText::new("data").small().weak());
            ui.end_row();

            for status in &report.schema_status {
                ui.label(egui::RichText::new(status.schema_type).small().monospace());
                presence_mark(ui, status.schema_file);
                presence_mark(ui, status.data_file);
                ui.end_row();
            }
        });
    ui.add_space(6.0);

    // -------------------------------------------------------------------------
    // Per-directory listings. problem/ opens by default since it is the one
    // the user prepares by hand; the others matter after schema generation
    // or a run.
    // -------------------------------------------------------------------------
    render_dir_listing(ui, PROBLEM_DIR_NAME, &report.problem, true);
    render_dir_listing(ui, SCHEMAS_DIR_NAME, &report.schemas, false);
    render_dir_listing(ui, OUTPUT_DIR_NAME, &report.output, false);

    // Warnings badge.
    if !report.warnings.is_empty() {
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new(format!(
                "{} warning{}",
                report.warnings.len(),
                if report.warnings.len() == 1 { "" } else { "s" }
            ))
            .small()
            .color(theme::WARN_TEXT),
        )
        .on_hover_text(report.warnings.join("\n"));
    }

    ui.add_space(4.0);
    if ui
        .add(
            egui::Button::new(
                egui::RichText::new("Open in file manager")
                    .small()
                    .color(theme::MUTED_TEXT),
            )
            .small()
            .frame(false),
        )
        .on_hover_text("Open the grazer directory in your file manager")
        .clicked()
    {
        crate::platform::exe::open_in_file_manager(&report.root);
    }
}

/// Tick or cross cell for the schema pairing table.
fn presence_mark(ui: &mut egui::Ui, present: bool) {
    if present {
        ui.colored_label(theme::OK_TEXT, "\u{2713}");
    } else {
        ui.colored_label(theme::DISABLED_TEXT, "\u{2717}");
    }
}

/// One collapsible subdirectory section with its file rows.
fn render_dir_listing(ui: &mut egui::Ui, name: &str, listing: &DirListing, default_open: bool) {
    let heading = if !listing.present {
        format!("{name}/ (missing)")
    } else {
        format!(
            "{name}/ ({} file{})",
            listing.files.len(),
            if listing.files.len() == 1 { "" } else { "s" }
        )
    };

    egui::CollapsingHeader::new(egui::RichText::new(heading).small().strong())
        .id_salt(format!("workspace_dir_{name}"))
        .default_open(default_open && listing.present)
        .show(ui, |ui| {
            if !listing.present {
                ui.label(
                    egui::RichText::new("Directory does not exist yet.")
                        .small()
                        .weak(),
                );
                return;
            }
            if listing.files.is_empty() {
                ui.label(egui::RichText::new("Empty.").small().weak());
                return;
            }
            for file in &listing.files {
                ui.horizontal(|ui| {
                    let file_name = file.file_name();
                    // grazer's entry point; make it easy to spot.
                    let mut text = egui::RichText::new(&file_name).small().monospace();
                    if name == PROBLEM_DIR_NAME && file_name == PROBLEM_DATA_FILE {
                        text = text.strong();
                    }
                    ui.label(text).on_hover_text(format!(
                        "{}\n{}",
                        file.path.display(),
                        format_size(file.size)
                    ));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let mtime = format_mtime(file.modified);
                        if !mtime.is_empty() {
                            ui.label(egui::RichText::new(mtime).small().weak());
                        }
                        ui.label(egui::RichText::new(format_size(file.size)).small().weak());
                    });
                });
            }
            if listing.truncated {
                ui.label(
                    egui::RichText::new("Listing truncated.")
                        .small()
                        .color(theme::WARN_TEXT),
                );
            }
        });
}

/// Byte count with a binary-unit suffix and one decimal place.
fn format_size(bytes: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1 << 30, "GB"), (1 << 20, "MB"), (1 << 10, "KB")];
    for (scale, unit) in UNITS {
        if bytes >= scale {
            return format!("{:.1} {unit}", bytes as f64 / scale as f64);
        }
    }
    format!("{bytes} B")
}

/// Modification time in local time, as compact as the age allows: time of
/// day for today, day and month within the current year, full date beyond
/// that. `None` renders as an empty cell.
fn format_mtime(modified: Option<DateTime<Utc>>) -> String {
    let Some(mtime) = modified else {
        return String::new();
    };
    let local = mtime.with_timezone(&Local);
    let now = Local::now();
    let pattern = if local.date_naive() == now.date_naive() {
        "%H:%M:%S"
    } else if local.year() == now.year() {
        // %e pads single-digit days with a space; trim it off.
        "%e %b %H:%M"
    } else {
        "%Y-%m-%d"
    };
    local.format(pattern).to_string().trim_start().to_string()
}
