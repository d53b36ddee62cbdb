// Grazer Launcher - ui/panels/about.rs
//
// About dialog, reached from Help in the menu bar.

use crate::app::state::AppState;
use crate::util::constants::{APP_NAME, APP_VERSION};

/// Render the About dialog when `state.show_about` is set.
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_about {
        return;
    }

    let mut open = true;
    egui::Window::new("About")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(340.0);
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("\u{1f331}").size(30.0));
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(APP_NAME).size(22.0).strong());
                    ui.label(egui::RichText::new(format!("version {APP_VERSION}")).weak());
                });
            });

            ui.add_space(8.0);
            ui.label(
                "Desktop front-end for the grazer simulation engine: runs \
                 simulations and schema tools, streams their output live, and \
                 extracts the results table from the run log.",
            );

            ui.add_space(8.0);
            egui::Grid::new("about_binaries")
                .num_columns(2)
                .spacing([12.0, 2.0])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("grazer-launcher").monospace().small());
                    ui.label(egui::RichText::new("this application").small().weak());
                    ui.end_row();

                    ui.label(egui::RichText::new("csv-from-log").monospace().small());
                    ui.label(
                        egui::RichText::new("the same extraction as a pipe filter")
                            .small()
                            .weak(),
                    );
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.separator();
            ui.label(egui::RichText::new("MIT licensed. Built with egui.").small().weak());
            ui.add_space(4.0);
        });

    if !open {
        state.show_about = false;
    }
}
