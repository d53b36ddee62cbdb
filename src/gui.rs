// Grazer Launcher - gui.rs
//
// The eframe::App implementation: draws every panel once per frame and
// owns the launch lifecycle from Start click to recorded outcome.

use crate::app::launch::LaunchManager;
use crate::app::state::{AppState, GrazerStatus};
use crate::core::command::Invocation;
use crate::core::extract;
use crate::core::model::{ConsoleLine, LaunchProgress, RunRecord, StreamSource};
use crate::core::workspace;
use crate::ui;
use crate::util::constants::LAUNCH_REPAINT_INTERVAL_MS;
use chrono::Utc;

/// The Grazer Launcher application.
pub struct LauncherApp {
    pub state: AppState,
    pub launch_manager: LaunchManager,
}

impl LauncherApp {
    /// Build the application around an already-populated state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            launch_manager: LaunchManager::new(),
        }
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for launch progress.
        let messages = self.launch_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            match msg {
                LaunchProgress::Started {
                    program,
                    display_line,
                } => {
                    self.state.command_echo = Some(display_line);
                    self.state.status_message = format!(
                        "Running {}\u{2026}",
                        program
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("grazer")
                    );
                }
                LaunchProgress::Line(line) => {
                    self.state.push_console_line(line);
                }
                LaunchProgress::Completed { outcome } => {
                    self.state.run_in_progress = false;
                    self.state.status_message = format!(
                        "Run finished: {} in {:.1}s",
                        outcome.status,
                        outcome.duration.as_secs_f64()
                    );

                    // Parse the extracted block for the results table. A block
                    // that will not parse is still saveable as raw text.
                    self.state.results_table = match outcome.csv_block {
                        Some(ref block) => match extract::parse_csv_block(block) {
                            Ok(table) => Some(table),
                            Err(e) => {
                                tracing::warn!(error = %e, "Results block did not parse");
                                self.state
                                    .warnings
                                    .push(format!("Results block did not parse as CSV: {e}"));
                                None
                            }
                        },
                        None => None,
                    };

                    // Record the run in the history.
                    if let (Some(directory), Some(started)) = (
                        self.state.active_directory.clone(),
                        self.state.run_started_at,
                    ) {
                        self.state.push_history(RunRecord {
                            command: self.state.selected_command.cli_name().to_string(),
                            directory,
                            started,
                            duration: outcome.duration,
                            status: outcome.status,
                            had_csv_block: outcome.csv_block.is_some(),
                        });
                    }
                    self.state.last_outcome = Some(outcome);
                    // Runs create output/, schema commands create schemas/;
                    // re-read the directory so the workspace tab reflects that.
                    self.state.request_refresh_workspace = true;
                    self.state.save_session();
                }
                LaunchProgress::Failed { error } => {
                    self.state.run_in_progress = false;
                    self.state.status_message = format!("Launch failed: {error}");
                    // Spawn failures produce no child output; surface the
                    // error in the console so it is not just a status flash.
                    self.state.push_console_line(ConsoleLine {
                        source: StreamSource::Stderr,
                        text: error,
                    });
                }
            }
        }
        // Repaint while a run is active so output appears promptly.
        if had_messages || self.state.run_in_progress {
            ctx.request_repaint_after(std::time::Duration::from_millis(
                LAUNCH_REPAINT_INTERVAL_MS,
            ));
        }

        // ---- Handle flags set by panels ----
        // request_launch: the launch panel's Start button was pressed.
        if self.state.request_launch {
            self.state.request_launch = false;
            if !self.state.run_in_progress {
                self.start_requested_launch();
            }
        }
        // request_refresh_workspace: re-inspect the directory in the form.
        if self.state.request_refresh_workspace {
            self.state.request_refresh_workspace = false;
            self.refresh_workspace();
        }

        // Menu bar along the top edge.
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Choose Directory\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new().pick_folder() {
                            self.state.directory_input = path.display().to_string();
                            self.state.request_refresh_workspace = true;
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Run History").clicked() {
                        self.state.show_history = true;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar along the bottom edge.
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // RUNNING badge, shown while an invocation is active.
                if self.state.run_in_progress {
                    ui.label(
                        egui::RichText::new(" \u{25cf} RUNNING ")
                            .strong()
                            .color(ui::theme::RUNNING_BADGE)
                            .background_color(ui::theme::RUNNING_BADGE_BG),
                    );
                    ui.separator();
                }
                ui.label(&self.state.status_message);
                if !self.state.warnings.is_empty() {
                    ui.label(
                        egui::RichText::new(format!("\u{26a0} {}", self.state.warnings.len()))
                            .color(ui::theme::WARN_TEXT),
                    )
                    .on_hover_text(self.state.warnings.join("\n"));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.state.run_in_progress {
                        if let Some(started) = self.state.run_started_at {
                            let elapsed = Utc::now().signed_duration_since(started);
                            let secs = elapsed.num_milliseconds().max(0) as f64 / 1000.0;
                            ui.label(format!("{secs:.0}s"));
                        }
                    } else if let Some(ref outcome) = self.state.last_outcome {
                        ui.colored_label(
                            ui::theme::status_colour(&outcome.status),
                            outcome.status.to_string(),
                        );
                    }
                });
            });
        });

        // Results pane (bottom), only once a run has completed.
        if self.state.last_outcome.is_some() {
            egui::TopBottomPanel::bottom("results_pane")
                .resizable(true)
                .default_height(ui::theme::RESULTS_PANE_HEIGHT)
                .show(ctx, |ui| {
                    ui::panels::results::render(ui, &mut self.state);
                });
        }

        // Left sidebar: launch form on top, workspace listing below, each
        // in its own scroll area so long listings cannot push the form away.
        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                let available = ui.available_height();
                egui::ScrollArea::vertical()
                    .id_salt("sidebar_launch")
                    .max_height(available * 0.5)
                    .show(ui, |ui| {
                        ui::panels::launch::render(ui, &mut self.state);
                    });

                ui.separator();

                egui::ScrollArea::vertical()
                    .id_salt("sidebar_workspace")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::workspace::render(ui, &mut self.state);
                    });
            });

        // Central panel (console)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::console::render(ui, &mut self.state);
        });

        // Dialogs (modal-ish)
        ui::panels::history::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }

    /// eframe calls this as the window closes; persist the session so the
    /// next start can pick up where this one left off.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.save_session();
    }
}

impl LauncherApp {
    /// Resolve the executable and hand the invocation to the launch thread.
    fn start_requested_launch(&mut self) {
        let Some(directory) = self.state.form_directory() else {
            self.state.status_message = "Choose a grazer directory first.".to_string();
            return;
        };

        // Re-resolve on every launch; the executable may have appeared (or
        // moved) since the status was last drawn.
        self.state.refresh_grazer_status();
        let program = match &self.state.grazer_status {
            GrazerStatus::Found(path) => path.clone(),
            GrazerStatus::NotFound(detail) => {
                let detail = detail.clone();
                self.state.status_message =
                    "Grazer executable not found. Use Locate\u{2026} to point at it.".to_string();
                self.state.clear_run_output();
                self.state.push_console_line(ConsoleLine {
                    source: StreamSource::Stderr,
                    text: detail,
                });
                return;
            }
            GrazerStatus::Unknown => return,
        };

        self.state.clear_run_output();
        self.state.active_directory = Some(directory.clone());
        self.state.run_started_at = Some(Utc::now());
        self.state.run_in_progress = true;
        self.launch_manager.start_launch(Invocation::new(
            program,
            self.state.selected_command,
            directory,
        ));
    }

    /// Re-inspect the directory currently in the form.
    fn refresh_workspace(&mut self) {
        let Some(directory) = self.state.form_directory() else {
            self.state.workspace = None;
            return;
        };
        match workspace::inspect(&directory) {
            Ok(report) => {
                self.state.workspace = Some(report);
            }
            Err(e) => {
                tracing::debug!(
                    directory = %directory.display(),
                    error = %e,
                    "Workspace inspection failed"
                );
                self.state.workspace = None;
            }
        }
    }
}
