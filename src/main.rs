// Grazer Launcher - main.rs
//
// Application entry point: CLI parsing, config and session loading,
// logging initialisation, and the eframe GUI launch.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// The binary re-exports the library modules so gui.rs can keep crate-local
// paths (`crate::app::...`, `crate::core::...`).
pub use grazer_launcher::app;

pub use grazer_launcher::core;
pub use grazer_launcher::platform;
pub use grazer_launcher::ui;
pub use grazer_launcher::util;

use crate::core::command::GrazerCommand;
use clap::Parser;
use std::path::PathBuf;

/// Window icon, baked into the binary so it is available regardless of the
/// working directory at runtime.
static ICON_PNG: &[u8] = include_bytes!("../assets/icon.png");

/// Decode the embedded icon for the eframe viewport.
///
/// A decode failure degrades to a blank 1x1 icon; the application launches
/// either way.
fn load_icon() -> egui::IconData {
    match image::load_from_memory_with_format(ICON_PNG, image::ImageFormat::Png) {
        Ok(img) => {
            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            egui::IconData {
                rgba: rgba.into_raw(),
                width,
                height,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Embedded icon failed to decode; window gets a blank icon");
            egui::IconData {
                rgba: vec![0u8; 4],
                width: 1,
                height: 1,
            }
        }
    }
}

/// Register the Segoe UI family on Windows so ticks, arrows and other
/// symbols in grazer's console output render as real glyphs instead of
/// replacement squares. egui's built-in fonts stay registered as final
/// fallbacks. On other platforms the defaults are left alone.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        const SYSTEM_FONTS: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut fonts = egui::FontDefinitions::default();
        let mut loaded: Vec<String> = Vec::new();
        for (name, path) in SYSTEM_FONTS {
            let data = match std::fs::read(path) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(font = name, error = %e, "System font unavailable");
                    continue;
                }
            };
            fonts
                .font_data
                .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
            loaded.push((*name).to_owned());
        }
        if loaded.is_empty() {
            return;
        }

        // Proportional text prefers the system fonts, with the egui default
        // kept last. For monospace they are appended after the primary face
        // so console column alignment is untouched.
        if let Some(family) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
            for (i, name) in loaded.iter().enumerate() {
                family.insert(i, name.clone());
            }
        }
        if let Some(family) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
            family.extend(loaded.iter().cloned());
        }

        tracing::info!(fonts = ?loaded, "Windows system fonts configured");
        ctx.set_fonts(fonts);
    }

    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// Grazer Launcher - desktop front-end for the grazer simulation engine.
///
/// Pick a grazer directory and a subcommand, press Start, and watch the
/// engine's output live. Simulation results are extracted and shown as a
/// table when the run finishes.
#[derive(Parser, Debug)]
#[command(name = "grazer-launcher", version, about)]
struct Cli {
    /// Grazer directory to prefill in the form.
    directory: Option<PathBuf>,

    /// Path to the grazer executable (overrides config and PATH lookup).
    #[arg(short = 'g', long = "grazer")]
    grazer: Option<PathBuf>,

    /// Subcommand to preselect: "run", "schema make-full-factory" or
    /// "schema insert-key". The launch still waits for the Start button.
    #[arg(short = 'c', long = "command")]
    command: Option<String>,

    /// Verbose logging (same as RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config before logging init so the
    // configured level can participate in the priority chain.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "Grazer Launcher starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config validation warning");
    }

    // Seed the UI state from config and CLI.
    let mut state = app::state::AppState::new(cli.debug);
    state.configured_grazer = config.grazer_executable.clone();
    state.grazer_override = cli.grazer.clone();
    state.warnings = config_warnings;

    // Restore the previous session (directory, command, history), then let
    // CLI arguments override what it restored.
    let session_file = app::session::session_path(&platform_paths.data_dir);
    if let Some(data) = app::session::load(&session_file) {
        state.restore_session(data);
    }
    state.session_file = Some(session_file);

    if let Some(ref dir) = cli.directory {
        state.directory_input = dir.display().to_string();
    }
    if let Some(ref command) = cli.command {
        match GrazerCommand::parse_cli_name(command) {
            Some(cmd) => state.selected_command = cmd,
            None => {
                tracing::warn!(command = %command, "Unknown --command value ignored");
                state
                    .warnings
                    .push(format!("Unknown --command value \"{command}\" ignored."));
            }
        }
    }

    state.refresh_grazer_status();
    if state.form_directory().is_some() {
        state.request_refresh_workspace = true;
    }

    tracing::info!("Ready to launch GUI");

    // Window icon. build.rs embeds the .ico as a Windows EXE resource
    // (taskbar, Alt+Tab, Explorer); the PNG decoded here feeds the eframe
    // viewport and is the only icon source on Linux and macOS.
    let icon_data = load_icon();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 480.0])
            .with_icon(icon_data),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            // Scale every text style proportionally so heading/monospace
            // ratios survive a custom font size.
            if (font_size - util::constants::DEFAULT_FONT_SIZE).abs() > f32::EPSILON {
                let scale = font_size / util::constants::DEFAULT_FONT_SIZE;
                let mut style = (*cc.egui_ctx.style()).clone();
                for font_id in style.text_styles.values_mut() {
                    font_id.size *= scale;
                }
                cc.egui_ctx.set_style(style);
            }
            Ok(Box::new(gui::LauncherApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "GUI terminated with an error");
        eprintln!("Error: Grazer Launcher could not start its window: {e}");
        std::process::exit(1);
    }
}
