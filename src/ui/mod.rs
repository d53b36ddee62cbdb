// Grazer Launcher - ui/mod.rs
//
// Presentation only: egui panels plus the shared theme. Reads app state
// and core models; the launch and workspace panels are the only ones that
// touch the filesystem, and only through rfd dialogs and the reveal
// helper.

pub mod panels;
pub mod theme;
