// Grazer Launcher - lib.rs
//
// Library entry point. The eframe application shell (`gui`) lives in
// main.rs; everything else, including the egui panels it draws, is exposed
// here for the two binaries and the integration tests.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
