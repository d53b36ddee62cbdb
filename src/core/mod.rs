// Grazer Launcher - core/mod.rs
//
// Domain logic, kept pure: the command model, the marker extraction, and
// the workspace report. Uses the standard library and data/parsing crates
// only; nothing in here may reach for ui, platform, app, or a GUI crate.

pub mod command;
pub mod extract;
pub mod model;
pub mod workspace;
