// Grazer Launcher - platform/mod.rs
//
// Everything that differs per OS: per-user directories, config.toml, and
// locating external executables. Depends on the standard library and the
// directories crate; never on core, app, or ui.

pub mod config;
pub mod exe;
