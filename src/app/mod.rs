// Grazer Launcher - app/mod.rs
//
// Orchestration between the GUI and the domain: mutable state, the launch
// worker, and session persistence. Builds on core and platform; knows
// nothing about ui.

pub mod launch;
pub mod session;
pub mod state;
