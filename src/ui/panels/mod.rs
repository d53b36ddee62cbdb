// Grazer Launcher - ui/panels/mod.rs

pub mod about;
pub mod console;
pub mod history;
pub mod launch;
pub mod results;
pub mod workspace;
