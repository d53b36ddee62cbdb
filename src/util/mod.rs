// Grazer Launcher - util/mod.rs
//
// Leaf modules every layer may use: named constants, error types, and the
// logging setup. Depends on no other layer.

pub mod constants;
pub mod error;
pub mod logging;
